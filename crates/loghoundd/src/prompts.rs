//! Prompt building for the advisory tier.

use loghound_common::Issue;
use std::fmt::Write;

/// System prompt for advisory generation. The format contract is strict:
/// the parser discards anything that is not the demanded JSON object.
pub const ADVISORY_SYSTEM_PROMPT: &str = r#"You are a log analysis assistant for service operators.
You are given the issues detected in an application log, ranked by evidential strength.
Identify the most likely root cause and concrete remediation steps.

Respond with EXACTLY ONE JSON object of this shape:
{"root_cause": "<one-sentence root cause>", "fix_steps": ["<step>", "..."], "confidence": <number between 0 and 1>}

Do not write any prose, markdown, or explanation outside the JSON object."#;

/// Build the user prompt embedding the full ranked issue list.
pub fn build_advisory_prompt(
    issues: &[Issue],
    app_name: Option<&str>,
    environment: Option<&str>,
) -> String {
    let mut prompt = String::new();

    if let Some(app) = app_name {
        let _ = writeln!(prompt, "Application: {}", app);
    }
    if let Some(env) = environment {
        let _ = writeln!(prompt, "Environment: {}", env);
    }

    let _ = writeln!(prompt, "Detected issues, strongest first:");
    for (idx, issue) in issues.iter().enumerate() {
        let _ = writeln!(prompt, "{}. [{}] {}", idx + 1, issue.category, issue.reason);
        if !issue.keyword_hits.is_empty() {
            let _ = writeln!(prompt, "   matched keywords: {}", issue.keyword_hits.join(", "));
        }
        for line in &issue.evidence {
            let _ = writeln!(prompt, "   evidence: {}", line);
        }
    }

    prompt.push_str("\nWhat is the most likely root cause, and how should the operator fix it?");
    prompt
}
