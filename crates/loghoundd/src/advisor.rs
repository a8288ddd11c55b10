//! Advisory generation - the generative tier of the resolution pipeline.
//!
//! Asks the model for a structured explanation of the ranked issues and
//! validates the untrusted reply. Any failure - transport, timeout, HTTP
//! error, garbage output - resolves to `None` so the orchestrator can fall
//! back. This tier never returns an error and never retries.

use crate::llm::LlmClient;
use crate::prompts;
use loghound_common::Issue;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Confidence assumed when the model omits one.
pub const DEFAULT_ADVISORY_CONFIDENCE: f64 = 0.65;

/// Structured, validated explanation from the generative tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub root_cause: String,
    pub fix_steps: Vec<String>,
    pub confidence: f64,
}

/// Wraps the LLM client with prompt construction and reply validation.
pub struct AdvisoryGenerator {
    client: Arc<dyn LlmClient>,
    default_confidence: f64,
}

impl AdvisoryGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            default_confidence: DEFAULT_ADVISORY_CONFIDENCE,
        }
    }

    pub fn with_default_confidence(mut self, confidence: f64) -> Self {
        self.default_confidence = confidence;
        self
    }

    /// Ask the model to explain the ranked issues.
    ///
    /// `None` is the definitive "unavailable" signal.
    pub async fn generate(
        &self,
        issues: &[Issue],
        app_name: Option<&str>,
        environment: Option<&str>,
    ) -> Option<Advisory> {
        let user_prompt = prompts::build_advisory_prompt(issues, app_name, environment);

        let raw = match self
            .client
            .generate(prompts::ADVISORY_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!("Advisory tier unavailable: {}", err);
                return None;
            }
        };

        match parse_advisory(&raw, self.default_confidence) {
            Some(advisory) => {
                info!(
                    "Advisory generated (confidence {:.2}): {}",
                    advisory.confidence, advisory.root_cause
                );
                Some(advisory)
            }
            None => {
                warn!("Discarding malformed advisory reply ({} chars)", raw.len());
                None
            }
        }
    }
}

/// Two-phase parse of an untrusted model reply.
///
/// Phase 1 parses the entire trimmed text; phase 2 retries on the substring
/// from the first `{` to the last `}`. A reply that parses but carries
/// neither `root_cause` nor `fix_steps` is discarded.
pub fn parse_advisory(raw: &str, default_confidence: f64) -> Option<Advisory> {
    let trimmed = raw.trim();

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => serde_json::from_str(extract_json(trimmed)?).ok()?,
    };

    let root_cause = value.get("root_cause");
    let fix_steps = value.get("fix_steps");
    if root_cause.is_none() && fix_steps.is_none() {
        return None;
    }

    let confidence = value
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(default_confidence)
        .clamp(0.0, 1.0);

    Some(Advisory {
        root_cause: root_cause
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
        fix_steps: normalize_fix_steps(fix_steps),
        confidence,
    })
}

/// Substring from the first `{` through the last `}`, inclusive.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// `fix_steps` may arrive as an array or as a scalar.
fn normalize_fix_steps(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(stringify)
            .filter(|step| !step.is_empty())
            .collect(),
        Some(scalar) => vec![stringify(scalar)],
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}
