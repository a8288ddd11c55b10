//! Issue detection - scans raw log text against the pattern catalog.
//!
//! Pure functions of the input text: membership is decided on the
//! lowercased whole text, evidence is collected by rescanning the original
//! lines so operators see the log as it was written.

use crate::patterns::PatternCatalog;
use loghound_common::{Issue, MAX_EVIDENCE_LINES};

/// Category emitted when no pattern matches.
pub const UNKNOWN_CATEGORY: &str = "unknown";

const UNKNOWN_REASON: &str =
    "No known error pattern detected. Need more context or different logs.";

/// Vocabulary used to collect evidence for the synthetic unknown issue.
const GENERIC_ERROR_TERMS: [&str; 4] = ["error", "exception", "failed", "fatal"];

/// Detect candidate issues in raw log text.
///
/// Returns one issue per matching pattern, in catalog order. When nothing
/// matches, returns a single "unknown" issue so the result is never empty.
pub fn detect_issues(log_text: &str, catalog: &PatternCatalog) -> Vec<Issue> {
    let lowered = log_text.to_lowercase();
    let mut issues = Vec::new();

    for pattern in &catalog.patterns {
        let hits: Vec<String> = pattern
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(keyword.as_str()))
            .cloned()
            .collect();

        if hits.is_empty() {
            continue;
        }

        let keywords: Vec<&str> = pattern.keywords.iter().map(String::as_str).collect();
        issues.push(Issue {
            category: pattern.category.clone(),
            reason: pattern.reason.clone(),
            evidence: evidence_lines(log_text, &keywords),
            keyword_hits: hits,
        });
    }

    if issues.is_empty() {
        issues.push(Issue {
            category: UNKNOWN_CATEGORY.to_string(),
            reason: UNKNOWN_REASON.to_string(),
            evidence: evidence_lines(log_text, &GENERIC_ERROR_TERMS),
            keyword_hits: Vec::new(),
        });
    }

    issues
}

/// First [`MAX_EVIDENCE_LINES`] lines whose lowercased content contains any
/// of the keywords, trimmed but otherwise as written.
fn evidence_lines(log_text: &str, keywords: &[&str]) -> Vec<String> {
    let mut hits = Vec::new();

    for line in log_text.lines() {
        let lowered = line.to_lowercase();
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            hits.push(line.trim().to_string());
        }
        if hits.len() >= MAX_EVIDENCE_LINES {
            break;
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(log_text: &str) -> Vec<Issue> {
        detect_issues(log_text, &PatternCatalog::builtin())
    }

    #[test]
    fn detects_memory_issue_with_original_casing() {
        let log = "INFO starting up\njava.lang.OutOfMemoryError: Java heap space\nINFO done";
        let issues = detect(log);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, "memory");
        assert_eq!(
            issues[0].evidence,
            vec!["java.lang.OutOfMemoryError: Java heap space".to_string()]
        );
        assert!(issues[0].keyword_hits.contains(&"outofmemoryerror".to_string()));
        assert!(issues[0].keyword_hits.contains(&"heap space".to_string()));
    }

    #[test]
    fn keyword_hits_cover_whole_text_not_just_evidence() {
        // More matching lines than the evidence cap; hits still reflect
        // every keyword present anywhere.
        let mut log = String::new();
        for i in 0..20 {
            log.push_str(&format!("request {} read timeout\n", i));
        }
        log.push_str("final connect timeout while flushing\n");

        let issues = detect(&log);
        let timeout = issues.iter().find(|i| i.category == "timeout").unwrap();

        assert_eq!(timeout.evidence.len(), MAX_EVIDENCE_LINES);
        assert!(timeout.keyword_hits.contains(&"connect timeout".to_string()));
        assert!(timeout.keyword_hits.contains(&"read timeout".to_string()));
    }

    #[test]
    fn evidence_is_capped_at_eight_lines() {
        let log = "disk full\n".repeat(30);
        let issues = detect(&log);
        assert_eq!(issues[0].evidence.len(), MAX_EVIDENCE_LINES);
    }

    #[test]
    fn every_evidence_line_contains_a_pattern_keyword() {
        let log = "db timeout\nall good here\nanother TIMEOUT while reading\nclean line";
        let issues = detect(log);
        let timeout = issues.iter().find(|i| i.category == "timeout").unwrap();

        assert_eq!(timeout.evidence.len(), 2);
        for line in &timeout.evidence {
            assert!(line.to_lowercase().contains("timeout"));
        }
    }

    #[test]
    fn evidence_lines_are_trimmed() {
        let log = "   Connection reset by peer   \n";
        let issues = detect(log);
        let network = issues.iter().find(|i| i.category == "network").unwrap();
        assert_eq!(network.evidence, vec!["Connection reset by peer".to_string()]);
    }

    #[test]
    fn unmatched_log_yields_single_unknown_issue() {
        let issues = detect("hello world\nnothing to see");

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, UNKNOWN_CATEGORY);
        assert!(issues[0].keyword_hits.is_empty());
        assert!(issues[0].evidence.is_empty());
    }

    #[test]
    fn unknown_issue_collects_generic_error_evidence() {
        let log = "step one ok\nFATAL: widget exploded\nprocess failed with code 3";
        let issues = detect(log);

        assert_eq!(issues[0].category, UNKNOWN_CATEGORY);
        assert_eq!(
            issues[0].evidence,
            vec![
                "FATAL: widget exploded".to_string(),
                "process failed with code 3".to_string()
            ]
        );
    }

    #[test]
    fn multiple_patterns_detected_in_catalog_order() {
        let log = "read timeout talking to database\nsql deadlock detected";
        let issues = detect(log);

        let categories: Vec<&str> = issues.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(categories, vec!["timeout", "database"]);
    }

    #[test]
    fn empty_input_yields_unknown_with_no_evidence() {
        let issues = detect("");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, UNKNOWN_CATEGORY);
        assert!(issues[0].evidence.is_empty());
    }
}
