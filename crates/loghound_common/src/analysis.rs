//! Core analysis types: detected issues and the final diagnosis.

use serde::{Deserialize, Serialize};

/// Upper bound on evidence lines collected per issue.
pub const MAX_EVIDENCE_LINES: usize = 8;

/// A detected candidate diagnosis with supporting evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Category of the pattern that matched (e.g. "memory", "timeout").
    pub category: String,

    /// Human-readable explanation for the match.
    pub reason: String,

    /// Raw log lines supporting the issue, first-found order, original
    /// casing preserved (trimmed). At most [`MAX_EVIDENCE_LINES`].
    pub evidence: Vec<String>,

    /// Every keyword from the pattern found anywhere in the log text.
    pub keyword_hits: Vec<String>,
}

/// Final diagnosis for one analysis request.
///
/// `issues` always carries the full ranked list, whichever tier produced
/// the summary, and is never empty: unmatched logs yield a synthetic
/// "unknown" issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Diagnosis text from the tier that resolved the request.
    pub summary: String,

    /// Category of the highest-ranked issue.
    pub top_category: String,

    /// Confidence in [0.0, 1.0], reflecting which tier answered.
    pub confidence: f64,

    /// All detected issues, highest-ranked first.
    pub issues: Vec<Issue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_result_serializes_with_wire_field_names() {
        let result = AnalysisResult {
            summary: "Root cause: disk full. Fix: free space".to_string(),
            top_category: "disk".to_string(),
            confidence: 0.9,
            issues: vec![Issue {
                category: "disk".to_string(),
                reason: "Disk/storage issue detected (space, IO).".to_string(),
                evidence: vec!["ERROR: No space left on device".to_string()],
                keyword_hits: vec!["no space left on device".to_string()],
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["top_category"], "disk");
        assert_eq!(json["confidence"], 0.9);
        assert_eq!(json["issues"][0]["category"], "disk");
        assert_eq!(json["issues"][0]["keyword_hits"][0], "no space left on device");
    }

    #[test]
    fn analysis_result_round_trips() {
        let result = AnalysisResult {
            summary: "s".to_string(),
            top_category: "unknown".to_string(),
            confidence: 0.25,
            issues: vec![Issue {
                category: "unknown".to_string(),
                reason: "r".to_string(),
                evidence: vec![],
                keyword_hits: vec![],
            }],
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
