//! Request/response types for the daemon HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Raw log text to diagnose.
    pub log_text: String,

    /// Optional application name, forwarded into advisory prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Optional deployment environment (e.g. "prod", "staging").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Response of `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub patterns_loaded: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_optional_fields_default() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"log_text": "boom"}"#).unwrap();
        assert_eq!(req.log_text, "boom");
        assert!(req.app_name.is_none());
        assert!(req.environment.is_none());
    }

    #[test]
    fn analyze_request_omits_absent_metadata() {
        let req = AnalyzeRequest {
            log_text: "boom".to_string(),
            app_name: None,
            environment: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("app_name"));
        assert!(!json.contains("environment"));
    }
}
