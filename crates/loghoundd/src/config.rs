//! Configuration management for loghoundd.
//!
//! Loads settings from /etc/loghound/config.toml or uses defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default config file path.
pub const CONFIG_PATH: &str = "/etc/loghound/config.toml";

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address. Localhost only by default.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Maximum accepted log size in characters; larger requests are
    /// rejected before the pipeline runs.
    #[serde(default = "default_max_log_chars")]
    pub max_log_chars: usize,
}

fn default_listen_addr() -> String {
    "127.0.0.1:7171".to_string()
}

fn default_max_log_chars() -> usize {
    1_000_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_log_chars: default_max_log_chars(),
        }
    }
}

/// Generative-model settings for the advisory tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// When false the advisory tier reports unavailable without a
    /// network call and every request resolves through the fallbacks.
    #[serde(default = "default_llm_enabled")]
    pub enabled: bool,

    /// Ollama-style API endpoint.
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model identifier passed with each request.
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Bound on a single advisory call. There is no retry; on timeout the
    /// request falls through to the knowledge-base tier.
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_enabled() -> bool {
    true
}

fn default_llm_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_llm_model() -> String {
    "qwen2.5:7b-instruct".to_string()
}

fn default_llm_timeout() -> u64 {
    20
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_llm_enabled(),
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Knowledge-base table location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbConfig {
    #[serde(default = "default_kb_path")]
    pub path: PathBuf,
}

fn default_kb_path() -> PathBuf {
    PathBuf::from("data/error_kb.json")
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            path: default_kb_path(),
        }
    }
}

/// Per-tier confidence constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Used when the model reply omits a confidence.
    #[serde(default = "default_advisory_confidence")]
    pub advisory_default: f64,

    /// Fixed confidence of the knowledge-base tier.
    #[serde(default = "default_kb_confidence")]
    pub kb_fallback: f64,

    /// Fixed confidence of the raw-heuristic tier.
    #[serde(default = "default_heuristic_confidence")]
    pub heuristic_fallback: f64,
}

fn default_advisory_confidence() -> f64 {
    0.65
}

fn default_kb_confidence() -> f64 {
    0.50
}

fn default_heuristic_confidence() -> f64 {
    0.25
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            advisory_default: default_advisory_confidence(),
            kb_fallback: default_kb_confidence(),
            heuristic_fallback: default_heuristic_confidence(),
        }
    }
}

/// Optional pattern-catalog override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternsConfig {
    /// TOML catalog file replacing the built-in table.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Full daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub kb: KbConfig,

    #[serde(default)]
    pub confidence: ConfidenceConfig,

    #[serde(default)]
    pub patterns: PatternsConfig,
}

impl DaemonConfig {
    /// Load configuration from `path`.
    ///
    /// An absent file falls back to defaults; a present but malformed
    /// file is an error rather than a silent default.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = DaemonConfig::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:7171");
        assert_eq!(config.server.max_log_chars, 1_000_000);
        assert!(config.llm.enabled);
        assert_eq!(config.llm.timeout_secs, 20);
        assert_eq!(config.confidence.advisory_default, 0.65);
        assert_eq!(config.confidence.kb_fallback, 0.50);
        assert_eq!(config.confidence.heuristic_fallback, 0.25);
        assert_eq!(config.kb.path, PathBuf::from("data/error_kb.json"));
        assert!(config.patterns.path.is_none());
    }

    #[test]
    fn partial_config_keeps_defaults_for_the_rest() {
        let raw = r#"
            [llm]
            enabled = false
            model = "llama3.1:8b"

            [confidence]
            kb_fallback = 0.6
        "#;

        let config: DaemonConfig = toml::from_str(raw).unwrap();
        assert!(!config.llm.enabled);
        assert_eq!(config.llm.model, "llama3.1:8b");
        assert_eq!(config.llm.base_url, "http://127.0.0.1:11434");
        assert_eq!(config.confidence.kb_fallback, 0.6);
        assert_eq!(config.confidence.heuristic_fallback, 0.25);
        assert_eq!(config.server.max_log_chars, 1_000_000);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let config = DaemonConfig::load(Path::new("/nonexistent/loghound.toml")).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:7171");
    }

    #[test]
    fn load_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nlisten_addr = ").unwrap();
        assert!(DaemonConfig::load(&path).is_err());
    }
}
