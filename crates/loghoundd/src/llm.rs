//! Generative-model client - Ollama-style HTTP backend behind a trait seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from the generative-model collaborator.
///
/// None of these escape the advisory tier; they exist so failures can be
/// logged with their cause before the pipeline falls back.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM backend is disabled")]
    Disabled,

    #[error("Failed to reach LLM backend: {0}")]
    Network(String),

    #[error("LLM request timed out after {0} seconds")]
    Timeout(u64),

    #[error("LLM backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode LLM response: {0}")]
    Decode(String),
}

/// Generative-model collaborator: one prompt in, free text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// Ollama-backed client.
///
/// One request per advisory, no retry: a failed call falls through to the
/// next resolution tier immediately to keep request latency bounded. The
/// timeout is enforced by the underlying HTTP client.
pub struct OllamaClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            stream: false,
            format: Some("json".to_string()),
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LlmError::Timeout(self.timeout_secs)
                } else {
                    LlmError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|err| LlmError::Decode(err.to_string()))?;

        Ok(chat.message.content)
    }
}

/// Client used when the advisory tier is disabled by configuration.
/// Always reports unavailable without touching the network.
pub struct DisabledClient;

#[async_trait]
impl LlmClient for DisabledClient {
    async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_client_strips_trailing_slash() {
        let client = OllamaClient::new("http://127.0.0.1:11434/", "qwen2.5:7b-instruct", 20);
        assert_eq!(client.base_url, "http://127.0.0.1:11434");
        assert_eq!(client.model(), "qwen2.5:7b-instruct");
    }

    #[tokio::test]
    async fn disabled_client_reports_disabled() {
        let err = DisabledClient.generate("sys", "user").await.unwrap_err();
        assert!(matches!(err, LlmError::Disabled));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let client = OllamaClient::new("http://192.0.2.1:11434", "qwen2.5:7b-instruct", 1);
        let err = client.generate("sys", "user").await.unwrap_err();
        assert!(matches!(err, LlmError::Network(_) | LlmError::Timeout(_)));
    }
}
