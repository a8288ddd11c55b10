//! HTTP client for the loghound daemon

use anyhow::{bail, Context, Result};
use loghound_common::{AnalysisResult, AnalyzeRequest, HealthResponse};
use std::time::Duration;

/// Default daemon address.
pub const DEFAULT_ADDR: &str = "http://127.0.0.1:7171";

/// Thin JSON client for the daemon API.
pub struct DaemonClient {
    http: reqwest::Client,
    base_url: String,
}

impl DaemonClient {
    /// Resolve the daemon address with a fallback chain.
    ///
    /// Priority:
    /// 1. Explicit --addr flag (passed as argument)
    /// 2. $LOGHOUND_ADDR environment variable
    /// 3. http://127.0.0.1:7171 (default)
    pub fn discover_addr(explicit: Option<&str>) -> String {
        if let Some(addr) = explicit {
            return addr.trim_end_matches('/').to_string();
        }

        if let Ok(addr) = std::env::var("LOGHOUND_ADDR") {
            return addr.trim_end_matches('/').to_string();
        }

        DEFAULT_ADDR.to_string()
    }

    pub fn new(explicit_addr: Option<&str>) -> Result<Self> {
        // Generous timeout: the daemon may wait on its advisory model
        // before falling back.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: Self::discover_addr(explicit_addr),
        })
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .with_context(|| format!("Daemon unreachable at {}", self.base_url))?;

        if !response.status().is_success() {
            bail!("Health check failed: HTTP {}", response.status());
        }

        response.json().await.context("Invalid health response")
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult> {
        let response = self
            .http
            .post(format!("{}/v1/analyze", self.base_url))
            .json(request)
            .send()
            .await
            .with_context(|| format!("Daemon unreachable at {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Analysis rejected (HTTP {}): {}", status, body);
        }

        response.json().await.context("Invalid analysis response")
    }
}
