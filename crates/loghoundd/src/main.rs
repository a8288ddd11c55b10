//! Loghound daemon - log triage service.
//!
//! Detects failure patterns in submitted logs and resolves a diagnosis
//! through generative, knowledge-base, and heuristic tiers.

use anyhow::Result;
use loghoundd::advisor::AdvisoryGenerator;
use loghoundd::config::{self, DaemonConfig};
use loghoundd::kb::KnowledgeBase;
use loghoundd::llm::{DisabledClient, LlmClient, OllamaClient};
use loghoundd::orchestrator::Resolver;
use loghoundd::patterns::PatternCatalog;
use loghoundd::server::{self, AppState};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("loghoundd v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path =
        std::env::var("LOGHOUND_CONFIG").unwrap_or_else(|_| config::CONFIG_PATH.to_string());
    let config = DaemonConfig::load(Path::new(&config_path))?;

    let catalog = match &config.patterns.path {
        Some(path) => PatternCatalog::load(path)?,
        None => PatternCatalog::builtin(),
    };
    info!("Pattern catalog ready: {} patterns", catalog.len());

    let client: Arc<dyn LlmClient> = if config.llm.enabled {
        info!(
            "Advisory tier using model '{}' at {}",
            config.llm.model, config.llm.base_url
        );
        Arc::new(OllamaClient::new(
            &config.llm.base_url,
            &config.llm.model,
            config.llm.timeout_secs,
        ))
    } else {
        info!("Advisory tier disabled by config; resolving via fallbacks only");
        Arc::new(DisabledClient)
    };

    let advisor =
        AdvisoryGenerator::new(client).with_default_confidence(config.confidence.advisory_default);
    let kb = KnowledgeBase::new(&config.kb.path);
    let resolver = Resolver::new(catalog, kb, advisor, config.confidence.clone());

    let state = AppState::new(resolver, config.server.max_log_chars);
    server::run(state, &config.server.listen_addr).await
}
