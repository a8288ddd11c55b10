//! HTTP server for loghoundd

use crate::orchestrator::Resolver;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
///
/// Everything here is immutable per request; the knowledge base inside
/// the resolver fills its cache once, idempotently.
pub struct AppState {
    pub resolver: Resolver,
    pub max_log_chars: usize,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: Resolver, max_log_chars: usize) -> Self {
        Self {
            resolver,
            max_log_chars,
            start_time: Instant::now(),
        }
    }
}

/// Run the HTTP server.
pub async fn run(state: AppState, listen_addr: &str) -> Result<()> {
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::analyze_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!("  Listening on http://{}", listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
