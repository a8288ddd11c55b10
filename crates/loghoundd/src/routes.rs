//! API routes for loghoundd

use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use loghound_common::{AnalysisResult, AnalyzeRequest, HealthResponse};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Analyze Routes
// ============================================================================

pub fn analyze_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/analyze", post(analyze))
}

async fn analyze(
    State(state): State<AppStateArc>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, String)> {
    validate_log_text(&req.log_text, state.max_log_chars)?;

    info!(
        "  Analyzing {} characters of log text{}",
        req.log_text.chars().count(),
        req.app_name
            .as_deref()
            .map(|app| format!(" from {}", app))
            .unwrap_or_default()
    );

    let result = state
        .resolver
        .resolve(
            &req.log_text,
            req.app_name.as_deref(),
            req.environment.as_deref(),
        )
        .await
        .map_err(|err| {
            error!("  Analysis failed: {:#}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        })?;

    Ok(Json(result))
}

/// Input-boundary checks, run before anything enters the pipeline.
fn validate_log_text(log_text: &str, max_chars: usize) -> Result<(), (StatusCode, String)> {
    if log_text.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "log_text must not be empty".to_string(),
        ));
    }

    let chars = log_text.chars().count();
    if chars > max_chars {
        warn!("  Rejecting oversized log: {} chars (limit {})", chars, max_chars);
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("log_text is {} characters, limit is {}", chars, max_chars),
        ));
    }

    Ok(())
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        patterns_loaded: state.resolver.catalog().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log_text_is_rejected() {
        let err = validate_log_text("", 100).unwrap_err();
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);

        let err = validate_log_text("   \n\t", 100).unwrap_err();
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn oversized_log_text_is_rejected() {
        let log = "x".repeat(101);
        let err = validate_log_text(&log, 100).unwrap_err();
        assert_eq!(err.0, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn limit_is_measured_in_characters_not_bytes() {
        // 100 multibyte characters fit a 100-character limit.
        let log = "ü".repeat(100);
        assert!(log.len() > 100);
        assert!(validate_log_text(&log, 100).is_ok());
    }

    #[test]
    fn log_at_the_limit_is_accepted() {
        let log = "x".repeat(100);
        assert!(validate_log_text(&log, 100).is_ok());
    }
}
