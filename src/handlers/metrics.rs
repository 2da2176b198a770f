//! Prometheus metrics endpoint

use axum::extract::State;
use axum::http::StatusCode;

use crate::handlers::AppState;

/// GET /metrics
///
/// Renders all registered counters in Prometheus text exposition format.
pub async fn handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state.metrics.render().map_err(|e| {
        tracing::error!(error = %e, "Failed to render metrics");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
