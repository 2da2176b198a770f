//! HTTP handlers and router assembly

pub mod goals;
pub mod health;
pub mod metrics;
pub mod roadmap;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::engine::RoadmapEngine;
use crate::metrics::Metrics;
use crate::store::InMemoryStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RoadmapEngine>,
    pub store: Arc<InMemoryStore>,
    pub metrics: Metrics,
}

/// Assemble the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::handler))
        .route("/metrics", get(metrics::handler))
        .route("/goals", post(goals::create))
        .route("/goals/{id}/roadmap", post(roadmap::generate))
        .route("/goals/{id}/roadmap", get(roadmap::fetch))
        .layer(middleware::from_fn(
            crate::middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
