//! Health check endpoint

use axum::Json;
use serde_json::{json, Value};

/// GET /health
///
/// Liveness only - the engine has no upstream it must reach to be healthy,
/// because fallback templates guarantee a plan even with zero providers.
pub async fn handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
