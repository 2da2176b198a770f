//! Roadmap generation and retrieval endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::plan::RoadmapPlan;
use crate::store::GoalStore;

/// POST /goals/{id}/roadmap
///
/// Runs the full generation pipeline. The response is always a complete
/// plan; the only error statuses are 404 (unknown goal) and 500 (the plan
/// was generated but could not be persisted).
pub async fn generate(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
) -> AppResult<Json<RoadmapPlan>> {
    let plan = state.engine.generate_roadmap(goal_id).await?;
    Ok(Json(plan))
}

/// GET /goals/{id}/roadmap
///
/// Returns the last persisted plan. Regeneration overwrites it, so this
/// always reflects the most recent generation.
pub async fn fetch(State(state): State<AppState>, Path(goal_id): Path<Uuid>) -> Response {
    if let Some(plan) = state.store.plan(goal_id).await {
        return Json(plan).into_response();
    }

    match state.store.fetch_goal(goal_id).await {
        Ok(Some(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No roadmap has been generated yet for goal {goal_id}"),
            })),
        )
            .into_response(),
        Ok(None) => AppError::GoalNotFound(goal_id).into_response(),
        Err(e) => e.into_response(),
    }
}
