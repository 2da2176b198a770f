//! Goal creation endpoint
//!
//! Minimal surface so the demo binary is exercisable end to end; real goal
//! management lives in the external persistence layer.

use axum::{extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::goal::GoalDescriptor;
use crate::handlers::AppState;

/// Cap on goal field lengths in characters
const MAX_FIELD_LENGTH: usize = 2_000;

/// Goal creation request
///
/// Validation is enforced during deserialization - invalid instances cannot exist.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGoalRequest {
    title: String,
    category: String,
    description: String,
}

impl<'de> Deserialize<'de> for CreateGoalRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            title: String,
            category: String,
            #[serde(default)]
            description: String,
        }

        let raw = Raw::deserialize(deserializer)?;

        if raw.title.trim().is_empty() {
            return Err(serde::de::Error::custom(
                "title cannot be empty or contain only whitespace",
            ));
        }
        if raw.category.trim().is_empty() {
            return Err(serde::de::Error::custom(
                "category cannot be empty or contain only whitespace",
            ));
        }
        for (name, field) in [
            ("title", &raw.title),
            ("category", &raw.category),
            ("description", &raw.description),
        ] {
            let chars = field.chars().count();
            if chars > MAX_FIELD_LENGTH {
                return Err(serde::de::Error::custom(format!(
                    "{name} exceeds maximum length of {MAX_FIELD_LENGTH} characters (got {chars})"
                )));
            }
        }

        Ok(CreateGoalRequest {
            title: raw.title,
            category: raw.category,
            description: raw.description,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGoalResponse {
    pub id: Uuid,
}

/// POST /goals
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateGoalRequest>,
) -> Json<CreateGoalResponse> {
    let goal = GoalDescriptor::new(request.title, request.category, request.description);
    let id = state.store.insert_goal(goal).await;

    tracing::info!(goal_id = %id, "Goal created");
    Json(CreateGoalResponse { id })
}
