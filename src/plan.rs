//! Roadmap plan value objects and wire shape
//!
//! A [`RoadmapPlan`] is never partially constructed: it either fully
//! satisfies the shape below (exactly 5 steps, exactly 4 recommendations,
//! a message) or it does not exist. Plans are created fresh on each engine
//! invocation and not mutated after construction, except for the message
//! overwrite the orchestrator performs when selecting a fallback variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::providers::ProviderId;

/// Required number of steps in every plan
pub const STEP_COUNT: usize = 5;

/// Required number of recommendations in every plan
pub const RECOMMENDATION_COUNT: usize = 4;

/// Message attached to plans that passed schema validation
pub const SUCCESS_MESSAGE: &str = "Roadmap generated successfully.";

/// One ordered step of a plan (1-based, sequential, no gaps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step: u32,
    pub title: String,
    pub description: String,
}

/// Kind of contextual recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationKind {
    Place,
    App,
    Tip,
    Food,
}

/// One contextual recommendation attached to a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
}

/// The validated content of a provider payload
///
/// This is the typed target of schema validation - it carries only the
/// fields a provider is asked to produce, without provenance metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPayload {
    pub steps: Vec<Step>,
    pub estimated_cost: String,
    pub timeline: String,
    pub recommendations: Vec<Recommendation>,
}

/// A complete, guaranteed-valid roadmap plan
///
/// Invariants:
/// - `fallback == true` implies `provider` and `generated_at` are `None`
///   (the plan came from the template engine)
/// - `fallback == false` implies the payload passed schema validation
///   against provider output and `provider`/`generated_at` are set
///
/// The wire shape uses underscore-prefixed names for provenance metadata so
/// renderers can distinguish plan content from engine bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPlan {
    pub steps: Vec<Step>,
    pub estimated_cost: String,
    pub timeline: String,
    pub recommendations: Vec<Recommendation>,
    #[serde(rename = "_provider", default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(
        rename = "_generatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_at: Option<DateTime<Utc>>,
    /// Human-readable provenance/status, always present
    #[serde(rename = "_message")]
    pub message: String,
    #[serde(rename = "_fallback", default, skip_serializing_if = "is_false")]
    pub fallback: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl RoadmapPlan {
    /// Wrap a validated provider payload into a non-fallback plan
    pub fn from_provider(payload: PlanPayload, provider: ProviderId) -> Self {
        Self {
            steps: payload.steps,
            estimated_cost: payload.estimated_cost,
            timeline: payload.timeline,
            recommendations: payload.recommendations,
            provider: Some(provider.as_str().to_string()),
            generated_at: Some(Utc::now()),
            message: SUCCESS_MESSAGE.to_string(),
            fallback: false,
        }
    }
}
