//! Roadmap generation engine
//!
//! The orchestrator is one total function from goal to plan: it sequences
//! provider invocation, defensive parsing, failure classification and
//! template fallback so that every invocation ends with a complete
//! [`RoadmapPlan`] - the only failures it surfaces are a missing goal
//! (before any plan is attempted) and a persistence failure (after a valid
//! plan already exists).
//!
//! Providers are tried sequentially, never concurrently or raced, to bound
//! external cost and quota consumption. No step is retried: a failed
//! provider attempt is abandoned immediately in favor of the next candidate
//! or the fallback templates.

pub mod classify;
pub mod extract;
pub mod fallback;
pub mod validate;

use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::goal::GoalDescriptor;
use crate::metrics::Metrics;
use crate::plan::{PlanPayload, RoadmapPlan};
use crate::providers::RoadmapProvider;
use crate::store::{CacheInvalidator, GoalStore, PlanStore};

use classify::FailureKind;

/// Why the engine fell back to a template plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The availability resolver produced an empty candidate list
    NoProviderConfigured,
    /// Every candidate failed; the last failure was classified as rate limiting
    RateLimited,
    /// Every candidate failed; the last failure was anything else
    GenericFailure,
}

impl FallbackReason {
    /// The fixed user-facing message for this reason
    pub fn message(self) -> &'static str {
        match self {
            Self::NoProviderConfigured => fallback::NO_PROVIDER_MESSAGE,
            Self::RateLimited => fallback::RATE_LIMITED_MESSAGE,
            Self::GenericFailure => fallback::GENERIC_FAILURE_MESSAGE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoProviderConfigured => "no_provider",
            Self::RateLimited => "rate_limited",
            Self::GenericFailure => "generic",
        }
    }
}

impl From<FailureKind> for FallbackReason {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::RateLimited => Self::RateLimited,
            FailureKind::Generic => Self::GenericFailure,
        }
    }
}

/// Turn raw provider text into a validated payload
///
/// Composes balanced-object extraction with the two-stage schema check.
pub fn parse_plan(raw: &str) -> Result<PlanPayload, crate::error::ParseError> {
    let value = extract::extract_json_object(raw)?;
    validate::validate_payload(value)
}

/// The roadmap generation orchestrator
///
/// Holds the prioritized provider list and the external persistence
/// collaborators. All intermediate state is local to one invocation - the
/// engine itself is stateless and freely shareable behind an `Arc`.
pub struct RoadmapEngine {
    providers: Vec<Arc<dyn RoadmapProvider>>,
    goals: Arc<dyn GoalStore>,
    plans: Arc<dyn PlanStore>,
    cache: Arc<dyn CacheInvalidator>,
    metrics: Metrics,
}

impl RoadmapEngine {
    pub fn new(
        providers: Vec<Arc<dyn RoadmapProvider>>,
        goals: Arc<dyn GoalStore>,
        plans: Arc<dyn PlanStore>,
        cache: Arc<dyn CacheInvalidator>,
        metrics: Metrics,
    ) -> Self {
        Self {
            providers,
            goals,
            plans,
            cache,
            metrics,
        }
    }

    /// Generate, persist and return a roadmap plan for a goal
    ///
    /// # Errors
    ///
    /// - [`AppError::GoalNotFound`] when the goal id does not exist; nothing
    ///   is generated or stored.
    /// - [`AppError::Persistence`] when the final store call fails; the plan
    ///   was still generated and callers may retry the store with it.
    ///
    /// Every other failure is absorbed into a fallback plan.
    pub async fn generate_roadmap(&self, goal_id: Uuid) -> AppResult<RoadmapPlan> {
        let goal = self
            .goals
            .fetch_goal(goal_id)
            .await?
            .ok_or(AppError::GoalNotFound(goal_id))?;

        tracing::info!(
            %goal_id,
            title = %goal.title,
            category = %goal.category,
            candidates = self.providers.len(),
            "Generating roadmap"
        );

        let plan = self.generate_plan(goal_id, &goal).await;

        self.plans.persist_plan(goal_id, &plan).await?;

        // Best-effort: a stale cached view is tolerable, a lost plan is not.
        if let Err(e) = self.cache.invalidate(goal_id).await {
            tracing::warn!(%goal_id, error = %e, "Cache invalidation failed");
        }

        Ok(plan)
    }

    /// The total inner function: always produces a plan
    async fn generate_plan(&self, goal_id: Uuid, goal: &GoalDescriptor) -> RoadmapPlan {
        if self.providers.is_empty() {
            tracing::info!(%goal_id, "No provider configured, using fallback template");
            return self.build_fallback(goal, FallbackReason::NoProviderConfigured);
        }

        let mut last_failure: Option<FailureKind> = None;

        for (attempt, provider) in self.providers.iter().enumerate() {
            match self.try_provider(provider.as_ref(), goal).await {
                Ok(plan) => {
                    tracing::info!(
                        %goal_id,
                        provider = %provider.id(),
                        attempt = attempt + 1,
                        "Provider produced a valid roadmap"
                    );
                    self.metrics.record_provider_success(provider.id());
                    return plan;
                }
                Err(e) => {
                    let kind = classify::classify(&e);
                    tracing::warn!(
                        %goal_id,
                        provider = %provider.id(),
                        attempt = attempt + 1,
                        classification = kind.as_str(),
                        error = %e,
                        "Provider attempt failed, advancing to next candidate"
                    );
                    self.metrics.record_provider_failure(provider.id(), kind);
                    last_failure = Some(kind);
                }
            }
        }

        let reason = last_failure
            .map(FallbackReason::from)
            .unwrap_or(FallbackReason::GenericFailure);
        tracing::info!(
            %goal_id,
            reason = reason.as_str(),
            "All providers exhausted, using fallback template"
        );
        self.build_fallback(goal, reason)
    }

    /// One provider attempt: generate, extract, validate, wrap
    async fn try_provider(
        &self,
        provider: &dyn RoadmapProvider,
        goal: &GoalDescriptor,
    ) -> AppResult<RoadmapPlan> {
        let raw = provider.generate(goal).await?;
        let payload = parse_plan(&raw)?;
        Ok(RoadmapPlan::from_provider(payload, provider.id()))
    }

    fn build_fallback(&self, goal: &GoalDescriptor, reason: FallbackReason) -> RoadmapPlan {
        self.metrics.record_fallback(reason.as_str());
        let mut plan = fallback::build_fallback(goal);
        plan.message = reason.message().to_string();
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plan_accepts_fenced_valid_payload() {
        let raw = r#"Sure! Here you go:
```json
{
  "steps": [
    {"step": 1, "title": "a", "description": "d"},
    {"step": 2, "title": "b", "description": "d"},
    {"step": 3, "title": "c", "description": "d"},
    {"step": 4, "title": "e", "description": "d"},
    {"step": 5, "title": "f", "description": "d"}
  ],
  "estimated_cost": "cheap",
  "timeline": "soon",
  "recommendations": [
    {"type": "PLACE", "title": "p", "description": "d"},
    {"type": "APP", "title": "a", "description": "d"},
    {"type": "TIP", "title": "t", "description": "d"},
    {"type": "FOOD", "title": "f", "description": "d"}
  ]
}
```
Hope that helps!"#;

        let payload = parse_plan(raw).expect("should parse");
        assert_eq!(payload.steps.len(), 5);
        assert_eq!(payload.timeline, "soon");
    }

    #[test]
    fn parse_plan_rejects_prose_without_json() {
        let err = parse_plan("I cannot help with that.").unwrap_err();
        assert!(matches!(err, crate::error::ParseError::Extraction { .. }));
    }

    #[test]
    fn parse_plan_rejects_wrong_step_count() {
        let raw = r#"{"steps":[{"step":1,"title":"a","description":"d"}],"estimated_cost":"x","timeline":"y","recommendations":[1,2,3,4]}"#;
        let err = parse_plan(raw).unwrap_err();
        assert!(matches!(err, crate::error::ParseError::Schema { .. }));
    }

    #[test]
    fn fallback_reason_messages_match_fixed_strings() {
        assert_eq!(
            FallbackReason::NoProviderConfigured.message(),
            fallback::NO_PROVIDER_MESSAGE
        );
        assert_eq!(
            FallbackReason::RateLimited.message(),
            fallback::RATE_LIMITED_MESSAGE
        );
        assert_eq!(
            FallbackReason::GenericFailure.message(),
            fallback::GENERIC_FAILURE_MESSAGE
        );
    }

    #[test]
    fn failure_kind_maps_to_matching_reason() {
        assert_eq!(
            FallbackReason::from(FailureKind::RateLimited),
            FallbackReason::RateLimited
        );
        assert_eq!(
            FallbackReason::from(FailureKind::Generic),
            FallbackReason::GenericFailure
        );
    }
}
