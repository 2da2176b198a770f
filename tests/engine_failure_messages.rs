//! The fallback message depends on how the last provider attempt failed:
//! rate limiting gets its own wording, everything else gets the generic one.

use async_trait::async_trait;
use std::sync::Arc;

use waymark::engine::{fallback, RoadmapEngine};
use waymark::error::ProviderError;
use waymark::goal::GoalDescriptor;
use waymark::metrics::Metrics;
use waymark::providers::{ProviderId, RoadmapProvider};
use waymark::store::InMemoryStore;

struct FailsWith {
    error: fn() -> ProviderError,
}

#[async_trait]
impl RoadmapProvider for FailsWith {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(&self, _goal: &GoalDescriptor) -> Result<String, ProviderError> {
        Err((self.error)())
    }
}

async fn plan_after_failure(error: fn() -> ProviderError) -> waymark::plan::RoadmapPlan {
    let store = Arc::new(InMemoryStore::new());
    let goal_id = store
        .insert_goal(GoalDescriptor::new("Run a marathon", "HEALTH", ""))
        .await;
    let engine = RoadmapEngine::new(
        vec![Arc::new(FailsWith { error })],
        store.clone(),
        store.clone(),
        store,
        Metrics::new().unwrap(),
    );
    engine.generate_roadmap(goal_id).await.unwrap()
}

#[tokio::test]
async fn http_429_selects_the_rate_limited_message() {
    let plan = plan_after_failure(|| ProviderError::Status {
        provider: "gemini",
        status: 429,
        body: "Resource has been exhausted".to_string(),
    })
    .await;

    assert!(plan.fallback);
    assert_eq!(plan.message, fallback::RATE_LIMITED_MESSAGE);
}

#[tokio::test]
async fn quota_wording_selects_the_rate_limited_message() {
    let plan = plan_after_failure(|| ProviderError::Status {
        provider: "gemini",
        status: 403,
        body: "Quota exceeded for this project".to_string(),
    })
    .await;

    assert_eq!(plan.message, fallback::RATE_LIMITED_MESSAGE);
}

#[tokio::test]
async fn unrelated_failure_selects_the_generic_message() {
    let plan = plan_after_failure(|| ProviderError::EmptyCompletion { provider: "gemini" }).await;

    assert!(plan.fallback);
    assert_eq!(plan.message, fallback::GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn message_selection_never_changes_plan_content() {
    let rate_limited = plan_after_failure(|| ProviderError::Status {
        provider: "gemini",
        status: 429,
        body: "too many requests".to_string(),
    })
    .await;
    let generic = plan_after_failure(|| ProviderError::EmptyCompletion { provider: "gemini" }).await;

    // Same goal, same template: only the message differs.
    assert_ne!(rate_limited.message, generic.message);
    assert_eq!(rate_limited.steps, generic.steps);
    assert_eq!(rate_limited.recommendations, generic.recommendations);
    assert_eq!(rate_limited.estimated_cost, generic.estimated_cost);
    assert_eq!(rate_limited.timeline, generic.timeline);
}

#[tokio::test]
async fn last_failure_wins_when_classifications_differ() {
    struct FailsGeneric;
    struct FailsRateLimited;

    #[async_trait]
    impl RoadmapProvider for FailsGeneric {
        fn id(&self) -> ProviderId {
            ProviderId::Gemini
        }
        async fn generate(&self, _goal: &GoalDescriptor) -> Result<String, ProviderError> {
            Err(ProviderError::EmptyCompletion { provider: "gemini" })
        }
    }

    #[async_trait]
    impl RoadmapProvider for FailsRateLimited {
        fn id(&self) -> ProviderId {
            ProviderId::Openai
        }
        async fn generate(&self, _goal: &GoalDescriptor) -> Result<String, ProviderError> {
            Err(ProviderError::Status {
                provider: "openai",
                status: 429,
                body: "rate limit reached".to_string(),
            })
        }
    }

    let store = Arc::new(InMemoryStore::new());
    let goal_id = store
        .insert_goal(GoalDescriptor::new("Run a marathon", "HEALTH", ""))
        .await;
    let engine = RoadmapEngine::new(
        vec![Arc::new(FailsGeneric), Arc::new(FailsRateLimited)],
        store.clone(),
        store.clone(),
        store,
        Metrics::new().unwrap(),
    );

    let plan = engine.generate_roadmap(goal_id).await.unwrap();
    assert_eq!(plan.message, fallback::RATE_LIMITED_MESSAGE);
}
