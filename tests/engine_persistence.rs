//! Boundary errors around the plan: a missing goal aborts before anything is
//! generated, a failing plan store surfaces after generation, and a failing
//! cache invalidator is swallowed.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use waymark::engine::RoadmapEngine;
use waymark::error::AppError;
use waymark::goal::GoalDescriptor;
use waymark::metrics::Metrics;
use waymark::plan::RoadmapPlan;
use waymark::store::{CacheInvalidator, GoalStore, InMemoryStore, PlanStore};

struct FailingPlanStore;

#[async_trait]
impl PlanStore for FailingPlanStore {
    async fn persist_plan(&self, goal_id: Uuid, _plan: &RoadmapPlan) -> Result<(), AppError> {
        Err(AppError::Persistence {
            goal_id,
            reason: "store unavailable".to_string(),
        })
    }
}

struct FailingInvalidator {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CacheInvalidator for FailingInvalidator {
    async fn invalidate(&self, _goal_id: Uuid) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Internal("cache unreachable".to_string()))
    }
}

#[tokio::test]
async fn unknown_goal_aborts_before_generation() {
    let store = Arc::new(InMemoryStore::new());
    let engine = RoadmapEngine::new(
        Vec::new(),
        store.clone(),
        store.clone(),
        store.clone(),
        Metrics::new().unwrap(),
    );

    let missing = Uuid::new_v4();
    let err = engine.generate_roadmap(missing).await.unwrap_err();

    assert!(matches!(err, AppError::GoalNotFound(id) if id == missing));
    assert!(store.plan(missing).await.is_none(), "nothing persisted");
}

#[tokio::test]
async fn plan_store_failure_propagates() {
    let store = Arc::new(InMemoryStore::new());
    let goal_id = Uuid::new_v4();
    store
        .insert_goal_with_id(goal_id, GoalDescriptor::new("Visit Kyoto", "TRAVEL", ""))
        .await;
    let engine = RoadmapEngine::new(
        Vec::new(),
        store.clone(),
        Arc::new(FailingPlanStore),
        store,
        Metrics::new().unwrap(),
    );

    let err = engine.generate_roadmap(goal_id).await.unwrap_err();
    assert!(matches!(err, AppError::Persistence { goal_id: id, .. } if id == goal_id));
}

#[tokio::test]
async fn cache_invalidation_failure_is_swallowed() {
    let store = Arc::new(InMemoryStore::new());
    let goal_id = store
        .insert_goal(GoalDescriptor::new("Visit Kyoto", "TRAVEL", ""))
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let engine = RoadmapEngine::new(
        Vec::new(),
        store.clone(),
        store.clone(),
        Arc::new(FailingInvalidator {
            calls: calls.clone(),
        }),
        Metrics::new().unwrap(),
    );

    let plan = engine.generate_roadmap(goal_id).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1, "invalidator was called");
    assert!(plan.fallback);
    assert!(store.plan(goal_id).await.is_some(), "plan still persisted");
}
