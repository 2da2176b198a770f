//! Persistence collaborators consumed by the engine
//!
//! The engine treats persistence as external plumbing behind three traits:
//! goal lookup, plan storage (overwrite semantics - regeneration is
//! idempotent replacement, not append), and best-effort cache invalidation.
//! Trait objects allow the tests to inject failing or counting
//! implementations without any network or database.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppResult;
use crate::goal::GoalDescriptor;
use crate::plan::RoadmapPlan;

/// Read-only goal lookup, owned by the persistence layer
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Fetch a goal descriptor; `Ok(None)` means the goal does not exist.
    async fn fetch_goal(&self, goal_id: Uuid) -> AppResult<Option<GoalDescriptor>>;
}

/// Overwrite-semantics plan storage
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn persist_plan(&self, goal_id: Uuid, plan: &RoadmapPlan) -> AppResult<()>;
}

/// Cache/view invalidation collaborator
///
/// Best-effort: the engine logs invalidation failures and never surfaces
/// them to its caller.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, goal_id: Uuid) -> AppResult<()>;
}

/// In-memory implementation backing the demo server and tests
#[derive(Default)]
pub struct InMemoryStore {
    goals: RwLock<HashMap<Uuid, GoalDescriptor>>,
    plans: RwLock<HashMap<Uuid, RoadmapPlan>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a goal and return its freshly assigned id
    pub async fn insert_goal(&self, goal: GoalDescriptor) -> Uuid {
        let id = Uuid::new_v4();
        self.goals.write().await.insert(id, goal);
        id
    }

    /// Insert a goal under a caller-chosen id (test convenience)
    pub async fn insert_goal_with_id(&self, id: Uuid, goal: GoalDescriptor) {
        self.goals.write().await.insert(id, goal);
    }

    /// Fetch the last persisted plan for a goal, if any
    pub async fn plan(&self, goal_id: Uuid) -> Option<RoadmapPlan> {
        self.plans.read().await.get(&goal_id).cloned()
    }
}

#[async_trait]
impl GoalStore for InMemoryStore {
    async fn fetch_goal(&self, goal_id: Uuid) -> AppResult<Option<GoalDescriptor>> {
        Ok(self.goals.read().await.get(&goal_id).cloned())
    }
}

#[async_trait]
impl PlanStore for InMemoryStore {
    async fn persist_plan(&self, goal_id: Uuid, plan: &RoadmapPlan) -> AppResult<()> {
        self.plans.write().await.insert(goal_id, plan.clone());
        Ok(())
    }
}

#[async_trait]
impl CacheInvalidator for InMemoryStore {
    async fn invalidate(&self, _goal_id: Uuid) -> AppResult<()> {
        // Nothing cached in front of the in-memory store.
        Ok(())
    }
}
