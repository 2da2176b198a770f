//! Waymark - goal-to-roadmap generation engine with provider fallback
//!
//! Turns a stored personal goal into a guaranteed-valid production plan:
//! five ordered steps, an estimated cost, a timeline, and four contextual
//! recommendations. External text-generation providers are tried in priority
//! order with defensive parsing of their output; deterministic category
//! templates guarantee that some well-formed plan is always returned.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod goal;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod plan;
pub mod providers;
pub mod store;
pub mod telemetry;
