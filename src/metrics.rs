//! Prometheus metrics collection for Waymark
//!
//! Tracks generation outcomes, per-provider failure kinds, and fallback
//! reasons. Exposed via the `/metrics` endpoint in Prometheus text format.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::engine::classify::FailureKind;
use crate::providers::ProviderId;

/// Metrics collector for the roadmap engine
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    generations_total: IntCounterVec,
    provider_failures: IntCounterVec,
    fallbacks_total: IntCounterVec,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all metrics with a new Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Counter: completed generations by outcome.
        // Cardinality: one series per provider plus "fallback".
        let generations_total = IntCounterVec::new(
            Opts::new(
                "waymark_generations_total",
                "Total completed roadmap generations by outcome (provider name or 'fallback')",
            ),
            &["outcome"],
        )?;

        // Counter: individual provider attempt failures, by provider and
        // failure classification. A single generation can record several of
        // these while still succeeding on a later provider.
        let provider_failures = IntCounterVec::new(
            Opts::new(
                "waymark_provider_failures_total",
                "Provider attempt failures by provider and classification",
            ),
            &["provider", "kind"],
        )?;

        // Counter: fallback plans served, by reason.
        let fallbacks_total = IntCounterVec::new(
            Opts::new(
                "waymark_fallbacks_total",
                "Fallback template plans served by reason",
            ),
            &["reason"],
        )?;

        registry.register(Box::new(generations_total.clone()))?;
        registry.register(Box::new(provider_failures.clone()))?;
        registry.register(Box::new(fallbacks_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            generations_total,
            provider_failures,
            fallbacks_total,
        })
    }

    pub fn record_provider_success(&self, provider: ProviderId) {
        self.generations_total
            .with_label_values(&[provider.as_str()])
            .inc();
    }

    pub fn record_provider_failure(&self, provider: ProviderId, kind: FailureKind) {
        self.provider_failures
            .with_label_values(&[provider.as_str(), kind.as_str()])
            .inc();
    }

    pub fn record_fallback(&self, reason: &'static str) {
        self.generations_total
            .with_label_values(&["fallback"])
            .inc();
        self.fallbacks_total.with_label_values(&[reason]).inc();
    }

    /// Render all metrics in Prometheus text exposition format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("metrics output was not UTF-8: {e}")))
    }
}
