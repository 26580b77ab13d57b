//! Prometheus metrics module for the slug shortener.
//!
//! Defines business metrics for slug creations, lookups, identity checks,
//! and store timeouts.

use prometheus::{Counter, CounterVec, Opts, Registry};

/// Application metrics for Prometheus monitoring
#[derive(Clone)]
pub struct AppMetrics {
    /// Total slugs created
    pub slugs_created_total: Counter,
    /// Slug lookups with result label (found, not_found)
    pub slug_lookups_total: CounterVec,
    /// Identity checks with result label (known, unknown, error)
    pub identity_checks_total: CounterVec,
    /// Store operations that exceeded their time budget
    pub store_timeouts_total: Counter,
}

impl AppMetrics {
    /// Create and register all custom metrics with the given Prometheus registry
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let slugs_created_total = Counter::with_opts(
            Opts::new("slugs_created_total", "Total slugs created").namespace("slug_shortener"),
        )?;
        registry.register(Box::new(slugs_created_total.clone()))?;

        let slug_lookups_total = CounterVec::new(
            Opts::new("slug_lookups_total", "Total slug lookups by token")
                .namespace("slug_shortener"),
            &["result"],
        )?;
        registry.register(Box::new(slug_lookups_total.clone()))?;

        let identity_checks_total = CounterVec::new(
            Opts::new("identity_checks_total", "Total identity verification attempts")
                .namespace("slug_shortener"),
            &["result"],
        )?;
        registry.register(Box::new(identity_checks_total.clone()))?;

        let store_timeouts_total = Counter::with_opts(
            Opts::new("store_timeouts_total", "Store operations that timed out")
                .namespace("slug_shortener"),
        )?;
        registry.register(Box::new(store_timeouts_total.clone()))?;

        Ok(Self {
            slugs_created_total,
            slug_lookups_total,
            identity_checks_total,
            store_timeouts_total,
        })
    }

    /// Record a slug creation
    pub fn record_slug_created(&self) {
        self.slugs_created_total.inc();
    }

    /// Record a slug lookup outcome
    pub fn record_lookup(&self, found: bool) {
        let result = if found { "found" } else { "not_found" };
        self.slug_lookups_total.with_label_values(&[result]).inc();
    }

    /// Record an identity check outcome (known, unknown, error)
    pub fn record_identity_check(&self, result: &str) {
        self.identity_checks_total.with_label_values(&[result]).inc();
    }

    /// Record a store timeout
    pub fn record_store_timeout(&self) {
        self.store_timeouts_total.inc();
    }
}
