//! In-process counters for a triage run

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use triage_core::{Action, Method};

/// Cheap-to-clone collector shared across workers
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    total_requests: AtomicU64,
    ml_model: AtomicU64,
    rule_based: AtomicU64,
    default: AtomicU64,
    prediction_faults: AtomicU64,
    auto_apply: AtomicU64,
    suggest: AtomicU64,
    manual: AtomicU64,
    sink_failures: AtomicU64,
    total_latency_us: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    /// Record one classification and the path that produced it
    pub fn record_classification(&self, method: Method, latency_us: u64) {
        self.inner.total_requests.fetch_add(1, Ordering::Relaxed);
        self.inner
            .total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);

        let counter = match method {
            Method::MlModel => &self.inner.ml_model,
            Method::RuleBased => &self.inner.rule_based,
            Method::Default => &self.inner.default,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a statistical prediction that fell back to rules
    pub fn record_fault(&self) {
        self.inner.prediction_faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a routed action
    pub fn record_action(&self, action: Action) {
        let counter = match action {
            Action::AutoApply => &self.inner.auto_apply,
            Action::Suggest => &self.inner.suggest,
            Action::Manual => &self.inner.manual,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed call to the ticket sink
    pub fn record_sink_failure(&self) {
        self.inner.sink_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        MetricsSnapshot {
            total_requests: load(&self.inner.total_requests),
            ml_model: load(&self.inner.ml_model),
            rule_based: load(&self.inner.rule_based),
            default: load(&self.inner.default),
            prediction_faults: load(&self.inner.prediction_faults),
            auto_apply: load(&self.inner.auto_apply),
            suggest: load(&self.inner.suggest),
            manual: load(&self.inner.manual),
            sink_failures: load(&self.inner.sink_failures),
            total_latency_us: load(&self.inner.total_latency_us),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub ml_model: u64,
    pub rule_based: u64,
    pub default: u64,
    pub prediction_faults: u64,
    pub auto_apply: u64,
    pub suggest: u64,
    pub manual: u64,
    pub sink_failures: u64,
    pub total_latency_us: u64,
}

impl MetricsSnapshot {
    /// Calculate average latency per request
    pub fn avg_latency_us(&self) -> u64 {
        if self.total_requests == 0 {
            0
        } else {
            self.total_latency_us / self.total_requests
        }
    }

    /// Share of requests answered by the trained model
    pub fn model_rate(&self) -> f64 {
        self.rate(self.ml_model)
    }

    /// Share of requests answered by keyword rules
    pub fn fallback_rate(&self) -> f64 {
        self.rate(self.rule_based)
    }

    /// Share of requests that were applied without review
    pub fn auto_apply_rate(&self) -> f64 {
        self.rate(self.auto_apply)
    }

    fn rate(&self, count: u64) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            count as f64 / self.total_requests as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let metrics = MetricsCollector::new();

        metrics.record_classification(Method::MlModel, 300);
        metrics.record_classification(Method::RuleBased, 100);
        metrics.record_fault();
        metrics.record_action(Action::AutoApply);
        metrics.record_action(Action::Manual);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 2);
        assert_eq!(snapshot.ml_model, 1);
        assert_eq!(snapshot.rule_based, 1);
        assert_eq!(snapshot.prediction_faults, 1);
        assert_eq!(snapshot.auto_apply, 1);
        assert_eq!(snapshot.manual, 1);
        assert_eq!(snapshot.suggest, 0);
        assert_eq!(snapshot.avg_latency_us(), 200);
        assert!((snapshot.model_rate() - 0.5).abs() < f64::EPSILON);
        assert!((snapshot.auto_apply_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_snapshot_rates() {
        let snapshot = MetricsCollector::new().snapshot();
        assert_eq!(snapshot.avg_latency_us(), 0);
        assert_eq!(snapshot.fallback_rate(), 0.0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = MetricsCollector::new();
        let clone = metrics.clone();
        clone.record_classification(Method::Default, 0);
        assert_eq!(metrics.snapshot().default, 1);
    }
}
