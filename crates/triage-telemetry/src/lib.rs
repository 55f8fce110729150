//! Ticket Triage Telemetry
//!
//! Metric names shared by the engine and the action executor, plus an
//! in-process collector for run summaries.
//!
//! Metrics are emitted through the `metrics` facade; the binary decides
//! whether a recorder (Prometheus) is installed.

pub mod metrics;
pub mod names;

pub use crate::metrics::{MetricsCollector, MetricsSnapshot};
pub use names::describe_metrics;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{MetricsCollector, MetricsSnapshot};
    pub use crate::names;
}
