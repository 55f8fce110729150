//! Metric names and descriptions

/// Classifications produced, labelled by `method`
pub const CLASSIFICATIONS_TOTAL: &str = "triage_classifications_total";

/// Statistical predictions that fell back to rules
pub const PREDICTION_FAULTS_TOTAL: &str = "triage_prediction_faults_total";

/// Routed actions, labelled by `action`
pub const ACTIONS_TOTAL: &str = "triage_actions_total";

/// Classifications applied to tickets, labelled by `category`
pub const AUTO_APPLIED_TOTAL: &str = "triage_auto_applied_total";

/// Distribution of classification confidence
pub const CONFIDENCE: &str = "triage_confidence";

/// Time spent in `classify`, in microseconds
pub const CLASSIFY_LATENCY_US: &str = "triage_classify_latency_us";

/// Register descriptions with the installed recorder
pub fn describe_metrics() {
    ::metrics::describe_counter!(
        CLASSIFICATIONS_TOTAL,
        "Total number of classifications by method"
    );
    ::metrics::describe_counter!(
        PREDICTION_FAULTS_TOTAL,
        "Statistical predictions recovered by the rule fallback"
    );
    ::metrics::describe_counter!(ACTIONS_TOTAL, "Total number of routed actions by action");
    ::metrics::describe_counter!(
        AUTO_APPLIED_TOTAL,
        "Classifications applied to tickets by category"
    );
    ::metrics::describe_histogram!(CONFIDENCE, "Classification confidence (0.0-1.0)");
    ::metrics::describe_histogram!(
        CLASSIFY_LATENCY_US,
        ::metrics::Unit::Microseconds,
        "Classification latency in microseconds"
    );

    tracing::debug!("Triage metric descriptions registered");
}
