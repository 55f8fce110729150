//! Error types for ticket triage

/// Result type alias using the triage Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for triage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model artifact missing or failed to load
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Statistical inference failed for a single request
    #[error("prediction fault: {0}")]
    Prediction(#[from] PredictionFault),

    /// Morphology lexicon errors
    #[error("lexicon error: {0}")]
    Lexicon(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Ticket sink (downstream collaborator) errors
    #[error("ticket sink error: {0}")]
    Sink(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new lexicon error
    pub fn lexicon(msg: impl Into<String>) -> Self {
        Self::Lexicon(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new ticket sink error
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Failure inside the statistical path for one request.
///
/// Always recovered by the engine, which falls back to keyword rules for
/// that request only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionFault {
    /// Internal model state does not line up with the feature space
    #[error("dimension mismatch in {component}: expected {expected}, found {found}")]
    DimensionMismatch {
        component: &'static str,
        expected: usize,
        found: usize,
    },

    /// A score or probability came out as NaN or infinite
    #[error("non-finite score for label '{label}'")]
    NonFiniteScore { label: String },

    /// The model produced a label outside the closed label set
    #[error("unknown {kind} label '{label}'")]
    UnknownLabel { kind: &'static str, label: String },

    /// The model has no classes to choose from
    #[error("empty probability distribution")]
    EmptyDistribution,
}
