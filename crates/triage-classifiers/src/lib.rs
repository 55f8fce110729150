//! Ticket Triage Classifiers
//!
//! Turns raw ticket text into a category, support group, priority and
//! confidence.
//!
//! Two classification paths share one normalizer:
//! - A trained TF-IDF + logistic regression model, loaded from a JSON artifact
//! - Deterministic keyword rules, used when the model is absent or faults
//!
//! The [`ClassificationEngine`] owns both and never fails.

pub mod config;
pub mod engine;
pub mod normalizer;
pub mod rules;
pub mod statistical;

pub use config::ClassifierConfig;
pub use engine::ClassificationEngine;
pub use normalizer::{LexiconBuilder, MorphAnalyzer, Parse, TextNormalizer};
pub use rules::RuleClassifier;
pub use statistical::{
    load_model, LabelPrediction, ModelArtifact, StatisticalClassifier, TextModel,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::ClassifierConfig;
    pub use crate::engine::ClassificationEngine;
    pub use crate::normalizer::TextNormalizer;
    pub use crate::rules::RuleClassifier;
    pub use crate::statistical::StatisticalClassifier;
}
