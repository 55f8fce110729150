//! Classification engine
//!
//! Normalizes the ticket, asks the trained model when one is loaded and
//! falls back to keyword rules for the request when the model faults or is
//! absent. `classify` never fails.

use crate::config::ClassifierConfig;
use crate::normalizer::TextNormalizer;
use crate::rules::RuleClassifier;
use crate::statistical::StatisticalClassifier;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use triage_core::{ClassificationResult, Method, PredictionFault, Result, TicketText};
use triage_telemetry::{names, MetricsCollector};

/// Immutable classification service, shareable across threads
pub struct ClassificationEngine {
    normalizer: TextNormalizer,
    rules: RuleClassifier,
    model: Option<StatisticalClassifier>,
    collector: Option<MetricsCollector>,
}

impl ClassificationEngine {
    /// Assemble an engine from its parts
    pub fn new(
        normalizer: TextNormalizer,
        rules: RuleClassifier,
        model: Option<StatisticalClassifier>,
    ) -> Self {
        Self {
            normalizer,
            rules,
            model,
            collector: None,
        }
    }

    /// Also count classifications in an in-process collector
    pub fn with_metrics(mut self, collector: MetricsCollector) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Engine without a trained model
    pub fn rule_based() -> Result<Self> {
        Ok(Self::new(TextNormalizer::new()?, RuleClassifier::new()?, None))
    }

    /// Build an engine from configuration.
    ///
    /// A missing or unreadable model is not an error: it is logged once and
    /// the engine runs on rules for its lifetime. A broken user lexicon is
    /// an error.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let normalizer = match &config.lexicon_path {
            Some(path) => {
                info!("Loading user lexicon from {}", path.display());
                TextNormalizer::with_user_lexicon(path)?
            }
            None => TextNormalizer::new()?,
        };

        let model = match &config.model_path {
            Some(path) => match StatisticalClassifier::load(path) {
                Ok(model) => {
                    info!(
                        path = %path.display(),
                        features = model.category_model().n_features(),
                        priority_model = model.priority_model().is_some(),
                        "Loaded classification model"
                    );
                    Some(model)
                }
                Err(e) => {
                    warn!("Classification model unavailable, using keyword rules: {}", e);
                    None
                }
            },
            None => {
                warn!("No model path configured, using keyword rules");
                None
            }
        };

        Ok(Self::new(normalizer, RuleClassifier::new()?, model))
    }

    /// Whether a trained model is loaded
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Loaded model, if any
    pub fn model(&self) -> Option<&StatisticalClassifier> {
        self.model.as_ref()
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Classify a ticket from its subject and description
    pub fn classify(&self, subject: &str, description: &str) -> ClassificationResult {
        self.classify_ticket(&TicketText::new(subject, description))
    }

    /// Classify a [`TicketText`]
    pub fn classify_ticket(&self, ticket: &TicketText) -> ClassificationResult {
        let start = Instant::now();

        let normalized = self.normalizer.normalize(&ticket.combined());

        let result = if normalized.is_empty() {
            warn!("Ticket text is empty after normalization, using default classification");
            ClassificationResult::empty_input()
        } else {
            self.classify_normalized(&normalized)
        };

        let latency = start.elapsed();
        ::metrics::counter!(names::CLASSIFICATIONS_TOTAL, "method" => result.method.as_str())
            .increment(1);
        ::metrics::histogram!(names::CONFIDENCE).record(result.confidence);
        ::metrics::histogram!(names::CLASSIFY_LATENCY_US).record(latency.as_micros() as f64);
        if let Some(collector) = &self.collector {
            collector.record_classification(result.method, latency.as_micros() as u64);
        }

        debug!(
            method = %result.method,
            category = %result.category,
            priority = %result.priority,
            confidence = result.confidence,
            latency_us = latency.as_micros() as u64,
            "Ticket classified"
        );

        result
    }

    /// Classify several tickets, preserving order
    pub fn classify_batch(&self, tickets: &[TicketText]) -> Vec<ClassificationResult> {
        tickets.iter().map(|t| self.classify_ticket(t)).collect()
    }

    fn classify_normalized(&self, normalized: &str) -> ClassificationResult {
        if let Some(model) = &self.model {
            match predict_with(model, normalized) {
                Ok(result) => return result,
                Err(fault) => {
                    error!(%fault, "Statistical prediction failed, falling back to rules");
                    ::metrics::counter!(names::PREDICTION_FAULTS_TOTAL).increment(1);
                    if let Some(collector) = &self.collector {
                        collector.record_fault();
                    }
                }
            }
        }

        self.rules.classify_by_rules(normalized)
    }
}

fn predict_with(
    model: &StatisticalClassifier,
    normalized: &str,
) -> std::result::Result<ClassificationResult, PredictionFault> {
    let (category, confidence) = model.predict(normalized)?;
    let priority = model.predict_priority(normalized)?;
    Ok(ClassificationResult::new(
        category,
        priority,
        confidence,
        Method::MlModel,
    ))
}
