//! Confidence thresholds and action routing

use serde::Serialize;
use triage_core::{Action, ClassificationResult, Error, Result};

/// Confidence breakpoints between manual, suggest and auto-apply
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    auto_apply: f64,
    min_confidence: f64,
}

impl Thresholds {
    pub const DEFAULT_AUTO_APPLY: f64 = 0.80;
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.50;

    /// Create validated thresholds
    pub fn new(auto_apply: f64, min_confidence: f64) -> Result<Self> {
        let issues = Self::issues(auto_apply, min_confidence);
        if !issues.is_empty() {
            return Err(Error::config(issues.join("; ")));
        }

        Ok(Self {
            auto_apply,
            min_confidence,
        })
    }

    /// Problems with a threshold pair, empty when valid
    pub fn issues(auto_apply: f64, min_confidence: f64) -> Vec<String> {
        let mut issues = Vec::new();

        for (name, value) in [("auto_apply", auto_apply), ("min_confidence", min_confidence)] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(format!("{} threshold {} is outside [0, 1]", name, value));
            }
        }

        if auto_apply.is_nan() || min_confidence.is_nan() || auto_apply <= min_confidence {
            issues.push(format!(
                "auto_apply threshold {} must be greater than min_confidence {}",
                auto_apply, min_confidence
            ));
        }

        issues
    }

    pub fn auto_apply(&self) -> f64 {
        self.auto_apply
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            auto_apply: Self::DEFAULT_AUTO_APPLY,
            min_confidence: Self::DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Maps classification confidence to an [`Action`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionRouter {
    thresholds: Thresholds,
}

impl ActionRouter {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Route a confidence value.
    ///
    /// Values outside `[0, 1]` are clamped; NaN routes to manual.
    pub fn route(&self, confidence: f64) -> Action {
        if confidence.is_nan() {
            return Action::Manual;
        }

        let confidence = confidence.clamp(0.0, 1.0);
        if confidence >= self.thresholds.auto_apply {
            Action::AutoApply
        } else if confidence >= self.thresholds.min_confidence {
            Action::Suggest
        } else {
            Action::Manual
        }
    }

    /// Route a classification by its confidence
    pub fn route_result(&self, result: &ClassificationResult) -> Action {
        self.route(result.confidence)
    }
}
