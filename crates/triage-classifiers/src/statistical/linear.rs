//! Logistic regression over sparse TF-IDF rows

use serde::{Deserialize, Serialize};
use triage_core::{Error, PredictionFault, Result};

/// How class probabilities are derived from decision values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    /// Softmax over all classes
    #[default]
    Multinomial,
    /// One-vs-rest sigmoids, renormalized
    Ovr,
}

/// Serialized classifier state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionSpec {
    /// Class labels in column order
    pub classes: Vec<String>,

    /// One weight row per class (a single row for binary problems)
    pub coef: Vec<Vec<f64>>,

    /// One bias per weight row
    pub intercept: Vec<f64>,

    #[serde(default)]
    pub multi_class: MultiClass,
}

/// Ready-to-use probabilistic linear classifier
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    multi_class: MultiClass,
}

impl LogisticRegression {
    /// Validate a serialized classifier against the feature width
    pub fn from_spec(spec: LogisticRegressionSpec, n_features: usize) -> Result<Self> {
        if spec.classes.len() < 2 {
            return Err(Error::model_unavailable(format!(
                "classifier needs at least 2 classes, found {}",
                spec.classes.len()
            )));
        }

        let expected_rows = if spec.classes.len() == 2 { 1 } else { spec.classes.len() };
        if spec.coef.len() != expected_rows {
            return Err(Error::model_unavailable(format!(
                "expected {} coefficient rows for {} classes, found {}",
                expected_rows,
                spec.classes.len(),
                spec.coef.len()
            )));
        }

        if spec.intercept.len() != spec.coef.len() {
            return Err(Error::model_unavailable(format!(
                "expected {} intercepts, found {}",
                spec.coef.len(),
                spec.intercept.len()
            )));
        }

        if let Some(row) = spec.coef.iter().find(|row| row.len() != n_features) {
            return Err(Error::model_unavailable(format!(
                "coefficient row has {} weights but the vectorizer has {} features",
                row.len(),
                n_features
            )));
        }

        Ok(Self {
            classes: spec.classes,
            coef: spec.coef,
            intercept: spec.intercept,
            multi_class: spec.multi_class,
        })
    }

    /// Class labels in probability order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Raw decision value per weight row
    pub fn decision_function(&self, row: &[(usize, f64)]) -> std::result::Result<Vec<f64>, PredictionFault> {
        let mut scores = Vec::with_capacity(self.coef.len());
        for (weights, bias) in self.coef.iter().zip(&self.intercept) {
            let mut score = *bias;
            for &(idx, value) in row {
                let weight = weights.get(idx).ok_or(PredictionFault::DimensionMismatch {
                    component: "coefficients",
                    expected: idx + 1,
                    found: weights.len(),
                })?;
                score += weight * value;
            }
            scores.push(score);
        }
        Ok(scores)
    }

    /// Probability per class, in [`classes`](Self::classes) order
    pub fn predict_proba(&self, row: &[(usize, f64)]) -> std::result::Result<Vec<f64>, PredictionFault> {
        if self.classes.is_empty() {
            return Err(PredictionFault::EmptyDistribution);
        }

        let scores = self.decision_function(row)?;
        if let Some(pos) = scores.iter().position(|s| !s.is_finite()) {
            return Err(PredictionFault::NonFiniteScore {
                label: self.classes.get(pos).cloned().unwrap_or_default(),
            });
        }

        let proba = match (scores.as_slice(), self.multi_class) {
            ([d], MultiClass::Ovr) => {
                let p = sigmoid(*d);
                vec![1.0 - p, p]
            }
            ([d], MultiClass::Multinomial) => softmax(&[-d, *d]),
            (_, MultiClass::Ovr) => {
                let raw: Vec<f64> = scores.iter().map(|s| sigmoid(*s)).collect();
                let total: f64 = raw.iter().sum();
                raw.into_iter().map(|p| p / total).collect()
            }
            (_, MultiClass::Multinomial) => softmax(&scores),
        };

        if proba.len() != self.classes.len() {
            return Err(PredictionFault::DimensionMismatch {
                component: "probabilities",
                expected: self.classes.len(),
                found: proba.len(),
            });
        }

        if let Some(pos) = proba.iter().position(|p| !p.is_finite()) {
            return Err(PredictionFault::NonFiniteScore {
                label: self.classes[pos].clone(),
            });
        }

        Ok(proba)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiclass() -> LogisticRegression {
        LogisticRegression::from_spec(
            LogisticRegressionSpec {
                classes: vec!["a".into(), "b".into(), "c".into()],
                coef: vec![vec![2.0, 0.0], vec![0.0, 2.0], vec![0.0, 0.0]],
                intercept: vec![0.0, 0.0, 0.5],
                multi_class: MultiClass::Multinomial,
            },
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_softmax_probabilities_sum_to_one() {
        let model = multiclass();
        let proba = model.predict_proba(&[(0, 1.0)]).unwrap();
        assert_eq!(proba.len(), 3);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(proba[0] > proba[1] && proba[0] > proba[2]);
    }

    #[test]
    fn test_empty_row_uses_intercepts() {
        let model = multiclass();
        let proba = model.predict_proba(&[]).unwrap();
        assert!(proba[2] > proba[0]);
        assert!((proba[0] - proba[1]).abs() < 1e-12);
    }

    #[test]
    fn test_binary_ovr_is_sigmoid() {
        let model = LogisticRegression::from_spec(
            LogisticRegressionSpec {
                classes: vec!["no".into(), "yes".into()],
                coef: vec![vec![1.0]],
                intercept: vec![0.0],
                multi_class: MultiClass::Ovr,
            },
            1,
        )
        .unwrap();
        let proba = model.predict_proba(&[(0, 2.0)]).unwrap();
        assert!((proba[1] - sigmoid(2.0)).abs() < 1e-12);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_binary_multinomial_is_doubled_sigmoid() {
        let model = LogisticRegression::from_spec(
            LogisticRegressionSpec {
                classes: vec!["no".into(), "yes".into()],
                coef: vec![vec![1.0]],
                intercept: vec![0.0],
                multi_class: MultiClass::Multinomial,
            },
            1,
        )
        .unwrap();
        let proba = model.predict_proba(&[(0, 1.0)]).unwrap();
        assert!((proba[1] - sigmoid(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_overflowing_weights_are_a_fault() {
        let model = LogisticRegression::from_spec(
            LogisticRegressionSpec {
                classes: vec!["a".into(), "b".into(), "c".into()],
                coef: vec![vec![f64::MAX], vec![0.0], vec![0.0]],
                intercept: vec![f64::MAX, 0.0, 0.0],
                multi_class: MultiClass::Multinomial,
            },
            1,
        )
        .unwrap();
        let err = model.predict_proba(&[(0, 1.0)]).unwrap_err();
        assert!(matches!(err, PredictionFault::NonFiniteScore { .. }));
    }

    #[test]
    fn test_out_of_range_feature_is_a_fault() {
        let model = multiclass();
        let err = model.predict_proba(&[(5, 1.0)]).unwrap_err();
        assert!(matches!(err, PredictionFault::DimensionMismatch { .. }));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let spec = LogisticRegressionSpec {
            classes: vec!["a".into(), "b".into(), "c".into()],
            coef: vec![vec![1.0, 2.0]],
            intercept: vec![0.0],
            multi_class: MultiClass::Multinomial,
        };
        assert!(LogisticRegression::from_spec(spec, 2).is_err());

        let spec = LogisticRegressionSpec {
            classes: vec!["only".into()],
            coef: vec![vec![1.0]],
            intercept: vec![0.0],
            multi_class: MultiClass::Multinomial,
        };
        assert!(LogisticRegression::from_spec(spec, 1).is_err());
    }
}
