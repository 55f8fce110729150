//! Statistical classifier built from a trained model artifact

pub mod artifact;
pub mod linear;
pub mod tfidf;

pub use artifact::{load_model, ArtifactMetadata, ModelArtifact, TextModelSpec};
pub use linear::{LogisticRegression, LogisticRegressionSpec, MultiClass};
pub use tfidf::{Norm, SparseVector, TfidfVectorizer, VectorizerSpec};

use std::path::Path;
use triage_core::{Category, Error, PredictionFault, Priority, Result};

/// Argmax of a probability distribution
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrediction {
    /// Winning label
    pub label: String,

    /// Probability mass of the winning label
    pub confidence: f64,

    /// Probability per label, in class order
    pub scores: Vec<(String, f64)>,
}

/// Vectorizer and classifier trained together for one label family
#[derive(Debug, Clone)]
pub struct TextModel {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl TextModel {
    /// Build a model, checking that both halves agree on the feature space
    pub fn from_spec(spec: TextModelSpec) -> Result<Self> {
        let vectorizer = TfidfVectorizer::from_spec(spec.vectorizer)?;
        let classifier = LogisticRegression::from_spec(spec.classifier, vectorizer.n_features())?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Labels this model can produce
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    /// Vocabulary size
    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Most probable label for normalized text
    pub fn predict(&self, text: &str) -> std::result::Result<LabelPrediction, PredictionFault> {
        let row = self.vectorizer.transform(text)?;
        let proba = self.classifier.predict_proba(&row)?;

        // first maximum wins on ties
        let mut best: Option<(usize, f64)> = None;
        for (idx, &p) in proba.iter().enumerate() {
            match best {
                Some((_, top)) if p <= top => {}
                _ => best = Some((idx, p)),
            }
        }
        let (best_idx, confidence) = best.ok_or(PredictionFault::EmptyDistribution)?;

        let scores = self
            .classes()
            .iter()
            .cloned()
            .zip(proba.iter().copied())
            .collect();

        Ok(LabelPrediction {
            label: self.classes()[best_idx].clone(),
            confidence,
            scores,
        })
    }
}

/// Category predictor with an optional, independent priority predictor
#[derive(Debug, Clone)]
pub struct StatisticalClassifier {
    category: TextModel,
    priority: Option<TextModel>,
    metadata: ArtifactMetadata,
}

impl StatisticalClassifier {
    /// Build from a parsed artifact. An artifact without a category model
    /// is unusable.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let category_spec = artifact
            .category_model
            .ok_or_else(|| Error::model_unavailable("artifact has no category model"))?;

        let category = TextModel::from_spec(category_spec)?;
        let priority = artifact
            .priority_model
            .map(TextModel::from_spec)
            .transpose()?;

        Ok(Self {
            category,
            priority,
            metadata: artifact.metadata,
        })
    }

    /// Load and build from a JSON artifact on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_artifact(load_model(path)?)
    }

    /// Predict the category and its probability
    pub fn predict(&self, text: &str) -> std::result::Result<(Category, f64), PredictionFault> {
        let prediction = self.category.predict(text)?;
        let category = prediction.label.parse::<Category>()?;
        Ok((category, prediction.confidence))
    }

    /// Predict the priority; `Normal` when no priority model was trained
    pub fn predict_priority(&self, text: &str) -> std::result::Result<Priority, PredictionFault> {
        match &self.priority {
            Some(model) => model.predict(text)?.label.parse::<Priority>(),
            None => Ok(Priority::Normal),
        }
    }

    pub fn category_model(&self) -> &TextModel {
        &self.category
    }

    pub fn priority_model(&self) -> Option<&TextModel> {
        self.priority.as_ref()
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }
}
