//! On-disk model artifact
//!
//! A single JSON document carrying a category model and an optional priority
//! model, each a TF-IDF vectorizer paired with a logistic regression.

use super::linear::LogisticRegressionSpec;
use super::tfidf::VectorizerSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use triage_core::{Error, Result};

/// Artifact format this build understands
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// Descriptive fields carried alongside the weights
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    /// Number of training tickets
    #[serde(default)]
    pub trained_on: Option<usize>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Vectorizer plus classifier for one label family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextModelSpec {
    pub vectorizer: VectorizerSpec,
    pub classifier: LogisticRegressionSpec,
}

/// Root of a serialized model file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,

    #[serde(default)]
    pub metadata: ArtifactMetadata,

    #[serde(default)]
    pub category_model: Option<TextModelSpec>,

    #[serde(default)]
    pub priority_model: Option<TextModelSpec>,
}

impl ModelArtifact {
    /// Parse an artifact from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(json)
            .map_err(|e| Error::model_unavailable(format!("malformed model artifact: {}", e)))?;

        if artifact.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(Error::model_unavailable(format!(
                "unsupported artifact format version {} (expected {})",
                artifact.format_version, SUPPORTED_FORMAT_VERSION
            )));
        }

        Ok(artifact)
    }
}

/// Read and parse a model artifact from disk.
///
/// Every failure, including a missing file, is reported as
/// [`Error::ModelUnavailable`].
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            Error::model_unavailable(format!("model file not found: {}", path.display()))
        }
        _ => Error::model_unavailable(format!("cannot read {}: {}", path.display(), e)),
    })?;

    ModelArtifact::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_model_unavailable() {
        let err = load_model("/nonexistent/classifier_model.json").unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn test_malformed_file_is_model_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        let err = load_model(file.path()).unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn test_rejects_unknown_format_version() {
        let err = ModelArtifact::from_json(r#"{"format_version": 2}"#).unwrap_err();
        assert!(err.to_string().contains("format version"));
    }

    #[test]
    fn test_minimal_artifact_parses() {
        let artifact = ModelArtifact::from_json(r#"{"format_version": 1}"#).unwrap();
        assert!(artifact.category_model.is_none());
        assert!(artifact.priority_model.is_none());
        assert!(artifact.metadata.name.is_none());
    }
}
