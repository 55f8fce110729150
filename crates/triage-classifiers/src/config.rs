//! Configuration for the classification engine

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use triage_core::{Error, Result};

/// File name of the trained model inside the data directory
pub const MODEL_FILE_NAME: &str = "classifier_model.json";

/// Where the engine finds its model and optional lexicon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Trained model artifact (JSON). `None` runs rule-only.
    #[serde(default = "default_model_path")]
    pub model_path: Option<PathBuf>,

    /// Extra morphology entries (TSV)
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

impl ClassifierConfig {
    /// Rule-only configuration with the built-in lexicon
    pub fn rule_only() -> Self {
        Self {
            model_path: None,
            lexicon_path: None,
        }
    }

    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            Error::config(format!(
                "Failed to load classifier config {}: {}",
                path.display(),
                e
            ))
        })
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            lexicon_path: None,
        }
    }
}

/// `<data dir>/ticket-triage/classifier_model.json`, if the platform has a
/// data directory
pub fn default_model_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("ticket-triage").join(MODEL_FILE_NAME))
}
