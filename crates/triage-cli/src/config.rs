//! Layered runtime configuration
//!
//! Built-in defaults, then an optional YAML file, then `TRIAGE__*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use triage_classifiers::config::default_model_path;
use triage_classifiers::ClassifierConfig;
use triage_policy::Thresholds;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TRIAGE";

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Trained model artifact
    #[serde(default = "default_model_path")]
    pub model_path: Option<PathBuf>,

    /// Extra morphology entries
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,

    #[serde(default)]
    pub thresholds: ThresholdSettings,

    /// Log intended ticket updates instead of writing them
    #[serde(default)]
    pub dry_run: bool,

    /// Decision log written by `process`
    #[serde(default = "default_decisions_log")]
    pub decisions_log: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Raw threshold values as configured, validated on use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_auto_apply")]
    pub auto_apply: f64,

    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            auto_apply: Thresholds::DEFAULT_AUTO_APPLY,
            min_confidence: Thresholds::DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl TriageConfig {
    /// Load configuration from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process
    /// environment
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            include_str!("../config/default.yaml"),
            config::FileFormat::Yaml,
        ));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Yaml));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Non-fatal problems with the configuration
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Thresholds::issues(self.thresholds.auto_apply, self.thresholds.min_confidence);

        match &self.model_path {
            Some(path) if !path.exists() => warnings.push(format!(
                "model file {} does not exist, keyword rules will be used",
                path.display()
            )),
            None => warnings.push("no model path configured, keyword rules will be used".to_string()),
            _ => {}
        }

        if let Some(path) = &self.lexicon_path {
            if !path.exists() {
                warnings.push(format!("lexicon file {} does not exist", path.display()));
            }
        }

        warnings
    }

    /// Validated thresholds. Invalid values are fatal unless running dry,
    /// where the defaults are used instead.
    pub fn thresholds(&self) -> anyhow::Result<Thresholds> {
        match Thresholds::new(self.thresholds.auto_apply, self.thresholds.min_confidence) {
            Ok(thresholds) => Ok(thresholds),
            Err(e) if self.dry_run => {
                warn!("{}; dry run continues with default thresholds", e);
                Ok(Thresholds::default())
            }
            Err(e) => Err(anyhow::anyhow!("Invalid thresholds: {}", e)),
        }
    }

    /// Settings for the classification engine
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            model_path: self.model_path.clone(),
            lexicon_path: self.lexicon_path.clone(),
        }
    }
}

fn default_auto_apply() -> f64 {
    Thresholds::DEFAULT_AUTO_APPLY
}

fn default_min_confidence() -> f64 {
    Thresholds::DEFAULT_MIN_CONFIDENCE
}

fn default_decisions_log() -> PathBuf {
    PathBuf::from("decisions.jsonl")
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = TriageConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config.thresholds, ThresholdSettings::default());
        assert!(!config.dry_run);
        assert_eq!(config.decisions_log, PathBuf::from("decisions.jsonl"));
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.model_path, default_model_path());
        assert!(config.lexicon_path.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triage.yaml");
        std::fs::write(
            &path,
            "model_path: /srv/triage/model.json\nthresholds:\n  auto_apply: 0.9\nlogging:\n  format: json\n",
        )
        .unwrap();

        let config = TriageConfig::load_with_env(Some(&path), env(&[])).unwrap();
        assert_eq!(config.model_path, Some(PathBuf::from("/srv/triage/model.json")));
        assert_eq!(config.thresholds.auto_apply, 0.9);
        assert_eq!(config.thresholds.min_confidence, 0.5);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triage.yaml");
        std::fs::write(&path, "dry_run: false\nthresholds:\n  auto_apply: 0.9\n").unwrap();

        let config = TriageConfig::load_with_env(
            Some(&path),
            env(&[
                ("TRIAGE__THRESHOLDS__AUTO_APPLY", "0.95"),
                ("TRIAGE__DRY_RUN", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.thresholds.auto_apply, 0.95);
        assert!(config.dry_run);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = TriageConfig::load_with_env(Some(Path::new("/nonexistent/triage.yaml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_thresholds() {
        let mut config = TriageConfig::load_with_env(None, env(&[])).unwrap();
        config.thresholds = ThresholdSettings {
            auto_apply: 0.4,
            min_confidence: 0.6,
        };
        config.model_path = None;

        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.contains("greater than")));
        assert!(config.thresholds().is_err());

        config.dry_run = true;
        assert_eq!(config.thresholds().unwrap(), Thresholds::default());
    }
}
