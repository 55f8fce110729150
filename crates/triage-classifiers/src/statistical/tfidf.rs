//! TF-IDF vectorizer over a fixed, trained vocabulary
//!
//! Follows the scikit-learn `TfidfVectorizer` transform: `\b\w\w+\b` word
//! tokens, word n-grams, raw or sublinear term frequency, IDF weighting and
//! row normalization.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use triage_core::{Error, PredictionFault, Result};

/// Sparse feature vector: (feature index, weight), sorted by index
pub type SparseVector = Vec<(usize, f64)>;

/// Row normalization applied after IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    /// Term → column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    pub idf: Vec<f64>,

    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Use `1 + ln(tf)` instead of raw counts
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Row normalization (`null` disables it)
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,

    /// Lowercase input before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_true() -> bool {
    true
}

/// Ready-to-use vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    lowercase: bool,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Validate a serialized vectorizer and compile its tokenizer
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self> {
        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::model_unavailable(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        if spec.vocabulary.len() != spec.idf.len() {
            return Err(Error::model_unavailable(format!(
                "vocabulary has {} terms but idf has {} weights",
                spec.vocabulary.len(),
                spec.idf.len()
            )));
        }

        if let Some((term, idx)) = spec
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx >= spec.idf.len())
        {
            return Err(Error::model_unavailable(format!(
                "term '{}' points at column {} outside {} columns",
                term,
                idx,
                spec.idf.len()
            )));
        }

        if spec.idf.iter().any(|w| !w.is_finite()) {
            return Err(Error::model_unavailable("idf contains non-finite weights"));
        }

        let token_pattern = Regex::new(r"\b\w\w+\b")
            .map_err(|e| Error::internal(format!("Failed to compile token pattern: {}", e)))?;

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf: spec.idf,
            ngram_range: spec.ngram_range,
            sublinear_tf: spec.sublinear_tf,
            norm: spec.norm,
            lowercase: spec.lowercase,
            token_pattern,
        })
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Transform one document into a sparse TF-IDF row
    pub fn transform(&self, text: &str) -> std::result::Result<SparseVector, PredictionFault> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let gram = window.join(" ");
                if let Some(&idx) = self.vocabulary.get(&gram) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut row: SparseVector = Vec::with_capacity(counts.len());
        for (idx, count) in counts {
            let idf = *self.idf.get(idx).ok_or(PredictionFault::DimensionMismatch {
                component: "idf",
                expected: idx + 1,
                found: self.idf.len(),
            })?;
            let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
            row.push((idx, tf * idf));
        }
        row.sort_by_key(|(idx, _)| *idx);

        if let Some(norm) = self.norm {
            let magnitude = match norm {
                Norm::L1 => row.iter().map(|(_, w)| w.abs()).sum::<f64>(),
                Norm::L2 => row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            };
            if magnitude > 0.0 {
                for (_, w) in row.iter_mut() {
                    *w /= magnitude;
                }
            }
        }

        Ok(row)
    }
}
