//! Ticket text normalization
//!
//! Pipeline per text:
//!   lowercase → non-letter removal → whitespace collapse
//!   → short-word filter → lemmatization → rejoin

pub mod lexicon;
pub mod morphology;

pub use morphology::{LexiconBuilder, MorphAnalyzer, Parse};

use regex::Regex;
use std::path::Path;
use triage_core::{Error, Result};

/// Words with fewer characters than this are dropped
pub const MIN_WORD_CHARS: usize = 3;

/// Reduces raw ticket text to a canonical stream of lemmas
pub struct TextNormalizer {
    non_letters: Regex,
    analyzer: MorphAnalyzer,
}

impl TextNormalizer {
    /// Create a normalizer over the built-in lexicon
    pub fn new() -> Result<Self> {
        Self::with_analyzer(MorphAnalyzer::new()?)
    }

    /// Create a normalizer whose lexicon is extended from a TSV file
    pub fn with_user_lexicon(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_analyzer(MorphAnalyzer::with_user_lexicon(path)?)
    }

    /// Create a normalizer over an explicit analyzer
    pub fn with_analyzer(analyzer: MorphAnalyzer) -> Result<Self> {
        Ok(Self {
            non_letters: Regex::new(r"[^а-яёa-z\s]")
                .map_err(|e| Error::internal(format!("Failed to compile letter filter: {}", e)))?,
            analyzer,
        })
    }

    /// Normalize `text` into space-separated lemmas.
    ///
    /// Empty or letter-free input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let letters_only = self.non_letters.replace_all(&lowered, " ");

        letters_only
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_WORD_CHARS)
            .map(|word| self.analyzer.normal_form(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new().expect("Failed to create text normalizer")
    }
}
