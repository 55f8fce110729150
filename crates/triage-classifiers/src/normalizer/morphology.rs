//! Dictionary-driven morphological analyzer
//!
//! Maps inflected word forms to their normal (dictionary) form. Every
//! registered lemma parses to itself first, so reducing a lemma again is a
//! no-op. Unknown words pass through unchanged.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use triage_core::{Error, Result};

use super::lexicon;

/// Minimum length (in characters) of a lemma the lexicon accepts
pub const MIN_LEMMA_CHARS: usize = 3;

/// Score given to lexicon entries that do not specify one
pub const DEFAULT_SCORE: f32 = 1.0;

/// One candidate analysis of a word form
#[derive(Debug, Clone, PartialEq)]
pub struct Parse {
    /// Dictionary form of the word
    pub normal_form: String,

    /// Relative likelihood of this parse
    pub score: f32,
}

/// Immutable form → parses dictionary
#[derive(Debug, Clone, Default)]
pub struct MorphAnalyzer {
    entries: HashMap<String, Vec<Parse>>,
}

impl MorphAnalyzer {
    /// Create an analyzer over the built-in helpdesk lexicon
    pub fn new() -> Result<Self> {
        Ok(lexicon::builtin()?.build())
    }

    /// Create an analyzer over the built-in lexicon extended by a user TSV file
    pub fn with_user_lexicon(path: impl AsRef<Path>) -> Result<Self> {
        let mut builder = lexicon::builtin()?;
        builder.load_file(path)?;
        Ok(builder.build())
    }

    /// Start an empty lexicon
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::new()
    }

    /// All parses of `word`, most probable first.
    ///
    /// Words missing from the lexicon yield a single identity parse.
    pub fn parse(&self, word: &str) -> Vec<Parse> {
        match self.entries.get(word) {
            Some(parses) if !parses.is_empty() => parses.clone(),
            _ => vec![Parse {
                normal_form: word.to_string(),
                score: DEFAULT_SCORE,
            }],
        }
    }

    /// Normal form of the most probable parse
    pub fn normal_form<'a>(&'a self, word: &'a str) -> &'a str {
        self.entries
            .get(word)
            .and_then(|parses| parses.first())
            .map(|parse| parse.normal_form.as_str())
            .unwrap_or(word)
    }

    /// Whether the lexicon knows this form
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of distinct forms in the lexicon
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates lexicon entries and freezes them into a [`MorphAnalyzer`]
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    entries: HashMap<String, Vec<Parse>>,
    lemmas: HashSet<String>,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `form` as an inflection of `lemma`
    pub fn add_form(&mut self, form: &str, lemma: &str, score: f32) -> Result<&mut Self> {
        validate_word(form, "form")?;
        validate_lemma(lemma)?;
        if !score.is_finite() || score < 0.0 {
            return Err(Error::lexicon(format!(
                "score for '{}' must be a non-negative number, got {}",
                form, score
            )));
        }

        let parses = self.entries.entry(form.to_string()).or_default();
        match parses.iter_mut().find(|p| p.normal_form == lemma) {
            Some(existing) => existing.score = existing.score.max(score),
            None => parses.push(Parse {
                normal_form: lemma.to_string(),
                score,
            }),
        }
        self.lemmas.insert(lemma.to_string());
        Ok(self)
    }

    /// Register a lemma together with its inflected forms
    pub fn add_lexeme<I, S>(&mut self, lemma: &str, forms: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_form(lemma, lemma, DEFAULT_SCORE)?;
        for form in forms {
            let form = form.as_ref();
            if form.chars().count() < MIN_LEMMA_CHARS {
                // never looked up: the normalizer drops short words first
                continue;
            }
            self.add_form(form, lemma, DEFAULT_SCORE)?;
        }
        Ok(self)
    }

    /// Load `form<TAB>lemma[<TAB>score]` lines; `#` starts a comment
    pub fn load_tsv(&mut self, content: &str) -> Result<&mut Self> {
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            let (form, lemma, score) = match fields.as_slice() {
                [form, lemma] => (*form, *lemma, DEFAULT_SCORE),
                [form, lemma, score] => {
                    let score = score.parse::<f32>().map_err(|e| {
                        Error::lexicon(format!("line {}: invalid score '{}': {}", idx + 1, score, e))
                    })?;
                    (*form, *lemma, score)
                }
                _ => {
                    return Err(Error::lexicon(format!(
                        "line {}: expected 'form<TAB>lemma[<TAB>score]', got '{}'",
                        idx + 1,
                        raw
                    )))
                }
            };

            self.add_form(form, lemma, score)
                .map_err(|e| Error::lexicon(format!("line {}: {}", idx + 1, e)))?;
        }
        Ok(self)
    }

    /// Load a TSV lexicon file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::lexicon(format!("failed to read lexicon {}: {}", path.display(), e))
        })?;
        self.load_tsv(&content)
    }

    /// Freeze the lexicon.
    ///
    /// Each lemma's own entry gets the identity parse in first position, the
    /// remaining parses are ordered by descending score (ties keep insertion
    /// order).
    pub fn build(mut self) -> MorphAnalyzer {
        for lemma in &self.lemmas {
            let parses = self.entries.entry(lemma.clone()).or_default();
            if !parses.iter().any(|p| &p.normal_form == lemma) {
                parses.push(Parse {
                    normal_form: lemma.clone(),
                    score: DEFAULT_SCORE,
                });
            }
        }

        for (form, parses) in self.entries.iter_mut() {
            parses.sort_by(|a, b| {
                let a_identity = &a.normal_form == form;
                let b_identity = &b.normal_form == form;
                b_identity
                    .cmp(&a_identity)
                    .then_with(|| b.score.total_cmp(&a.score))
            });
        }

        MorphAnalyzer {
            entries: self.entries,
        }
    }
}

fn is_lexicon_char(c: char) -> bool {
    matches!(c, 'а'..='я' | 'ё' | 'a'..='z')
}

fn validate_word(word: &str, what: &str) -> Result<()> {
    if word.is_empty() || !word.chars().all(is_lexicon_char) {
        return Err(Error::lexicon(format!(
            "{} '{}' must be lowercase Cyrillic or Latin letters",
            what, word
        )));
    }
    Ok(())
}

fn validate_lemma(lemma: &str) -> Result<()> {
    validate_word(lemma, "lemma")?;
    if lemma.chars().count() < MIN_LEMMA_CHARS {
        return Err(Error::lexicon(format!(
            "lemma '{}' is shorter than {} characters",
            lemma, MIN_LEMMA_CHARS
        )));
    }
    Ok(())
}
