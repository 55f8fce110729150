//! Keyword rule classifier (fallback path)
//!
//! Category keyword sets are checked in a fixed order and the first set with
//! any substring hit wins. Priority keywords are evaluated independently.

use aho_corasick::AhoCorasick;
use triage_core::{Category, ClassificationResult, Error, Method, Priority, Result};

/// Confidence when a category keyword matched
pub const MATCH_CONFIDENCE: f64 = 0.75;

/// Confidence when no category keyword matched
pub const NO_MATCH_CONFIDENCE: f64 = 0.60;

/// Added to the confidence when an urgent keyword is present
pub const URGENT_BOOST: f64 = 0.05;

/// Upper bound for the boosted confidence
pub const URGENT_BOOST_CAP: f64 = 0.95;

/// Category keyword sets in evaluation order
pub const CATEGORY_KEYWORDS: [(Category, &[&str]); 5] = [
    (Category::Mail, &["почта", "outlook", "email", "письмо", "mail"]),
    (Category::Network, &["сеть", "интернет", "wifi", "vpn", "подключение"]),
    (Category::OneC, &["1c", "бухгалтерия", "зуп", "erp"]),
    (Category::Hardware, &["принтер", "сканер", "мфу", "монитор", "клавиатура"]),
    (Category::Access, &["доступ", "пароль", "права", "логин", "учетная запись"]),
];

/// Keywords that raise priority to High
pub const URGENT_KEYWORDS: &[&str] = &["критично", "срочно", "critical", "все", "полностью"];

/// Keywords that lower priority to Low
pub const LOW_URGENCY_KEYWORDS: &[&str] = &["не срочно", "когда будет время", "low"];

/// Deterministic keyword classifier over normalized text
pub struct RuleClassifier {
    categories: Vec<(Category, AhoCorasick)>,
    urgent: AhoCorasick,
    low_urgency: AhoCorasick,
}

impl RuleClassifier {
    /// Create a rule classifier with the standard keyword sets
    pub fn new() -> Result<Self> {
        let mut categories = Vec::with_capacity(CATEGORY_KEYWORDS.len());
        for (category, keywords) in CATEGORY_KEYWORDS {
            categories.push((category, build_matcher(category.as_str(), keywords)?));
        }

        Ok(Self {
            categories,
            urgent: build_matcher("urgent", URGENT_KEYWORDS)?,
            low_urgency: build_matcher("low urgency", LOW_URGENCY_KEYWORDS)?,
        })
    }

    /// Classify normalized text. Never fails; empty text takes the no-match
    /// branch.
    pub fn classify_by_rules(&self, text: &str) -> ClassificationResult {
        let text = text.to_lowercase();

        let (category, mut confidence) = self
            .categories
            .iter()
            .find(|(_, matcher)| matcher.is_match(&text))
            .map(|(category, _)| (*category, MATCH_CONFIDENCE))
            .unwrap_or((Category::Other, NO_MATCH_CONFIDENCE));

        let priority = if self.urgent.is_match(&text) {
            confidence = (confidence + URGENT_BOOST).min(URGENT_BOOST_CAP);
            Priority::High
        } else if self.low_urgency.is_match(&text) {
            Priority::Low
        } else {
            Priority::Normal
        };

        ClassificationResult::new(category, priority, confidence, Method::RuleBased)
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new().expect("Failed to create rule classifier")
    }
}

fn build_matcher(name: &str, keywords: &[&str]) -> Result<AhoCorasick> {
    AhoCorasick::new(keywords)
        .map_err(|e| Error::internal(format!("Failed to build {} keyword matcher: {}", name, e)))
}
