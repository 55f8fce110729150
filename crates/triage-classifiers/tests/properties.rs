//! Property tests for normalization and rule-only classification

use proptest::prelude::*;
use std::io::Write;
use triage_classifiers::{ClassificationEngine, TextNormalizer};
use triage_core::{Category, Method};

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "\\PC{0,80}") {
        let normalizer = TextNormalizer::new().unwrap();
        let once = normalizer.normalize(&text);
        prop_assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_ticket_like_text(
        text in "[А-Яа-яЁёA-Za-z0-9 ,.!?-]{0,120}"
    ) {
        let normalizer = TextNormalizer::new().unwrap();
        let once = normalizer.normalize(&text);
        prop_assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn normalized_words_are_long_lowercase_letters(text in "\\PC{0,80}") {
        let normalizer = TextNormalizer::new().unwrap();
        for word in normalizer.normalize(&text).split(' ').filter(|w| !w.is_empty()) {
            prop_assert!(word.chars().count() >= 3);
            prop_assert!(word.chars().all(|c| matches!(c, 'а'..='я' | 'ё' | 'a'..='z')));
        }
    }

    #[test]
    fn rule_only_engine_is_total(subject in "\\PC{0,40}", description in "\\PC{0,80}") {
        let engine = ClassificationEngine::rule_based().unwrap();
        let result = engine.classify(&subject, &description);

        prop_assert!(matches!(result.method, Method::RuleBased | Method::Default));
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert_eq!(result.support_group.is_empty(), false);
        if result.method == Method::Default {
            prop_assert_eq!(result.category, Category::Other);
        }
    }
}

#[test]
fn test_user_lexicon_extends_normalization() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# helpdesk slang").unwrap();
    writeln!(file, "принтак\tпринтер").unwrap();
    writeln!(file, "впнка\tvpn\t2.0").unwrap();

    let normalizer = TextNormalizer::with_user_lexicon(file.path()).unwrap();
    assert!(normalizer.normalize("Принтак опять завис").starts_with("принтер опять"));
    assert_eq!(normalizer.normalize("впнка"), "vpn");
}

#[test]
fn test_invalid_user_lexicon_names_line() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "принтак\tпринтер").unwrap();
    writeln!(file, "без-леммы").unwrap();

    let err = TextNormalizer::with_user_lexicon(file.path())
        .err()
        .unwrap()
        .to_string();
    assert!(err.contains("line 2"), "{}", err);
}
