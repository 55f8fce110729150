//! Latency benchmarks for ticket classification
//!
//! Run with: cargo bench -p triage-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

use triage_classifiers::{ClassificationEngine, ClassifierConfig, TextNormalizer};

const TICKETS: &[(&str, &str, &str)] = &[
    ("short_mail", "Не работает Outlook", "Outlook при запуске выдает ошибку"),
    (
        "urgent",
        "КРИТИЧНО! Сервер недоступен",
        "Все базы данных не работают, срочно нужна помощь",
    ),
    (
        "long_hardware",
        "Принтер на третьем этаже",
        "Принтер в бухгалтерии печатает пустые листы, картридж меняли на прошлой неделе, \
         драйвер переустанавливали, монитор рядом тоже иногда мерцает. Просьба посмотреть, \
         когда будет время.",
    ),
];

fn benchmark_normalizer(c: &mut Criterion) {
    let normalizer = TextNormalizer::new().expect("Failed to create normalizer");

    let mut group = c.benchmark_group("normalize");
    for (name, subject, description) in TICKETS {
        let text = format!("{} {}", subject, description);
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| normalizer.normalize(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_classify(c: &mut Criterion) {
    let rules = ClassificationEngine::rule_based().expect("Failed to create engine");
    let model = ClassificationEngine::from_config(&ClassifierConfig {
        model_path: Some(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ticket_model.json"),
        ),
        lexicon_path: None,
    })
    .expect("Failed to create engine");

    let mut group = c.benchmark_group("classify");
    group.sample_size(100);

    for (name, subject, description) in TICKETS {
        group.bench_with_input(
            BenchmarkId::new("rule_based", name),
            &(subject, description),
            |b, (s, d)| b.iter(|| rules.classify(black_box(s), black_box(d))),
        );
        group.bench_with_input(
            BenchmarkId::new("ml_model", name),
            &(subject, description),
            |b, (s, d)| b.iter(|| model.classify(black_box(s), black_box(d))),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalizer, benchmark_classify);
criterion_main!(benches);
