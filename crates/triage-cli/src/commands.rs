//! Subcommand implementations

use crate::config::TriageConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use triage_classifiers::{ClassificationEngine, StatisticalClassifier, TextNormalizer};
use triage_core::{ClassificationResult, TicketText};
use triage_policy::{ActionExecutor, ActionOutcome, ActionRouter, JsonLinesSink, Thresholds};
use triage_telemetry::MetricsCollector;

/// One ticket from an input file
#[derive(Debug, Clone, Deserialize)]
pub struct TicketInput {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(flatten)]
    pub text: TicketText,
}

#[derive(Serialize)]
struct BatchLine<'a> {
    id: &'a str,

    #[serde(flatten)]
    result: &'a ClassificationResult,
}

#[derive(Serialize)]
struct ProcessLine<'a> {
    #[serde(flatten)]
    outcome: &'a ActionOutcome,

    classification: &'a ClassificationResult,
}

pub fn classify(config: &TriageConfig, subject: &str, description: &str) -> Result<()> {
    let engine = ClassificationEngine::from_config(&config.classifier_config())?;
    let result = engine.classify(subject, description);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Classify a ticket file. Rows without an id or subject are skipped with a
/// warning.
pub fn batch(config: &TriageConfig, input: &Path) -> Result<()> {
    let tickets = read_tickets(input)?;
    let engine = ClassificationEngine::from_config(&config.classifier_config())?;

    let mut classified = 0;
    for (idx, ticket) in tickets.iter().enumerate() {
        let Some(id) = batch_id(ticket) else {
            warn!(ticket = idx + 1, "Skipping ticket without id or subject");
            continue;
        };

        let result = engine.classify_ticket(&ticket.text);
        let line = BatchLine { id, result: &result };
        println!("{}", serde_json::to_string(&line)?);
        classified += 1;
    }

    info!(
        classified,
        skipped = tickets.len() - classified,
        "Batch classification complete"
    );
    Ok(())
}

/// Id of a ticket eligible for batch classification
fn batch_id(ticket: &TicketInput) -> Option<&str> {
    match ticket.id.as_deref() {
        Some(id) if !id.is_empty() && !ticket.text.subject.is_empty() => Some(id),
        _ => None,
    }
}

pub fn route(thresholds: Thresholds, confidence: f64) -> Result<()> {
    let router = ActionRouter::new(thresholds);
    let action = router.route(confidence);
    println!(
        "{}",
        json!({
            "confidence": confidence,
            "action": action,
            "thresholds": router.thresholds(),
        })
    );
    Ok(())
}

pub fn normalize(config: &TriageConfig, text: &str) -> Result<()> {
    let normalizer = match &config.lexicon_path {
        Some(path) => TextNormalizer::with_user_lexicon(path)?,
        None => TextNormalizer::new()?,
    };
    println!("{}", normalizer.normalize(text));
    Ok(())
}

pub async fn process(config: &TriageConfig, thresholds: Thresholds, input: &Path) -> Result<()> {
    let tickets = read_tickets(input)?;
    let collector = MetricsCollector::new();

    let engine = ClassificationEngine::from_config(&config.classifier_config())?
        .with_metrics(collector.clone());
    let sink = JsonLinesSink::open(&config.decisions_log).await?;
    let executor = ActionExecutor::new(ActionRouter::new(thresholds), Arc::new(sink))
        .with_dry_run(config.dry_run)
        .with_metrics(collector.clone());

    info!(
        tickets = tickets.len(),
        dry_run = config.dry_run,
        log = %config.decisions_log.display(),
        "Processing tickets"
    );

    for (idx, ticket) in tickets.iter().enumerate() {
        let ticket_id = ticket
            .id
            .clone()
            .unwrap_or_else(|| format!("#{}", idx + 1));

        let result = engine.classify_ticket(&ticket.text);
        let outcome = executor.execute(&ticket_id, &result).await;

        let line = ProcessLine {
            outcome: &outcome,
            classification: &result,
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    let snapshot = collector.snapshot();
    info!(
        total = snapshot.total_requests,
        model_rate = snapshot.model_rate(),
        fallback_rate = snapshot.fallback_rate(),
        auto_apply_rate = snapshot.auto_apply_rate(),
        faults = snapshot.prediction_faults,
        sink_failures = snapshot.sink_failures,
        avg_latency_us = snapshot.avg_latency_us(),
        "Processing complete"
    );
    eprintln!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

pub fn inspect_model(config: &TriageConfig, path: Option<&Path>) -> Result<()> {
    let path = path
        .or(config.model_path.as_deref())
        .context("No model path given and none configured")?;

    let model = StatisticalClassifier::load(path)?;
    let summary = json!({
        "path": path.display().to_string(),
        "metadata": model.metadata(),
        "category_model": {
            "classes": model.category_model().classes(),
            "features": model.category_model().n_features(),
        },
        "priority_model": model.priority_model().map(|m| json!({
            "classes": m.classes(),
            "features": m.n_features(),
        })),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Read tickets from a JSON array or JSON Lines, `-` meaning stdin
fn read_tickets(input: &Path) -> Result<Vec<TicketInput>> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    parse_tickets(&content)
}

fn parse_tickets(content: &str) -> Result<Vec<TicketInput>> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).context("Invalid JSON ticket array");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid ticket on line {}", idx + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_lines() {
        let content = r#"{"id": "INC-1", "subject": "Не работает VPN", "description": "с утра"}

{"subject": "Принтер"}
"#;
        let tickets = parse_tickets(content).unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].id.as_deref(), Some("INC-1"));
        assert_eq!(tickets[0].text.description, "с утра");
        assert!(tickets[1].id.is_none());
        assert_eq!(tickets[1].text.description, "");
    }

    #[test]
    fn test_parse_json_array() {
        let content = r#"[{"id": "1", "subject": "a"}, {"id": "2", "description": "b"}]"#;
        let tickets = parse_tickets(content).unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[1].text.subject, "");
    }

    #[test]
    fn test_batch_skips_tickets_without_id_or_subject() {
        let content = r#"{"id": "INC-1", "subject": "VPN"}
{"subject": "Принтер"}
{"id": "INC-3", "subject": "", "description": "нет темы"}
{"id": "", "subject": "Почта"}
"#;
        let tickets = parse_tickets(content).unwrap();
        let ids: Vec<_> = tickets.iter().filter_map(batch_id).collect();
        assert_eq!(ids, vec!["INC-1"]);
    }

    #[test]
    fn test_parse_reports_line() {
        let err = parse_tickets("{\"subject\": \"ok\"}\n{broken\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
