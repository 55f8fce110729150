//! Action execution against in-memory and failing sinks

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use triage_core::{Action, Category, ClassificationResult, Error, Method, Priority, Result};
use triage_policy::{ActionExecutor, ActionRouter, JsonLinesSink, TicketSink, Thresholds};
use triage_telemetry::MetricsCollector;

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<(String, Action)>>,
}

impl RecordingSink {
    fn calls(&self) -> Vec<(String, Action)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketSink for RecordingSink {
    async fn apply_classification(&self, ticket_id: &str, _result: &ClassificationResult) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((ticket_id.to_string(), Action::AutoApply));
        Ok(())
    }

    async fn post_suggestion(&self, ticket_id: &str, _result: &ClassificationResult) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((ticket_id.to_string(), Action::Suggest));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

struct FailingSink;

#[async_trait]
impl TicketSink for FailingSink {
    async fn apply_classification(&self, _: &str, _: &ClassificationResult) -> Result<()> {
        Err(Error::sink("service desk returned 503"))
    }

    async fn post_suggestion(&self, _: &str, _: &ClassificationResult) -> Result<()> {
        Err(Error::sink("service desk returned 503"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn classified(confidence: f64) -> ClassificationResult {
    ClassificationResult::new(Category::Hardware, Priority::Normal, confidence, Method::MlModel)
}

#[tokio::test]
async fn test_actions_follow_confidence() {
    let sink = Arc::new(RecordingSink::default());
    let executor = ActionExecutor::new(ActionRouter::default(), sink.clone());

    let auto = executor.execute("T-1", &classified(0.85)).await;
    let suggest = executor.execute("T-2", &classified(0.65)).await;
    let manual = executor.execute("T-3", &classified(0.45)).await;

    assert_eq!(auto.action, Action::AutoApply);
    assert!(auto.applied);
    assert!(!auto.comment_posted);
    assert_eq!(suggest.action, Action::Suggest);
    assert!(!suggest.applied);
    assert!(suggest.comment_posted);
    assert_eq!(manual.action, Action::Manual);
    assert!(!manual.applied);
    assert!(!manual.comment_posted);
    assert!(manual.error.is_none());

    assert_eq!(
        sink.calls(),
        vec![
            ("T-1".to_string(), Action::AutoApply),
            ("T-2".to_string(), Action::Suggest),
        ]
    );
}

#[tokio::test]
async fn test_dry_run_never_calls_sink() {
    let sink = Arc::new(RecordingSink::default());
    let executor = ActionExecutor::new(ActionRouter::default(), sink.clone()).with_dry_run(true);

    let outcome = executor.execute("T-1", &classified(0.95)).await;
    assert!(outcome.applied);
    assert!(outcome.dry_run);

    let outcome = executor.execute("T-2", &classified(0.55)).await;
    assert!(!outcome.applied);
    assert!(outcome.comment_posted);

    assert!(sink.calls().is_empty());
}

#[tokio::test]
async fn test_sink_failure_is_reported() {
    let metrics = MetricsCollector::new();
    let executor =
        ActionExecutor::new(ActionRouter::default(), Arc::new(FailingSink)).with_metrics(metrics.clone());

    let outcome = executor.execute("T-9", &classified(0.9)).await;
    assert_eq!(outcome.action, Action::AutoApply);
    assert!(!outcome.applied);
    assert!(!outcome.comment_posted);
    assert!(outcome.is_failure());
    assert!(outcome.error.unwrap().contains("503"));

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.auto_apply, 1);
    assert_eq!(snapshot.sink_failures, 1);
}

#[tokio::test]
async fn test_custom_thresholds_route_differently() {
    let sink = Arc::new(RecordingSink::default());
    let router = ActionRouter::new(Thresholds::new(0.95, 0.70).unwrap());
    let executor = ActionExecutor::new(router, sink.clone());

    assert_eq!(executor.execute("T-1", &classified(0.9)).await.action, Action::Suggest);
    assert_eq!(executor.execute("T-2", &classified(0.6)).await.action, Action::Manual);
}

#[tokio::test]
async fn test_jsonl_sink_records_applied_actions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decisions.jsonl");
    let sink = Arc::new(JsonLinesSink::open(&path).await.unwrap());
    let executor = ActionExecutor::new(ActionRouter::default(), sink);

    executor.execute("T-1", &classified(0.85)).await;
    executor.execute("T-2", &classified(0.30)).await;
    executor.execute("T-3", &classified(0.70)).await;

    let records = JsonLinesSink::read_records(&path).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].ticket_id, "T-1");
    assert!(records[0].comment.contains("Уверенность: 85.00%"));
    assert_eq!(records[1].ticket_id, "T-3");
    assert!(records[1].comment.contains("Рекомендуется применить"));
}
