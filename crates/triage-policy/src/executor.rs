//! Action executor for classified tickets
//!
//! Routes each classification by confidence and carries the action out:
//! - auto-apply: write fields to the ticket plus an audit comment
//! - suggest: post a suggestion comment only
//! - manual: no external call, logged only
//!
//! In dry-run mode nothing reaches the sink; the intended call is logged and
//! the outcome flags describe what would have happened.

use crate::router::ActionRouter;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};
use triage_core::{Action, ClassificationResult, Result};
use triage_telemetry::{names, MetricsCollector};

/// Downstream ticketing system
#[async_trait]
pub trait TicketSink: Send + Sync {
    /// Write category, group and priority to the ticket, with an audit comment
    async fn apply_classification(&self, ticket_id: &str, result: &ClassificationResult)
        -> Result<()>;

    /// Attach a suggestion comment without changing the ticket
    async fn post_suggestion(&self, ticket_id: &str, result: &ClassificationResult) -> Result<()>;

    /// Sink name for logs
    fn name(&self) -> &str;
}

/// Internal comment written alongside an applied classification
pub fn audit_comment(result: &ClassificationResult) -> String {
    format!(
        "Автоматическая классификация:\n\
         Категория: {}\n\
         Группа поддержки: {}\n\
         Приоритет: {}\n\
         Уверенность: {:.2}%\n\
         Метод: {}",
        result.category,
        result.support_group,
        result.priority,
        result.confidence * 100.0,
        result.method
    )
}

/// Internal comment proposing a classification for manual review
pub fn suggestion_comment(result: &ClassificationResult) -> String {
    format!(
        "🤖 Рекомендация AI Assistant:\n\n\
         Категория: {}\n\
         Группа поддержки: {}\n\
         Приоритет: {}\n\
         Уверенность: {:.2}%\n\n\
         Рекомендуется применить эту классификацию вручную.",
        result.category,
        result.support_group,
        result.priority,
        result.confidence * 100.0
    )
}

/// Outcome of executing the routed action for one ticket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub ticket_id: String,

    /// Routed action
    pub action: Action,

    /// Ticket fields were written; only auto-apply sets this
    pub applied: bool,

    /// Suggestion comment was posted; only suggest sets this
    pub comment_posted: bool,

    /// Sink was not called
    pub dry_run: bool,

    /// Sink failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionOutcome {
    fn new(ticket_id: &str, action: Action, dry_run: bool) -> Self {
        Self {
            ticket_id: ticket_id.to_string(),
            action,
            applied: false,
            comment_posted: false,
            dry_run,
            error: None,
        }
    }

    /// Whether the sink reported a failure
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Action executor
pub struct ActionExecutor {
    router: ActionRouter,
    sink: Arc<dyn TicketSink>,
    dry_run: bool,
    metrics: Option<MetricsCollector>,
}

impl ActionExecutor {
    /// Create a new action executor
    pub fn new(router: ActionRouter, sink: Arc<dyn TicketSink>) -> Self {
        Self {
            router,
            sink,
            dry_run: false,
            metrics: None,
        }
    }

    /// Log intended actions instead of calling the sink
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Record actions into an in-process collector
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn router(&self) -> &ActionRouter {
        &self.router
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Route and execute the action for one classified ticket. Never fails;
    /// sink errors are reported in the outcome.
    pub async fn execute(&self, ticket_id: &str, result: &ClassificationResult) -> ActionOutcome {
        let action = self.router.route_result(result);
        let mut outcome = ActionOutcome::new(ticket_id, action, self.dry_run);

        ::metrics::counter!(names::ACTIONS_TOTAL, "action" => action.as_str()).increment(1);
        if let Some(metrics) = &self.metrics {
            metrics.record_action(action);
        }

        let sent = match action {
            Action::AutoApply => {
                if self.dry_run {
                    info!(
                        ticket_id,
                        category = %result.category,
                        group = %result.support_group,
                        priority = %result.priority,
                        "DRY RUN: would apply classification"
                    );
                    Ok(())
                } else {
                    self.sink.apply_classification(ticket_id, result).await
                }
            }
            Action::Suggest => {
                if self.dry_run {
                    info!(
                        ticket_id,
                        category = %result.category,
                        confidence = result.confidence,
                        "DRY RUN: would post suggestion"
                    );
                    Ok(())
                } else {
                    self.sink.post_suggestion(ticket_id, result).await
                }
            }
            Action::Manual => {
                info!(
                    ticket_id,
                    confidence = result.confidence,
                    "Confidence too low, leaving ticket for manual triage"
                );
                return outcome;
            }
        };

        match sent {
            Ok(()) => {
                match action {
                    Action::AutoApply => {
                        outcome.applied = true;
                        ::metrics::counter!(
                            names::AUTO_APPLIED_TOTAL,
                            "category" => result.category.as_str()
                        )
                        .increment(1);
                    }
                    Action::Suggest => outcome.comment_posted = true,
                    Action::Manual => {}
                }
                debug!(ticket_id, %action, sink = self.sink.name(), "Action executed");
            }
            Err(e) => {
                error!(ticket_id, %action, sink = self.sink.name(), "Failed to execute action: {}", e);
                if let Some(metrics) = &self.metrics {
                    metrics.record_sink_failure();
                }
                outcome.error = Some(e.to_string());
            }
        }

        outcome
    }
}
