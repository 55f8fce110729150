//! Local JSONL decision log acting as a ticket sink

use crate::executor::{audit_comment, suggestion_comment, TicketSink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use triage_core::{Action, ClassificationResult, Error, Result};
use uuid::Uuid;

/// One line of the decision log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: Uuid,
    pub ticket_id: String,
    pub action: Action,
    pub result: ClassificationResult,

    /// Comment text that would be attached to the ticket
    pub comment: String,

    pub timestamp: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn new(ticket_id: &str, action: Action, result: &ClassificationResult, comment: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticket_id: ticket_id.to_string(),
            action,
            result: result.clone(),
            comment,
            timestamp: Utc::now(),
        }
    }
}

/// Appends decisions to a JSON Lines file
pub struct JsonLinesSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesSink {
    /// Open (or create) the log for appending
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| Error::sink(format!("cannot open {}: {}", path.display(), e)))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, record: &DecisionRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| Error::sink(format!("write to {} failed: {}", self.path.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| Error::sink(format!("flush of {} failed: {}", self.path.display(), e)))?;
        Ok(())
    }

    /// Read every record back from a decision log
    pub async fn read_records(path: impl AsRef<Path>) -> Result<Vec<DecisionRecord>> {
        let content = tokio::fs::read_to_string(path).await?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl TicketSink for JsonLinesSink {
    async fn apply_classification(
        &self,
        ticket_id: &str,
        result: &ClassificationResult,
    ) -> Result<()> {
        let record = DecisionRecord::new(ticket_id, Action::AutoApply, result, audit_comment(result));
        self.append(&record).await
    }

    async fn post_suggestion(&self, ticket_id: &str, result: &ClassificationResult) -> Result<()> {
        let record =
            DecisionRecord::new(ticket_id, Action::Suggest, result, suggestion_comment(result));
        self.append(&record).await
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{Category, Method, Priority};

    #[tokio::test]
    async fn test_records_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("decisions.jsonl");
        let sink = JsonLinesSink::open(&path).await.unwrap();

        let result = ClassificationResult::new(Category::Network, Priority::Normal, 0.9, Method::MlModel);
        sink.apply_classification("INC-1", &result).await.unwrap();
        sink.post_suggestion("INC-2", &result).await.unwrap();

        let records = JsonLinesSink::read_records(&path).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ticket_id, "INC-1");
        assert_eq!(records[0].action, Action::AutoApply);
        assert!(records[0].comment.starts_with("Автоматическая классификация"));
        assert_eq!(records[1].action, Action::Suggest);
        assert_eq!(records[1].result, result);
    }

    #[tokio::test]
    async fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.jsonl");
        let result = ClassificationResult::new(Category::Other, Priority::Low, 0.6, Method::RuleBased);

        JsonLinesSink::open(&path)
            .await
            .unwrap()
            .post_suggestion("A", &result)
            .await
            .unwrap();
        JsonLinesSink::open(&path)
            .await
            .unwrap()
            .post_suggestion("B", &result)
            .await
            .unwrap();

        let records = JsonLinesSink::read_records(&path).await.unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.ticket_id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
    }
}
