//! Command orchestrator: classify, materialize, respond.
//!
//! A single command is one synchronous unit of work. All classification
//! resilience lives inside the classifier; only validation and persistence
//! failures surface to the caller.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{Classification, DegradeReason, HistoryEntry, WorkflowRecord};
use crate::nlu::IntentClassifier;
use crate::store::{DailyStats, StoreError, WorkflowStore};
use crate::workflow;

/// Errors surfaced to the caller of `handle_command`
#[derive(Debug, Error)]
pub enum CommandError {
    /// Validation failure, the 4xx-equivalent outcome
    #[error("Text input is required")]
    EmptyText,

    /// Persistence failure, the internal-error outcome
    #[error("Internal server error: {0}")]
    Store(#[from] StoreError),
}

/// Combined result of processing one command
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub intent: Classification,

    /// Present when the keyword fallback produced the classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<DegradeReason>,

    pub workflow_id: Uuid,

    pub message: String,
}

impl CommandResponse {
    /// Response envelope consumed by the HTTP handler
    pub fn to_wire(&self) -> serde_json::Value {
        json!({
            "success": true,
            "intent": self.intent,
            "message": {
                "workflowId": self.workflow_id,
                "message": self.message,
            },
            "workflowId": self.workflow_id,
        })
    }
}

/// Main command orchestrator
pub struct Orchestrator<S: WorkflowStore> {
    classifier: IntentClassifier,
    store: S,
}

impl<S: WorkflowStore> Orchestrator<S> {
    pub fn new(classifier: IntentClassifier, store: S) -> Self {
        Self { classifier, store }
    }

    /// Process a natural-language command into a persisted workflow.
    ///
    /// Rejects empty text before any classification or write happens. Two
    /// identical commands always produce two distinct workflows.
    #[instrument(skip(self, text))]
    pub async fn handle_command(
        &self,
        text: &str,
        is_voice: bool,
    ) -> Result<CommandResponse, CommandError> {
        if text.trim().is_empty() {
            return Err(CommandError::EmptyText);
        }

        let outcome = self.classifier.classify(text).await;
        let degraded = outcome.degrade_reason().cloned();
        let classification = outcome.into_classification();

        info!(
            intent = %classification.intent,
            domain = %classification.domain,
            degraded = degraded.is_some(),
            "Command classified"
        );

        let materialized =
            workflow::materialize(&self.store, &classification, text, is_voice).await?;

        Ok(CommandResponse {
            intent: classification,
            degraded,
            workflow_id: materialized.workflow_id,
            message: materialized.message,
        })
    }

    /// Fetch a single workflow
    pub async fn workflow(&self, id: Uuid) -> Result<Option<WorkflowRecord>, StoreError> {
        self.store.get_workflow(id).await
    }

    /// All pending/in-progress workflows, newest first
    pub async fn active_workflows(&self) -> Result<Vec<WorkflowRecord>, StoreError> {
        self.store.active_workflows().await
    }

    /// Most recent history entries
    pub async fn recent_activity(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError> {
        self.store.recent_activity(limit).await
    }

    /// Workflow counts for today (UTC)
    pub async fn today_stats(&self) -> Result<DailyStats, StoreError> {
        self.store.stats_for_day(Utc::now().date_naive()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Intent, WorkDomain};
    use std::collections::HashMap;

    #[test]
    fn test_wire_envelope_shape() {
        let response = CommandResponse {
            intent: Classification {
                intent: Intent::ItTicket,
                entities: HashMap::new(),
                confidence: 0.8,
                domain: WorkDomain::It,
            },
            degraded: None,
            workflow_id: Uuid::new_v4(),
            message: "Workflow IT Support Ticket - Technical Issue has been initiated and is now in progress.".to_string(),
        };

        let wire = response.to_wire();
        assert_eq!(wire["success"], true);
        assert_eq!(wire["intent"]["intent"], "IT_Ticket");
        assert_eq!(wire["workflowId"], wire["message"]["workflowId"]);
        assert!(wire["message"]["message"].is_string());
    }

    #[test]
    fn test_command_error_messages() {
        assert_eq!(CommandError::EmptyText.to_string(), "Text input is required");

        let err = CommandError::Store(StoreError::Io(std::io::Error::other("disk full")));
        assert!(err.to_string().starts_with("Internal server error:"));
    }
}
