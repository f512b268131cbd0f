//! Append-only audit entries for workflow lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An audit record describing one event in a workflow's lifecycle.
///
/// Entries are append-only; no update or delete is defined. The
/// `workflow_id` link is by convention, not enforced by a constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,

    /// The workflow this entry belongs to
    pub workflow_id: Uuid,

    /// Event tag, e.g. "workflow_started"
    pub action: String,

    pub status: HistoryStatus,

    /// Human-readable summary
    pub message: String,

    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Entry emitted once per workflow creation
    pub fn workflow_started(workflow_id: Uuid, title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            workflow_id,
            action: "workflow_started".to_string(),
            status: HistoryStatus::Info,
            message: format!("Workflow initiated: {}", title),
            timestamp: Utc::now(),
        }
    }
}

/// Severity of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryStatus {
    Info,
    Warning,
    Error,
}
