//! Workflow records persisted for each classified command.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::classification::{Intent, WorkDomain};

/// Placeholder user until an auth context exists
pub const DEFAULT_USER_ID: &str = "default-user";

/// A persisted workflow created from a classified command.
///
/// Created once at `status = in_progress`, `progress = 0`; later mutation of
/// status/progress/steps belongs to collaborators outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    /// Unique identifier, generated at creation and immutable
    pub id: Uuid,

    pub title: String,

    pub description: String,

    pub domain: WorkDomain,

    pub intent: Intent,

    /// Entities extracted from the command text
    pub entities: HashMap<String, String>,

    pub status: WorkflowStatus,

    pub user_id: String,

    /// Completion percentage, 0-100
    pub progress: u8,

    /// Ordered step template for this workflow
    pub steps: Vec<WorkflowStep>,

    /// The raw command text this workflow was created from
    pub original_text: String,

    /// Whether the command arrived as a voice transcript
    pub is_voice: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl WorkflowRecord {
    /// Check whether this workflow is still active (pending or in progress)
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            WorkflowStatus::Pending | WorkflowStatus::InProgress
        )
    }
}

/// Lifecycle status of a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// A single named step in a workflow template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
    pub status: StepState,
}

impl WorkflowStep {
    /// Create a pending step
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: StepState::Pending,
        }
    }
}

/// Status of an individual workflow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Pending,
    InProgress,
    Completed,
}

impl Default for StepState {
    fn default() -> Self {
        Self::Pending
    }
}
