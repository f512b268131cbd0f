//! Turn a classification into a persisted workflow plus its audit entry.

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    Classification, HistoryEntry, WorkflowRecord, WorkflowStatus, DEFAULT_USER_ID,
};
use crate::store::{StoreError, WorkflowStore};

use super::templates;

/// What the caller gets back from a successful materialization
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedWorkflow {
    pub workflow_id: Uuid,
    #[serde(skip)]
    pub title: String,
    pub message: String,
}

/// Create and persist a workflow record and its "workflow_started" entry.
///
/// The two writes are sequential and best-effort: there is no transaction,
/// and a failed history write is not rolled back. Both records carry fresh
/// ids; the workflow id serves as the idempotency key should a caller retry
/// the history write.
pub async fn materialize<S: WorkflowStore + ?Sized>(
    store: &S,
    classification: &Classification,
    original_text: &str,
    is_voice: bool,
) -> Result<MaterializedWorkflow, StoreError> {
    let now = Utc::now();

    let record = WorkflowRecord {
        id: Uuid::new_v4(),
        title: templates::title(&classification.intent, &classification.entities),
        description: templates::description(&classification.intent, &classification.entities),
        domain: classification.domain,
        intent: classification.intent.clone(),
        entities: classification.entities.clone(),
        status: WorkflowStatus::InProgress,
        user_id: DEFAULT_USER_ID.to_string(),
        progress: 0,
        steps: templates::steps(&classification.intent),
        original_text: original_text.to_string(),
        is_voice,
        created_at: now,
        updated_at: now,
    };

    store.put_workflow(&record).await?;

    let history = HistoryEntry::workflow_started(record.id, &record.title);
    store.put_history(&history).await?;

    info!(workflow_id = %record.id, title = %record.title, "Workflow created");

    Ok(MaterializedWorkflow {
        workflow_id: record.id,
        message: format!(
            "Workflow {} has been initiated and is now in progress.",
            record.title
        ),
        title: record.title,
    })
}
