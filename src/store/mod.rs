//! Persistence for workflow records and history entries.
//!
//! The store is the sole source of truth for workflow reads; the core keeps
//! no in-memory cache. Writes are idempotent upserts keyed by record id,
//! with no multi-record transaction.

pub mod jsonl;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{HistoryEntry, WorkflowRecord};

pub use jsonl::JsonlStore;

/// Errors from the persistence store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Workflow counts for a single day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub completed: usize,
    pub in_progress: usize,
    pub voice_commands: usize,
    pub total_today: usize,
}

/// Storage contract for workflows and their audit trail
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Upsert a workflow record (keyed by id)
    async fn put_workflow(&self, record: &WorkflowRecord) -> Result<(), StoreError>;

    /// Upsert a history entry (keyed by id)
    async fn put_history(&self, entry: &HistoryEntry) -> Result<(), StoreError>;

    /// Fetch a workflow by id
    async fn get_workflow(&self, id: Uuid) -> Result<Option<WorkflowRecord>, StoreError>;

    /// All pending/in-progress workflows, newest first
    async fn active_workflows(&self) -> Result<Vec<WorkflowRecord>, StoreError>;

    /// Most recent history entries, newest first
    async fn recent_activity(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError>;

    /// Workflow counts for the given UTC date
    async fn stats_for_day(&self, date: NaiveDate) -> Result<DailyStats, StoreError>;
}
