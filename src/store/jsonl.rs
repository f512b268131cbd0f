//! JSONL-backed workflow store.
//!
//! Records are stored as newline-delimited JSON for simplicity and easy
//! inspection. An upsert appends a full record; replay keeps the last record
//! per id, so re-writing a record with the same id is safe.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use uuid::Uuid;

use crate::domain::{HistoryEntry, WorkflowRecord};

use super::{DailyStats, StoreError, WorkflowStore};

/// File-based store using JSONL files under a data directory
pub struct JsonlStore {
    workflows_path: PathBuf,
    history_path: PathBuf,
}

impl JsonlStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            workflows_path: data_dir.join("workflows.jsonl"),
            history_path: data_dir.join("history.jsonl"),
        }
    }

    /// Open the store in the configured data directory, creating it if needed
    pub async fn open_default() -> anyhow::Result<Self> {
        let data_dir = crate::config::data_dir()?;
        fs::create_dir_all(&data_dir).await?;
        Ok(Self::new(data_dir))
    }

    async fn append_line<T: Serialize>(path: &Path, record: &T) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        let json = serde_json::to_string(record)?;
        file.write_all(format!("{}\n", json).as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    async fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path).await?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();
        let mut records = Vec::new();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }

        Ok(records)
    }

    /// Replay the workflow log, keeping the last record per id
    async fn replay_workflows(&self) -> Result<HashMap<Uuid, WorkflowRecord>, StoreError> {
        let records: Vec<WorkflowRecord> = Self::read_lines(&self.workflows_path).await?;

        let mut workflows = HashMap::new();
        for record in records {
            workflows.insert(record.id, record);
        }

        Ok(workflows)
    }

    /// Replay the history log, keeping the last entry per id
    async fn replay_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let entries: Vec<HistoryEntry> = Self::read_lines(&self.history_path).await?;

        let mut by_id: HashMap<Uuid, HistoryEntry> = HashMap::new();
        for entry in entries {
            by_id.insert(entry.id, entry);
        }

        Ok(by_id.into_values().collect())
    }
}

#[async_trait]
impl WorkflowStore for JsonlStore {
    async fn put_workflow(&self, record: &WorkflowRecord) -> Result<(), StoreError> {
        Self::append_line(&self.workflows_path, record).await
    }

    async fn put_history(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        Self::append_line(&self.history_path, entry).await
    }

    async fn get_workflow(&self, id: Uuid) -> Result<Option<WorkflowRecord>, StoreError> {
        let workflows = self.replay_workflows().await?;
        Ok(workflows.get(&id).cloned())
    }

    async fn active_workflows(&self) -> Result<Vec<WorkflowRecord>, StoreError> {
        let workflows = self.replay_workflows().await?;

        let mut active: Vec<WorkflowRecord> = workflows
            .into_values()
            .filter(|w| w.is_active())
            .collect();

        // Newest first
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(active)
    }

    async fn recent_activity(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut entries = self.replay_history().await?;

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);

        Ok(entries)
    }

    async fn stats_for_day(&self, date: NaiveDate) -> Result<DailyStats, StoreError> {
        let workflows = self.replay_workflows().await?;

        let mut stats = DailyStats::default();
        for workflow in workflows.values() {
            if workflow.created_at.date_naive() != date {
                continue;
            }

            stats.total_today += 1;
            if workflow.is_voice {
                stats.voice_commands += 1;
            }
            match workflow.status {
                crate::domain::WorkflowStatus::Completed => stats.completed += 1,
                crate::domain::WorkflowStatus::InProgress => stats.in_progress += 1,
                _ => {}
            }
        }

        Ok(stats)
    }
}
