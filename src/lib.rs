//! opsflow - natural-language workflow automation backend
//!
//! A command like "onboard John Smith as a developer" is classified into an
//! intent, materialized into a persisted workflow record with a step
//! template, and logged to an append-only audit trail.
//!
//! # Architecture
//!
//! - A model-backed classifier asks a generative text model for a structured
//!   classification; any failure degrades to a deterministic keyword
//!   fallback, so every command yields a workflow
//! - Workflow titles, descriptions, and step templates are derived from the
//!   intent by a pure catalog
//! - Records live in an append-only JSONL store; the store is the sole
//!   source of truth for reads
//!
//! # Modules
//!
//! - `adapters`: External service integrations (text model)
//! - `core`: Orchestration logic
//! - `domain`: Data structures (Classification, WorkflowRecord, HistoryEntry)
//! - `nlu`: Intent classification and entity extraction
//! - `workflow`: Templates and materialization
//! - `store`: Persistence
//! - `speech`: Speech-to-text / text-to-speech side endpoints
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Process a command
//! opsflow command "onboard John Smith as a developer"
//!
//! # Inspect workflows
//! opsflow workflows
//! opsflow activity
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod nlu;
pub mod speech;
pub mod store;
pub mod workflow;

// Re-export main types at crate root for convenience
pub use crate::core::{CommandError, CommandResponse, Orchestrator};
pub use domain::{
    Classification, ClassifierOutcome, DegradeReason, HistoryEntry, Intent, WorkDomain,
    WorkflowRecord, WorkflowStatus,
};
pub use nlu::IntentClassifier;
pub use store::{JsonlStore, WorkflowStore};
