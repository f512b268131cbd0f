//! Domain types for the opsflow backend.
//!
//! This module contains the core data structures:
//! - Classification: intents, domains, and classifier outcomes
//! - WorkflowRecord: a persisted unit of work with its step template
//! - HistoryEntry: append-only audit records

pub mod classification;
pub mod history;
pub mod workflow;

// Re-export commonly used types
pub use classification::{Classification, ClassifierOutcome, DegradeReason, Intent, WorkDomain};
pub use history::{HistoryEntry, HistoryStatus};
pub use workflow::{StepState, WorkflowRecord, WorkflowStatus, WorkflowStep, DEFAULT_USER_ID};
