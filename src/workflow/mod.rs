//! Workflow templating and materialization.

pub mod materializer;
pub mod templates;

pub use materializer::{materialize, MaterializedWorkflow};
