//! Orchestration logic.
//!
//! The orchestrator wires the classifier and the store together; it is the
//! single entry point a transport layer calls.

pub mod orchestrator;

pub use orchestrator::{CommandError, CommandResponse, Orchestrator};
