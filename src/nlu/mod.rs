//! Natural-language understanding: intent classification and entity
//! extraction.
//!
//! The model-backed classifier is the primary path; the keyword fallback
//! guarantees every command yields a classification.

pub mod classifier;
pub mod entities;
pub mod fallback;

pub use classifier::IntentClassifier;
pub use entities::EntityKind;
