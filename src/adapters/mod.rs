//! Adapter interfaces for external services.
//!
//! Adapters provide a unified interface for the generative text model and
//! the speech services; the rest of the crate only sees the traits.

pub mod titan;

use async_trait::async_trait;
use thiserror::Error;

pub use titan::TitanModel;

/// Errors from a text model invocation
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model service error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("model response missing generated text")]
    MalformedResponse,
}

/// Trait for generative text models
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Human-readable model name
    fn name(&self) -> &str;

    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}
