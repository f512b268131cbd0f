//! Titan-style text generation client.
//!
//! Talks to a hosted text-generation endpoint over JSON. Generation is
//! configured for deterministic-leaning output (low temperature, bounded
//! length) since the classifier expects structured JSON back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ModelError, TextModel};

/// Generation settings sent with every request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_token_count: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_token_count: 500,
            temperature: 0.1,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvokeRequest<'a> {
    model_id: &'a str,
    input_text: &'a str,
    text_generation_config: &'a GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    results: Vec<InvokeResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvokeResult {
    output_text: String,
}

/// HTTP client for a Titan-style generation endpoint
pub struct TitanModel {
    endpoint: String,
    token: String,
    model_id: String,
    config: GenerationConfig,
    client: reqwest::Client,
}

impl TitanModel {
    pub fn new(endpoint: String, token: String, model_id: String) -> Self {
        Self {
            endpoint,
            token,
            model_id,
            config: GenerationConfig::default(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the default generation settings
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
impl TextModel for TitanModel {
    fn name(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let request = InvokeRequest {
            model_id: &self.model_id,
            input_text: prompt,
            text_generation_config: &self.config,
        };

        debug!(model = %self.model_id, prompt_len = prompt.len(), "Invoking text model");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: InvokeResponse = response.json().await?;
        let result = parsed
            .results
            .into_iter()
            .next()
            .ok_or(ModelError::MalformedResponse)?;

        Ok(result.output_text)
    }
}
