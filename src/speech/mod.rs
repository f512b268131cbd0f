//! Speech-to-text and text-to-speech clients.
//!
//! Both services are opaque external collaborators reached over JSON.
//! Transcription is an async job: submit, then poll until it completes or
//! the attempt budget runs out.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Delay between transcription job polls
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Maximum polls before giving up on a transcription job
const MAX_POLL_ATTEMPTS: u32 = 30;

/// Voice used when the caller does not pick one
pub const DEFAULT_VOICE: &str = "Joanna";

/// Audio format used when the caller does not pick one
pub const DEFAULT_FORMAT: &str = "mp3";

/// Errors from the speech services
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Text is required")]
    EmptyText,

    #[error("speech request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("speech service error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("transcription failed: {0}")]
    JobFailed(String),

    #[error("transcription timed out")]
    Timeout,

    #[error("invalid audio payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranscribeRequest<'a> {
    audio_data: String,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscribeStarted {
    job_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobStatus {
    status: String,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    failure_reason: Option<String>,
}

/// Completed transcription
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    pub transcript: String,
    pub job_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    output_format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_data: String,
    #[serde(default)]
    audio_url: Option<String>,
    #[serde(default)]
    voice_id: Option<String>,
}

/// Synthesized audio
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio: Vec<u8>,
    pub format: String,
    pub voice_id: String,
    /// Time-limited download URL, when the service provides one
    pub audio_url: Option<String>,
}

/// Client for the speech endpoints
pub struct SpeechClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl SpeechClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            endpoint,
            token,
            client: reqwest::Client::new(),
        }
    }

    async fn post_json<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<reqwest::Response, SpeechError> {
        let response = self
            .client
            .post(format!("{}/{}", self.endpoint, path))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Transcribe audio, blocking until the job finishes or times out
    pub async fn transcribe(
        &self,
        audio: &[u8],
        format: &str,
    ) -> Result<TranscriptionResult, SpeechError> {
        let request = TranscribeRequest {
            audio_data: BASE64.encode(audio),
            format,
        };

        let started: TranscribeStarted = self
            .post_json("transcribe", &request)
            .await?
            .json()
            .await?;

        debug!(job = %started.job_name, "Transcription job started");

        for _ in 0..MAX_POLL_ATTEMPTS {
            let response = self
                .client
                .get(format!("{}/jobs/{}", self.endpoint, started.job_name))
                .header("Authorization", format!("Bearer {}", self.token))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SpeechError::Api {
                    status: status.as_u16(),
                    body,
                });
            }

            let job: JobStatus = response.json().await?;
            match job.status.as_str() {
                "COMPLETED" => {
                    return Ok(TranscriptionResult {
                        transcript: job.transcript.unwrap_or_default(),
                        job_name: started.job_name,
                    });
                }
                "FAILED" => {
                    return Err(SpeechError::JobFailed(
                        job.failure_reason
                            .unwrap_or_else(|| "Unknown error".to_string()),
                    ));
                }
                _ => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }

        Err(SpeechError::Timeout)
    }

    /// Synthesize speech for the given text
    pub async fn synthesize(
        &self,
        text: &str,
        voice_id: Option<&str>,
        output_format: Option<&str>,
    ) -> Result<SynthesisResult, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let voice = voice_id.unwrap_or(DEFAULT_VOICE);
        let format = output_format.unwrap_or(DEFAULT_FORMAT);

        let request = SynthesizeRequest {
            text,
            voice_id: voice,
            output_format: format,
        };

        let parsed: SynthesizeResponse = self
            .post_json("synthesize", &request)
            .await?
            .json()
            .await?;

        Ok(SynthesisResult {
            audio: BASE64.decode(parsed.audio_data.as_bytes())?,
            format: format.to_string(),
            voice_id: parsed.voice_id.unwrap_or_else(|| voice.to_string()),
            audio_url: parsed.audio_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcribe_request_wire_format() {
        let request = TranscribeRequest {
            audio_data: BASE64.encode(b"audio bytes"),
            format: "wav",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["format"], "wav");
        assert_eq!(
            BASE64
                .decode(json["audioData"].as_str().unwrap().as_bytes())
                .unwrap(),
            b"audio bytes"
        );
    }

    #[test]
    fn test_synthesize_request_defaults_in_wire_format() {
        let request = SynthesizeRequest {
            text: "hello",
            voice_id: DEFAULT_VOICE,
            output_format: DEFAULT_FORMAT,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["voiceId"], "Joanna");
        assert_eq!(json["outputFormat"], "mp3");
    }

    #[test]
    fn test_job_status_parsing() {
        let job: JobStatus = serde_json::from_str(
            r#"{"status": "COMPLETED", "transcript": "onboard Jane Doe"}"#,
        )
        .unwrap();
        assert_eq!(job.status, "COMPLETED");
        assert_eq!(job.transcript.unwrap(), "onboard Jane Doe");

        let failed: JobStatus =
            serde_json::from_str(r#"{"status": "FAILED", "failureReason": "bad media"}"#).unwrap();
        assert_eq!(failed.failure_reason.unwrap(), "bad media");
    }
}
