//! Command-line interface for opsflow.
//!
//! Provides commands for processing natural-language commands, inspecting
//! workflows and activity, and the speech side endpoints.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::adapters::TitanModel;
use crate::config;
use crate::core::Orchestrator;
use crate::nlu::IntentClassifier;
use crate::speech::SpeechClient;
use crate::store::JsonlStore;

/// opsflow - natural-language workflow automation backend
#[derive(Parser, Debug)]
#[command(name = "opsflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a natural-language command into a workflow
    Command {
        /// Command text (reads from stdin if not provided)
        text: Option<String>,

        /// Read command text from stdin
        #[arg(long)]
        stdin: bool,

        /// Mark the command as a voice transcript
        #[arg(long)]
        voice: bool,
    },

    /// Show a workflow by id
    Show {
        /// Workflow ID (UUID)
        workflow_id: String,
    },

    /// List active workflows
    Workflows {
        /// Maximum number of workflows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show recent workflow activity
    Activity {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show today's workflow statistics
    Stats,

    /// Transcribe an audio file
    Transcribe {
        /// Audio file to transcribe
        audio_file: PathBuf,

        /// Audio format (inferred from the file extension if not set)
        #[arg(short, long)]
        format: Option<String>,

        /// Feed the transcript through the orchestrator as a voice command
        #[arg(long)]
        command: bool,
    },

    /// Synthesize speech for text
    Speak {
        /// Text to speak
        text: String,

        /// Voice to use
        #[arg(long)]
        voice: Option<String>,

        /// Output audio file
        #[arg(short, long, default_value = "speech.mp3")]
        output: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Command { text, stdin, voice } => {
                process_command(text, stdin, voice).await
            }
            Commands::Show { workflow_id } => show_workflow(&workflow_id).await,
            Commands::Workflows { limit } => list_workflows(limit).await,
            Commands::Activity { limit } => show_activity(limit).await,
            Commands::Stats => show_stats().await,
            Commands::Transcribe {
                audio_file,
                format,
                command,
            } => transcribe(&audio_file, format, command).await,
            Commands::Speak {
                text,
                voice,
                output,
            } => speak(&text, voice, &output).await,
            Commands::Config => show_config(),
        }
    }
}

/// Build the orchestrator from the resolved configuration
async fn build_orchestrator() -> Result<Orchestrator<JsonlStore>> {
    let cfg = config::config()?;

    let model = TitanModel::new(
        cfg.model.endpoint.clone(),
        cfg.model.token.clone(),
        cfg.model.model_id.clone(),
    )
    .with_config(cfg.model.generation.clone());

    let store = JsonlStore::open_default().await?;

    Ok(Orchestrator::new(
        IntentClassifier::new(Box::new(model)),
        store,
    ))
}

fn speech_client() -> Result<SpeechClient> {
    let cfg = config::config()?;
    Ok(SpeechClient::new(
        cfg.speech.endpoint.clone(),
        cfg.speech.token.clone(),
    ))
}

/// Resolve command text from the argument or stdin
fn resolve_text(text: Option<String>, use_stdin: bool) -> Result<String> {
    match text {
        Some(t) if !use_stdin => Ok(t),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer.trim().to_string())
        }
    }
}

async fn process_command(text: Option<String>, use_stdin: bool, voice: bool) -> Result<()> {
    let text = resolve_text(text, use_stdin)?;
    let orchestrator = build_orchestrator().await?;

    run_command(&orchestrator, &text, voice).await
}

async fn run_command(
    orchestrator: &Orchestrator<JsonlStore>,
    text: &str,
    voice: bool,
) -> Result<()> {
    match orchestrator.handle_command(text, voice).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response.to_wire())?);
            Ok(())
        }
        Err(e) => {
            let envelope = serde_json::json!({
                "success": false,
                "error": e.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            std::process::exit(1);
        }
    }
}

async fn show_workflow(workflow_id: &str) -> Result<()> {
    let id = Uuid::parse_str(workflow_id)
        .with_context(|| format!("Invalid workflow ID: {}", workflow_id))?;

    let orchestrator = build_orchestrator().await?;

    match orchestrator.workflow(id).await? {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => anyhow::bail!("Workflow {} not found", id),
    }

    Ok(())
}

async fn list_workflows(limit: usize) -> Result<()> {
    let orchestrator = build_orchestrator().await?;
    let workflows = orchestrator.active_workflows().await?;

    if workflows.is_empty() {
        println!("No active workflows.");
        return Ok(());
    }

    for workflow in workflows.iter().take(limit) {
        println!(
            "{}  {:12}  {:3}%  {}",
            workflow.id,
            status_label(&workflow.status),
            workflow.progress,
            workflow.title
        );
    }

    Ok(())
}

async fn show_activity(limit: usize) -> Result<()> {
    let orchestrator = build_orchestrator().await?;
    let entries = orchestrator.recent_activity(limit).await?;

    if entries.is_empty() {
        println!("No activity yet.");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{}  [{:7}]  {}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            status_label(&entry.status),
            entry.action,
            entry.message
        );
    }

    Ok(())
}

/// Wire-format label for a status enum (e.g. "in_progress")
fn status_label<T: serde::Serialize>(status: &T) -> String {
    serde_json::to_value(status)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

async fn show_stats() -> Result<()> {
    let orchestrator = build_orchestrator().await?;
    let stats = orchestrator.today_stats().await?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

async fn transcribe(
    audio_file: &PathBuf,
    format: Option<String>,
    run_as_command: bool,
) -> Result<()> {
    let audio = tokio::fs::read(audio_file)
        .await
        .with_context(|| format!("Failed to read audio file: {}", audio_file.display()))?;

    let format = format.unwrap_or_else(|| {
        audio_file
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "wav".to_string())
    });

    let client = speech_client()?;
    let result = client.transcribe(&audio, &format).await?;

    println!("{}", result.transcript);

    if run_as_command {
        let orchestrator = build_orchestrator().await?;
        run_command(&orchestrator, &result.transcript, true).await?;
    }

    Ok(())
}

async fn speak(text: &str, voice: Option<String>, output: &PathBuf) -> Result<()> {
    let client = speech_client()?;
    let result = client.synthesize(text, voice.as_deref(), None).await?;

    tokio::fs::write(output, &result.audio)
        .await
        .with_context(|| format!("Failed to write audio file: {}", output.display()))?;

    println!(
        "Wrote {} bytes of {} audio (voice: {}) to {}",
        result.audio.len(),
        result.format,
        result.voice_id,
        output.display()
    );

    if let Some(url) = result.audio_url {
        println!("Audio URL: {}", url);
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("Home:            {}", config::opsflow_home()?.display());
    println!("Data dir:        {}", config::data_dir()?.display());
    println!(
        "Config file:     {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("Model endpoint:  {}", cfg.model.endpoint);
    println!("Model ID:        {}", cfg.model.model_id);
    println!(
        "Generation:      max_tokens={} temperature={} top_p={}",
        cfg.model.generation.max_token_count,
        cfg.model.generation.temperature,
        cfg.model.generation.top_p
    );
    println!("Speech endpoint: {}", cfg.speech.endpoint);

    Ok(())
}
