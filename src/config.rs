//! Configuration for opsflow.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (OPSFLOW_HOME, OPSFLOW_MODEL_*, OPSFLOW_SPEECH_*)
//! 2. Config file (.opsflow/config.yaml)
//! 3. Defaults (~/.opsflow, local service endpoints)
//!
//! Config file discovery searches the current directory and its parents
//! for .opsflow/config.yaml.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::titan::GenerationConfig;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub model: Option<ModelConfig>,
    #[serde(default)]
    pub speech: Option<SpeechConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub model_id: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
}

/// Resolved model settings
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub endpoint: String,
    pub token: String,
    pub model_id: String,
    pub generation: GenerationConfig,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8700/invoke".to_string(),
            token: String::new(),
            model_id: "titan-text-express-v1".to_string(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Resolved speech settings
#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub endpoint: String,
    pub token: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8700/speech".to_string(),
            token: String::new(),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to opsflow home (store and state)
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    pub model: ModelSettings,
    pub speech: SpeechSettings,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".opsflow").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn env_or<F: FnOnce() -> String>(var: &str, fallback: F) -> String {
    std::env::var(var).unwrap_or_else(|_| fallback())
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".opsflow");

    let config_file = find_config_file();
    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    // Resolve home path
    let home = if let Ok(env_home) = std::env::var("OPSFLOW_HOME") {
        PathBuf::from(env_home)
    } else if let Some(home_path) = file.as_ref().and_then(|f| f.home.as_deref()) {
        let base = config_file
            .as_ref()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));
        resolve_path(base, home_path)
    } else {
        default_home
    };

    let file_model = file.as_ref().and_then(|f| f.model.clone()).unwrap_or_default();
    let defaults = ModelSettings::default();
    let model = ModelSettings {
        endpoint: env_or("OPSFLOW_MODEL_ENDPOINT", || {
            file_model.endpoint.unwrap_or(defaults.endpoint)
        }),
        token: env_or("OPSFLOW_MODEL_TOKEN", || {
            file_model.token.unwrap_or(defaults.token)
        }),
        model_id: env_or("OPSFLOW_MODEL_ID", || {
            file_model.model_id.unwrap_or(defaults.model_id)
        }),
        generation: GenerationConfig {
            max_token_count: file_model
                .max_tokens
                .unwrap_or(defaults.generation.max_token_count),
            temperature: file_model
                .temperature
                .unwrap_or(defaults.generation.temperature),
            top_p: file_model.top_p.unwrap_or(defaults.generation.top_p),
        },
    };

    let file_speech = file.as_ref().and_then(|f| f.speech.clone()).unwrap_or_default();
    let speech_defaults = SpeechSettings::default();
    let speech = SpeechSettings {
        endpoint: env_or("OPSFLOW_SPEECH_ENDPOINT", || {
            file_speech.endpoint.unwrap_or(speech_defaults.endpoint)
        }),
        token: env_or("OPSFLOW_SPEECH_TOKEN", || {
            file_speech.token.unwrap_or(speech_defaults.token)
        }),
    };

    Ok(ResolvedConfig {
        home,
        config_file,
        model,
        speech,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the opsflow home directory
pub fn opsflow_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the store data directory ($OPSFLOW_HOME/data)
pub fn data_dir() -> Result<PathBuf> {
    Ok(config()?.home.join("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let opsflow_dir = temp.path().join(".opsflow");
        std::fs::create_dir_all(&opsflow_dir).unwrap();

        let config_path = opsflow_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
home: ./
model:
  endpoint: https://models.example.com/invoke
  model_id: titan-text-express-v1
  temperature: 0.2
speech:
  endpoint: https://speech.example.com
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.home, Some("./".to_string()));

        let model = config.model.unwrap();
        assert_eq!(
            model.endpoint,
            Some("https://models.example.com/invoke".to_string())
        );
        assert_eq!(model.temperature, Some(0.2));
        assert!(model.max_tokens.is_none());

        assert_eq!(
            config.speech.unwrap().endpoint,
            Some("https://speech.example.com".to_string())
        );
    }

    #[test]
    fn test_default_model_settings() {
        let settings = ModelSettings::default();
        assert_eq!(settings.model_id, "titan-text-express-v1");
        assert_eq!(settings.generation.max_token_count, 500);
        assert_eq!(settings.generation.temperature, 0.1);
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
