//! Configuration loading, validation, and management for Sensai.
//!
//! Loads configuration from `~/.sensai/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The root configuration structure.
///
/// Maps directly to `~/.sensai/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider (LLM endpoint) configuration.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Tutoring session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Settings for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Bearer token for the endpoint. Usually supplied via env var.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Chat-completions URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model used by the reasoning loop.
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Project the requests are billed against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Sampling temperature for loop reasoning.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Settings for the ReAct loop budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum reasoning iterations before the loop gives up.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Wall-clock budget for one session, in minutes.
    #[serde(default = "default_time_budget_minutes")]
    pub time_budget_minutes: f64,
}

fn default_api_url() -> String {
    "https://us-south.ml.cloud.ibm.com/ml/v1/text/chat?version=2023-05-29".into()
}
fn default_model_id() -> String {
    "meta-llama/llama-3-3-70b-instruct".into()
}
fn default_temperature() -> f32 {
    0.4
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_max_iterations() -> usize {
    50
}
fn default_time_budget_minutes() -> f64 {
    10.0
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model_id: default_model_id(),
            project_id: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            time_budget_minutes: default_time_budget_minutes(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default location with env-var overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.provider.api_key.is_none() {
            config.provider.api_key = std::env::var("SENSAI_API_KEY")
                .ok()
                .or_else(|| std::env::var("WATSONX_API_KEY").ok());
        }
        if config.provider.project_id.is_none() {
            config.provider.project_id = std::env::var("WATSONX_PROJECT_ID").ok();
        }
        if let Ok(model) = std::env::var("SENSAI_MODEL") {
            config.provider.model_id = model;
        }

        Ok(config)
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// The per-user config directory (`~/.sensai`).
    pub fn config_dir() -> PathBuf {
        home_dir().join(".sensai")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.api_url must not be empty".into(),
            ));
        }
        if self.provider.model_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.model_id must not be empty".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::ValidationError(
                "provider.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.session.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "session.max_iterations must be at least 1".into(),
            ));
        }
        if self.session.time_budget_minutes < 0.0 {
            return Err(ConfigError::ValidationError(
                "session.time_budget_minutes must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Whether an API key is available from any source.
    pub fn has_api_key(&self) -> bool {
        self.provider.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn home_dir() -> PathBuf {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").map(PathBuf::from).unwrap_or_default()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").map(PathBuf::from).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.max_iterations, 50);
        assert!((config.session.time_budget_minutes - 10.0).abs() < f64::EPSILON);
        assert!((config.provider.temperature - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/sensai.toml")).unwrap();
        assert_eq!(config.provider.max_tokens, 2000);
    }

    #[test]
    fn parses_partial_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[session]
max_iterations = 5
time_budget_minutes = 2.5

[provider]
model_id = "meta-llama/llama-3-2-11b-vision-instruct"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.session.max_iterations, 5);
        assert!((config.session.time_budget_minutes - 2.5).abs() < f64::EPSILON);
        assert_eq!(
            config.provider.model_id,
            "meta-llama/llama-3-2-11b-vision-instruct"
        );
        // Unspecified fields keep their defaults
        assert_eq!(config.provider.max_tokens, 2000);
    }

    #[test]
    fn rejects_zero_iterations() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[session]\nmax_iterations = 0").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
