//! Configuration loading, validation, and management for Prompt Playground.
//!
//! Loads configuration from `~/.playground/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use playground_core::assistant::ToolDeclaration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.playground/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the assistant service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the assistant service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model selected when a session starts
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Models offered by the model selector
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Name given to every remote assistant this app creates
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Tool types enabled on the remote assistant
    #[serde(default = "default_tools")]
    pub tools: Vec<String>,

    /// Delay between run status checks
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-request HTTP timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Base instruction used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Files attached to every session by default
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4-turbo-preview".into()
}
fn default_models() -> Vec<String> {
    vec![
        "gpt-4-turbo-preview".into(),
        "gpt-4o".into(),
        "gpt-4o-mini".into(),
        "gpt-4-turbo".into(),
        "gpt-3.5-turbo".into(),
    ]
}
fn default_assistant_name() -> String {
    "File Analysis Assistant".into()
}
fn default_tools() -> Vec<String> {
    vec!["code_interpreter".into()]
}
fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_request_timeout_secs() -> u64 {
    120
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .field("models", &self.models)
            .field("assistant_name", &self.assistant_name)
            .field("tools", &self.tools)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("system_prompt", &self.system_prompt)
            .field("files", &self.files)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.playground/config.toml).
    ///
    /// Environment variables override the file:
    /// - `PLAYGROUND_API_KEY`, then `OPENAI_API_KEY` (only if the file has no key)
    /// - `PLAYGROUND_MODEL`
    /// - `PLAYGROUND_API_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
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

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        self.api_key = self.api_key.take().filter(|k| !k.trim().is_empty());
        if self.api_key.is_none() {
            self.api_key = non_empty("PLAYGROUND_API_KEY").or_else(|| non_empty("OPENAI_API_KEY"));
        }

        if let Some(model) = non_empty("PLAYGROUND_MODEL") {
            if !self.models.contains(&model) {
                self.models.push(model.clone());
            }
            self.default_model = model;
        }

        if let Some(url) = non_empty("PLAYGROUND_API_URL") {
            self.api_url = url;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".playground")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_ms must be greater than 0".into(),
            ));
        }

        if self.api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError("api_url must not be empty".into()));
        }

        if self.models.is_empty() {
            return Err(ConfigError::ValidationError(
                "models must list at least one model".into(),
            ));
        }

        if !self.models.contains(&self.default_model) {
            return Err(ConfigError::ValidationError(format!(
                "default_model '{}' is not in models",
                self.default_model
            )));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Whether `model` can be picked in the model selector.
    pub fn is_supported_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    /// Tool declarations sent with every assistant creation.
    pub fn tool_declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.iter().map(ToolDeclaration::new).collect()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            default_model: default_model(),
            models: default_models(),
            assistant_name: default_assistant_name(),
            tools: default_tools(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            system_prompt: None,
            files: Vec::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_model, "gpt-4-turbo-preview");
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert!(!config.has_api_key());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_model, config.default_model);
        assert_eq!(parsed.models, config.models);
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let config = AppConfig {
            poll_interval_ms: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_model_must_be_listed() {
        let config = AppConfig {
            default_model: "gpt-9".into(),
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gpt-9"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.assistant_name, "File Analysis Assistant");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
api_key = "sk-file"
default_model = "gpt-4o"
poll_interval_ms = 250
system_prompt = "You analyse spreadsheets."
files = ["data/sales.csv"]
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.default_model, "gpt-4o");
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.files, vec!["data/sales.csv".to_string()]);
        assert_eq!(config.tools, vec!["code_interpreter".to_string()]);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "poll_interval_ms = \"soon\"").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_key_fills_missing_key() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(config.api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn playground_key_wins_over_openai_key() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("PLAYGROUND_API_KEY", "sk-playground"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-playground"));
    }

    #[test]
    fn file_key_is_not_overridden() {
        let mut config = AppConfig {
            api_key: Some("sk-file".into()),
            ..AppConfig::default()
        };
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(config.api_key.as_deref(), Some("sk-file"));
    }

    #[test]
    fn file_key_wins_over_playground_key() {
        let mut config = AppConfig {
            api_key: Some("sk-config".into()),
            ..AppConfig::default()
        };
        config.apply_env_overrides(env(&[
            ("PLAYGROUND_API_KEY", "sk-playground"),
            ("OPENAI_API_KEY", "sk-openai"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-config"));
    }

    #[test]
    fn blank_file_key_falls_back_to_env() {
        let mut config = AppConfig {
            api_key: Some("".into()),
            ..AppConfig::default()
        };
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "sk-openai")]));
        assert_eq!(config.api_key.as_deref(), Some("sk-openai"));

        let mut config = AppConfig {
            api_key: Some("   ".into()),
            ..AppConfig::default()
        };
        config.apply_env_overrides(env(&[]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "  ")]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn env_model_is_added_to_selector() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("PLAYGROUND_MODEL", "o1-preview")]));
        assert_eq!(config.default_model, "o1-preview");
        assert!(config.is_supported_model("o1-preview"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("sk-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn tool_declarations_from_names() {
        let config = AppConfig::default();
        assert_eq!(
            config.tool_declarations(),
            vec![ToolDeclaration::code_interpreter()]
        );
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gpt-4-turbo-preview"));
        assert!(toml_str.contains("code_interpreter"));
        assert!(!toml_str.contains("api_key"));
    }
}
