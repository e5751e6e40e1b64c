//! Configuration loading, validation, and management for cellchat.
//!
//! Loads configuration from `~/.cellchat/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.cellchat/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// History selection settings
    #[serde(default)]
    pub context: ContextConfig,

    /// Output rendering settings
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Maximum number of inputs to include in the context
    #[serde(default = "default_num_messages")]
    pub num_messages: usize,

    /// Prefixes appended to the built-in ignore token set
    #[serde(default)]
    pub extra_ignore_tokens: Vec<String>,
}

fn default_num_messages() -> usize {
    5
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            num_messages: default_num_messages(),
            extra_ignore_tokens: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Row cap for tabular outputs
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Column cap for tabular outputs
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,

    /// Include table schema metadata in rendered tables
    #[serde(default)]
    pub table_schema: bool,

    /// Which output renderer to use
    #[serde(default)]
    pub renderer: RendererKind,
}

fn default_max_rows() -> usize {
    5
}
fn default_max_columns() -> usize {
    20
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
            max_columns: default_max_columns(),
            table_schema: false,
            renderer: RendererKind::default(),
        }
    }
}

/// Output renderer selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    /// Tabular if the build supports it, plain otherwise
    #[default]
    Auto,
    /// Always use the generic representation
    Plain,
    /// Table/series aware rendering
    Tabular,
}

impl std::str::FromStr for RendererKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "plain" => Ok(Self::Plain),
            "tabular" => Ok(Self::Tabular),
            other => Err(ConfigError::ValidationError(format!(
                "unknown renderer '{other}' (expected auto, plain or tabular)"
            ))),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.cellchat/config.toml).
    ///
    /// Environment variables override file values:
    /// - `CELLCHAT_NUM_MESSAGES`
    /// - `CELLCHAT_RENDERER`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
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

    /// Apply overrides from an environment lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("CELLCHAT_NUM_MESSAGES") {
            self.context.num_messages = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "CELLCHAT_NUM_MESSAGES must be a non-negative integer, got '{raw}'"
                ))
            })?;
        }

        if let Some(raw) = lookup("CELLCHAT_RENDERER") {
            self.display.renderer = raw.parse()?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".cellchat")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.max_rows == 0 {
            return Err(ConfigError::ValidationError(
                "display.max_rows must be > 0".into(),
            ));
        }

        if self.display.max_columns == 0 {
            return Err(ConfigError::ValidationError(
                "display.max_columns must be > 0".into(),
            ));
        }

        if self.context.extra_ignore_tokens.iter().any(String::is_empty) {
            // An empty prefix would match every input.
            return Err(ConfigError::ValidationError(
                "context.extra_ignore_tokens must not contain empty strings".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
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
