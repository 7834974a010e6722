//! Configuration module for the scheduler bot
//!
//! Settings come from an optional TOML file. The bot token is kept apart in
//! a small JSON credentials file (`{ "Token": "..." }`), and `DISCORD_TOKEN`
//! in the environment overrides that file.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "scheduler.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Discord configuration
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Only text channels with this name (any casing) are read
    #[serde(default = "default_channel_name")]
    pub channel_name: String,

    /// First token of every command
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// JSON file holding the bot token
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            channel_name: default_channel_name(),
            prefix: default_prefix(),
            token_file: default_token_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files; console only when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

/// Contents of the credentials file.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(rename = "Token")]
    pub token: String,
}

// Configuration error types
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file")]
    #[diagnostic(
        code(scheduler::config::read_failed),
        help("Check that {} exists and is readable", path.display())
    )]
    ReadFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to parse configuration")]
    #[diagnostic(code(scheduler::config::parse_failed))]
    ParseFailed {
        path: PathBuf,
        #[source]
        cause: toml::de::Error,
    },

    #[error("Configuration validation failed")]
    #[diagnostic(
        code(scheduler::config::validation_failed),
        help("{}", errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))
    )]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Failed to read token file")]
    #[diagnostic(
        code(scheduler::config::token_read_failed),
        help("Create {} containing {{ \"Token\": \"<bot token>\" }} or set DISCORD_TOKEN", path.display())
    )]
    TokenReadFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to decode token file")]
    #[diagnostic(
        code(scheduler::config::token_parse_failed),
        help("{} must be a JSON object with a \"Token\" string field", path.display())
    )]
    TokenParseFailed {
        path: PathBuf,
        #[source]
        cause: serde_json::Error,
    },

    #[error("Discord token is empty")]
    #[diagnostic(
        code(scheduler::config::empty_token),
        help("Put the bot token from the Discord Developer Portal in {}", path.display())
    )]
    EmptyToken { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// When the path was not given explicitly and the file does not exist,
    /// the defaults are used instead.
    pub async fn load(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    cause: e,
                })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            cause: e,
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.discord.channel_name.trim().is_empty() {
            errors.push(ValidationError {
                field: "discord.channel_name".to_string(),
                message: "Channel name cannot be empty".to_string(),
            });
        }

        if self.discord.prefix.is_empty() {
            errors.push(ValidationError {
                field: "discord.prefix".to_string(),
                message: "Command prefix cannot be empty".to_string(),
            });
        } else if self.discord.prefix.chars().any(char::is_whitespace) {
            errors.push(ValidationError {
                field: "discord.prefix".to_string(),
                message: "Command prefix must be a single token".to_string(),
            });
        }

        if !errors.is_empty() {
            return Err(ConfigError::ValidationFailed { errors });
        }

        Ok(())
    }
}

/// Read the bot token from a credentials file.
pub async fn read_token_file(path: &Path) -> Result<String, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::TokenReadFailed {
            path: path.to_path_buf(),
            cause: e,
        })?;

    let credentials: Credentials =
        serde_json::from_str(&content).map_err(|e| ConfigError::TokenParseFailed {
            path: path.to_path_buf(),
            cause: e,
        })?;

    let token = credentials.token.trim();
    if token.is_empty() {
        return Err(ConfigError::EmptyToken {
            path: path.to_path_buf(),
        });
    }

    Ok(token.to_string())
}

/// Pick the bot token: a non-empty `env_token` wins over the credentials file.
pub async fn resolve_token(env_token: Option<String>, path: &Path) -> Result<String, ConfigError> {
    match env_token {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => read_token_file(path).await,
    }
}

// Default value functions
fn default_channel_name() -> String {
    "scheduler".to_string()
}

fn default_prefix() -> String {
    scheduler_core::DEFAULT_PREFIX.to_string()
}

fn default_token_file() -> PathBuf {
    PathBuf::from("discord_token.json")
}

fn default_log_level() -> String {
    "info".to_string()
}
