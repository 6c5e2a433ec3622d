use std::path::PathBuf;
use thiserror::Error;

use crate::decision::DecisionStatus;

/// Main error type for the steward application
#[derive(Error, Debug)]
pub enum StewardError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Invalid view parameters (page size, page index)
    #[error("Invalid view state: {0}")]
    InvalidViewState(String),

    /// Decision not present in the current snapshot
    #[error("Decision not found: {id}")]
    DecisionNotFound { id: String },

    /// Action precondition failure: only pending decisions can be acted on
    #[error("Decision {id} is {status}, only pending decisions can be approved or rejected")]
    InvalidTransition { id: String, status: DecisionStatus },

    /// Actions are refused while a refresh is in flight
    #[error("A refresh is in progress, actions are disabled")]
    DeskBusy,

    /// Feed errors (fetch or action submission failure)
    #[error("Feed error: {0}")]
    Feed(String),

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for steward operations
pub type Result<T> = std::result::Result<T, StewardError>;
