//! Configuration management for steward
//!
//! Handles loading, validation, and management of the TOML configuration,
//! with environment variable overrides layered on top.

use crate::error::{Result, StewardError};
use crate::view::{SortDirection, SortKey, ViewState, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub view: ViewConfig,
    pub feed: FeedConfig,
    pub audit: AuditConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Default view selections handed to the pipeline when the user gives none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub default_page_size: usize,
    pub default_sort_key: SortKey,
    pub default_sort_direction: SortDirection,
}

/// Where decisions come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// "mock" or "file"
    pub source: String,
    /// Snapshot file used when source = "file"
    pub snapshot_file: PathBuf,
}

/// Audit trail settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub trail_file: PathBuf,
    pub max_events: usize,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StewardError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| StewardError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        // Validate configuration
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| StewardError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: STEWARD_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("STEWARD_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "VIEW__DEFAULT_PAGE_SIZE" => {
                self.view.default_page_size =
                    value
                        .parse()
                        .map_err(|_| StewardError::InvalidConfigValue {
                            path: path.to_string(),
                            message: format!("Cannot parse '{}' as integer", value),
                        })?;
            }
            "FEED__SOURCE" => {
                self.feed.source = value.to_string();
            }
            "FEED__SNAPSHOT_FILE" => {
                self.feed.snapshot_file = PathBuf::from(value);
            }
            "AUDIT__MAX_EVENTS" => {
                self.audit.max_events =
                    value
                        .parse()
                        .map_err(|_| StewardError::InvalidConfigValue {
                            path: path.to_string(),
                            message: format!("Cannot parse '{}' as integer", value),
                        })?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Build the default `ViewState` this configuration describes
    pub fn default_view_state(&self) -> ViewState {
        ViewState {
            sort_key: self.view.default_sort_key,
            sort_direction: self.view.default_sort_direction,
            page_size: self.view.default_page_size,
            ..ViewState::default()
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StewardError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("steward").join("config.toml"))
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| StewardError::Config("Cannot determine home directory".to_string()))?;

        Ok(home_dir.join(".steward"))
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from("~/.steward");

        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            view: ViewConfig {
                default_page_size: DEFAULT_PAGE_SIZE,
                default_sort_key: SortKey::CreatedAt,
                default_sort_direction: SortDirection::Descending,
            },
            feed: FeedConfig {
                source: "mock".to_string(),
                snapshot_file: data_dir.join("decisions.json"),
            },
            audit: AuditConfig {
                trail_file: data_dir.join("audit.json"),
                max_events: 1000,
            },
        }
    }
}
