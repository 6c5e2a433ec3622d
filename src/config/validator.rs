use crate::config::Config;
use crate::error::{Result, StewardError, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_view(config, &mut errors);
        Self::validate_feed(config, &mut errors);
        Self::validate_audit(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StewardError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_view(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.view.default_page_size == 0 {
            errors.push(ValidationError::new(
                "view.default_page_size",
                "Page size must be greater than 0",
            ));
        }
    }

    fn validate_feed(config: &Config, errors: &mut Vec<ValidationError>) {
        let source = &config.feed.source;
        if source != "mock" && source != "file" {
            errors.push(ValidationError::new(
                "feed.source",
                format!("Source must be 'mock' or 'file', got '{}'", source),
            ));
        }

        // Snapshot file existence is not checked here: the path may contain
        // ~ which needs expansion, and the file may not exist yet.
        if source == "file" && config.feed.snapshot_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "feed.snapshot_file",
                "Snapshot file path cannot be empty when source is 'file'",
            ));
        }
    }

    fn validate_audit(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.audit.max_events == 0 {
            errors.push(ValidationError::new(
                "audit.max_events",
                "Max events must be greater than 0",
            ));
        }

        if config.audit.trail_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "audit.trail_file",
                "Trail file path cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_page_size() {
        let mut config = Config::default();
        config.view.default_page_size = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_invalid_feed_source() {
        let mut config = Config::default();
        config.feed.source = "http".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_empty_snapshot_path_with_file_source() {
        let mut config = Config::default();
        config.feed.source = "file".to_string();
        config.feed.snapshot_file = PathBuf::new();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
