//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;
use crate::search::Bm25Similarity;

/// Validate the entire configuration.
pub fn validate_config(config: &RecencyConfig) -> Result<(), ConfigError> {
    validate_boosting_config(&config.boosting)?;
    validate_bm25_config(&config.bm25)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate boosting configuration.
fn validate_boosting_config(config: &BoostingConfig) -> Result<(), ConfigError> {
    // The step table has no parameters
    if config.policy == PolicyKind::Decay {
        config.decay_parameters()?;
    }

    Ok(())
}

fn validate_bm25_config(config: &Bm25Config) -> Result<(), ConfigError> {
    Bm25Similarity::from_config(config).map(|_| ())
}

/// Validate logging configuration.
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if let Some(file) = &config.file {
        if file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Log file path cannot be empty".to_string(),
            ));
        }
    }

    if !config.stdout && !config.stderr && config.file.is_none() {
        return Err(ConfigError::ValidationError(
            "Logging needs at least one destination: enable stdout, stderr or set a log file"
                .to_string(),
        ));
    }

    Ok(())
}
