//! Configuration system for recency scoring.
//!
//! Configuration is layered: built-in defaults, then an optional file, then
//! `RECENCY_` environment variables. Every source is validated before a
//! scorer is built from it, so invalid decay parameters never reach the
//! scoring path.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "recency.toml",
    "recency.yaml",
    "recency.yml",
    "recency.json",
    ".recency/config.toml",
    ".recency/config.yaml",
    ".recency/config.yml",
    ".recency/config.json",
];

/// Environment variable prefix; nested keys are separated by `__`
/// (`RECENCY_BOOSTING__SCALE=48`)
pub const ENV_PREFIX: &str = "RECENCY_";

/// Configuration error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during environment loading
    #[error("Failed to load environment variables: {0}")]
    EnvLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),

    /// A numeric scoring parameter is out of range
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// General error
    #[error("{0}")]
    Other(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
