//! Configuration model definitions.
//!
//! This module contains the configuration structures for the scoring
//! components and the logging subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::ConfigError;
use crate::recency::UNIX_EPOCH;
use crate::search::{DecayFunction, DecayParameters};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecencyConfig {
    /// Term recency boosting configuration
    pub boosting: BoostingConfig,

    /// Base BM25 similarity configuration
    pub bm25: Bm25Config,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Which boosting policy the scorer applies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Fixed multipliers per age tier
    Step,

    /// Continuous decay curve, `base * (1 + boost)`
    #[default]
    Decay,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Step => write!(f, "step"),
            PolicyKind::Decay => write!(f, "decay"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "step" => Ok(PolicyKind::Step),
            "decay" => Ok(PolicyKind::Decay),
            _ => Err(ConfigError::ParseError(format!("Invalid boosting policy: {}", s))),
        }
    }
}

/// Term recency boosting configuration.
///
/// The decay settings are only read when `policy` is [`PolicyKind::Decay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingConfig {
    /// Boosting policy
    pub policy: PolicyKind,

    /// Decay curve shape: `linear`, `exp` or `gauss`
    pub decay_function: DecayFunction,

    /// Hours at which the curve reaches `decay`
    pub scale: f64,

    /// Curve value at `scale`, in (0, 1]
    pub decay: f64,

    /// Maximum boost added on top of the base score
    pub weight: f64,

    /// Instant that encoded term timestamps count hours from
    pub reference_epoch: DateTime<Utc>,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Decay,
            decay_function: DecayFunction::Linear,
            scale: 24.0,
            decay: 0.5,
            weight: 1.0,
            reference_epoch: UNIX_EPOCH,
        }
    }
}

impl BoostingConfig {
    /// Validated decay curve parameters.
    pub fn decay_parameters(&self) -> Result<DecayParameters, ConfigError> {
        DecayParameters::new(self.decay_function, self.scale, self.decay, self.weight)
    }
}

/// BM25 configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Config {
    /// Term frequency saturation
    pub k1: f32,

    /// Length normalization, `0` disables it
    pub b: f32,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.0 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,

    /// Send console output to stderr instead of stdout
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
            stderr: false,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,

    /// Colored single-line format for local development
    Dev,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(LogFormat::Default),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "dev" => Ok(LogFormat::Dev),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}
