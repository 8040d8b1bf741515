//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use chrono::{DateTime, Utc};
use std::path::Path;

use super::{Result, models::*, validation};
use crate::recency::recency_epoch_2018;
use crate::search::DecayFunction;

/// Builder for creating RecencyConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: RecencyConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: RecencyConfig::default(),
        }
    }

    /// Use the tiered step table instead of a decay curve.
    pub fn with_step_policy(mut self) -> Self {
        self.config.boosting.policy = PolicyKind::Step;
        self
    }

    /// Use a decay curve with the given shape, scale (hours) and decay.
    pub fn with_decay(mut self, function: DecayFunction, scale: f64, decay: f64) -> Self {
        self.config.boosting.policy = PolicyKind::Decay;
        self.config.boosting.decay_function = function;
        self.config.boosting.scale = scale;
        self.config.boosting.decay = decay;
        self
    }

    /// Set the maximum boost of the decay curve.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.config.boosting.weight = weight;
        self
    }

    /// Set the instant encoded timestamps count hours from.
    pub fn with_reference_epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.config.boosting.reference_epoch = epoch;
        self
    }

    /// Read timestamps encoded as hours since 2018-01-01.
    pub fn with_epoch_2018(self) -> Self {
        self.with_reference_epoch(recency_epoch_2018())
    }

    /// Set the BM25 parameters of the base similarity.
    pub fn with_bm25(mut self, k1: f32, b: f32) -> Self {
        self.config.bm25 = Bm25Config { k1, b };
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use default logging configuration (console output at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging.level = LogLevel::Info;
        self.config.logging.format = LogFormat::Json;
        self.config.logging.file = None; // Console only by default

        self
    }

    /// Create a configuration for development.
    ///
    /// Debug-level logging in the colored development format, so every
    /// missing or undecodable timestamp shows up.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Dev)
    }

    /// Create a configuration for testing with warn-level logging.
    pub fn testing() -> Self {
        Self::new().with_log_level(LogLevel::Warn)
    }

    /// Create a production configuration: gaussian decay over a day and
    /// JSON logs.
    pub fn production() -> Self {
        Self::new()
            .with_decay(DecayFunction::Gaussian, 24.0, 0.5)
            .with_default_logging()
    }

    /// Tiered boosting with timestamps counted from 2018-01-01.
    pub fn legacy_step() -> Self {
        Self::new().with_step_policy().with_epoch_2018()
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<RecencyConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
