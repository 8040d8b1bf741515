//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command.

use clap::Args;
use recency::config::{BoostingConfig, PolicyKind};
use recency::search::DecayFunction;
use std::path::PathBuf;

use crate::utils::parse_epoch;

/// Overrides for the configured boosting policy
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Boosting policy (step, decay)
    #[arg(long)]
    pub policy: Option<PolicyKind>,

    /// Decay curve shape (linear, exp, gauss)
    #[arg(long = "function")]
    pub function: Option<DecayFunction>,

    /// Hours at which the curve reaches `decay`
    #[arg(long)]
    pub scale: Option<f64>,

    /// Curve value at `scale`, in (0, 1]
    #[arg(long)]
    pub decay: Option<f64>,

    /// Maximum boost added on top of the base score
    #[arg(long)]
    pub weight: Option<f64>,

    /// Reference epoch of the timestamps (unix, 2018 or an RFC 3339 instant)
    #[arg(long)]
    pub epoch: Option<String>,
}

impl PolicyArgs {
    /// Apply the overrides on top of `config`.
    pub fn apply(&self, config: &BoostingConfig) -> recency::Result<BoostingConfig> {
        let mut config = config.clone();
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(function) = self.function {
            config.decay_function = function;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(decay) = self.decay {
            config.decay = decay;
        }
        if let Some(weight) = self.weight {
            config.weight = weight;
        }
        if let Some(epoch) = &self.epoch {
            config.reference_epoch = parse_epoch(epoch)?;
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct CurveArgs {
    /// First recency, in hours
    #[arg(long, default_value_t = 0)]
    pub from: i64,

    /// Last recency, in hours (inclusive)
    #[arg(long, default_value_t = 120)]
    pub to: i64,

    /// Distance between two rows, in hours
    #[arg(long, default_value_t = 12)]
    pub step: i64,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug)]
pub struct RecencyArgs {
    /// Encoded term timestamp (whole hours since the reference epoch)
    #[arg(allow_hyphen_values = true)]
    pub timestamp: i32,

    /// Reference epoch (unix, 2018 or an RFC 3339 instant)
    #[arg(long)]
    pub epoch: Option<String>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Instant to encode (RFC 3339 or "now")
    #[arg(default_value = "now")]
    pub instant: String,

    /// Reference epoch (unix, 2018 or an RFC 3339 instant)
    #[arg(long)]
    pub epoch: Option<String>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// JSON segment fixture
    pub fixture: PathBuf,

    /// Query term (repeatable)
    #[arg(long = "term", short = 't', required = true)]
    pub terms: Vec<String>,

    /// Field to search
    #[arg(long, short, default_value = "web_kw")]
    pub field: String,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Also show the unboosted BM25 score
    #[arg(long)]
    pub compare: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// JSON segment fixture
    pub fixture: PathBuf,

    /// Document to explain
    #[arg(long, short)]
    pub doc: u32,

    /// Query term (repeatable)
    #[arg(long = "term", short = 't', required = true)]
    pub terms: Vec<String>,

    /// Field to search
    #[arg(long, short, default_value = "web_kw")]
    pub field: String,

    #[command(flatten)]
    pub policy: PolicyArgs,
}
