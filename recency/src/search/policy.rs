//! Boosting policies selectable at configuration time.

use super::{DecayBooster, DecayParameters, Explanation, StepBoostTable};
use crate::config::{BoostingConfig, ConfigError, PolicyKind};

/// How a term recency turns into a score multiplier.
///
/// - `StepTable`: the tier multiplier is applied as is (`base * multiplier`).
/// - `Decay`: the curve boost is added to one (`base * (1 + boost)`), so a
///   fully decayed term leaves the base score untouched instead of zeroing it.
#[derive(Debug, Clone, PartialEq)]
pub enum BoostPolicy {
    StepTable(StepBoostTable),
    Decay(DecayBooster),
}

/// Multiplier for one scoring call together with its explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostResult {
    /// Factor applied to the base score, finite and non-negative
    pub multiplier: f32,

    /// How `multiplier` was derived
    pub trace: Explanation,
}

impl BoostPolicy {
    pub fn step() -> Self {
        BoostPolicy::StepTable(StepBoostTable::new())
    }

    pub fn decay(params: DecayParameters) -> Self {
        BoostPolicy::Decay(DecayBooster::new(params))
    }

    /// Build the configured policy, validating decay parameters.
    pub fn from_config(config: &BoostingConfig) -> Result<Self, ConfigError> {
        match config.policy {
            PolicyKind::Step => Ok(Self::step()),
            PolicyKind::Decay => Ok(Self::decay(config.decay_parameters()?)),
        }
    }

    pub fn name(&self) -> String {
        match self {
            BoostPolicy::StepTable(_) => "step".to_string(),
            BoostPolicy::Decay(booster) => format!("decay({})", booster.params().function()),
        }
    }

    /// Factor to multiply the base score with. `None` means no term in the
    /// match set had a recorded timestamp and always yields `1.0`.
    ///
    /// Always finite and at least `1.0`: a boost too large for `f32`
    /// saturates at `f32::MAX`.
    pub fn factor(&self, recency_hours: Option<i64>) -> f32 {
        let factor = match (self, recency_hours) {
            (_, None) => 1.0,
            (BoostPolicy::StepTable(table), Some(hours)) => table.multiplier(hours),
            (BoostPolicy::Decay(_), Some(hours)) if hours < 0 => 1.0,
            (BoostPolicy::Decay(booster), Some(hours)) => 1.0 + booster.boost(hours),
        };
        if factor.is_nan() {
            1.0
        } else {
            factor.clamp(1.0, f32::MAX)
        }
    }

    /// Same factor as [`BoostPolicy::factor`] plus its explanation.
    pub fn boost(&self, recency_hours: Option<i64>) -> BoostResult {
        let multiplier = self.factor(recency_hours);
        let trace = match self {
            BoostPolicy::StepTable(table) => match recency_hours {
                Some(hours) => table.explain(hours),
                None => Explanation::match_value(
                    multiplier,
                    "step boost, no term recency recorded",
                ),
            },
            BoostPolicy::Decay(booster) => {
                let detail = match recency_hours {
                    Some(hours) if hours >= 0 => booster.explain(hours),
                    Some(hours) => Explanation::match_value(
                        0.0,
                        format!("termRecencyBoost, termRecency={hours} lies in the future"),
                    ),
                    None => {
                        Explanation::match_value(0.0, "termRecencyBoost, no term recency recorded")
                    }
                };
                Explanation::with_details(
                    multiplier,
                    "recencyScore, computed as 1.0 + termRecencyBoost from:",
                    [detail],
                )
            }
        };

        BoostResult { multiplier, trace }
    }
}
