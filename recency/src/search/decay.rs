//! Continuous decay curves for term recency boosting.
//!
//! All curves equal `1` at distance `0` and `decay` at distance `scale`, and
//! never increase with distance:
//!
//! - linear: `max(0, (s - d) / s)` with `s = scale / (1 - decay)`
//! - exponential: `exp(λ · d)` with `λ = ln(decay) / scale`
//! - gaussian: `exp(-d² / (2σ²))` with `σ² = -scale² / (2 · ln(decay))`
//!
//! The processed scale (`s`, `λ` or `σ²`) is derived once when a
//! [`DecayBooster`] is built and reused for every document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Explanation;
use crate::config::ConfigError;

/// Shape of the decay curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecayFunction {
    /// Falls linearly and reaches zero at `scale / (1 - decay)`
    #[default]
    #[serde(rename = "linear")]
    Linear,

    /// Halves (for `decay = 0.5`) every `scale` hours, never reaches zero
    #[serde(rename = "exp", alias = "exponential")]
    Exponential,

    /// Bell-shaped: flat near zero, then drops quickly
    #[serde(rename = "gauss", alias = "gaussian")]
    Gaussian,
}

impl DecayFunction {
    /// Derive the curve constant from the user-facing scale and decay.
    fn process_scale(self, scale: f64, decay: f64) -> f64 {
        match self {
            DecayFunction::Linear => scale / (1.0 - decay),
            DecayFunction::Exponential => decay.ln() / scale,
            DecayFunction::Gaussian => -(scale * scale) / (2.0 * decay.ln()),
        }
    }

    /// Evaluate the curve at `distance` given the processed scale.
    ///
    /// `decay == 1` produces an infinite processed scale for the linear and
    /// gaussian shapes, which is a flat curve.
    fn evaluate(self, distance: f64, processed_scale: f64) -> f64 {
        match self {
            DecayFunction::Linear if processed_scale.is_infinite() => 1.0,
            DecayFunction::Linear => ((processed_scale - distance) / processed_scale).max(0.0),
            DecayFunction::Exponential => (processed_scale * distance).exp(),
            DecayFunction::Gaussian if processed_scale.is_infinite() => 1.0,
            DecayFunction::Gaussian => (-(distance * distance) / (2.0 * processed_scale)).exp(),
        }
    }

    fn describe(self, distance: i64, processed_scale: f64) -> String {
        match self {
            DecayFunction::Linear => format!(
                "max(0.0, (({processed_scale} - termRecency={distance}) / {processed_scale}))"
            ),
            DecayFunction::Exponential => {
                format!("exp({processed_scale} * termRecency={distance})")
            }
            DecayFunction::Gaussian => format!(
                "exp(-0.5 * pow(termRecency={distance}, 2.0) / {processed_scale})"
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecayFunction::Linear => "linear",
            DecayFunction::Exponential => "exp",
            DecayFunction::Gaussian => "gauss",
        }
    }
}

impl fmt::Display for DecayFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecayFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(DecayFunction::Linear),
            "exp" | "exponential" => Ok(DecayFunction::Exponential),
            "gauss" | "gaussian" => Ok(DecayFunction::Gaussian),
            other => Err(ConfigError::ParseError(format!(
                "Unknown decay function '{}', expected one of: linear, exp, gauss",
                other
            ))),
        }
    }
}

/// Validated decay curve parameters.
///
/// Invariants: `scale > 0`, `0 < decay <= 1`, `weight > 0`, all finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayParameters {
    function: DecayFunction,
    scale: f64,
    decay: f64,
    weight: f64,
}

impl DecayParameters {
    /// Validate and build decay parameters. Out-of-range values are rejected,
    /// never clamped.
    pub fn new(
        function: DecayFunction,
        scale: f64,
        decay: f64,
        weight: f64,
    ) -> Result<Self, ConfigError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "scale",
                value: scale,
                reason: "must be a positive number of hours",
            });
        }
        if !decay.is_finite() || decay <= 0.0 || decay > 1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "decay",
                value: decay,
                reason: "must be in (0, 1]",
            });
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "weight",
                value: weight,
                reason: "must be positive",
            });
        }

        Ok(Self {
            function,
            scale,
            decay,
            weight,
        })
    }

    pub fn function(&self) -> DecayFunction {
        self.function
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Evaluates `weight * curve(recency)` with a precomputed curve constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayBooster {
    params: DecayParameters,
    processed_scale: f64,
}

impl DecayBooster {
    pub fn new(params: DecayParameters) -> Self {
        let processed_scale = params.function.process_scale(params.scale, params.decay);
        Self {
            params,
            processed_scale,
        }
    }

    pub fn params(&self) -> &DecayParameters {
        &self.params
    }

    pub fn processed_scale(&self) -> f64 {
        self.processed_scale
    }

    /// Curve value in `[0, 1]`. Negative recencies are evaluated at distance zero.
    pub fn curve(&self, recency_hours: i64) -> f64 {
        let distance = recency_hours.max(0) as f64;
        self.params.function.evaluate(distance, self.processed_scale)
    }

    /// Boost in `[0, weight]`.
    pub fn boost(&self, recency_hours: i64) -> f32 {
        (self.params.weight * self.curve(recency_hours)) as f32
    }

    pub fn explain(&self, recency_hours: i64) -> Explanation {
        let curve = self.curve(recency_hours);
        Explanation::with_details(
            self.boost(recency_hours),
            "term recency boost, computed as weight * decayScore(termRecency) from:",
            [
                Explanation::match_value(self.params.weight as f32, "weight"),
                Explanation::match_value(recency_hours as f32, "termRecency"),
                Explanation::with_details(
                    curve as f32,
                    format!("decayScore(termRecency), {} decay from:", self.params.function),
                    [Explanation::match_value(
                        curve as f32,
                        self.params
                            .function
                            .describe(recency_hours.max(0), self.processed_scale),
                    )],
                ),
            ],
        )
    }
}
