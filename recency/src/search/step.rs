//! Tiered recency multipliers.
//!
//! A coarse, parameter-free alternative to the decay curves. The multiplier is
//! applied directly to the base score.

use super::Explanation;

/// Upper bound (inclusive, in hours) and multiplier of each tier.
const TIERS: [(i64, f32); 5] = [(4, 10.0), (24, 5.0), (48, 3.0), (72, 2.0), (120, 1.2)];

/// Multiplier for recencies outside every tier.
const NEUTRAL: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepBoostTable;

impl StepBoostTable {
    pub fn new() -> Self {
        Self
    }

    /// Multiplier for a term that is `recency_hours` old.
    pub fn multiplier(&self, recency_hours: i64) -> f32 {
        if recency_hours <= 0 {
            return NEUTRAL;
        }

        TIERS
            .iter()
            .find(|(upper, _)| recency_hours <= *upper)
            .map_or(NEUTRAL, |(_, multiplier)| *multiplier)
    }

    pub fn explain(&self, recency_hours: i64) -> Explanation {
        let multiplier = self.multiplier(recency_hours);
        let tier = if recency_hours <= 0 {
            "<= 0".to_string()
        } else {
            let mut lower = 0;
            let mut label = format!("> {}", TIERS[TIERS.len() - 1].0);
            for (upper, _) in TIERS {
                if recency_hours <= upper {
                    label = format!("({lower}, {upper}]");
                    break;
                }
                lower = upper;
            }
            label
        };

        Explanation::match_value(
            multiplier,
            format!("step boost for termRecency={recency_hours} in tier {tier} hours"),
        )
    }
}
