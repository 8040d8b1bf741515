//! Policy curve tabulation

use crate::args::CurveArgs;
use crate::context::CliContext;
use crate::output::print_curve;
use recency::RecencyError;
use recency::config::BoostingConfig;
use recency::search::BoostPolicy;
use serde::Serialize;

/// Multiplier a policy applies at one recency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub recency_hours: i64,
    pub multiplier: f32,
}

/// Sample the configured policy from `from` to `to` hours, inclusive.
pub fn curve_points(
    boosting: &BoostingConfig,
    from: i64,
    to: i64,
    step: i64,
) -> recency::Result<Vec<CurvePoint>> {
    if step <= 0 {
        return Err(RecencyError::Other(format!(
            "Step must be positive, got {}",
            step
        )));
    }
    if from > to {
        return Err(RecencyError::Other(format!(
            "Empty range: {} > {}",
            from, to
        )));
    }

    let policy = BoostPolicy::from_config(boosting)?;
    let points = std::iter::successors(Some(from), |hours| hours.checked_add(step))
        .take_while(|hours| *hours <= to)
        .map(|recency_hours| CurvePoint {
            recency_hours,
            multiplier: policy.factor(Some(recency_hours)),
        })
        .collect();

    Ok(points)
}

pub fn handle_curve_command(
    args: CurveArgs,
    context: &CliContext,
    output_format: &str,
) -> recency::Result<()> {
    let boosting = args.policy.apply(&context.config.boosting)?;
    let points = curve_points(&boosting, args.from, args.to, args.step)?;
    let policy = BoostPolicy::from_config(&boosting)?;

    if output_format == "json" {
        let body = serde_json::json!({
            "policy": policy.name(),
            "points": points,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_curve(&policy.name(), &points);
    }

    Ok(())
}
