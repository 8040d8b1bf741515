//! Timestamp encoding and recency inspection

use crate::args::{EncodeArgs, RecencyArgs};
use crate::context::CliContext;
use crate::output::{format_hours, format_info};
use crate::utils::{parse_epoch, parse_instant};
use chrono::{DateTime, Utc};
use colored::Colorize;
use recency::payload::{EncodedTimestamp, encode_timestamp};
use recency::recency::RecencyCalculator;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecencyReport {
    pub timestamp: i32,
    pub recorded_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
    pub recency_hours: i64,
}

pub fn recency_report(
    timestamp: i32,
    epoch: Option<&str>,
    context: &CliContext,
) -> recency::Result<RecencyReport> {
    let calculator = calculator(epoch, context)?;
    let encoded = EncodedTimestamp::new(timestamp);

    Ok(RecencyReport {
        timestamp,
        recorded_at: calculator.instant_of(encoded),
        now: context.now,
        recency_hours: calculator.recency_hours(context.now, encoded),
    })
}

fn calculator(epoch: Option<&str>, context: &CliContext) -> recency::Result<RecencyCalculator> {
    let epoch = match epoch {
        Some(epoch) => parse_epoch(epoch)?,
        None => context.config.boosting.reference_epoch,
    };
    Ok(RecencyCalculator::new(epoch))
}

pub fn handle_recency_command(
    args: RecencyArgs,
    context: &CliContext,
    output_format: &str,
) -> recency::Result<()> {
    let report = recency_report(args.timestamp, args.epoch.as_deref(), context)?;

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} recorded at {}",
            report.timestamp.to_string().bold(),
            report.recorded_at.to_rfc3339()
        );
        println!(
            "{}",
            format_info(&format!(
                "{} old at {}",
                format_hours(report.recency_hours),
                report.now.to_rfc3339()
            ))
        );
    }

    Ok(())
}

pub fn handle_encode_command(
    args: EncodeArgs,
    context: &CliContext,
    output_format: &str,
) -> recency::Result<()> {
    let instant = if args.instant.eq_ignore_ascii_case("now") {
        context.now
    } else {
        parse_instant(&args.instant)?
    };
    let calculator = calculator(args.epoch.as_deref(), context)?;
    let encoded = calculator.encode(instant);

    if output_format == "json" {
        let body = serde_json::json!({
            "instant": instant.to_rfc3339(),
            "reference_epoch": calculator.reference_epoch().to_rfc3339(),
            "timestamp": encoded.hours(),
            "payload": encode_timestamp(encoded),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", encoded);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use recency::config::RecencyConfig;

    fn context() -> CliContext {
        CliContext::with_config(
            RecencyConfig::default(),
            Utc.with_ymd_and_hms(2018, 11, 6, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_recency_against_configured_epoch() {
        let report = recency_report(428_180, None, &context()).unwrap();
        assert_eq!(report.recency_hours, 16);
        assert_eq!(
            report.recorded_at,
            Utc.with_ymd_and_hms(2018, 11, 5, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_recency_against_explicit_epoch() {
        let report = recency_report(7_427, Some("2018"), &context()).unwrap();
        assert_eq!(report.recency_hours, 1);
    }
}
