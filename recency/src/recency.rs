//! Conversion of encoded term timestamps into elapsed hours.
//!
//! An [`EncodedTimestamp`] counts whole hours from a reference epoch. Two
//! conventions exist in the wild: hours since the Unix epoch (the default) and
//! hours since `2018-01-01T00:00:00Z`. The epoch is therefore explicit
//! configuration, and payloads written under one convention cannot be read
//! by a calculator configured for the other.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt::Debug;

use crate::payload::EncodedTimestamp;

/// Reference epoch for hours-since-Unix-epoch payloads.
pub const UNIX_EPOCH: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// `2018-01-01T00:00:00Z` in seconds since the Unix epoch.
const EPOCH_2018_UNIX_SECONDS: i64 = 1_514_764_800;

/// Reference epoch for hours-since-2018 payloads (`2018-01-01T00:00:00Z`).
pub fn recency_epoch_2018() -> DateTime<Utc> {
    UNIX_EPOCH + TimeDelta::seconds(EPOCH_2018_UNIX_SECONDS)
}

/// Source of "now" for recency computations.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant, for reproducible scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Turns encoded timestamps into whole hours elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyCalculator {
    reference_epoch: DateTime<Utc>,
}

impl Default for RecencyCalculator {
    fn default() -> Self {
        Self::new(UNIX_EPOCH)
    }
}

impl RecencyCalculator {
    pub fn new(reference_epoch: DateTime<Utc>) -> Self {
        Self { reference_epoch }
    }

    pub fn reference_epoch(&self) -> DateTime<Utc> {
        self.reference_epoch
    }

    /// Instant an encoded timestamp refers to.
    pub fn instant_of(&self, encoded: EncodedTimestamp) -> DateTime<Utc> {
        self.reference_epoch + TimeDelta::hours(i64::from(encoded.hours()))
    }

    /// Whole hours between the recorded instant and `now`, truncated toward zero.
    ///
    /// Negative when the timestamp lies in the future of `now`.
    pub fn recency_hours(&self, now: DateTime<Utc>, encoded: EncodedTimestamp) -> i64 {
        (now - self.instant_of(encoded)).num_hours()
    }

    /// Encoded timestamp of `instant`, truncated to the hour.
    ///
    /// Instants too far from the epoch to fit the 4 byte payload saturate.
    pub fn encode(&self, instant: DateTime<Utc>) -> EncodedTimestamp {
        let hours = (instant - self.reference_epoch).num_hours();
        let clamped = hours.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        EncodedTimestamp::new(clamped as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_calculate_recency_unix_epoch() {
        let calculator = RecencyCalculator::default();
        let now = parse("2018-11-06T12:00:00Z");

        assert_eq!(calculator.recency_hours(now, EncodedTimestamp::new(428_196)), 0);
        assert_eq!(calculator.recency_hours(now, EncodedTimestamp::new(428_195)), 1);
        assert_eq!(calculator.recency_hours(now, EncodedTimestamp::new(428_180)), 16);
    }

    #[test]
    fn test_partial_hours_are_dropped() {
        let calculator = RecencyCalculator::default();
        let now = parse("2018-11-06T12:59:59Z");

        assert_eq!(calculator.recency_hours(now, EncodedTimestamp::new(428_196)), 0);
        assert_eq!(calculator.recency_hours(now, EncodedTimestamp::new(428_195)), 1);
    }

    #[test]
    fn test_future_timestamps_truncate_toward_zero() {
        let calculator = RecencyCalculator::default();
        let now = parse("2018-11-06T11:30:00Z");

        // 30 minutes in the future
        assert_eq!(calculator.recency_hours(now, EncodedTimestamp::new(428_196)), 0);
        // 2.5 hours in the future
        assert_eq!(calculator.recency_hours(now, EncodedTimestamp::new(428_198)), -2);
    }

    #[test]
    fn test_2018_epoch_is_new_year_utc() {
        assert_eq!(recency_epoch_2018(), parse("2018-01-01T00:00:00Z"));
        assert_ne!(recency_epoch_2018(), UNIX_EPOCH);
    }

    #[test]
    fn test_2018_epoch_convention() {
        let calculator = RecencyCalculator::new(recency_epoch_2018());
        let now = parse("2018-01-02T06:00:00Z");

        assert_eq!(calculator.recency_hours(now, EncodedTimestamp::new(24)), 6);
        assert_eq!(calculator.instant_of(EncodedTimestamp::new(1)), parse("2018-01-01T01:00:00Z"));
    }

    #[test]
    fn test_encode_is_inverse_at_hour_granularity() {
        let calculator = RecencyCalculator::default();
        let instant = parse("2018-11-06T12:45:00Z");

        let encoded = calculator.encode(instant);
        assert_eq!(encoded, EncodedTimestamp::new(428_196));
        assert_eq!(calculator.recency_hours(instant, encoded), 0);
    }

    #[test]
    fn test_fixed_clock() {
        let instant = parse("2020-02-02T02:02:02Z");
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
