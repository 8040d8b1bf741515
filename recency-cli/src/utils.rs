use chrono::{DateTime, Utc};
use recency::RecencyError;
use recency::recency::{UNIX_EPOCH, recency_epoch_2018};

/// Parse an RFC 3339 instant, or `now`.
pub fn parse_instant(value: &str) -> recency::Result<DateTime<Utc>> {
    if value.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }

    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| RecencyError::Other(format!("Invalid instant '{}': {}", value, e)))
}

/// Parse a reference epoch: `unix`, `2018` or an RFC 3339 instant.
pub fn parse_epoch(value: &str) -> recency::Result<DateTime<Utc>> {
    match value.to_lowercase().as_str() {
        "unix" => Ok(UNIX_EPOCH),
        "2018" => Ok(recency_epoch_2018()),
        _ => parse_instant(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_epoch() {
        assert_eq!(parse_epoch("unix").unwrap(), UNIX_EPOCH);
        assert_eq!(parse_epoch("2018").unwrap(), recency_epoch_2018());
        assert_eq!(
            parse_epoch("2020-01-01T01:00:00+01:00").unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_epoch("yesterday").is_err());
    }
}
