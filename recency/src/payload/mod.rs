//! Term timestamp payloads.
//!
//! At index time every term occurrence may be given a 4 byte big-endian payload
//! holding the number of whole hours between a reference epoch and the moment
//! the term was recorded. The value `0` is reserved and always means "no
//! timestamp recorded".

mod decoder;

pub use decoder::{latest_timestamp, read_timestamp};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of an encoded timestamp payload in bytes.
pub const TIMESTAMP_PAYLOAD_LEN: usize = 4;

/// Whole hours from the reference epoch to a recorded term occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedTimestamp(i32);

impl EncodedTimestamp {
    /// Sentinel for "no timestamp recorded".
    pub const ABSENT: EncodedTimestamp = EncodedTimestamp(0);

    pub const fn new(hours: i32) -> Self {
        Self(hours)
    }

    pub const fn hours(self) -> i32 {
        self.0
    }

    pub const fn is_absent(self) -> bool {
        self.0 == Self::ABSENT.0
    }
}

impl From<i32> for EncodedTimestamp {
    fn from(hours: i32) -> Self {
        Self(hours)
    }
}

impl fmt::Display for EncodedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload bytes that cannot be read as a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("payload too short: expected 4 bytes, got {len}")]
    Truncated { len: usize },
}

/// Decode the leading four bytes of `payload` as a big-endian `i32`.
///
/// Bytes past the fourth are ignored.
pub fn decode_timestamp(payload: &[u8]) -> Result<EncodedTimestamp, PayloadError> {
    let bytes: [u8; TIMESTAMP_PAYLOAD_LEN] = payload
        .get(..TIMESTAMP_PAYLOAD_LEN)
        .and_then(|head| head.try_into().ok())
        .ok_or(PayloadError::Truncated { len: payload.len() })?;

    Ok(EncodedTimestamp(i32::from_be_bytes(bytes)))
}

/// Encode a timestamp the way the index-time writer does.
pub fn encode_timestamp(timestamp: EncodedTimestamp) -> [u8; TIMESTAMP_PAYLOAD_LEN] {
    timestamp.0.to_be_bytes()
}
