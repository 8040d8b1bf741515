//! Reading term timestamps out of an index segment.
//!
//! Every failure on this path is absorbed: a missing term vector, an unknown
//! term, an occurrence without payload or an undecodable payload all yield
//! [`EncodedTimestamp::ABSENT`]. Expected absences are logged at debug level,
//! storage faults and malformed payloads at warn level.

use tracing::{debug, warn};

use super::{EncodedTimestamp, decode_timestamp};
use crate::index::{DocId, PayloadLookup};

/// Timestamp recorded for `term` in `field` of document `doc`, or the sentinel.
pub fn read_timestamp<L>(lookup: &L, doc: DocId, term: &str, field: &str) -> EncodedTimestamp
where
    L: PayloadLookup + ?Sized,
{
    match lookup.get_payload(doc, term, field) {
        Ok(Some(payload)) => match decode_timestamp(&payload) {
            Ok(timestamp) => timestamp,
            Err(e) => {
                warn!(doc, term, field, error = %e, "Undecodable term timestamp payload, treating as absent");
                EncodedTimestamp::ABSENT
            }
        },
        Ok(None) => {
            debug!(doc, term, field, "Term occurrence carries no payload");
            EncodedTimestamp::ABSENT
        }
        Err(e) if e.is_missing_data() => {
            debug!(doc, term, field, reason = %e, "No term timestamp recorded");
            EncodedTimestamp::ABSENT
        }
        Err(e) => {
            warn!(doc, term, field, error = %e, "Payload lookup failed, treating term timestamp as absent");
            EncodedTimestamp::ABSENT
        }
    }
}

/// Most recent timestamp over a set of terms.
///
/// The fold starts from the sentinel and keeps the maximum decoded value, so
/// the most recently recorded term wins and negative values never beat
/// "absent".
pub fn latest_timestamp<L, T>(lookup: &L, doc: DocId, terms: &[T], field: &str) -> EncodedTimestamp
where
    L: PayloadLookup + ?Sized,
    T: AsRef<str>,
{
    terms
        .iter()
        .map(|term| read_timestamp(lookup, doc, term.as_ref(), field))
        .fold(EncodedTimestamp::ABSENT, EncodedTimestamp::max)
}
