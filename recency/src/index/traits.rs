//! Trait definitions for the index collaborators

use super::{DocId, LookupResult};

/// Synchronous access to the payload of a term occurrence.
///
/// Implementations return `Ok(None)` when the occurrence exists but carries no
/// payload. Calls may block on storage I/O; there is no timeout or retry.
#[cfg_attr(test, mockall::automock)]
pub trait PayloadLookup: Send + Sync {
    /// Payload of the first occurrence of `term` in `field` of document `doc`
    fn get_payload(&self, doc: DocId, term: &str, field: &str) -> LookupResult<Option<Vec<u8>>>;
}

/// A single index segment as seen by a similarity.
pub trait SegmentReader: PayloadLookup {
    /// One past the largest document id in the segment
    fn max_doc(&self) -> DocId;

    /// Number of tokens `field` holds in document `doc`, if known
    fn field_length(&self, doc: DocId, field: &str) -> Option<u32>;
}
