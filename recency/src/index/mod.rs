//! Index-side collaborators consumed by the scorer.
//!
//! The recency scorer never owns index data. It reads per-occurrence payloads
//! and a few statistics through the traits defined here, so any storage engine
//! that can answer "what payload did term `t` carry in document `d`" can be
//! plugged in. [`MemorySegment`] is a small in-memory implementation used by
//! tests, benchmarks and the CLI fixtures.

pub mod errors;
pub mod memory;
pub mod stats;
pub mod traits;

pub use errors::{LookupError, LookupResult};
pub use memory::{MemorySegment, SegmentFixture, Token};
pub use stats::{CollectionStatistics, TermStatistics};
pub use traits::{PayloadLookup, SegmentReader};
#[cfg(test)]
pub use traits::MockPayloadLookup;

/// Segment-local document identifier.
pub type DocId = u32;
