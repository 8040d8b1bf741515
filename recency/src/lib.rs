//! # Recency
//!
//! Term recency boosting for relevance scoring. Indexed terms carry the hour
//! they were recorded as a 4-byte payload; at query time the most recent
//! timestamp among the matched terms amplifies the score of a base
//! similarity such as BM25.
//!
//! ## Quick Start
//!
//! ```rust
//! use recency::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ConfigBuilder::new()
//!         .with_decay(DecayFunction::Gaussian, 24.0, 0.5)
//!         .build()?;
//!     let similarity = build_similarity(&config)?;
//!
//!     let calculator = RecencyCalculator::default();
//!     let mut segment = MemorySegment::new();
//!     segment
//!         .add_document(0, "web_kw", [Token::plain("java")])
//!         .add_document(1, "web_kw", [Token::stamped("java", calculator.encode(chrono::Utc::now()))]);
//!
//!     let hits = TermSetQuery::new("web_kw", ["java"]).search(&similarity, &segment, 10);
//!     assert_eq!(hits[0].doc, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **payload**: encoding and reading of per-term timestamps
//! - **recency**: hours elapsed since a timestamp, relative to a configurable epoch
//! - **search**: decay curves, the step table, boosting policies and the
//!   [`search::RecencySimilarity`] decorator
//! - **index**: the segment collaborator the scorer reads payloads from
//!
//! Scoring is synchronous and never fails: missing or malformed timestamps
//! fall back to the unboosted base score.

pub mod config;
pub mod index;
pub mod logging;
pub mod payload;
pub mod recency;
pub mod search;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::{build_similarity, init};

    pub use crate::config::{
        BoostingConfig, ConfigBuilder, ConfigLoader, LogLevel, PolicyKind, RecencyConfig,
    };

    pub use crate::index::{MemorySegment, PayloadLookup, SegmentReader, Token};

    pub use crate::payload::{EncodedTimestamp, decode_timestamp, encode_timestamp};

    pub use crate::recency::{Clock, FixedClock, RecencyCalculator, SystemClock};

    pub use crate::search::{
        Bm25Similarity, BoostPolicy, DecayFunction, DecayParameters, Explanation,
        RecencySimilarity, ScoredDocument, SimScorer, Similarity, StepBoostTable, TermSetQuery,
    };

    pub use crate::{RecencyError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for recency operations
#[derive(Debug, thiserror::Error)]
pub enum RecencyError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Error raised by an index collaborator
    #[error("Index error: {0}")]
    Index(#[from] crate::index::LookupError),

    /// Malformed timestamp payload
    #[error("Payload error: {0}")]
    Payload(#[from] crate::payload::PayloadError),

    /// Segment fixture could not be read or parsed
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for RecencyError {
    fn from(err: crate::config::ConfigError) -> Self {
        RecencyError::Configuration(err.to_string())
    }
}

/// Result type for recency operations
pub type Result<T> = std::result::Result<T, RecencyError>;

/// Validate `config` and install the global `tracing` subscriber described
/// by its logging section.
///
/// Hold the returned guard for the lifetime of the program: it flushes the
/// log file when dropped. A subscriber installed earlier is left in place.
pub fn init(config: &config::RecencyConfig) -> Result<logging::LogGuard> {
    config::validate_config(config)?;
    Ok(logging::init(&config.logging)?)
}

/// Build the BM25 based recency similarity described by `config`.
///
/// # Examples
///
/// ```rust
/// use recency::prelude::*;
///
/// let config = ConfigBuilder::legacy_step().build()?;
/// let similarity = build_similarity(&config)?;
/// assert_eq!(similarity.policy().name(), "step");
/// # Ok::<(), recency::RecencyError>(())
/// ```
pub fn build_similarity(
    config: &config::RecencyConfig,
) -> Result<search::RecencySimilarity<search::Bm25Similarity>> {
    let base = search::Bm25Similarity::from_config(&config.bm25)?;
    Ok(search::RecencySimilarity::from_config(
        base,
        &config.boosting,
    )?)
}
