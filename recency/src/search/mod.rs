//! Recency-aware relevance scoring
//!
//! This module layers a term recency boost on top of a base relevance model.
//! Each indexed term may carry the hour it was recorded as a payload; at query
//! time the most recent timestamp among the matched terms decides how much
//! the base score is amplified.
//!
//! # Overview
//!
//! Two boosting policies are available:
//! - A step table with fixed multipliers per age tier
//! - A continuous decay curve (linear, exponential or gaussian) composed as
//!   `base * (1 + boost)`
//!
//! Documents without any recorded timestamp keep their base score exactly.
//!
//! # Example
//!
//! ```
//! use recency::index::{MemorySegment, Token};
//! use recency::payload::EncodedTimestamp;
//! use recency::search::{Bm25Similarity, BoostPolicy, RecencySimilarity, TermSetQuery};
//!
//! let mut segment = MemorySegment::new();
//! segment
//!     .add_document(0, "web_kw", [Token::plain("java")])
//!     .add_document(1, "web_kw", [Token::stamped("java", EncodedTimestamp::new(1))]);
//!
//! let similarity = RecencySimilarity::new(
//!     Bm25Similarity::default(),
//!     BoostPolicy::step(),
//!     recency::recency::UNIX_EPOCH,
//! );
//!
//! let hits = TermSetQuery::new("web_kw", ["java"]).search(&similarity, &segment, 10);
//! assert_eq!(hits.len(), 2);
//! ```

pub mod bm25;
pub mod decay;
pub mod explanation;
pub mod policy;
pub mod query;
pub mod similarity;
pub mod step;

pub use bm25::{Bm25Similarity, Bm25Weight};
pub use decay::{DecayBooster, DecayFunction, DecayParameters};
pub use explanation::Explanation;
pub use policy::{BoostPolicy, BoostResult};
pub use query::{ScoredDocument, TermSetQuery};
pub use similarity::{RecencySimilarity, RecencyWeight, SimScorer, Similarity};
pub use step::StepBoostTable;
