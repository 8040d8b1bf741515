//! Similarity traits and the term recency decorator.
//!
//! [`Similarity`] and [`SimScorer`] mirror the two-phase shape of a relevance
//! scorer: a query-level weight is computed once from collection and term
//! statistics, then a per-segment scorer is created and driven by a single
//! thread over the documents of that segment.
//!
//! [`RecencySimilarity`] wraps any base similarity. For each document it asks
//! the base scorer for the unmodified score, reads the timestamp payload of
//! every term in the match set, keeps the most recent one and multiplies the
//! base score by the factor of the configured [`BoostPolicy`].

use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{info, warn};

use super::{BoostPolicy, Explanation};
use crate::config::{BoostingConfig, ConfigError};
use crate::index::{CollectionStatistics, DocId, SegmentReader, TermStatistics};
use crate::payload::{EncodedTimestamp, latest_timestamp};
use crate::recency::{Clock, RecencyCalculator, SystemClock};

/// A relevance model.
pub trait Similarity: Send + Sync + Debug {
    /// Query-level state shared by every segment scorer
    type Weight: Send + Sync + Debug;

    /// Compute the query-level weight for one field and a set of terms.
    fn compute_weight(
        &self,
        collection_stats: &CollectionStatistics,
        term_stats: &[TermStatistics],
    ) -> Self::Weight;

    /// Create the scorer for one segment.
    fn sim_scorer<'a>(
        &'a self,
        weight: &'a Self::Weight,
        segment: &'a dyn SegmentReader,
    ) -> Box<dyn SimScorer + 'a>;
}

/// Scores documents of a single segment.
pub trait SimScorer {
    /// Score of `doc` given the (possibly summed) frequency of the matched terms
    fn score(&self, doc: DocId, freq: f32) -> f32;

    /// Explanation whose value equals [`SimScorer::score`] for the same input
    fn explain(&self, doc: DocId, freq: f32) -> Explanation;
}

/// Query-level state of [`RecencySimilarity`].
#[derive(Debug, Clone)]
pub struct RecencyWeight<W> {
    base: W,
    field: String,
    terms: Vec<String>,
}

impl<W> RecencyWeight<W> {
    pub fn base(&self) -> &W {
        &self.base
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The term match set whose timestamps are aggregated
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Decorates a base similarity with a term recency boost.
///
/// Holds only immutable configuration, so one instance can be shared by
/// scorers running concurrently on different segments.
#[derive(Debug, Clone)]
pub struct RecencySimilarity<S> {
    base: S,
    policy: BoostPolicy,
    calculator: RecencyCalculator,
    clock: Arc<dyn Clock>,
}

impl<S: Similarity> RecencySimilarity<S> {
    /// Decorate `base` with `policy`, reading timestamps relative to `reference_epoch`.
    pub fn new(base: S, policy: BoostPolicy, reference_epoch: DateTime<Utc>) -> Self {
        Self {
            base,
            policy,
            calculator: RecencyCalculator::new(reference_epoch),
            clock: Arc::new(SystemClock),
        }
    }

    /// Build from configuration. Invalid decay parameters fail here, before
    /// any document is scored.
    pub fn from_config(base: S, config: &BoostingConfig) -> Result<Self, ConfigError> {
        let policy = BoostPolicy::from_config(config)?;
        info!(
            policy = %policy.name(),
            reference_epoch = %config.reference_epoch,
            "Term recency boosting configured"
        );
        Ok(Self::new(base, policy, config.reference_epoch))
    }

    /// Replace the clock used to determine "now".
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base(&self) -> &S {
        &self.base
    }

    pub fn policy(&self) -> &BoostPolicy {
        &self.policy
    }

    pub fn calculator(&self) -> &RecencyCalculator {
        &self.calculator
    }
}

impl<S: Similarity> Similarity for RecencySimilarity<S> {
    type Weight = RecencyWeight<S::Weight>;

    fn compute_weight(
        &self,
        collection_stats: &CollectionStatistics,
        term_stats: &[TermStatistics],
    ) -> Self::Weight {
        RecencyWeight {
            base: self.base.compute_weight(collection_stats, term_stats),
            field: collection_stats.field.clone(),
            terms: term_stats.iter().map(|stats| stats.term.clone()).collect(),
        }
    }

    fn sim_scorer<'a>(
        &'a self,
        weight: &'a Self::Weight,
        segment: &'a dyn SegmentReader,
    ) -> Box<dyn SimScorer + 'a> {
        Box::new(RecencySimScorer {
            base: self.base.sim_scorer(&weight.base, segment),
            weight,
            segment,
            policy: &self.policy,
            calculator: &self.calculator,
            now: self.clock.now(),
        })
    }
}

/// Per-segment scorer. `now` is read once so that `score` and `explain`
/// agree for every document of the segment.
struct RecencySimScorer<'a, W> {
    base: Box<dyn SimScorer + 'a>,
    weight: &'a RecencyWeight<W>,
    segment: &'a dyn SegmentReader,
    policy: &'a BoostPolicy,
    calculator: &'a RecencyCalculator,
    now: DateTime<Utc>,
}

impl<W> RecencySimScorer<'_, W> {
    fn latest_timestamp(&self, doc: DocId) -> EncodedTimestamp {
        latest_timestamp(self.segment, doc, &self.weight.terms, &self.weight.field)
    }

    fn term_recency(&self, timestamp: EncodedTimestamp) -> Option<i64> {
        (!timestamp.is_absent()).then(|| self.calculator.recency_hours(self.now, timestamp))
    }

    /// `base * factor`, forced to a finite non-negative value. Overflow
    /// saturates at `f32::MAX` so a boost never ranks a document lower.
    fn compose(&self, doc: DocId, base: f32, factor: f32) -> f32 {
        let score = base * factor;
        if score.is_nan() || score < 0.0 {
            warn!(doc, base, factor, field = %self.weight.field, "Discarding invalid boosted score");
            0.0
        } else {
            score.min(f32::MAX)
        }
    }
}

impl<W> SimScorer for RecencySimScorer<'_, W> {
    fn score(&self, doc: DocId, freq: f32) -> f32 {
        let base = self.base.score(doc, freq);
        let recency = self.term_recency(self.latest_timestamp(doc));
        self.compose(doc, base, self.policy.factor(recency))
    }

    fn explain(&self, doc: DocId, freq: f32) -> Explanation {
        let base = self.base.score(doc, freq);
        let base_explanation = self.base.explain(doc, freq);

        let timestamp = self.latest_timestamp(doc);
        let recency = self.term_recency(timestamp);
        let boost = self.policy.boost(recency);

        let mut recency_details = vec![Explanation::match_value(
            timestamp.hours() as f32,
            "termTimestamp, most recent over matched terms (0 = none recorded)",
        )];
        if let Some(hours) = recency {
            recency_details.push(Explanation::match_value(
                hours as f32,
                format!("termRecency, hours elapsed since termTimestamp at {}", self.now.to_rfc3339()),
            ));
        }
        recency_details.push(boost.trace);

        Explanation::with_details(
            self.compose(doc, base, boost.multiplier),
            format!("score(doc={doc},freq={freq}), product of:"),
            [
                base_explanation,
                Explanation::with_details(
                    boost.multiplier,
                    format!("recency boost ({}), computed from:", self.policy.name()),
                    recency_details,
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests;
