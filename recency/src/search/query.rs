//! Disjunctive term query over one field of a [`MemorySegment`].
//!
//! Drives a [`Similarity`] the way a search engine would: one weight for the
//! whole query, one scorer for the segment, then every matching document is
//! scored with the summed frequency of the query terms it contains.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::{Explanation, Similarity};
use crate::index::{DocId, MemorySegment};

/// A document together with its final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub doc: DocId,
    pub score: f32,
}

/// Matches documents containing any of `terms` in `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSetQuery {
    field: String,
    terms: Vec<String>,
}

impl TermSetQuery {
    pub fn new<I, T>(field: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        terms.sort();
        terms.dedup();
        Self {
            field: field.into(),
            terms,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Matching documents with the summed frequency of the query terms.
    fn matches(&self, segment: &MemorySegment) -> BTreeMap<DocId, u32> {
        let mut matches = BTreeMap::new();
        for term in &self.terms {
            for (doc, freq) in segment.matching_docs(&self.field, term) {
                *matches.entry(doc).or_insert(0) += freq;
            }
        }
        matches
    }

    fn weight<S: Similarity>(&self, similarity: &S, segment: &MemorySegment) -> S::Weight {
        let term_stats: Vec<_> = self
            .terms
            .iter()
            .map(|term| segment.term_statistics(&self.field, term))
            .collect();
        similarity.compute_weight(&segment.collection_statistics(&self.field), &term_stats)
    }

    /// Top `limit` documents by descending score, ties broken by document id.
    pub fn search<S: Similarity>(
        &self,
        similarity: &S,
        segment: &MemorySegment,
        limit: usize,
    ) -> Vec<ScoredDocument> {
        let weight = self.weight(similarity, segment);
        let scorer = similarity.sim_scorer(&weight, segment);

        let mut hits: Vec<ScoredDocument> = self
            .matches(segment)
            .into_iter()
            .map(|(doc, freq)| ScoredDocument {
                doc,
                score: scorer.score(doc, freq as f32),
            })
            .collect();
        debug!(field = %self.field, terms = self.terms.len(), hits = hits.len(), "Scored term set query");

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc.cmp(&b.doc)));
        hits.truncate(limit);
        hits
    }

    /// Explanation of the score of `doc`, or `None` when it does not match.
    pub fn explain<S: Similarity>(
        &self,
        similarity: &S,
        segment: &MemorySegment,
        doc: DocId,
    ) -> Option<Explanation> {
        let freq = self.matches(segment).get(&doc).copied()?;
        let weight = self.weight(similarity, segment);
        let scorer = similarity.sim_scorer(&weight, segment);
        Some(scorer.explain(doc, freq as f32))
    }
}
