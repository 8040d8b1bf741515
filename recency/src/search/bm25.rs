//! Okapi BM25, the base relevance model recency boosting is usually layered on.

use super::{Explanation, SimScorer, Similarity};
use crate::config::{Bm25Config, ConfigError};
use crate::index::{CollectionStatistics, DocId, SegmentReader, TermStatistics};

/// BM25 with term frequency saturation `k1` and length normalization `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Similarity {
    k1: f32,
    b: f32,
}

impl Default for Bm25Similarity {
    /// `k1 = 1.2`, `b = 0.0`: recency fields hold short keyword lists, so
    /// length normalization is off.
    fn default() -> Self {
        Self { k1: 1.2, b: 0.0 }
    }
}

impl Bm25Similarity {
    pub fn new(k1: f32, b: f32) -> Result<Self, ConfigError> {
        if !k1.is_finite() || k1 < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "k1",
                value: f64::from(k1),
                reason: "must be finite and non-negative",
            });
        }
        if !(0.0..=1.0).contains(&b) {
            return Err(ConfigError::InvalidParameter {
                name: "b",
                value: f64::from(b),
                reason: "must lie in [0, 1]",
            });
        }
        Ok(Self { k1, b })
    }

    pub fn from_config(config: &Bm25Config) -> Result<Self, ConfigError> {
        Self::new(config.k1, config.b)
    }

    pub fn k1(&self) -> f32 {
        self.k1
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    fn idf(doc_freq: u64, doc_count: u64) -> f32 {
        let n = doc_freq as f64;
        let total = doc_count as f64;
        (1.0 + (total - n + 0.5) / (n + 0.5)).ln() as f32
    }
}

/// Per-term inverse document frequency.
#[derive(Debug, Clone, PartialEq)]
struct TermIdf {
    term: String,
    doc_freq: u64,
    idf: f32,
}

/// Query-level BM25 state for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Bm25Weight {
    field: String,
    doc_count: u64,
    avg_field_length: f32,
    terms: Vec<TermIdf>,
}

impl Bm25Weight {
    /// Sum of the idf of every query term
    pub fn idf(&self) -> f32 {
        self.terms.iter().map(|term| term.idf).sum()
    }

    pub fn avg_field_length(&self) -> f32 {
        self.avg_field_length
    }

    fn explain_idf(&self) -> Explanation {
        let mut per_term: Vec<_> = self.terms.iter().map(|term| {
            Explanation::with_details(
                term.idf,
                format!(
                    "idf({}), computed as log(1 + (N - n + 0.5) / (n + 0.5)) from:",
                    term.term
                ),
                [
                    Explanation::match_value(
                        term.doc_freq as f32,
                        "n, number of documents containing term",
                    ),
                    Explanation::match_value(
                        self.doc_count as f32,
                        "N, total number of documents with field",
                    ),
                ],
            )
        }).collect();

        if per_term.len() == 1 {
            if let Some(single) = per_term.pop() {
                return single;
            }
        }
        Explanation::with_details(self.idf(), "idf, sum of:", per_term)
    }
}

impl Similarity for Bm25Similarity {
    type Weight = Bm25Weight;

    fn compute_weight(
        &self,
        collection_stats: &CollectionStatistics,
        term_stats: &[TermStatistics],
    ) -> Bm25Weight {
        // Fields indexed without statistics fall back to the segment size.
        let doc_count = match collection_stats.doc_count {
            0 => collection_stats.max_doc,
            count => count,
        };

        Bm25Weight {
            field: collection_stats.field.clone(),
            doc_count,
            avg_field_length: collection_stats.avg_field_length(),
            terms: term_stats
                .iter()
                .map(|stats| TermIdf {
                    term: stats.term.clone(),
                    doc_freq: stats.doc_freq,
                    idf: Self::idf(stats.doc_freq, doc_count),
                })
                .collect(),
        }
    }

    fn sim_scorer<'a>(
        &'a self,
        weight: &'a Bm25Weight,
        segment: &'a dyn SegmentReader,
    ) -> Box<dyn SimScorer + 'a> {
        Box::new(Bm25Scorer {
            k1: self.k1,
            b: self.b,
            weight,
            segment,
        })
    }
}

struct Bm25Scorer<'a> {
    k1: f32,
    b: f32,
    weight: &'a Bm25Weight,
    segment: &'a dyn SegmentReader,
}

impl Bm25Scorer<'_> {
    fn field_length(&self, doc: DocId) -> f32 {
        self.segment
            .field_length(doc, &self.weight.field)
            .map_or(self.weight.avg_field_length, |length| length as f32)
    }

    fn norm(&self, field_length: f32) -> f32 {
        self.k1 * (1.0 - self.b + self.b * field_length / self.weight.avg_field_length)
    }

    fn tf(&self, doc: DocId, freq: f32) -> f32 {
        if freq <= 0.0 {
            return 0.0;
        }
        freq * (self.k1 + 1.0) / (freq + self.norm(self.field_length(doc)))
    }
}

impl SimScorer for Bm25Scorer<'_> {
    fn score(&self, doc: DocId, freq: f32) -> f32 {
        self.weight.idf() * self.tf(doc, freq)
    }

    fn explain(&self, doc: DocId, freq: f32) -> Explanation {
        let tf = Explanation::with_details(
            self.tf(doc, freq),
            "tf, computed as freq * (k1 + 1) / (freq + k1 * (1 - b + b * dl / avgdl)) from:",
            [
                Explanation::match_value(freq, "freq, occurrences of term within document"),
                Explanation::match_value(self.k1, "k1, term saturation parameter"),
                Explanation::match_value(self.b, "b, length normalization parameter"),
                Explanation::match_value(self.field_length(doc), "dl, length of field"),
                Explanation::match_value(self.weight.avg_field_length, "avgdl, average length of field"),
            ],
        );

        Explanation::with_details(
            self.score(doc, freq),
            format!("bm25 score(freq={freq}), product of:"),
            [self.weight.explain_idf(), tf],
        )
    }
}
