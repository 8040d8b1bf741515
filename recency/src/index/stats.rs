//! Collection and term statistics handed to a similarity when building a weight.

use serde::{Deserialize, Serialize};

/// Field-level statistics across the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionStatistics {
    /// Field the statistics describe
    pub field: String,

    /// Number of documents in the collection (including ones without the field)
    pub max_doc: u64,

    /// Number of documents that have at least one term in the field
    pub doc_count: u64,

    /// Sum of field lengths over all documents
    pub sum_total_term_freq: u64,
}

impl CollectionStatistics {
    pub fn new(
        field: impl Into<String>,
        max_doc: u64,
        doc_count: u64,
        sum_total_term_freq: u64,
    ) -> Self {
        Self {
            field: field.into(),
            max_doc,
            doc_count,
            sum_total_term_freq,
        }
    }

    /// Average field length, or `1.0` for an empty field.
    pub fn avg_field_length(&self) -> f32 {
        if self.doc_count == 0 || self.sum_total_term_freq == 0 {
            1.0
        } else {
            (self.sum_total_term_freq as f64 / self.doc_count as f64) as f32
        }
    }
}

/// Statistics for a single query term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStatistics {
    /// The term text
    pub term: String,

    /// Number of documents containing the term
    pub doc_freq: u64,

    /// Total number of occurrences across the collection
    pub total_term_freq: u64,
}

impl TermStatistics {
    pub fn new(term: impl Into<String>, doc_freq: u64, total_term_freq: u64) -> Self {
        Self {
            term: term.into(),
            doc_freq,
            total_term_freq,
        }
    }
}
