//! Error types for payload lookups

use super::DocId;

/// Failure while retrieving a term occurrence payload.
///
/// None of these are fatal for scoring: the decoder logs them and treats the
/// term as having no recorded timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The document has no term vector stored for the field
    #[error("no term vector for doc {doc} in field '{field}'")]
    NoTermVector { doc: DocId, field: String },

    /// The term does not occur in the document's term vector
    #[error("term '{term}' not found in term vector of doc {doc}")]
    TermNotFound { doc: DocId, term: String },

    /// The term is present but has no positions to read a payload from
    #[error("no postings for term '{term}' in doc {doc}")]
    NoPostings { doc: DocId, term: String },

    /// The underlying storage failed
    #[error("storage error: {0}")]
    Storage(String),
}

impl LookupError {
    /// Whether this is an expected absence of data rather than a storage fault.
    pub fn is_missing_data(&self) -> bool {
        !matches!(self, LookupError::Storage(_))
    }
}

pub type LookupResult<T> = Result<T, LookupError>;
