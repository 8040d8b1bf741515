//! In-memory term vector segment.
//!
//! Stores, per document and field, the term frequencies and the payload of the
//! first occurrence of every term, which is exactly what the recency scorer
//! reads. Segments can be built programmatically or loaded from a JSON fixture:
//!
//! ```json
//! {
//!   "documents": [
//!     { "id": 0, "fields": { "web_kw": [
//!       { "term": "java", "timestamp": 428196 },
//!       { "term": "auto" }
//!     ] } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CollectionStatistics, DocId, LookupError, LookupResult, PayloadLookup, SegmentReader,
    TermStatistics,
};
use crate::payload::{EncodedTimestamp, encode_timestamp};

/// A single token of an indexed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The term text
    pub term: String,

    /// Hours since the reference epoch, encoded as the payload when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i32>,

    /// Raw payload bytes, takes precedence over `timestamp`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Vec<u8>>,
}

impl Token {
    /// A token without payload
    pub fn plain(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            timestamp: None,
            payload: None,
        }
    }

    /// A token carrying an encoded timestamp payload
    pub fn stamped(term: impl Into<String>, timestamp: EncodedTimestamp) -> Self {
        Self {
            term: term.into(),
            timestamp: Some(timestamp.hours()),
            payload: None,
        }
    }

    /// A token carrying arbitrary payload bytes
    pub fn raw(term: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            term: term.into(),
            timestamp: None,
            payload: Some(payload),
        }
    }

    fn payload_bytes(&self) -> Option<Vec<u8>> {
        self.payload.clone().or_else(|| {
            self.timestamp
                .map(|hours| encode_timestamp(EncodedTimestamp::new(hours)).to_vec())
        })
    }
}

/// JSON representation of a segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentFixture {
    pub documents: Vec<DocumentFixture>,
}

/// JSON representation of one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFixture {
    pub id: DocId,
    pub fields: BTreeMap<String, Vec<Token>>,
}

#[derive(Debug, Clone, Default)]
struct TermEntry {
    freq: u32,
    payload: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default)]
struct FieldVector {
    length: u32,
    terms: BTreeMap<String, TermEntry>,
}

/// Term vectors of a single segment kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySegment {
    docs: BTreeMap<DocId, BTreeMap<String, FieldVector>>,
    max_doc: DocId,
}

impl MemorySegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tokens to `field` of document `doc`.
    ///
    /// Only the first occurrence of a term keeps its payload, later occurrences
    /// just bump the term frequency.
    pub fn add_document<I>(&mut self, doc: DocId, field: &str, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = Token>,
    {
        let vector = self
            .docs
            .entry(doc)
            .or_default()
            .entry(field.to_string())
            .or_default();

        for token in tokens {
            vector.length += 1;
            let entry = vector.terms.entry(token.term.clone()).or_default();
            if entry.freq == 0 {
                entry.payload = token.payload_bytes();
            }
            entry.freq += 1;
        }

        self.max_doc = self.max_doc.max(doc.saturating_add(1));
        self
    }

    /// Build a segment from its JSON representation.
    pub fn from_fixture(fixture: SegmentFixture) -> Self {
        let mut segment = Self::new();
        for document in fixture.documents {
            for (field, tokens) in document.fields {
                segment.add_document(document.id, &field, tokens);
            }
        }
        segment
    }

    /// Load a JSON fixture from disk.
    pub fn load_fixture<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            crate::RecencyError::Fixture(format!("failed to read {}: {}", path.display(), e))
        })?;
        let fixture: SegmentFixture = serde_json::from_str(&raw).map_err(|e| {
            crate::RecencyError::Fixture(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Self::from_fixture(fixture))
    }

    /// Number of documents stored
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Frequency of `term` in `field` of `doc`
    pub fn term_freq(&self, doc: DocId, field: &str, term: &str) -> Option<u32> {
        self.field_vector(doc, field)
            .and_then(|vector| vector.terms.get(term))
            .map(|entry| entry.freq)
    }

    /// Documents containing `term` in `field`, with their term frequency.
    pub fn matching_docs(&self, field: &str, term: &str) -> Vec<(DocId, u32)> {
        self.docs
            .iter()
            .filter_map(|(doc, fields)| {
                fields
                    .get(field)
                    .and_then(|vector| vector.terms.get(term))
                    .map(|entry| (*doc, entry.freq))
            })
            .collect()
    }

    pub fn collection_statistics(&self, field: &str) -> CollectionStatistics {
        let (doc_count, sum_total_term_freq) = self
            .docs
            .values()
            .filter_map(|fields| fields.get(field))
            .fold((0u64, 0u64), |(count, sum), vector| {
                (count + 1, sum + u64::from(vector.length))
            });

        CollectionStatistics::new(field, u64::from(self.max_doc), doc_count, sum_total_term_freq)
    }

    pub fn term_statistics(&self, field: &str, term: &str) -> TermStatistics {
        let (doc_freq, total_term_freq) = self
            .docs
            .values()
            .filter_map(|fields| fields.get(field).and_then(|v| v.terms.get(term)))
            .fold((0u64, 0u64), |(df, ttf), entry| (df + 1, ttf + u64::from(entry.freq)));

        TermStatistics::new(term, doc_freq, total_term_freq)
    }

    fn field_vector(&self, doc: DocId, field: &str) -> Option<&FieldVector> {
        self.docs.get(&doc).and_then(|fields| fields.get(field))
    }
}

impl PayloadLookup for MemorySegment {
    fn get_payload(&self, doc: DocId, term: &str, field: &str) -> LookupResult<Option<Vec<u8>>> {
        let vector = self
            .field_vector(doc, field)
            .ok_or_else(|| LookupError::NoTermVector {
                doc,
                field: field.to_string(),
            })?;

        let entry = vector
            .terms
            .get(term)
            .ok_or_else(|| LookupError::TermNotFound {
                doc,
                term: term.to_string(),
            })?;

        if entry.freq == 0 {
            return Err(LookupError::NoPostings {
                doc,
                term: term.to_string(),
            });
        }

        Ok(entry.payload.clone())
    }
}

impl SegmentReader for MemorySegment {
    fn max_doc(&self) -> DocId {
        self.max_doc
    }

    fn field_length(&self, doc: DocId, field: &str) -> Option<u32> {
        self.field_vector(doc, field).map(|vector| vector.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemorySegment {
        let mut segment = MemorySegment::new();
        segment
            .add_document(0, "web_kw", [Token::plain("auto"), Token::plain("motto")])
            .add_document(
                0,
                "web_kw",
                [
                    Token::stamped("java", EncodedTimestamp::new(428_195)),
                    Token::stamped("python", EncodedTimestamp::new(428_172)),
                ],
            )
            .add_document(
                3,
                "web_kw",
                [
                    Token::stamped("java", EncodedTimestamp::new(400_000)),
                    Token::stamped("java", EncodedTimestamp::new(428_000)),
                ],
            );
        segment
    }

    #[test]
    fn test_payload_of_first_occurrence() {
        let segment = sample();
        let payload = segment.get_payload(3, "java", "web_kw").unwrap().unwrap();
        assert_eq!(payload, encode_timestamp(EncodedTimestamp::new(400_000)).to_vec());
        assert_eq!(segment.term_freq(3, "web_kw", "java"), Some(2));
    }

    #[test]
    fn test_missing_data_errors() {
        let segment = sample();

        assert!(matches!(
            segment.get_payload(1, "java", "web_kw"),
            Err(LookupError::NoTermVector { doc: 1, .. })
        ));
        assert!(matches!(
            segment.get_payload(0, "rust", "web_kw"),
            Err(LookupError::TermNotFound { doc: 0, .. })
        ));
        assert_eq!(segment.get_payload(0, "auto", "web_kw"), Ok(None));
    }

    #[test]
    fn test_statistics() {
        let segment = sample();

        let collection = segment.collection_statistics("web_kw");
        assert_eq!(collection.max_doc, 4);
        assert_eq!(collection.doc_count, 2);
        assert_eq!(collection.sum_total_term_freq, 6);
        assert!((collection.avg_field_length() - 3.0).abs() < f32::EPSILON);

        let java = segment.term_statistics("web_kw", "java");
        assert_eq!(java.doc_freq, 2);
        assert_eq!(java.total_term_freq, 3);

        assert_eq!(segment.field_length(0, "web_kw"), Some(4));
        assert_eq!(segment.matching_docs("web_kw", "java"), vec![(0, 1), (3, 2)]);
    }

    #[test]
    fn test_fixture_roundtrip_through_json() {
        let json = r#"{
            "documents": [
                { "id": 2, "fields": { "title": [
                    { "term": "rust", "timestamp": 10 },
                    { "term": "odd", "payload": [1, 2] }
                ] } }
            ]
        }"#;
        let fixture: SegmentFixture = serde_json::from_str(json).unwrap();
        let segment = MemorySegment::from_fixture(fixture);

        assert_eq!(segment.len(), 1);
        assert_eq!(segment.max_doc(), 3);
        assert_eq!(
            segment.get_payload(2, "rust", "title").unwrap(),
            Some(vec![0, 0, 0, 10])
        );
        assert_eq!(
            segment.get_payload(2, "odd", "title").unwrap(),
            Some(vec![1, 2])
        );
    }

    #[test]
    fn test_load_fixture_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = MemorySegment::load_fixture(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
