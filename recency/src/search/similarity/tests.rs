use super::*;
use crate::index::{LookupError, LookupResult, MemorySegment, PayloadLookup, Token};
use crate::payload::encode_timestamp;
use crate::recency::FixedClock;
use crate::search::{DecayFunction, DecayParameters};
use chrono::TimeDelta;

const FIELD: &str = "web_kw";

/// Hour 428196 since the Unix epoch, 2018-11-06T12:00:00Z.
const NOW_HOURS: i32 = 428_196;

fn now() -> DateTime<Utc> {
    crate::recency::UNIX_EPOCH + TimeDelta::hours(i64::from(NOW_HOURS))
}

fn stamped(term: &str, hours_ago: i32) -> Token {
    Token::stamped(term, EncodedTimestamp::new(NOW_HOURS - hours_ago))
}

/// Base similarity scoring `freq * value`, independent of statistics.
#[derive(Debug, Clone, Copy)]
struct ConstantSimilarity(f32);

struct ConstantScorer(f32);

impl SimScorer for ConstantScorer {
    fn score(&self, _doc: DocId, freq: f32) -> f32 {
        self.0 * freq
    }

    fn explain(&self, doc: DocId, freq: f32) -> Explanation {
        Explanation::match_value(self.score(doc, freq), "constant base score")
    }
}

impl Similarity for ConstantSimilarity {
    type Weight = ();

    fn compute_weight(&self, _: &CollectionStatistics, _: &[TermStatistics]) -> Self::Weight {}

    fn sim_scorer<'a>(&'a self, _: &'a (), _: &'a dyn SegmentReader) -> Box<dyn SimScorer + 'a> {
        Box::new(ConstantScorer(self.0))
    }
}

mockall::mock! {
    Segment {}

    impl PayloadLookup for Segment {
        fn get_payload(&self, doc: DocId, term: &str, field: &str) -> LookupResult<Option<Vec<u8>>>;
    }

    impl SegmentReader for Segment {
        fn max_doc(&self) -> DocId;
        fn field_length(&self, doc: DocId, field: &str) -> Option<u32>;
    }
}

fn linear() -> BoostPolicy {
    BoostPolicy::decay(DecayParameters::new(DecayFunction::Linear, 24.0, 0.5, 1.0).unwrap())
}

fn similarity(base: f32, policy: BoostPolicy) -> RecencySimilarity<ConstantSimilarity> {
    RecencySimilarity::new(ConstantSimilarity(base), policy, crate::recency::UNIX_EPOCH)
        .with_clock(Arc::new(FixedClock(now())))
}

fn weight<S: Similarity>(similarity: &S, terms: &[&str]) -> S::Weight {
    let stats: Vec<_> = terms.iter().map(|t| TermStatistics::new(*t, 1, 1)).collect();
    similarity.compute_weight(&CollectionStatistics::new(FIELD, 10, 10, 10), &stats)
}

fn segment() -> MemorySegment {
    let mut segment = MemorySegment::new();
    segment
        .add_document(0, FIELD, [Token::plain("java"), Token::plain("auto")])
        .add_document(1, FIELD, [stamped("java", 1), stamped("python", 24)])
        .add_document(2, FIELD, [stamped("java", 100)])
        .add_document(3, FIELD, [stamped("java", -5)])
        .add_document(4, FIELD, [Token::raw("java", vec![0x01])]);
    segment
}

#[test]
fn test_missing_timestamps_leave_base_score_untouched() {
    let segment = segment();
    for policy in [BoostPolicy::step(), linear()] {
        let similarity = similarity(2.5, policy);
        let weight = weight(&similarity, &["java", "auto"]);
        let scorer = similarity.sim_scorer(&weight, &segment);

        // no payload, no term vector, truncated payload
        assert_eq!(scorer.score(0, 1.0), 2.5);
        assert_eq!(scorer.score(9, 1.0), 2.5);
        assert_eq!(scorer.score(4, 1.0), 2.5);
    }
}

#[test]
fn test_most_recent_term_wins() {
    let segment = segment();
    let similarity = similarity(1.0, BoostPolicy::step());
    let weight = weight(&similarity, &["java", "python"]);
    let scorer = similarity.sim_scorer(&weight, &segment);

    // java 1h ago beats python 24h ago: tier (0, 4]
    assert_eq!(scorer.score(1, 1.0), 10.0);
    assert_eq!(
        scorer.explain(1, 1.0).find("termRecency").map(|e| e.value),
        Some(1.0)
    );

    // python alone falls into tier (4, 24]
    let weight = self::weight(&similarity, &["python"]);
    let scorer = similarity.sim_scorer(&weight, &segment);
    assert_eq!(scorer.score(1, 1.0), 5.0);
}

#[test]
fn test_decay_policy_composes_one_plus_boost() {
    let segment = segment();
    let similarity = similarity(2.0, linear());
    let weight = weight(&similarity, &["java"]);
    let scorer = similarity.sim_scorer(&weight, &segment);

    // linear, scale 24, decay 0.5: curve(1) = (48 - 1) / 48
    let expected = 2.0 * (1.0 + 47.0 / 48.0) as f32;
    assert!((scorer.score(1, 1.0) - expected).abs() < 1e-6);

    // fully decayed at 100h
    assert_eq!(scorer.score(2, 1.0), 2.0);

    // future timestamp is neutral
    assert_eq!(scorer.score(3, 1.0), 2.0);
}

#[test]
fn test_boosted_score_never_below_base() {
    let segment = segment();
    for policy in [BoostPolicy::step(), linear()] {
        let similarity = similarity(3.0, policy);
        let weight = weight(&similarity, &["java", "python"]);
        let scorer = similarity.sim_scorer(&weight, &segment);
        for doc in 0..5 {
            assert!(scorer.score(doc, 1.0) >= 3.0, "doc {doc}");
        }
    }
}

#[test]
fn test_explain_matches_score() {
    let segment = segment();
    for policy in [BoostPolicy::step(), linear()] {
        let similarity = similarity(1.5, policy);
        let weight = weight(&similarity, &["java", "python"]);
        let scorer = similarity.sim_scorer(&weight, &segment);

        for doc in 0..5 {
            let explanation = scorer.explain(doc, 2.0);
            assert_eq!(explanation.value, scorer.score(doc, 2.0));
            assert_eq!(explanation, scorer.explain(doc, 2.0));
            assert_eq!(explanation.description, format!("score(doc={doc},freq=2), product of:"));
            assert_eq!(explanation.details[0].value, 3.0);
        }
    }
}

#[test]
fn test_explain_without_timestamp() {
    let segment = segment();
    let similarity = similarity(1.0, linear());
    let weight = weight(&similarity, &["java"]);
    let scorer = similarity.sim_scorer(&weight, &segment);

    let explanation = scorer.explain(0, 1.0);
    assert_eq!(explanation.find("termTimestamp").map(|e| e.value), Some(0.0));
    assert!(explanation.find("termRecency,").is_none());
    assert_eq!(explanation.find("recency boost").map(|e| e.value), Some(1.0));
}

#[test]
fn test_explain_with_timestamp() {
    let segment = segment();
    let similarity = similarity(1.0, linear());
    let weight = weight(&similarity, &["java"]);
    let scorer = similarity.sim_scorer(&weight, &segment);

    let explanation = scorer.explain(1, 1.0);
    assert_eq!(
        explanation.find("termTimestamp").map(|e| e.value),
        Some((NOW_HOURS - 1) as f32)
    );
    assert_eq!(explanation.find("termRecency,").map(|e| e.value), Some(1.0));
    assert!(explanation.find("recencyScore").is_some());
    assert!(explanation.find("recency boost (decay(linear))").is_some());
}

#[test]
fn test_storage_errors_degrade_to_base_score() {
    let mut segment = MockSegment::new();
    segment
        .expect_get_payload()
        .returning(|_, _, _| Err(LookupError::Storage("disk on fire".to_string())));

    let similarity = similarity(4.0, BoostPolicy::step());
    let weight = weight(&similarity, &["java"]);
    let scorer = similarity.sim_scorer(&weight, &segment);

    assert_eq!(scorer.score(0, 1.0), 4.0);
}

#[test]
fn test_reads_every_term_of_the_match_set() {
    let mut segment = MockSegment::new();
    segment
        .expect_get_payload()
        .withf(|doc, _, field| *doc == 7 && field == FIELD)
        .times(3)
        .returning(|_, term, _| match term {
            "b" => Ok(Some(encode_timestamp(EncodedTimestamp::new(NOW_HOURS - 30)).to_vec())),
            "c" => Ok(Some(encode_timestamp(EncodedTimestamp::new(NOW_HOURS - 60)).to_vec())),
            _ => Ok(None),
        });

    let similarity = similarity(1.0, BoostPolicy::step());
    let weight = weight(&similarity, &["a", "b", "c"]);
    let scorer = similarity.sim_scorer(&weight, &segment);

    assert_eq!(scorer.score(7, 1.0), 3.0);
}

#[test]
fn test_invalid_base_scores_are_sanitized() {
    let segment = segment();
    for base in [f32::NAN, -1.0] {
        let similarity = similarity(base, BoostPolicy::step());
        let weight = weight(&similarity, &["java"]);
        let scorer = similarity.sim_scorer(&weight, &segment);

        assert_eq!(scorer.score(1, 1.0), 0.0);
        assert_eq!(scorer.explain(1, 1.0).value, 0.0);
    }

    let similarity = similarity(f32::INFINITY, BoostPolicy::step());
    let weight = weight(&similarity, &["java"]);
    let scorer = similarity.sim_scorer(&weight, &segment);
    assert_eq!(scorer.score(1, 1.0), f32::MAX);
}

#[test]
fn test_overflowing_boost_saturates_instead_of_zeroing() {
    let segment = segment();
    let huge_weight =
        BoostPolicy::decay(DecayParameters::new(DecayFunction::Linear, 24.0, 0.5, 1e39).unwrap());

    let cases = [(1.0, huge_weight), (1e38, BoostPolicy::step())];
    for (base, policy) in cases {
        let similarity = similarity(base, policy);
        let weight = weight(&similarity, &["java"]);
        let scorer = similarity.sim_scorer(&weight, &segment);

        // doc 1 was stamped an hour ago, doc 0 carries no timestamp
        let fresh = scorer.score(1, 1.0);
        let unboosted = scorer.score(0, 1.0);
        assert_eq!(fresh, f32::MAX);
        assert_eq!(unboosted, base);
        assert!(fresh >= unboosted);
        assert_eq!(scorer.explain(1, 1.0).value, fresh);
    }
}

#[test]
fn test_weight_keeps_field_and_terms() {
    let similarity = similarity(1.0, BoostPolicy::step());
    let weight = weight(&similarity, &["java", "python"]);
    assert_eq!(weight.field(), FIELD);
    assert_eq!(weight.terms(), ["java".to_string(), "python".to_string()]);
}

#[test]
fn test_from_config() {
    let config = crate::config::BoostingConfig::default();
    let similarity = RecencySimilarity::from_config(ConstantSimilarity(1.0), &config).unwrap();
    assert_eq!(similarity.policy().name(), "decay(linear)");
    assert_eq!(similarity.calculator().reference_epoch(), crate::recency::UNIX_EPOCH);

    let config = crate::config::BoostingConfig {
        scale: -1.0,
        ..Default::default()
    };
    assert!(RecencySimilarity::from_config(ConstantSimilarity(1.0), &config).is_err());
}
