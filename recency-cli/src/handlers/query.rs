//! Search and explain over a fixture segment

use crate::args::{ExplainArgs, SearchArgs};
use crate::context::CliContext;
use crate::output::{print_explanation, print_hits};
use recency::RecencyError;
use recency::index::MemorySegment;
use recency::search::{Explanation, TermSetQuery};
use serde::Serialize;
use std::collections::HashMap;

/// One ranked document, optionally with its unboosted BM25 score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitRow {
    pub doc: u32,
    pub score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_score: Option<f32>,
}

pub fn search_hits(args: &SearchArgs, context: &CliContext) -> recency::Result<Vec<HitRow>> {
    let boosting = args.policy.apply(&context.config.boosting)?;
    let similarity = context.similarity(&boosting)?;
    let segment = MemorySegment::load_fixture(&args.fixture)?;
    let query = TermSetQuery::new(args.field.as_str(), args.terms.iter().map(String::as_str));

    let base_scores: HashMap<u32, f32> = if args.compare {
        query
            .search(similarity.base(), &segment, usize::MAX)
            .into_iter()
            .map(|hit| (hit.doc, hit.score))
            .collect()
    } else {
        HashMap::new()
    };

    let rows = query
        .search(&similarity, &segment, args.limit)
        .into_iter()
        .map(|hit| HitRow {
            doc: hit.doc,
            score: hit.score,
            base_score: base_scores.get(&hit.doc).copied(),
        })
        .collect();

    Ok(rows)
}

pub fn explain_doc(args: &ExplainArgs, context: &CliContext) -> recency::Result<Explanation> {
    let boosting = args.policy.apply(&context.config.boosting)?;
    let similarity = context.similarity(&boosting)?;
    let segment = MemorySegment::load_fixture(&args.fixture)?;
    let query = TermSetQuery::new(args.field.as_str(), args.terms.iter().map(String::as_str));

    query.explain(&similarity, &segment, args.doc).ok_or_else(|| {
        RecencyError::Other(format!(
            "Document {} does not match any of the query terms in '{}'",
            args.doc, args.field
        ))
    })
}

pub fn handle_search_command(
    args: SearchArgs,
    context: &CliContext,
    output_format: &str,
) -> recency::Result<()> {
    let rows = search_hits(&args, context)?;

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_hits(&rows);
    }

    Ok(())
}

pub fn handle_explain_command(
    args: ExplainArgs,
    context: &CliContext,
    output_format: &str,
) -> recency::Result<()> {
    let explanation = explain_doc(&args, context)?;

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
    } else {
        print_explanation(&explanation);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::PolicyArgs;
    use chrono::{TimeZone, Utc};
    use recency::config::{PolicyKind, RecencyConfig};
    use std::path::PathBuf;

    fn fixture() -> PathBuf {
        PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../recency/tests/fixtures/web_kw_segment.json"
        ))
    }

    fn context() -> CliContext {
        CliContext::with_config(
            RecencyConfig::default(),
            Utc.with_ymd_and_hms(2018, 11, 6, 12, 0, 0).unwrap(),
        )
    }

    fn step() -> PolicyArgs {
        PolicyArgs {
            policy: Some(PolicyKind::Step),
            ..PolicyArgs::default()
        }
    }

    #[test]
    fn test_search_compares_with_base_score() {
        let args = SearchArgs {
            fixture: fixture(),
            terms: vec!["java".to_string()],
            field: "web_kw".to_string(),
            limit: 2,
            compare: true,
            policy: step(),
        };
        let rows = search_hits(&args, &context()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].doc, 0);
        let base = rows[0].base_score.unwrap();
        assert!((rows[0].score - 10.0 * base).abs() < 1e-5);
        assert_eq!(rows[1].base_score, Some(rows[1].score));
    }

    #[test]
    fn test_explain_unmatched_document() {
        let args = ExplainArgs {
            fixture: fixture(),
            doc: 1,
            terms: vec!["rust".to_string()],
            field: "web_kw".to_string(),
            policy: PolicyArgs::default(),
        };
        assert!(explain_doc(&args, &context()).is_err());
    }

    #[test]
    fn test_explain_reports_policy() {
        let args = ExplainArgs {
            fixture: fixture(),
            doc: 0,
            terms: vec!["java".to_string()],
            field: "web_kw".to_string(),
            policy: step(),
        };
        let explanation = explain_doc(&args, &context()).unwrap();
        assert!(explanation.find("recency boost (step)").is_some());
    }
}
