//! Logging configured through `recency::init`
//!
//! Kept in its own test binary: the global subscriber can only be installed
//! once per process.

use recency::config::{ConfigBuilder, LogFormat, LogLevel};
use recency::index::{MemorySegment, Token};
use recency::search::TermSetQuery;

#[test]
fn test_init_writes_configured_format_to_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs").join("recency.log");

    let mut config = ConfigBuilder::new()
        .with_step_policy()
        .with_log_level(LogLevel::Debug)
        .with_log_format(LogFormat::Json)
        .with_log_file(&log_path)
        .build()
        .unwrap();
    config.logging.stdout = false;

    let guard = recency::init(&config).unwrap();

    let similarity = recency::build_similarity(&config).unwrap();
    let mut segment = MemorySegment::new();
    segment.add_document(0, "web_kw", [Token::plain("java")]);
    TermSetQuery::new("web_kw", ["java"]).search(&similarity, &segment, 10);

    // flushes the non-blocking writer
    drop(guard);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(lines.iter().any(|line| {
        line["fields"]["message"] == "Term recency boosting configured"
            && line["fields"]["policy"] == "step"
    }));
    assert!(lines.iter().any(|line| line["level"] == "DEBUG"));
}

#[test]
fn test_init_rejects_invalid_config() {
    let mut config = ConfigBuilder::new().build().unwrap();
    config.boosting.decay = 2.0;
    assert!(recency::init(&config).is_err());
}
