//! Structured logging infrastructure.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels and an optional log file.
//! `RUST_LOG`, when set, takes precedence over the configured level.

mod formatters;
#[cfg(test)]
mod tests;

pub use formatters::DevelopmentFormatter;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),

    /// General error
    Other(String),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Keeps the background file writer alive. Buffered lines are flushed when
/// this is dropped, so hold it for the lifetime of the program.
#[derive(Debug, Default)]
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the logging system with the given configuration.
///
/// Calling this when a global subscriber is already installed is a no-op.
pub fn init(config: &LoggingConfig) -> Result<LogGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LogGuard::default());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
    let (writer, guard) = make_writer(config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    match config.format {
        LogFormat::Json => builder.json().with_thread_ids(true).try_init()?,
        LogFormat::Compact => builder.compact().try_init()?,
        LogFormat::Pretty => builder.pretty().try_init()?,
        LogFormat::Dev => builder.event_format(DevelopmentFormatter).try_init()?,
        LogFormat::Default => builder.try_init()?,
    }

    Ok(LogGuard { _file: guard })
}

/// Writer for the configured destinations: the console (stderr takes
/// precedence over stdout), a file, or both.
fn make_writer(config: &LoggingConfig) -> Result<(BoxMakeWriter, Option<WorkerGuard>)> {
    let console = if config.stderr {
        Some(BoxMakeWriter::new(std::io::stderr))
    } else if config.stdout {
        Some(BoxMakeWriter::new(std::io::stdout))
    } else {
        None
    };

    match (console, &config.file) {
        (Some(console), Some(path)) => {
            let (file, guard) = create_non_blocking_file(path)?;
            Ok((BoxMakeWriter::new(console.and(file)), Some(guard)))
        }
        (None, Some(path)) => {
            let (file, guard) = create_non_blocking_file(path)?;
            Ok((BoxMakeWriter::new(file), Some(guard)))
        }
        (Some(console), None) => Ok((console, None)),
        (None, None) => Err(LogError::Other(
            "no log destination configured".to_string(),
        )),
    }
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    let file_name = path
        .file_name()
        .ok_or_else(|| LogError::Other(format!("log file has no name: {}", path.display())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
            LogError::Other(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for LogError {}
