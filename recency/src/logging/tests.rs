use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{DevelopmentFormatter, LogError, level_to_log_level, parse_log_level};
use std::io::Write;
use std::sync::{Arc, Mutex, Once};

// Use this to ensure init is only called once across all tests
static INIT: Once = Once::new();

/// In-memory writer shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_init_console_logging() {
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            file: None,
            stdout: true,
            stderr: false,
        };

        assert!(crate::logging::init(&config).is_ok());
        // a second call leaves the installed subscriber alone
        assert!(crate::logging::init(&config).is_ok());
    });
}

#[test]
fn test_init_without_destination_fails() {
    let config = LoggingConfig {
        stdout: false,
        file: None,
        ..Default::default()
    };
    // init short-circuits once a global subscriber exists
    assert!(matches!(
        super::make_writer(&config),
        Err(LogError::Other(_))
    ));
}

#[test]
fn test_file_writer_creates_directories() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_path = temp_dir.path().join("nested").join("recency.log");

    let config = LoggingConfig {
        stdout: false,
        file: Some(log_path.clone()),
        ..Default::default()
    };
    let (_writer, guard) = super::make_writer(&config).unwrap();

    assert!(guard.is_some());
    assert!(log_path.parent().unwrap().exists());
}

#[test]
fn test_stderr_takes_the_console() {
    let config = LoggingConfig {
        stdout: false,
        stderr: true,
        ..Default::default()
    };
    let (_writer, guard) = super::make_writer(&config).unwrap();
    assert!(guard.is_none());
}

#[test]
fn test_development_formatter() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .event_format(DevelopmentFormatter)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!(doc = 3, term = "java", "No term timestamp recorded");
    });

    let output = captured.contents();
    assert!(output.contains("DEBUG"));
    assert!(output.contains("recency::logging::tests"));
    assert!(output.contains("doc=3"));
    assert!(output.contains("No term timestamp recorded"));
    assert!(output.ends_with('\n'));
}

#[test]
fn test_level_conversion() {
    assert_eq!(parse_log_level("trace").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level("DEBUG").unwrap(), LogLevel::Debug);
    assert!(parse_log_level("info").is_ok());
    assert!(parse_log_level("warn").is_ok());
    assert!(parse_log_level("error").is_ok());
    assert!(matches!(
        parse_log_level("invalid"),
        Err(LogError::InvalidLogLevel(_))
    ));

    assert_eq!(level_to_log_level(tracing::Level::TRACE), LogLevel::Trace);
    assert_eq!(level_to_log_level(tracing::Level::DEBUG), LogLevel::Debug);
    assert_eq!(level_to_log_level(tracing::Level::INFO), LogLevel::Info);
    assert_eq!(level_to_log_level(tracing::Level::WARN), LogLevel::Warn);
    assert_eq!(level_to_log_level(tracing::Level::ERROR), LogLevel::Error);
}
