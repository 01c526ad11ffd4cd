//! Tracing subscriber initialization.
//!
//! The chat view owns the terminal, so logs go to a file instead. Watch them with
//! `tail -f` in a separate terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log path into the directory to create and the file name to append to.
///
/// A bare file name logs into the current directory.
fn split_log_path(log_path: &Path) -> Result<(PathBuf, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, file_name))
}

/// Build the file subscriber without installing it.
///
/// Creates the log directory if it doesn't exist. Respects `RUST_LOG`, defaulting to
/// [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns `LoggingError` if the path has no file name or the directory can't be created.
pub fn file_subscriber(log_path: &Path) -> Result<impl Subscriber + Send + Sync, LoggingError> {
    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&directory, file_name);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    Ok(tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .finish())
}

/// Initialize the global tracing subscriber with file-based logging.
///
/// # Errors
///
/// Returns `LoggingError` if the subscriber was already initialized or
/// [`file_subscriber`] fails.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let subscriber = file_subscriber(log_path)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tailchat_test_logs_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn split_log_path_separates_directory_and_file() {
        let (dir, file) = split_log_path(Path::new("/var/log/tailchat/chat.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/tailchat"));
        assert_eq!(file, "chat.log");
    }

    #[test]
    fn split_log_path_bare_file_uses_current_directory() {
        let (dir, file) = split_log_path(Path::new("chat.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, "chat.log");
    }

    #[test]
    fn split_log_path_rejects_paths_without_file_name() {
        assert!(matches!(
            split_log_path(Path::new("/")),
            Err(LoggingError::InvalidPath(_))
        ));
        assert!(matches!(
            split_log_path(Path::new("logs/..")),
            Err(LoggingError::InvalidPath(_))
        ));
    }

    #[test]
    fn file_subscriber_creates_log_directory_if_missing() {
        let dir = test_dir("create");
        let log_file = dir.join("nested").join("test.log");

        let _subscriber = file_subscriber(&log_file).unwrap();

        assert!(log_file.parent().unwrap().exists(), "Log directory should be created");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    #[serial(rust_log_env)]
    fn file_subscriber_writes_events_to_file() {
        let dir = test_dir("write");
        let log_file = dir.join("app.log");
        let subscriber = file_subscriber(&log_file).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(line = 3, "skipping unparseable record");
        });

        let contents = fs::read_to_string(&log_file).unwrap();
        let _ = fs::remove_dir_all(&dir);
        assert!(contents.contains("skipping unparseable record"), "got: {contents}");
        assert!(contents.contains("line=3"), "got: {contents}");
        assert!(!contents.contains('\u{1b}'), "log file must not contain ANSI escapes");
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let dir = test_dir("init");
        let log_file = dir.join("init.log");

        // The first call may already fail if another test installed a global subscriber.
        let _ = init(&log_file);
        let second = init(&log_file);

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
        let _ = fs::remove_dir_all(&dir);
    }
}
