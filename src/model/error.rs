//! Error types for tailchat.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`], which `main` returns.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`InputError`] - Record feed could not be opened or read (file, stdin)
//!   - `ConfigError` / `LoggingError` - Startup failures
//!   - `TuiError` - Terminal setup or the running view failed
//! - [`ParseError`] - A feed line is not a valid record (non-fatal, logged by the feed)
//!
//! # Recovery Strategy
//!
//! Parse errors are **non-fatal**: the offending line is logged and skipped so the view
//! keeps running on the records it has. Input errors at startup and terminal errors are
//! fatal. An input error *after* the feed is running ends the session without being
//! reported as a failure.
//!
//! The buffer, layout and scroll components have no error type at all: every operation is
//! total over its valid inputs and clamps instead of failing.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use tailchat::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _input = open_feed()?;
///     Ok(())
/// }
/// # fn open_feed() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to open or read the record feed.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// The configuration file exists but is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal initialization or rendering failed.
    ///
    /// Without a working terminal the view cannot function. The terminal is restored
    /// before the error is printed.
    #[error("TUI error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

/// Errors encountered when opening or reading the record feed.
///
/// # Recovery Patterns
///
/// - **FileNotFound**: Display error and exit (user provided invalid path)
/// - **NoInput**: Display usage - user must provide a file path or pipe stdin
/// - **Io**: Startup: display and exit. While running: end the session quietly
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified feed file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tailchat::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No feed was provided: stdin is an interactive terminal and no file was given.
    ///
    /// Reading records from a TTY would block the view waiting for the user to type
    /// JSON, which is never what was intended.
    ///
    /// # Examples
    ///
    /// ```
    /// use tailchat::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("file path or pipe records to stdin"));
    /// ```
    #[error("No input source: provide a file path or pipe records to stdin")]
    NoInput,

    /// Generic I/O error reading from the feed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing a feed line into a record.
///
/// All variants carry the 1-based line number of the feed so the log file points at the
/// exact input that was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not syntactically valid JSON, or not a JSON object of the record shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use tailchat::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "expected value at line 1 column 1".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number within the feed.
        line: usize,
        /// Message from `serde_json`.
        message: String,
    },
}
