//! Record input sources.
//!
//! This module provides the producer side of the chat view:
//! - [`InputSource`]: where records come from (piped stdin or a file, optionally followed)
//! - [`LineReader`]: numbered line reading with `tail -f` semantics
//! - [`Feed`]: the background worker that turns lines into records

use crate::model::error::InputError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::PathBuf;

pub mod feed;
pub mod lines;

pub use feed::{Feed, FeedEnd, FeedEvent, RecordSink, SessionSink, FOLLOW_INTERVAL, STOP_POLL_INTERVAL};
pub use lines::{LineRead, LineReader};

/// Reader type produced by [`InputSource::open`].
pub type SourceReader = LineReader<Box<dyn BufRead + Send>>;

/// Where the record feed reads from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Piped stdin. Live until the writer closes the pipe.
    Stdin,
    /// A file on disk.
    File {
        /// Path to the JSONL file.
        path: PathBuf,
        /// Keep reading appended lines after end-of-file.
        follow: bool,
    },
}

impl InputSource {
    /// Whether more records may arrive after the current end of input.
    ///
    /// # Behavior:
    /// - File: only when followed
    /// - Stdin: always (EOF is only known once the pipe closes)
    pub fn is_live(&self) -> bool {
        match self {
            InputSource::Stdin => true,
            InputSource::File { follow, .. } => *follow,
        }
    }

    /// Open the source for line reading.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file vanished since detection and
    /// `InputError::Io` for other open failures.
    pub fn open(&self) -> Result<SourceReader, InputError> {
        match self {
            InputSource::Stdin => Ok(LineReader::new(Box::new(BufReader::new(io::stdin())))),
            InputSource::File { path, follow } => {
                let file = File::open(path).map_err(|e| match e.kind() {
                    io::ErrorKind::NotFound => InputError::FileNotFound { path: path.clone() },
                    _ => InputError::Io(e),
                })?;
                let reader: Box<dyn BufRead + Send> = Box::new(BufReader::new(file));
                Ok(if *follow {
                    LineReader::following(reader)
                } else {
                    LineReader::new(reader)
                })
            }
        }
    }
}

/// Detect the input source.
///
/// # Logic:
/// 1. If a file path is provided: it must exist; `follow` applies to it
/// 2. If stdin is piped: use stdin (`follow` is implied by the pipe)
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>, follow: bool) -> Result<InputSource, InputError> {
    match file {
        Some(path) if !path.exists() => Err(InputError::FileNotFound { path }),
        Some(path) => Ok(InputSource::File { path, follow }),
        None if io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
