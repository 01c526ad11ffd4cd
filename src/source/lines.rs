//! Line reading for the record feed.
//!
//! Provides LineReader, which turns any `BufRead` into numbered lines and, in follow
//! mode, treats end-of-file as "nothing yet" the way `tail -f` does.

use std::io::{self, BufRead};
use tracing::warn;

/// Result of one [`LineReader::next_line`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// A complete line without its terminator, with its 1-based line number.
    Line {
        /// 1-based position in the input.
        number: usize,
        /// Line content, `\n` / `\r\n` stripped. Invalid UTF-8 is replaced with
        /// U+FFFD.
        text: String,
    },
    /// Follow mode only: no complete line available yet, try again later.
    Pending,
    /// Input exhausted (never returned in follow mode).
    Eof,
}

/// Numbered line reader over any buffered input.
///
/// # Partial lines
/// A trailing line without a newline is held back while following, because the writer
/// may still be in the middle of it. Without follow it is returned as the last line.
///
/// Lines are decoded only once complete, so a multi-byte character split across reads
/// is never mangled.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    follow: bool,
    partial: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Read until end-of-file.
    pub fn new(reader: R) -> Self {
        Self::with_follow(reader, false)
    }

    /// Read and keep waiting for appended lines at end-of-file.
    pub fn following(reader: R) -> Self {
        Self::with_follow(reader, true)
    }

    fn with_follow(reader: R, follow: bool) -> Self {
        Self {
            reader,
            follow,
            partial: Vec::new(),
            line_number: 0,
        }
    }

    /// Whether end-of-file means "wait" rather than "done".
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Read the next line.
    ///
    /// Blocks only as long as the underlying reader blocks.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error. Undecodable bytes are not an error; see
    /// [`LineRead::Line`].
    pub fn next_line(&mut self) -> io::Result<LineRead> {
        let bytes_read = self.reader.read_until(b'\n', &mut self.partial)?;

        if self.partial.ends_with(b"\n") {
            return Ok(self.take_line());
        }

        if bytes_read == 0 || !self.partial.is_empty() {
            // At end-of-file, possibly with an unterminated line buffered.
            if self.follow {
                return Ok(LineRead::Pending);
            }
            if !self.partial.is_empty() {
                return Ok(self.take_line());
            }
            return Ok(LineRead::Eof);
        }

        Ok(LineRead::Pending)
    }

    fn take_line(&mut self) -> LineRead {
        self.line_number += 1;
        let mut bytes = std::mem::take(&mut self.partial);
        if bytes.ends_with(b"\n") {
            bytes.pop();
            if bytes.ends_with(b"\r") {
                bytes.pop();
            }
        }
        let text = String::from_utf8(bytes).unwrap_or_else(|e| {
            warn!(line = self.line_number, "Replaced invalid UTF-8 in feed line");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        });
        LineRead::Line {
            number: self.line_number,
            text,
        }
    }
}
