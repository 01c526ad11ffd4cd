//! JSON-lines parser for chat records.
//!
//! This module provides pure parsing functions for converting feed lines
//! into [`Record`] values. Each line is one JSON object:
//!
//! ```text
//! {"author": "bob", "color": "#1e90ff", "body": "hi there"}
//! ```

use crate::model::{AuthorColor, ParseError, Record};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw JSON structure for deserializing records.
///
/// Every field is optional on the wire; a message with no author or no
/// body still renders (as `": "` in the degenerate case).
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    author: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

/// Parse a single feed line into a record.
///
/// Blank lines (including a lone `\r` from CRLF input) are skipped and
/// yield `Ok(None)`. Records without a `timestamp` are stamped with
/// `received_at` instead.
///
/// # Errors
///
/// Returns `ParseError::InvalidJson` if the line isn't a JSON object of
/// the record shape.
pub fn parse_record(
    line: &str,
    line_number: usize,
    received_at: DateTime<Utc>,
) -> Result<Option<Record>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let raw: RawRecord = serde_json::from_str(line).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    let color = raw
        .color
        .as_deref()
        .map(AuthorColor::parse)
        .unwrap_or_default();

    Ok(Some(Record::received(
        raw.author,
        color,
        raw.body,
        raw.timestamp.unwrap_or(received_at),
    )))
}
