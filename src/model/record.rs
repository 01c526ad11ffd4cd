//! Chat record - the immutable unit of the message stream.

use chrono::{DateTime, Utc};
use ratatui::style::Color;
use std::str::FromStr;

/// Foreground colour of an author's name.
///
/// Parsed leniently from the colour string the chat network attaches to each message.
/// Anything that doesn't name a colour falls back to the terminal default instead of
/// rejecting the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorColor {
    /// Terminal default foreground.
    #[default]
    Default,
    /// A specific colour.
    Color(Color),
}

impl AuthorColor {
    /// Parse a colour identifier.
    ///
    /// Accepts `#rrggbb`, named ANSI colours (`red`, `lightblue`, ...) and indexed colours
    /// (`42`). Empty or unrecognised input yields [`AuthorColor::Default`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ratatui::style::Color;
    /// use tailchat::model::AuthorColor;
    ///
    /// assert_eq!(AuthorColor::parse("#ff0000"), AuthorColor::Color(Color::Rgb(255, 0, 0)));
    /// assert_eq!(AuthorColor::parse(""), AuthorColor::Default);
    /// assert_eq!(AuthorColor::parse("not a colour"), AuthorColor::Default);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::Default;
        }
        match Color::from_str(raw) {
            Ok(Color::Reset) | Err(_) => Self::Default,
            Ok(color) => Self::Color(color),
        }
    }

    /// The colour to paint with, if any.
    pub fn as_color(self) -> Option<Color> {
        match self {
            Self::Default => None,
            Self::Color(color) => Some(color),
        }
    }
}

/// One attributed chat message.
///
/// Created by the record feed, never mutated afterwards. Arrival order is the position in
/// the message buffer, so the record itself only carries the arrival timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    author: String,
    author_color: AuthorColor,
    body: String,
    received_at: DateTime<Utc>,
}

impl Record {
    /// Create a record stamped with the current time.
    pub fn new(author: impl Into<String>, author_color: AuthorColor, body: impl Into<String>) -> Self {
        Self::received(author, author_color, body, Utc::now())
    }

    /// Create a record with an explicit arrival time.
    pub fn received(
        author: impl Into<String>,
        author_color: AuthorColor,
        body: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author: author.into(),
            author_color,
            body: body.into(),
            received_at,
        }
    }

    /// Display name of the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Colour used for the author name.
    pub fn author_color(&self) -> AuthorColor {
        self.author_color
    }

    /// Message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// When the feed delivered this record.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
