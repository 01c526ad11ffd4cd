//! Record layout: mapping one record onto wrapped grid rows.
//!
//! A record renders as one logical character sequence, `author`, then [`SEPARATOR`], then
//! `body`, placed left to right and wrapped at the viewport width. Wrapping is per
//! character: words and even the separator may be split across rows.

use crate::model::Record;

/// Text between the author and the body.
pub const SEPARATOR: &str = ": ";

/// Which part of the record a character came from. Decides its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Author name, painted in the author colour.
    Author,
    /// The `": "` separator, default style.
    Separator,
    /// Message body, default style.
    Body,
}

/// One character assigned to a cell, relative to the record's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCell {
    /// Column within the row, `< width`.
    pub column: u16,
    /// Row within the record, `< rows`.
    pub row: usize,
    /// The character.
    pub symbol: char,
    /// Origin segment.
    pub segment: Segment,
}

/// Placement of one record at a given width.
///
/// # Invariants
/// - `rows == max(1, ceil(N / width))` where `N` is the logical character count
/// - `cells` are in row-major order and reading them back reproduces the logical
///   sequence exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    rows: usize,
    width: u16,
    cells: Vec<PlacedCell>,
}

impl RecordLayout {
    /// Number of grid rows the record occupies.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// All placed characters, row-major.
    pub fn cells(&self) -> &[PlacedCell] {
        &self.cells
    }

    /// Characters placed on `row`. Empty for rows past the end.
    pub fn row_cells(&self, row: usize) -> &[PlacedCell] {
        let width = usize::from(self.width);
        let start = row.saturating_mul(width).min(self.cells.len());
        let end = row.saturating_add(1).saturating_mul(width).min(self.cells.len());
        &self.cells[start..end]
    }
}

/// The logical character sequence of a record, tagged by segment.
pub fn logical_chars(record: &Record) -> impl Iterator<Item = (char, Segment)> + '_ {
    record
        .author()
        .chars()
        .map(|c| (c, Segment::Author))
        .chain(SEPARATOR.chars().map(|c| (c, Segment::Separator)))
        .chain(record.body().chars().map(|c| (c, Segment::Body)))
}

/// Number of characters in the logical sequence.
pub fn logical_len(record: &Record) -> usize {
    record.author().chars().count() + SEPARATOR.chars().count() + record.body().chars().count()
}

/// Rows a record needs at `width`, without placing characters.
///
/// A width of 0 violates the viewport contract; it is treated as 1.
pub fn row_count(record: &Record, width: u16) -> usize {
    debug_assert!(width > 0, "layout width must be positive");
    let width = usize::from(width.max(1));
    logical_len(record).div_ceil(width).max(1)
}

/// Lay out a record at `width`.
///
/// Pure: the same record and width always yield the same placement.
///
/// # Examples
///
/// ```
/// use tailchat::model::{AuthorColor, Record};
/// use tailchat::view_state::layout::layout;
///
/// let record = Record::new("bob", AuthorColor::Default, "hi there");
/// // "bob: hi there" is 13 characters.
/// assert_eq!(layout(&record, 10).rows(), 2);
/// ```
pub fn layout(record: &Record, width: u16) -> RecordLayout {
    debug_assert!(width > 0, "layout width must be positive");
    let width = width.max(1);

    let mut cells = Vec::with_capacity(logical_len(record));
    let mut column: u16 = 0;
    let mut row: usize = 0;
    for (symbol, segment) in logical_chars(record) {
        if column == width {
            column = 0;
            row += 1;
        }
        cells.push(PlacedCell {
            column,
            row,
            symbol,
            segment,
        });
        column += 1;
    }

    RecordLayout {
        rows: row + 1,
        width,
        cells,
    }
}
