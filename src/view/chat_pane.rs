//! Chat pane widget: paints a snapshot bottom-up.

use crate::state::ChatView;
use crate::view::styles::ChatStyles;
use crate::view_state::layout::layout;
use crate::view_state::types::ViewportDimensions;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Clear, Widget},
};

// ===== ChatPane Widget =====

/// Renders the records of a [`ChatView`] so the record at the view's offset sits on the
/// bottom row and older records stack above it.
///
/// Each record is wrapped at the area width. A record that doesn't fit in the rows left
/// above is clipped at the top: its bottom rows are shown. Rows above the oldest
/// visible record stay blank.
pub struct ChatPane<'a, 's> {
    view: &'a ChatView<'s>,
    styles: ChatStyles,
}

impl<'a, 's> ChatPane<'a, 's> {
    /// Create a pane over `view`.
    pub fn new(view: &'a ChatView<'s>, styles: ChatStyles) -> Self {
        Self { view, styles }
    }
}

impl Widget for ChatPane<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        Clear.render(area, buf);
        let params = ViewportDimensions::from(area).layout_params();

        // Rows still free above everything painted so far.
        let mut remaining = params.row_budget();
        for record in self.view.records() {
            if remaining == 0 {
                break;
            }

            let placed = layout(record, params.wrap_width());
            let rows = placed.rows();
            let top = remaining.saturating_sub(u16::try_from(rows).unwrap_or(u16::MAX));
            let first_visible = rows - usize::from(remaining - top);

            for (row, y) in (first_visible..rows).zip(area.y + top..) {
                for cell in placed.row_cells(row) {
                    let style = self.styles.style_for(cell.segment, record.author_color());
                    buf[(area.x + cell.column, y)]
                        .set_char(cell.symbol)
                        .set_style(style);
                }
            }

            remaining = top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthorColor, Record};
    use crate::state::{BufferLimits, Session};
    use crate::view::styles::ColorConfig;
    use ratatui::style::Color;

    fn session(records: &[(&str, &str)]) -> Session {
        let session = Session::new(BufferLimits::default());
        for (author, body) in records {
            session.on_record(Record::new(*author, AuthorColor::Default, *body));
        }
        session
    }

    fn render(session: &Session, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let view = session.view();
        ChatPane::new(&view, ChatStyles::new(ColorConfig::new(false))).render(area, &mut buf);
        buf
    }

    #[test]
    fn newest_record_sits_on_bottom_row() {
        let session = session(&[("bob", "hi there")]);

        let buf = render(&session, 10, 3);

        assert_eq!(
            buf,
            Buffer::with_lines(["          ", "bob: hi th", "ere       "])
        );
    }

    #[test]
    fn older_records_stack_upward() {
        let session = session(&[("a", "1"), ("b", "2"), ("c", "3")]);

        let buf = render(&session, 6, 4);

        assert_eq!(
            buf,
            Buffer::with_lines(["      ", "a: 1  ", "b: 2  ", "c: 3  "])
        );
    }

    #[test]
    fn record_above_the_top_is_clipped_to_its_bottom_rows() {
        let session = session(&[("a", "1"), ("bob", "hi there")]);

        let buf = render(&session, 10, 1);

        assert_eq!(buf, Buffer::with_lines(["ere       "]));
    }

    #[test]
    fn partially_visible_older_record_shows_its_tail() {
        // "carol: abcdefgh" = 15 chars, 3 rows at width 6; only the last row fits.
        let session = session(&[("carol", "abcdefgh"), ("d", "xy")]);

        let buf = render(&session, 6, 2);

        assert_eq!(buf, Buffer::with_lines(["fgh   ", "d: xy "]));
    }

    #[test]
    fn record_with_more_rows_than_u16_shows_its_last_rows() {
        let body = format!("{}xyz", "-".repeat(70_000));
        let session = session(&[("a", body.as_str())]);

        let buf = render(&session, 1, 3);

        assert_eq!(buf, Buffer::with_lines(["x", "y", "z"]));
    }

    #[test]
    fn area_ending_on_the_last_addressable_row() {
        let session = session(&[("a", "1"), ("b", "2")]);
        let area = Rect::new(0, u16::MAX - 2, 4, 2);
        assert_eq!(area.bottom(), u16::MAX);
        let mut buf = Buffer::empty(area);

        let view = session.view();
        ChatPane::new(&view, ChatStyles::new(ColorConfig::new(false))).render(area, &mut buf);

        let row = |y: u16| (0..4).map(|x| buf[(x, y)].symbol()).collect::<String>();
        assert_eq!(row(u16::MAX - 2), "a: 1");
        assert_eq!(row(u16::MAX - 1), "b: 2");
    }

    #[test]
    fn offset_moves_the_anchor_up_from_the_newest() {
        let session = session(&[("a", "1"), ("b", "2"), ("c", "3")]);
        session.wheel_up();

        let buf = render(&session, 6, 3);

        assert_eq!(buf, Buffer::with_lines(["      ", "a: 1  ", "b: 2  "]));
    }

    #[test]
    fn offset_at_length_renders_blank() {
        let session = session(&[("a", "1"), ("b", "2")]);
        session.wheel_up();
        session.wheel_up();

        let buf = render(&session, 6, 2);

        assert_eq!(buf, Buffer::with_lines(["      ", "      "]));
    }

    #[test]
    fn empty_buffer_renders_blank() {
        let buf = render(&Session::default(), 4, 2);
        assert_eq!(buf, Buffer::with_lines(["    ", "    "]));
    }

    #[test]
    fn stale_content_is_cleared() {
        let session = session(&[("a", "1")]);
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::with_lines(["xxxxxx", "xxxxxx"]);

        let view = session.view();
        ChatPane::new(&view, ChatStyles::new(ColorConfig::new(false))).render(area, &mut buf);

        assert_eq!(buf, Buffer::with_lines(["      ", "a: 1  "]));
    }

    #[test]
    fn renders_inside_an_offset_area() {
        let session = session(&[("a", "1")]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 3));
        let area = Rect::new(2, 1, 5, 2);

        let view = session.view();
        ChatPane::new(&view, ChatStyles::new(ColorConfig::new(false))).render(area, &mut buf);

        assert_eq!(
            buf,
            Buffer::with_lines(["        ", "        ", "  a: 1  "])
        );
    }

    #[test]
    fn author_cells_use_author_colour() {
        let session = Session::default();
        session.on_record(Record::new("al", AuthorColor::Color(Color::Red), "hey"));
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);

        let view = session.view();
        ChatPane::new(&view, ChatStyles::new(ColorConfig::new(true))).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].fg, Color::Red);
        assert_eq!(buf[(1, 0)].fg, Color::Red);
        assert_eq!(buf[(2, 0)].fg, Color::Reset, "separator uses default style");
        assert_eq!(buf[(4, 0)].fg, Color::Reset, "body uses default style");
    }

    #[test]
    fn zero_sized_area_is_a_no_op() {
        let session = session(&[("a", "1")]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        let view = session.view();

        ChatPane::new(&view, ChatStyles::default()).render(Rect::new(0, 0, 0, 0), &mut buf);

        assert_eq!(buf, Buffer::with_lines(["    "]));
    }
}
