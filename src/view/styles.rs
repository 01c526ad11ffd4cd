//! Chat styling configuration.
//!
//! Author names carry the colour the chat network assigned to them; everything else
//! uses the terminal default.

use crate::model::AuthorColor;
use crate::view_state::layout::Segment;
use ratatui::style::Style;

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag / `no_color` config key
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Explicit color setting.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Create a ColorConfig from the resolved flag and environment.
    ///
    /// Priority (first match wins):
    /// 1. `no_color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

// ===== ChatStyles =====

/// Styles for the cells of a laid-out record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatStyles {
    colors: ColorConfig,
    base: Style,
}

impl ChatStyles {
    /// Create styles honouring the color configuration.
    pub fn new(colors: ColorConfig) -> Self {
        Self {
            colors,
            base: Style::default(),
        }
    }

    /// Style for the author name.
    ///
    /// Falls back to the default style when colors are disabled or the author has no
    /// colour.
    pub fn author_style(&self, color: AuthorColor) -> Style {
        match color.as_color() {
            Some(fg) if self.colors.colors_enabled() => self.base.fg(fg),
            _ => self.base,
        }
    }

    /// Style for a cell of the given segment.
    pub fn style_for(&self, segment: Segment, color: AuthorColor) -> Style {
        match segment {
            Segment::Author => self.author_style(color),
            Segment::Separator | Segment::Body => self.base,
        }
    }
}

impl Default for ChatStyles {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

// ===== Tests =====
