//! Core view-state newtypes

use super::layout_params::LayoutParams;

/// Viewport dimensions in terminal cells.
///
/// Reported by the terminal backend and updated only on resize. A backend may
/// briefly report zero dimensions (e.g. while a window is being dragged); layout
/// goes through [`ViewportDimensions::layout_params`], which guards against that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportDimensions {
    /// Width in terminal columns.
    pub width: u16,
    /// Height in terminal rows.
    pub height: u16,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Layout constraints for this viewport.
    pub fn layout_params(self) -> LayoutParams {
        LayoutParams::new(self.width, self.height)
    }
}

impl From<ratatui::layout::Rect> for ViewportDimensions {
    fn from(area: ratatui::layout::Rect) -> Self {
        Self::new(area.width, area.height)
    }
}

impl From<ratatui::layout::Size> for ViewportDimensions {
    fn from(size: ratatui::layout::Size) -> Self {
        Self::new(size.width, size.height)
    }
}
