//! Layout constraints derived from the viewport.

/// Constraints the layout engine and renderer work within.
///
/// # Invariants
/// - `wrap_width >= 1`: a zero-width viewport would make every record need
///   infinitely many rows. Zero is clamped up rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    wrap_width: u16,
    row_budget: u16,
}

impl LayoutParams {
    /// Create layout params from a cell width and height.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            wrap_width: width.max(1),
            row_budget: height,
        }
    }

    /// Column at which characters wrap to the next row.
    pub fn wrap_width(&self) -> u16 {
        self.wrap_width
    }

    /// Rows available for painting records.
    pub fn row_budget(&self) -> u16 {
        self.row_budget
    }
}
