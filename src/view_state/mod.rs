//! View-state layer - geometry and record layout
//!
//! Pure functions that turn records and viewport dimensions into grid
//! placements. Nothing here touches the terminal.
//!
//! # Module Structure
//!
//! - `types`: ViewportDimensions
//! - `layout_params`: LayoutParams - wrap width and row budget
//! - `layout`: record layout engine (character wrapping)

pub mod layout;
pub mod layout_params;
pub mod types;
