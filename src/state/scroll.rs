//! Scroll offset state machine.
//!
//! The offset counts records back from the newest one. `0` means *tracking*: the newest
//! record sits on the bottom row and each arrival advances the view. Any positive offset
//! means *anchored*: the record at `len - 1 - offset` is the bottom-most visible record,
//! and arrivals must not move it.

use super::buffer::Appended;

/// Scroll offset into the message buffer.
///
/// # Invariants
/// - `offset <= len` of the buffer after every transition. Each transition takes the
///   buffer length it should clamp against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    offset: usize,
}

/// The two behavioural regimes of a [`ScrollState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// `offset == 0`: follow the newest record.
    Tracking,
    /// `offset > 0`: hold a historical record at the bottom of the view.
    Anchored,
}

impl ScrollState {
    /// Start in tracking mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current regime.
    pub fn mode(&self) -> ScrollMode {
        if self.offset == 0 {
            ScrollMode::Tracking
        } else {
            ScrollMode::Anchored
        }
    }

    /// Whether the view follows the newest record.
    pub fn is_tracking(&self) -> bool {
        self.mode() == ScrollMode::Tracking
    }

    /// Wheel up: one record further back, never past the oldest record.
    pub fn wheel_up(&mut self, len: usize) {
        self.offset = self.offset.saturating_add(1).min(len);
    }

    /// Wheel down: one record toward the newest, stopping at tracking.
    pub fn wheel_down(&mut self, len: usize) {
        self.offset = self.offset.saturating_sub(1).min(len);
    }

    /// Follow the buffer after an append.
    ///
    /// Anchored views shift by one so the same record stays at the bottom. An eviction then
    /// pulls the offset back by the evicted count. The result is clamped to the new length.
    pub fn on_append(&mut self, appended: Appended) {
        if self.offset > 0 {
            self.offset = self.offset.saturating_add(1);
        }
        self.offset = self.offset.saturating_sub(appended.evicted).min(appended.len);
    }

    /// A resize re-lays out against the same offset; only the length clamp applies.
    pub fn on_resize(&mut self, len: usize) {
        self.offset = self.offset.min(len);
    }
}
