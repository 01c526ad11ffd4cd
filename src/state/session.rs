//! Session context shared by the record feed and the event loop.
//!
//! The session bundles the two pieces of mutable state the view depends on: the message
//! buffer (owns the records) and the scroll state (owns the offset). It is cloned into the
//! feed worker and kept by the event loop; both mutate state only through its methods.
//!
//! # Lock Order
//!
//! Every operation that needs both locks takes the scroll mutex first and the buffer lock
//! second. The feed's append therefore reads the offset, appends, and adjusts the offset
//! as one step with respect to wheel events, and a render pass sees an offset that
//! matches its snapshot.

use super::buffer::{BufferLimits, MessageBuffer, Snapshot};
use super::scroll::ScrollState;
use crate::model::Record;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared chat session state. Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct Session {
    buffer: MessageBuffer,
    scroll: Arc<Mutex<ScrollState>>,
}

impl Session {
    /// Create an empty, tracking session.
    pub fn new(limits: BufferLimits) -> Self {
        Self {
            buffer: MessageBuffer::new(limits),
            scroll: Arc::new(Mutex::new(ScrollState::new())),
        }
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &MessageBuffer {
        &self.buffer
    }

    /// Current scroll state (a copy).
    pub fn scroll(&self) -> ScrollState {
        *self.lock_scroll()
    }

    /// Append a freshly arrived record and let the scroll state follow it.
    ///
    /// Returns `true` when the visible content changed and a redraw is due: always while
    /// tracking, and when an eviction moved an anchored view. An anchored view that only
    /// shifted its offset shows the same records, so no redraw is requested.
    pub fn on_record(&self, record: Record) -> bool {
        let mut scroll = self.lock_scroll();
        let appended = self.buffer.append(record, scroll.offset());
        scroll.on_append(appended);
        scroll.is_tracking() || appended.evicted > 0
    }

    /// Scroll one record back in history.
    pub fn wheel_up(&self) {
        let mut scroll = self.lock_scroll();
        scroll.wheel_up(self.buffer.len());
    }

    /// Scroll one record toward the newest.
    pub fn wheel_down(&self) {
        let mut scroll = self.lock_scroll();
        scroll.wheel_down(self.buffer.len());
    }

    /// The viewport changed size; the offset is kept.
    pub fn on_resize(&self) {
        let mut scroll = self.lock_scroll();
        scroll.on_resize(self.buffer.len());
    }

    /// Consistent read view for one render pass.
    ///
    /// The offset is read under the scroll lock while the snapshot is taken, so the pair
    /// never straddles an append. The scroll lock is released before returning; the buffer
    /// read lock is held until the view is dropped. Don't call other session methods
    /// while a view is alive.
    pub fn view(&self) -> ChatView<'_> {
        let scroll = self.lock_scroll();
        let snapshot = self.buffer.snapshot();
        let offset = scroll.offset();
        drop(scroll);
        ChatView { snapshot, offset }
    }

    fn lock_scroll(&self) -> MutexGuard<'_, ScrollState> {
        self.scroll.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(BufferLimits::default())
    }
}

/// Snapshot plus the scroll offset it was taken with.
#[derive(Debug)]
pub struct ChatView<'a> {
    snapshot: Snapshot<'a>,
    offset: usize,
}

impl ChatView<'_> {
    /// Scroll offset at snapshot time.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The buffer snapshot.
    pub fn snapshot(&self) -> &Snapshot<'_> {
        &self.snapshot
    }

    /// The bottom-most visible record, if any.
    pub fn anchor(&self) -> Option<&Record> {
        self.snapshot.from_newest(self.offset)
    }

    /// Visible candidates, bottom row first.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.snapshot.walk_back(self.offset)
    }
}
