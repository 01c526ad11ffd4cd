//! Bounded message buffer shared between the record feed and the renderer.
//!
//! Records are appended at the tail and evicted in fixed batches from the head. The whole
//! sequence sits behind one `RwLock`: append-plus-eviction is a single writer critical
//! section, render passes hold a read guard ([`Snapshot`]) for their full duration. A
//! reader therefore never observes a length/content combination that didn't exist at
//! some instant.

use crate::model::Record;
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Default maximum number of records retained.
pub const DEFAULT_CAPACITY: usize = 5000;

/// Default number of oldest records dropped per eviction.
pub const DEFAULT_EVICT_BATCH: usize = 50;

/// Default scroll offset at and beyond which eviction is deferred.
pub const DEFAULT_EVICT_GUARD: usize = 4900;

/// Capacity policy of a [`MessageBuffer`].
///
/// # Invariants
/// - `capacity >= 1`
/// - `1 <= evict_batch <= capacity`
///
/// Both are enforced by [`BufferLimits::new`], so an eviction always removes exactly
/// `evict_batch` records.
///
/// # Guard
/// A reader scrolled back to `evict_guard` or further defers eviction, so the buffer
/// may grow past `capacity`. An append that reaches [`BufferLimits::hard_limit`] evicts
/// regardless of the offset, so the length after any append stays below
/// `capacity + evict_batch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLimits {
    capacity: usize,
    evict_batch: usize,
    evict_guard: usize,
}

impl BufferLimits {
    /// Create limits, clamping values into their valid ranges.
    pub fn new(capacity: usize, evict_batch: usize, evict_guard: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            evict_batch: evict_batch.clamp(1, capacity),
            evict_guard,
        }
    }

    /// Length at which eviction is considered.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records removed per eviction.
    pub fn evict_batch(&self) -> usize {
        self.evict_batch
    }

    /// Offsets at or above this value defer eviction.
    pub fn evict_guard(&self) -> usize {
        self.evict_guard
    }

    /// Length at which an append evicts even while the reader is past the guard.
    pub fn hard_limit(&self) -> usize {
        self.capacity.saturating_add(self.evict_batch)
    }

    /// Whether an append that produced `len` records evicts while the reader sits at
    /// `offset`.
    pub fn should_evict(&self, len: usize, offset: usize) -> bool {
        len >= self.hard_limit() || (len >= self.capacity && offset < self.evict_guard)
    }
}

impl Default for BufferLimits {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_EVICT_BATCH, DEFAULT_EVICT_GUARD)
    }
}

/// Outcome of one [`MessageBuffer::append`].
///
/// Handed to `ScrollState::on_append` so the offset can follow the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appended {
    /// Buffer length after the append (and eviction, if any).
    pub len: usize,
    /// Number of records evicted from the head; `0` or `evict_batch`.
    pub evicted: usize,
}

/// Shared bounded record store.
///
/// Cloning yields another handle to the same records.
#[derive(Debug, Clone)]
pub struct MessageBuffer {
    records: Arc<RwLock<VecDeque<Arc<Record>>>>,
    limits: BufferLimits,
}

impl MessageBuffer {
    /// Create an empty buffer.
    pub fn new(limits: BufferLimits) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            limits,
        }
    }

    /// Capacity policy in effect.
    pub fn limits(&self) -> BufferLimits {
        self.limits
    }

    /// Append a record at the tail.
    ///
    /// `offset` is the reader's current scroll offset; it decides whether a full buffer
    /// may evict (see [`BufferLimits::should_evict`]). Append and eviction happen under one
    /// write lock.
    pub fn append(&self, record: Record, offset: usize) -> Appended {
        let mut records = self.write();
        records.push_back(Arc::new(record));

        let mut evicted = 0;
        if self.limits.should_evict(records.len(), offset) {
            evicted = self.limits.evict_batch;
            records.drain(..evicted);
            debug!(evicted, len = records.len(), offset, "Evicted oldest records");
        }

        Appended {
            len: records.len(),
            evicted,
        }
    }

    /// Take a consistent read view for one render pass.
    ///
    /// Appends block until the returned snapshot is dropped; keep it short-lived.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            records: self.read(),
        }
    }

    /// Current number of records.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no record has arrived (or all were evicted).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock can't leave the deque half-updated (push_back and
    // drain are the only writes), so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, VecDeque<Arc<Record>>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<Arc<Record>>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new(BufferLimits::default())
    }
}

/// Read-locked view of the buffer.
///
/// Indices are oldest-first (`0` is the oldest retained record). Offsets count back from
/// the newest record (`0` is the newest).
pub struct Snapshot<'a> {
    records: RwLockReadGuard<'a, VecDeque<Arc<Record>>>,
}

impl Snapshot<'_> {
    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at an oldest-first index.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index).map(Arc::as_ref)
    }

    /// Record `offset` positions back from the newest, i.e. index `len - 1 - offset`.
    pub fn from_newest(&self, offset: usize) -> Option<&Record> {
        let index = self.len().checked_sub(offset.checked_add(1)?)?;
        self.get(index)
    }

    /// Shared handle to the record at `index`, usable after the snapshot is dropped.
    pub fn get_shared(&self, index: usize) -> Option<Arc<Record>> {
        self.records.get(index).cloned()
    }

    /// Records from `offset` back toward the oldest: newest-first, starting at
    /// [`Snapshot::from_newest`]`(offset)`.
    pub fn walk_back(&self, offset: usize) -> impl Iterator<Item = &Record> + '_ {
        let start = self.len().saturating_sub(offset);
        self.records.range(..start).rev().map(Arc::as_ref)
    }
}

impl std::fmt::Debug for Snapshot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot").field("len", &self.len()).finish()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
