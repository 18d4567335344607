//! # Alarm Queue
//!
//! Fixed-capacity, deadline-ordered container. This is the only place the
//! ordering invariants live:
//!
//! - `len() <= N` always;
//! - entries are ascending-sorted by deadline, equal deadlines in
//!   insertion order.
//!
//! Insert and pop shift a suffix of the backing array, so both are O(n).
//! That is deliberate: for the small bounded `N` used on this class of
//! device, a linear shift is simpler to verify for absence of corruption
//! than a binary heap and has fully deterministic worst-case timing.
//!
//! The queue is exclusively owned by the scheduler task. No other component
//! reads or writes it, which is why it needs no interior locking.

use arrayvec::ArrayVec;

use crate::alarm::AlarmEntry;
use crate::error::AlarmError;

/// Deadline-ordered alarm storage with capacity `N`.
pub struct AlarmQueue<const N: usize> {
    entries: ArrayVec<AlarmEntry, N>,
}

impl<const N: usize> AlarmQueue<N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            entries: ArrayVec::new_const(),
        }
    }

    /// Insert an alarm at its deadline-ordered position.
    ///
    /// Scans past every entry with `deadline <= entry.deadline`, so an
    /// alarm with the same deadline as an existing one lands *after* it —
    /// equal deadlines fire in insertion order.
    ///
    /// # Returns
    /// - `Ok(index)` — the position the entry landed at. `index == 0` means
    ///   the new entry is now the earliest and the caller must reprogram
    ///   the hardware comparator.
    /// - `Err(AlarmError::QueueFull)` — the queue is at capacity and is
    ///   left unchanged.
    pub fn insert(&mut self, entry: AlarmEntry) -> Result<usize, AlarmError> {
        if self.entries.is_full() {
            return Err(AlarmError::QueueFull);
        }

        let index = self
            .entries
            .iter()
            .position(|e| entry.deadline < e.deadline)
            .unwrap_or(self.entries.len());

        self.entries.insert(index, entry);
        Ok(index)
    }

    /// Borrow the earliest alarm without removing it.
    pub fn peek_earliest(&self) -> Result<&AlarmEntry, AlarmError> {
        self.entries.first().ok_or(AlarmError::QueueEmpty)
    }

    /// Remove and return the earliest alarm.
    pub fn pop_earliest(&mut self) -> Result<AlarmEntry, AlarmError> {
        if self.entries.is_empty() {
            return Err(AlarmError::QueueEmpty);
        }
        Ok(self.entries.remove(0))
    }

    /// Number of pending alarms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no alarms are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Fixed capacity `N`.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Iterate over pending alarms in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &AlarmEntry> {
        self.entries.iter()
    }
}

impl<const N: usize> Default for AlarmQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
