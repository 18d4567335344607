//! # Alarm Model
//!
//! The immutable alarm value passed through the subsystem: an absolute
//! deadline plus the handler to invoke when it elapses. Entries are created
//! by the producer, carried through the inbound channel by value, and
//! destroyed when the scheduler pops and invokes them — never mutated in
//! place, never duplicated.

use crate::error::AlarmError;

/// Absolute time in whole seconds since the unix epoch, as kept by the
/// timekeeper and the RTC. Monotonic for the purposes of this subsystem.
pub type UnixTime = u32;

/// Callback invoked on the scheduler task's own stack when an alarm's
/// deadline elapses.
///
/// Handlers run at the scheduler task's priority, so they must be short
/// and non-blocking — the same contract the firmware applies to all
/// interrupt-adjacent callbacks. A returned error is logged and does not
/// affect other pending alarms.
pub type AlarmHandler = fn() -> Result<(), AlarmError>;

/// A single pending alarm: fire `handler` once `deadline` has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct AlarmEntry {
    /// Absolute deadline at which the alarm becomes due.
    pub deadline: UnixTime,

    /// Handler invoked exactly once when the alarm fires.
    pub handler: AlarmHandler,
}

impl AlarmEntry {
    /// Create a new alarm entry.
    ///
    /// # Errors
    /// Returns [`AlarmError::InvalidArgument`] for a zero deadline — the
    /// epoch value is reserved as "unprogrammed" by the RTC comparator
    /// convention and can never be a real request.
    pub fn new(deadline: UnixTime, handler: AlarmHandler) -> Result<Self, AlarmError> {
        if deadline == 0 {
            return Err(AlarmError::InvalidArgument);
        }
        Ok(Self { deadline, handler })
    }
}
