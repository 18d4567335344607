//! # Real-Time-Clock Driver Interface
//!
//! The narrow surface the scheduler consumes from the RTC driver. The chip
//! behind it (a DS3232-class device on the I2C bus) exposes a one-slot
//! alarm comparator, a latched alarm flag, and an interrupt enable bit; the
//! byte-level register protocol is the driver's business, not ours.
//!
//! Every operation can fail because it rides on a fallible bus transaction.
//! Such failures surface as [`TransportError`] and are mapped to
//! [`AlarmError::Transport`](crate::error::AlarmError::Transport) at the
//! adapter boundary — logged, never fatal.

use crate::alarm::UnixTime;

/// Bus-level failure talking to the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportError;

/// Abstract RTC driver as seen by the alarm scheduler.
///
/// Implemented by the real DS3232 driver on flight hardware and by a
/// scripted mock in tests. The implementor owns the register protocol;
/// the scheduler only ever calls these six operations, and only ever from
/// task context.
pub trait RtcDriver {
    /// Read the current time from the timekeeper.
    fn read_current_time(&mut self) -> Result<UnixTime, TransportError>;

    /// Write `deadline` into the one-slot alarm comparator.
    fn program_alarm_register(&mut self, deadline: UnixTime) -> Result<(), TransportError>;

    /// Clear the latched "alarm fired" condition. Until this is done the
    /// interrupt line stays asserted and the comparator will not
    /// re-trigger.
    fn clear_alarm_flag(&mut self) -> Result<(), TransportError>;

    /// Enable the alarm interrupt output.
    fn enable_alarm_interrupt(&mut self) -> Result<(), TransportError>;

    /// Disable the alarm interrupt output.
    fn disable_alarm_interrupt(&mut self) -> Result<(), TransportError>;
}
