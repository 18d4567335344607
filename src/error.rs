//! # Error Taxonomy
//!
//! Every fallible operation in the crate returns [`AlarmError`]. Nothing in
//! this subsystem is fatal: a stuck alarm register is a degraded-service
//! condition, not a reboot condition. The scheduler task recovers all
//! variants locally except [`QueueFull`], [`ChannelFull`] and
//! [`InvalidArgument`], which are surfaced synchronously to the producer.
//!
//! [`QueueFull`]: AlarmError::QueueFull
//! [`ChannelFull`]: AlarmError::ChannelFull
//! [`InvalidArgument`]: AlarmError::InvalidArgument

use core::fmt;

/// Errors produced by the alarm scheduler subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmError {
    /// Insert rejected because the alarm queue is at capacity. The queue
    /// is left unchanged; existing alarms are never evicted to make room.
    QueueFull,

    /// Pop/peek on an empty alarm queue. In the `Fired` path this is a
    /// legitimate "nothing to do" signal, not an exceptional condition.
    QueueEmpty,

    /// The inbound event channel rejected a producer send. The caller may
    /// retry; `Fired` notifications are never subject to this.
    ChannelFull,

    /// Malformed request (e.g. a zero deadline, which the hardware
    /// comparator cannot represent).
    InvalidArgument,

    /// The alarm interrupt fired while current time was still before the
    /// earliest recorded deadline. Recovered automatically by re-arming;
    /// reported only for observability.
    HardwareSync,

    /// Communication with the RTC failed during an arm/disarm/clear.
    /// Execution continues in a degraded (un-rearmed) state until the next
    /// successful hardware mutation.
    Transport,

    /// An alarm handler reported a failure. Logged; never aborts the drain
    /// of remaining due alarms.
    Handler,
}

impl fmt::Display for AlarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AlarmError::QueueFull => "alarm queue full",
            AlarmError::QueueEmpty => "alarm queue empty",
            AlarmError::ChannelFull => "event channel full",
            AlarmError::InvalidArgument => "invalid argument",
            AlarmError::HardwareSync => "alarm fired before recorded deadline",
            AlarmError::Transport => "RTC transport failure",
            AlarmError::Handler => "alarm handler failed",
        };
        f.write_str(msg)
    }
}
