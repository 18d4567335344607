//! # Configuration
//!
//! Compile-time constants governing the alarm scheduler. All limits are
//! fixed at compile time — no dynamic allocation.

/// Maximum number of pending alarms. This bounds the static alarm queue
/// array. Sized to match the number of time-tagged commands the ground
/// segment is allowed to have in flight at once.
pub const ALARM_QUEUE_CAPACITY: usize = 24;

/// Length of the inbound event channel ring (`NewAlarm` requests).
/// `Fired` notifications do not consume ring slots — they have a
/// dedicated latch — so the ring only has to absorb producer bursts.
pub const EVENT_CHANNEL_LENGTH: usize = 16;

/// Clock-skew tolerance for the premature-fire check, in seconds.
///
/// The RTC alarm comparator and the locally-kept unix time are updated by
/// different code paths, so the alarm interrupt can be observed while local
/// time still lags the programmed deadline by a second or two. A fire is
/// only treated as premature when `now + PREMATURE_FIRE_TOLERANCE` is still
/// before the earliest recorded deadline.
pub const PREMATURE_FIRE_TOLERANCE: u32 = 2;
