//! # Interrupt Bridge
//!
//! The only code in the subsystem allowed to run in interrupt context.
//! When the RTC alarm line asserts, the board-level interrupt dispatcher
//! calls [`InterruptBridge::on_alarm_interrupt`], which does exactly two
//! things: set the channel's `Fired` latch and request a deferred context
//! switch so the scheduler task runs as soon as the ISR unwinds.
//!
//! No queue manipulation, no register reprogramming, no handler invocation
//! happens here — all of that is deferred to the scheduler task. That keeps
//! interrupt latency bounded and the queue invariants safe from concurrent
//! mutation.

use crate::arch;
use crate::channel::EventChannel;

/// ISR-side handle on the inbound channel. Lives in a `static` next to the
/// channel so the board's interrupt table can reach it.
pub struct InterruptBridge<'a, const C: usize> {
    channel: &'a EventChannel<C>,
}

impl<'a, const C: usize> InterruptBridge<'a, C> {
    /// Bind the bridge to the scheduler's inbound channel.
    pub const fn new(channel: &'a EventChannel<C>) -> Self {
        Self { channel }
    }

    /// Alarm interrupt entry point. Non-blocking, constant-time: one
    /// atomic store and a wakeup request.
    ///
    /// The latch coalesces repeated fires; a coalesced (or missed)
    /// notification is recovered by the scheduler's time-based
    /// re-validation, so this path never needs to report failure.
    pub fn on_alarm_interrupt(&self) {
        self.channel.send_fired_from_isr();
        arch::request_context_switch();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
