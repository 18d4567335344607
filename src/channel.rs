//! # Inbound Event Channel
//!
//! The single entry point into the scheduler task. Producers (any task)
//! post `NewAlarm` requests into a bounded ring; the interrupt bridge posts
//! `Fired` by setting a dedicated latch. The consumer always sees a pending
//! `Fired` before any queued `NewAlarm`, which gives fire notifications the
//! "front of the queue" treatment without the ISR ever taking the ring
//! lock.
//!
//! Coalescing is deliberate: if the interrupt fires again before the task
//! has run, the second notification folds into the already-set latch. The
//! scheduler re-reads current time and queue state on every `Fired`, so a
//! coalesced (or even dropped) notification costs nothing but latency.
//!
//! Ring access is serialized with a [`critical_section::Mutex`]; on the
//! single-core flight target that is a brief interrupt-free window, on the
//! host it is backed by the `critical-section/std` implementation.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use arrayvec::ArrayVec;
use critical_section::Mutex;

use crate::alarm::AlarmEntry;
use crate::arch;
use crate::error::AlarmError;

/// Event consumed by the scheduler task.
#[derive(Debug, Clone, Copy)]
pub enum InboundEvent {
    /// A producer requests "run this at absolute time T".
    NewAlarm(AlarmEntry),

    /// The hardware alarm interrupt fired. Carries no payload: the
    /// scheduler re-reads time and queue state itself rather than trusting
    /// an interrupt-time snapshot.
    Fired,
}

/// Bounded inbound channel with a dedicated `Fired` latch.
///
/// `const`-constructible so it can live in a `static` shared between the
/// producers, the interrupt bridge, and the scheduler task.
pub struct EventChannel<const N: usize> {
    /// Dedicated high-priority slot for `Fired`. Written from interrupt
    /// context, so it bypasses the ring lock entirely.
    fired: AtomicBool,

    /// FIFO ring of pending `NewAlarm` requests.
    ring: Mutex<RefCell<ArrayVec<AlarmEntry, N>>>,
}

impl<const N: usize> EventChannel<N> {
    /// Create an empty channel.
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
            ring: Mutex::new(RefCell::new(ArrayVec::new_const())),
        }
    }

    /// Post a `NewAlarm` request. Callable from any task.
    ///
    /// # Errors
    /// [`AlarmError::ChannelFull`] if the ring is at capacity; the caller
    /// may retry. The channel is left unchanged.
    pub fn send(&self, entry: AlarmEntry) -> Result<(), AlarmError> {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            if ring.is_full() {
                return Err(AlarmError::ChannelFull);
            }
            ring.push(entry);
            Ok(())
        })?;
        arch::signal_event();
        Ok(())
    }

    /// Post a `Fired` notification. The only operation legal in interrupt
    /// context: a single atomic store plus a wakeup hint, no locking, no
    /// blocking. Never fails; repeated fires coalesce.
    pub fn send_fired_from_isr(&self) {
        self.fired.store(true, Ordering::Release);
        arch::signal_event();
    }

    /// Non-blocking receive. A pending `Fired` always wins over queued
    /// `NewAlarm` requests.
    pub fn try_recv(&self) -> Option<InboundEvent> {
        if self.fired.swap(false, Ordering::AcqRel) {
            return Some(InboundEvent::Fired);
        }
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            if ring.is_empty() {
                None
            } else {
                Some(InboundEvent::NewAlarm(ring.remove(0)))
            }
        })
    }

    /// Blocking receive: parks the calling task between events. This is the
    /// scheduler task's only suspension point.
    pub fn recv(&self) -> InboundEvent {
        loop {
            if let Some(event) = self.try_recv() {
                return event;
            }
            arch::wait_for_event();
        }
    }
}

impl<const N: usize> Default for EventChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
