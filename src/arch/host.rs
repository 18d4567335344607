//! Host fallback: no interrupt machinery, so parking degrades to a spin
//! hint and wake/switch requests are no-ops. Only exercised by tests and
//! host-side tooling.

#[inline]
pub fn wait_for_event() {
    core::hint::spin_loop();
}

#[inline]
pub fn signal_event() {}

#[inline]
pub fn request_context_switch() {}
