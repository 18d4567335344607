//! # Cortex-M Port Layer
//!
//! Wakeup and deferred-context-switch primitives for the ARM Cortex-M
//! flight target.
//!
//! The scheduler task parks with WFE rather than a busy loop; producers and
//! the interrupt bridge wake it with SEV. The event register semantics make
//! the pairing race-free: an SEV issued between the channel check and the
//! WFE leaves the event register set, so the WFE falls straight through.

/// Park the current task until an event is signaled.
#[inline]
pub fn wait_for_event() {
    ::cortex_m::asm::wfe();
}

/// Wake any task parked in [`wait_for_event`]. Safe from interrupt context.
#[inline]
pub fn signal_event() {
    ::cortex_m::asm::sev();
}

/// Request a deferred context switch so a higher-priority task unblocked by
/// the interrupt bridge runs as soon as the ISR returns.
///
/// Sets the PENDSVSET bit in the Interrupt Control and State Register;
/// PendSV runs at the lowest priority, so the switch happens only once no
/// other ISR is active.
#[inline]
pub fn request_context_switch() {
    // ICSR address: 0xE000_ED04, PENDSVSET = bit 28
    const ICSR: *mut u32 = 0xE000_ED04 as *mut u32;
    unsafe {
        core::ptr::write_volatile(ICSR, 1 << 28);
    }
}
