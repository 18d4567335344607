//! # Architecture Abstraction Layer
//!
//! Target-specific wakeup and context-switch primitives. Currently
//! implements the Cortex-M flight target; a spin-hint fallback keeps the
//! crate buildable and testable on the host.

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod cortex_m;
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub use cortex_m::{request_context_switch, signal_event, wait_for_event};

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
mod host;
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
pub use host::{request_context_switch, signal_event, wait_for_event};
