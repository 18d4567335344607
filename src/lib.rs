//! # obc-alarm — deadline-ordered RTC alarm scheduler
//!
//! Firmware core of the spacecraft on-board computer's alarm service: many
//! producers request "run this at absolute time T", execution is guaranteed
//! in time order, and the whole thing is multiplexed onto a single
//! hardware alarm register that can hold only one deadline at a time.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │   Producers (telemetry, command manager, payload, …)       │
//! │                  enqueue_alarm(deadline, handler)          │
//! ├───────────────────────────────────────────────────────────┤
//! │   EventChannel (channel.rs)                                │
//! │     NewAlarm ring  ·  dedicated Fired latch                │
//! ├──────────────────────────────┬────────────────────────────┤
//! │  SchedulerTask (task.rs)     │  InterruptBridge (bridge.rs)│
//! │    recv → handle_event       │    RTC alarm ISR:          │
//! │                              │    post Fired · wake       │
//! ├──────────────────────────────┴────────────────────────────┤
//! │  AlarmScheduler (scheduler.rs)                             │
//! │    AlarmQueue (queue.rs) · HardwareAlarm (hardware.rs)    │
//! ├───────────────────────────────────────────────────────────┤
//! │  RtcDriver (rtc.rs) — DS3232-class RTC over the I2C bus   │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data flow
//!
//! A producer posts `NewAlarm` on the channel. The scheduler task performs
//! an ordered insert into the fixed-capacity queue; if the new entry became
//! the earliest, the hardware comparator is reprogrammed to its deadline.
//! When the comparator fires, the interrupt bridge posts `Fired` and the
//! task drains every due entry in deadline order, invoking each handler
//! exactly once, then re-arms the comparator for the new earliest entry
//! (or disarms it when the queue empties).
//!
//! ## Ownership discipline
//!
//! The alarm queue and the hardware register have exactly one owner — the
//! scheduler task. Producers and the interrupt bridge interact with it
//! only through the inbound channel, so the queue needs no locking and the
//! register has no ISR-vs-task race. The channel itself is the sole shared
//! touchpoint: a critical-section-guarded ring for producers plus an
//! atomic latch for the ISR.
//!
//! ## Memory model
//!
//! - **No heap**: all state is statically sized
//! - **No `alloc`**: pure `core` (plus `std` in tests only)
//! - **Fixed-size queue**: capacity set in `config.rs`
//! - **Bounded channel**: producers get `ChannelFull`, never a stall

#![cfg_attr(not(test), no_std)]

pub mod alarm;
pub mod arch;
pub mod bridge;
pub mod channel;
pub mod config;
pub mod error;
pub mod hardware;
pub mod queue;
pub mod rtc;
pub mod scheduler;
pub mod task;

pub use alarm::{AlarmEntry, AlarmHandler, UnixTime};
pub use bridge::InterruptBridge;
pub use channel::{EventChannel, InboundEvent};
pub use error::AlarmError;
pub use hardware::HardwareAlarm;
pub use queue::AlarmQueue;
pub use rtc::{RtcDriver, TransportError};
pub use scheduler::AlarmScheduler;
pub use task::{enqueue_alarm, SchedulerTask};

/// Inbound channel sized per [`config::EVENT_CHANNEL_LENGTH`].
pub type DefaultEventChannel = EventChannel<{ config::EVENT_CHANNEL_LENGTH }>;

/// Scheduler sized per [`config::ALARM_QUEUE_CAPACITY`].
pub type DefaultAlarmScheduler<R> = AlarmScheduler<R, { config::ALARM_QUEUE_CAPACITY }>;
