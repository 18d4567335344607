//! # Scheduler Task
//!
//! The single consumer of the inbound event channel. One iteration of the
//! loop has two phases: **idle/wait** (blocked in [`EventChannel::recv`],
//! the task's only suspension point) and **process** (one
//! [`AlarmScheduler::handle_event`] call). There is no separate
//! armed/disarmed state variable — arming status is always derivable from
//! the queue length.
//!
//! Producers never touch the task directly; they go through
//! [`enqueue_alarm`], which validates the request and posts it on the
//! channel.

use crate::alarm::{AlarmEntry, AlarmHandler, UnixTime};
use crate::channel::EventChannel;
use crate::error::AlarmError;
use crate::rtc::RtcDriver;
use crate::scheduler::AlarmScheduler;

/// The alarm scheduler's consumer task.
///
/// `Q` is the alarm queue capacity, `C` the inbound channel length
/// (normally [`config::ALARM_QUEUE_CAPACITY`] and
/// [`config::EVENT_CHANNEL_LENGTH`]).
///
/// [`config::ALARM_QUEUE_CAPACITY`]: crate::config::ALARM_QUEUE_CAPACITY
/// [`config::EVENT_CHANNEL_LENGTH`]: crate::config::EVENT_CHANNEL_LENGTH
pub struct SchedulerTask<'a, R: RtcDriver, const Q: usize, const C: usize> {
    channel: &'a EventChannel<C>,
    scheduler: AlarmScheduler<R, Q>,
}

impl<'a, R: RtcDriver, const Q: usize, const C: usize> SchedulerTask<'a, R, Q, C> {
    /// Bind the task to its inbound channel and take ownership of the RTC
    /// driver handle. From here on, nothing else may touch the alarm
    /// registers.
    pub fn new(channel: &'a EventChannel<C>, rtc: R) -> Self {
        Self {
            channel,
            scheduler: AlarmScheduler::new(rtc),
        }
    }

    /// Run the consumer loop forever. This is the task entry point on the
    /// flight target.
    pub fn run(mut self) -> ! {
        log::debug!("alarm scheduler task started");
        loop {
            let event = self.channel.recv();
            self.scheduler.handle_event(event);
        }
    }

    /// Process at most one pending event without blocking.
    ///
    /// # Returns
    /// `true` if an event was processed, `false` if the channel was idle.
    /// Lets a host harness or a cooperative superloop drive the scheduler.
    pub fn poll(&mut self) -> bool {
        match self.channel.try_recv() {
            Some(event) => {
                self.scheduler.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Borrow the scheduler state (introspection/telemetry).
    pub fn scheduler(&self) -> &AlarmScheduler<R, Q> {
        &self.scheduler
    }
}

/// Request "run `handler` at absolute time `deadline`". Callable from any
/// task.
///
/// The request travels through the inbound channel and is inserted into
/// the deadline-ordered queue by the scheduler task, which reprograms the
/// hardware comparator if the new alarm became the earliest.
///
/// # Errors
/// - [`AlarmError::InvalidArgument`] — zero deadline.
/// - [`AlarmError::ChannelFull`] — the inbound channel is momentarily
///   full; the caller may retry.
///
/// A full *alarm queue* is detected later, on the scheduler task, and is
/// logged there (the request is dropped without disturbing existing
/// alarms).
pub fn enqueue_alarm<const C: usize>(
    channel: &EventChannel<C>,
    deadline: UnixTime,
    handler: AlarmHandler,
) -> Result<(), AlarmError> {
    let entry = AlarmEntry::new(deadline, handler)?;
    channel.send(entry)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtc::TransportError;

    struct FixedRtc {
        now: UnixTime,
        armed: Option<UnixTime>,
    }

    impl RtcDriver for FixedRtc {
        fn read_current_time(&mut self) -> Result<UnixTime, TransportError> {
            Ok(self.now)
        }
        fn program_alarm_register(&mut self, deadline: UnixTime) -> Result<(), TransportError> {
            self.armed = Some(deadline);
            Ok(())
        }
        fn clear_alarm_flag(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
        fn enable_alarm_interrupt(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
        fn disable_alarm_interrupt(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn noop() -> Result<(), AlarmError> {
        Ok(())
    }

    #[test]
    fn poll_drives_requests_from_channel_to_queue() {
        let channel = EventChannel::<8>::new();
        let mut task = SchedulerTask::<_, 8, 8>::new(
            &channel,
            FixedRtc {
                now: 0,
                armed: None,
            },
        );

        enqueue_alarm(&channel, 100, noop).unwrap();
        enqueue_alarm(&channel, 50, noop).unwrap();
        enqueue_alarm(&channel, 75, noop).unwrap();

        while task.poll() {}

        assert_eq!(task.scheduler().pending(), 3);
        assert_eq!(task.scheduler().hardware().rtc().armed, Some(50));
        assert!(!task.poll());
    }

    #[test]
    fn enqueue_rejects_zero_deadline() {
        let channel = EventChannel::<2>::new();
        assert_eq!(
            enqueue_alarm(&channel, 0, noop),
            Err(AlarmError::InvalidArgument)
        );
        assert!(channel.try_recv().is_none());
    }

    #[test]
    fn enqueue_surfaces_channel_full() {
        let channel = EventChannel::<1>::new();
        enqueue_alarm(&channel, 10, noop).unwrap();
        assert_eq!(
            enqueue_alarm(&channel, 20, noop),
            Err(AlarmError::ChannelFull)
        );
    }
}
