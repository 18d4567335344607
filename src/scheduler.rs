//! # Alarm Scheduler
//!
//! Sole owner and mutator of the alarm queue and sole caller into the
//! hardware alarm adapter. Constructed once at startup and driven
//! exclusively by [`InboundEvent`]s from the channel; no other component
//! holds a reference to its internals, which is why the queue needs no
//! locking at all.
//!
//! ## Event handling
//!
//! On `NewAlarm`: ordered insert; if the entry landed at index 0 it is now
//! the earliest, so the hardware comparator is reprogrammed to it.
//!
//! On `Fired`: acknowledge the latched flag, then re-validate against the
//! clock before touching the queue. The interrupt alone is never taken as
//! proof that a deadline elapsed — if current time (plus the clock-skew
//! tolerance) is still before the earliest recorded deadline, nothing is
//! popped and the comparator is simply re-armed. Otherwise every entry due
//! at or before the observed current time is popped and its handler
//! invoked, in deadline order, batching whatever backlog accumulated while
//! the task was waiting to run. After the drain the comparator is re-armed
//! to the new earliest entry, or disarmed if the queue emptied.
//!
//! ## Failure semantics
//!
//! A failing handler is logged and never aborts the drain — one bad
//! handler must not starve subsequent deadlines. A hardware transport
//! failure is logged and the task returns to idle in a degraded,
//! un-rearmed state; the next insert that becomes the earliest will
//! reprogram the comparator and self-correct.

use crate::alarm::{AlarmEntry, UnixTime};
use crate::channel::InboundEvent;
use crate::config::PREMATURE_FIRE_TOLERANCE;
use crate::error::AlarmError;
use crate::hardware::HardwareAlarm;
use crate::queue::AlarmQueue;
use crate::rtc::RtcDriver;

/// Deadline-ordered alarm scheduler with queue capacity `N`.
pub struct AlarmScheduler<R: RtcDriver, const N: usize> {
    queue: AlarmQueue<N>,
    hw: HardwareAlarm<R>,
}

impl<R: RtcDriver, const N: usize> AlarmScheduler<R, N> {
    /// Create a scheduler around the RTC driver handle. The queue starts
    /// empty and the hardware is left untouched until the first insert.
    pub fn new(rtc: R) -> Self {
        Self {
            queue: AlarmQueue::new(),
            hw: HardwareAlarm::new(rtc),
        }
    }

    /// Dispatch one inbound event. Called from the scheduler task loop.
    pub fn handle_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::NewAlarm(entry) => {
                if let Err(err) = self.on_new_alarm(entry) {
                    log::warn!("rejected alarm for t={}: {err}", entry.deadline);
                }
            }
            InboundEvent::Fired => self.on_fired(),
        }
    }

    /// Insert a new alarm; reprogram the comparator if it became the
    /// earliest.
    ///
    /// # Errors
    /// [`AlarmError::QueueFull`] if the queue is at capacity. The queue is
    /// unchanged and no hardware access happens.
    pub fn on_new_alarm(&mut self, entry: AlarmEntry) -> Result<(), AlarmError> {
        let index = self.queue.insert(entry)?;

        if index == 0 {
            // New earliest: the comparator must track it. A transport
            // failure here leaves the old (later or unarmed) deadline in
            // hardware; degraded but recoverable, so don't fail the insert.
            if let Err(err) = self.hw.arm_at(entry.deadline) {
                log::warn!("arm for t={} failed: {err}", entry.deadline);
            }
        }

        Ok(())
    }

    /// Handle a fire notification from the interrupt bridge.
    pub fn on_fired(&mut self) {
        if let Err(err) = self.hw.clear_fired_flag() {
            // The flag may still be latched; the queue state below remains
            // authoritative either way.
            log::warn!("clear of alarm flag failed: {err}");
        }

        let earliest = match self.queue.peek_earliest() {
            Ok(entry) => *entry,
            Err(_) => {
                // Spurious notification with no work to do.
                log::debug!("alarm fired with empty queue");
                return;
            }
        };

        let now = match self.hw.current_time() {
            Ok(now) => now,
            Err(err) => {
                log::warn!("time read after fire failed: {err}");
                return;
            }
        };

        if now.saturating_add(PREMATURE_FIRE_TOLERANCE) < earliest.deadline {
            // Fired early (clock/latency skew). Nothing is due: leave the
            // queue alone and re-arm to the recorded deadline.
            log::warn!(
                "{}: now={now}, earliest={}",
                AlarmError::HardwareSync,
                earliest.deadline
            );
            if let Err(err) = self.hw.arm_at(earliest.deadline) {
                log::warn!("re-arm for t={} failed: {err}", earliest.deadline);
            }
            return;
        }

        self.drain_due(now);

        match self.queue.peek_earliest() {
            Ok(next) => {
                if let Err(err) = self.hw.arm_at(next.deadline) {
                    log::warn!("re-arm for t={} failed: {err}", next.deadline);
                }
            }
            Err(_) => {
                if let Err(err) = self.hw.disarm() {
                    log::warn!("disarm failed: {err}");
                }
            }
        }
    }

    /// Pop and invoke every entry due at or before `threshold`, in
    /// deadline order.
    fn drain_due(&mut self, threshold: UnixTime) {
        while self
            .queue
            .peek_earliest()
            .map_or(false, |e| e.deadline <= threshold)
        {
            let Ok(entry) = self.queue.pop_earliest() else {
                break;
            };
            if let Err(err) = (entry.handler)() {
                log::error!("handler for t={} failed: {err}", entry.deadline);
            }
        }
    }

    /// Number of pending alarms.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Access the hardware adapter (test introspection).
    pub fn hardware(&self) -> &HardwareAlarm<R> {
        &self.hw
    }

    #[cfg(test)]
    pub(crate) fn hardware_mut(&mut self) -> &mut HardwareAlarm<R> {
        &mut self.hw
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::UnixTime;
    use crate::rtc::TransportError;
    use std::sync::Mutex;

    /// Scripted RTC: fixed current time, records every register access.
    struct MockRtc {
        now: UnixTime,
        armed: Option<UnixTime>,
        interrupt_enabled: bool,
        flag_clears: u32,
        disarms: u32,
        fail_bus: bool,
    }

    impl MockRtc {
        fn at(now: UnixTime) -> Self {
            Self {
                now,
                armed: None,
                interrupt_enabled: false,
                flag_clears: 0,
                disarms: 0,
                fail_bus: false,
            }
        }
    }

    impl RtcDriver for MockRtc {
        fn read_current_time(&mut self) -> Result<UnixTime, TransportError> {
            Ok(self.now)
        }

        fn program_alarm_register(&mut self, deadline: UnixTime) -> Result<(), TransportError> {
            if self.fail_bus {
                return Err(TransportError);
            }
            self.armed = Some(deadline);
            Ok(())
        }

        fn clear_alarm_flag(&mut self) -> Result<(), TransportError> {
            if self.fail_bus {
                return Err(TransportError);
            }
            self.flag_clears += 1;
            Ok(())
        }

        fn enable_alarm_interrupt(&mut self) -> Result<(), TransportError> {
            if self.fail_bus {
                return Err(TransportError);
            }
            self.interrupt_enabled = true;
            Ok(())
        }

        fn disable_alarm_interrupt(&mut self) -> Result<(), TransportError> {
            if self.fail_bus {
                return Err(TransportError);
            }
            self.interrupt_enabled = false;
            self.disarms += 1;
            Ok(())
        }
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn noop() -> Result<(), AlarmError> {
        Ok(())
    }

    fn entry(deadline: UnixTime) -> AlarmEntry {
        AlarmEntry {
            deadline,
            handler: noop,
        }
    }

    fn rtc_of<const N: usize>(s: &AlarmScheduler<MockRtc, N>) -> &MockRtc {
        s.hardware().rtc()
    }

    // Handlers are fn pointers and cannot capture, so each test that needs
    // to observe firing order gets its own static log (tests run on
    // parallel threads).
    static SCENARIO_C_LOG: Mutex<Vec<u32>> = Mutex::new(Vec::new());
    static FAILING_LOG: Mutex<Vec<u32>> = Mutex::new(Vec::new());
    static TIE_LOG: Mutex<Vec<u32>> = Mutex::new(Vec::new());

    fn c_log_50() -> Result<(), AlarmError> {
        SCENARIO_C_LOG.lock().unwrap().push(50);
        Ok(())
    }

    fn c_log_75() -> Result<(), AlarmError> {
        SCENARIO_C_LOG.lock().unwrap().push(75);
        Ok(())
    }

    fn failing_50() -> Result<(), AlarmError> {
        FAILING_LOG.lock().unwrap().push(50);
        Err(AlarmError::Handler)
    }

    fn ok_76() -> Result<(), AlarmError> {
        FAILING_LOG.lock().unwrap().push(76);
        Ok(())
    }

    fn tie_first() -> Result<(), AlarmError> {
        TIE_LOG.lock().unwrap().push(1);
        Ok(())
    }

    fn tie_second() -> Result<(), AlarmError> {
        TIE_LOG.lock().unwrap().push(2);
        Ok(())
    }

    #[test]
    fn scenario_a_out_of_order_inserts_arm_earliest() {
        init_logging();
        let mut s = AlarmScheduler::<_, 8>::new(MockRtc::at(0));

        s.on_new_alarm(entry(100)).unwrap();
        assert_eq!(rtc_of(&s).armed, Some(100));

        s.on_new_alarm(entry(50)).unwrap();
        assert_eq!(rtc_of(&s).armed, Some(50));

        // Lands in the middle: hardware must not be touched.
        s.on_new_alarm(entry(75)).unwrap();
        assert_eq!(rtc_of(&s).armed, Some(50));
        assert!(rtc_of(&s).interrupt_enabled);
        assert_eq!(s.pending(), 3);
    }

    #[test]
    fn scenario_b_premature_fire_rearms_without_popping() {
        init_logging();
        // Tolerance is 2s, so "premature" needs now well before the
        // deadline.
        let mut s = AlarmScheduler::<_, 8>::new(MockRtc::at(40));
        for d in [100, 50, 75] {
            s.on_new_alarm(entry(d)).unwrap();
        }

        s.on_fired();

        assert_eq!(s.pending(), 3);
        assert_eq!(rtc_of(&s).armed, Some(50));
        assert_eq!(rtc_of(&s).flag_clears, 1);
        assert_eq!(rtc_of(&s).disarms, 0);
    }

    #[test]
    fn fire_within_skew_tolerance_pops_nothing_but_rearms() {
        init_logging();
        // now = 49 with deadline 50: inside the 2s tolerance, so not a
        // sync failure, but nothing is due yet either.
        let mut s = AlarmScheduler::<_, 8>::new(MockRtc::at(49));
        for d in [100, 50, 75] {
            s.on_new_alarm(entry(d)).unwrap();
        }

        s.on_fired();

        assert_eq!(s.pending(), 3);
        assert_eq!(rtc_of(&s).armed, Some(50));
    }

    #[test]
    fn scenario_c_drains_all_due_entries_in_order() {
        init_logging();

        let mut s = AlarmScheduler::<_, 8>::new(MockRtc::at(80));
        s.on_new_alarm(AlarmEntry {
            deadline: 100,
            handler: noop,
        })
        .unwrap();
        s.on_new_alarm(AlarmEntry {
            deadline: 50,
            handler: c_log_50,
        })
        .unwrap();
        s.on_new_alarm(AlarmEntry {
            deadline: 75,
            handler: c_log_75,
        })
        .unwrap();

        s.on_fired();

        assert_eq!(*SCENARIO_C_LOG.lock().unwrap(), [50, 75]);
        assert_eq!(s.pending(), 1);
        assert_eq!(rtc_of(&s).armed, Some(100));
        assert_eq!(rtc_of(&s).disarms, 0);
    }

    #[test]
    fn scenario_d_fire_on_empty_queue_is_a_noop() {
        init_logging();
        let mut s = AlarmScheduler::<MockRtc, 8>::new(MockRtc::at(123));

        s.on_fired();

        assert_eq!(rtc_of(&s).flag_clears, 1);
        assert_eq!(rtc_of(&s).armed, None);
        // Never armed, so nothing to redundantly disarm.
        assert_eq!(rtc_of(&s).disarms, 0);
    }

    #[test]
    fn drain_to_empty_disarms_hardware() {
        init_logging();
        let mut s = AlarmScheduler::<_, 8>::new(MockRtc::at(200));
        for d in [100, 50, 75] {
            s.on_new_alarm(entry(d)).unwrap();
        }

        s.on_fired();

        assert_eq!(s.pending(), 0);
        assert!(!rtc_of(&s).interrupt_enabled);
        assert_eq!(rtc_of(&s).disarms, 1);
    }

    #[test]
    fn failing_handler_does_not_starve_later_deadlines() {
        init_logging();

        let mut s = AlarmScheduler::<_, 8>::new(MockRtc::at(80));
        s.on_new_alarm(AlarmEntry {
            deadline: 50,
            handler: failing_50,
        })
        .unwrap();
        s.on_new_alarm(AlarmEntry {
            deadline: 76,
            handler: ok_76,
        })
        .unwrap();

        s.on_fired();

        // The failing handler at 50 ran and the one at 76 still fired.
        assert_eq!(*FAILING_LOG.lock().unwrap(), [50, 76]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn queue_full_is_surfaced_and_leaves_state_alone() {
        init_logging();
        let mut s = AlarmScheduler::<_, 2>::new(MockRtc::at(0));
        s.on_new_alarm(entry(10)).unwrap();
        s.on_new_alarm(entry(20)).unwrap();

        assert_eq!(s.on_new_alarm(entry(5)), Err(AlarmError::QueueFull));
        assert_eq!(s.pending(), 2);
        // The rejected earlier deadline must not have reprogrammed the
        // comparator.
        assert_eq!(rtc_of(&s).armed, Some(10));
    }

    #[test]
    fn transport_failure_degrades_then_self_corrects() {
        init_logging();
        let mut rtc = MockRtc::at(0);
        rtc.fail_bus = true;
        let mut s = AlarmScheduler::<_, 8>::new(rtc);

        // The insert still succeeds; hardware is left stale.
        s.on_new_alarm(entry(100)).unwrap();
        assert_eq!(s.pending(), 1);
        assert_eq!(rtc_of(&s).armed, None);

        // A fired event during the outage also leaves the task alive.
        s.on_fired();
        assert_eq!(s.pending(), 1);

        // Bus recovers: the next insert that becomes the earliest
        // reprograms the comparator.
        s.hardware_mut().rtc_mut().fail_bus = false;
        s.on_new_alarm(entry(50)).unwrap();
        assert_eq!(rtc_of(&s).armed, Some(50));
    }

    #[test]
    fn equal_deadlines_fire_in_insertion_order() {
        init_logging();

        let mut s = AlarmScheduler::<_, 8>::new(MockRtc::at(60));
        s.on_new_alarm(AlarmEntry {
            deadline: 50,
            handler: tie_first,
        })
        .unwrap();
        s.on_new_alarm(AlarmEntry {
            deadline: 50,
            handler: tie_second,
        })
        .unwrap();

        s.on_fired();

        assert_eq!(*TIE_LOG.lock().unwrap(), [1, 2]);
    }
}
