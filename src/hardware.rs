//! # Hardware Alarm Adapter
//!
//! The only code that touches the one-slot hardware alarm register. Owned
//! by the scheduler task and called exclusively from task context — never
//! from the interrupt handler — so there is no register-level race to
//! defend against.
//!
//! Arming is a two-step sequence (program the comparator, then enable its
//! interrupt); a latched fire must be acknowledged with
//! [`clear_fired_flag`](HardwareAlarm::clear_fired_flag) before the
//! comparator will trigger again.

use crate::alarm::UnixTime;
use crate::error::AlarmError;
use crate::rtc::RtcDriver;

/// Adapter wrapping the RTC driver's alarm-related registers.
pub struct HardwareAlarm<R: RtcDriver> {
    rtc: R,
}

impl<R: RtcDriver> HardwareAlarm<R> {
    /// Take ownership of the RTC driver handle.
    pub fn new(rtc: R) -> Self {
        Self { rtc }
    }

    /// Program the comparator to `deadline` and enable the alarm interrupt.
    pub fn arm_at(&mut self, deadline: UnixTime) -> Result<(), AlarmError> {
        self.rtc
            .program_alarm_register(deadline)
            .map_err(|_| AlarmError::Transport)?;
        self.rtc
            .enable_alarm_interrupt()
            .map_err(|_| AlarmError::Transport)?;
        log::debug!("alarm armed for t={deadline}");
        Ok(())
    }

    /// Disable the alarm interrupt. Called when the queue drains empty.
    pub fn disarm(&mut self) -> Result<(), AlarmError> {
        self.rtc
            .disable_alarm_interrupt()
            .map_err(|_| AlarmError::Transport)?;
        log::debug!("alarm disarmed");
        Ok(())
    }

    /// Acknowledge a latched fire. Must happen once per observed fire
    /// before re-arming, otherwise the interrupt will not re-trigger.
    pub fn clear_fired_flag(&mut self) -> Result<(), AlarmError> {
        self.rtc
            .clear_alarm_flag()
            .map_err(|_| AlarmError::Transport)
    }

    /// Read the current time from the timekeeper.
    pub fn current_time(&mut self) -> Result<UnixTime, AlarmError> {
        self.rtc
            .read_current_time()
            .map_err(|_| AlarmError::Transport)
    }

    /// Access the underlying driver (test introspection).
    pub fn rtc(&self) -> &R {
        &self.rtc
    }

    #[cfg(test)]
    pub(crate) fn rtc_mut(&mut self) -> &mut R {
        &mut self.rtc
    }
}
