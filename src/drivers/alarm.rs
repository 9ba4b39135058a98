//! Alarm indicator: red LED and buzzer blinking together.
//!
//! While the alarm holds, each render plays one blocking tone and then
//! latches the red LED and the buzzer pin to the current blink phase.  The
//! phase flips at most once per half-period.  When the alarm clears both
//! outputs go low and the phase starts over.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::ports::{ActuatorPort, Output};
use crate::config::SystemConfig;
use crate::drivers::buzzer;

pub struct AlarmDriver {
    half_period_ms: u32,
    tone_hz: u32,
    tone_ms: u32,
    phase: bool,
    last_toggle_ms: u64,
    active: bool,
}

impl AlarmDriver {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            half_period_ms: config.blink_half_period_ms,
            tone_hz: config.alarm_tone_hz,
            tone_ms: config.alarm_tone_ms,
            phase: false,
            last_toggle_ms: 0,
            active: false,
        }
    }

    /// Current blink phase (red LED / buzzer level).
    pub fn phase(&self) -> bool {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flip the phase when a half-period has elapsed.  Returns the phase.
    pub fn advance_phase(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_toggle_ms) > u64::from(self.half_period_ms) {
            self.phase = !self.phase;
            self.last_toggle_ms = now_ms;
        }
        self.phase
    }

    /// One alarm beat: phase, tone, then latch both outputs to the phase.
    pub fn sound<H>(&mut self, hw: &mut H, now_ms: u64)
    where
        H: ActuatorPort + DelayNs + ?Sized,
    {
        self.active = true;
        let phase = self.advance_phase(now_ms);
        if let Err(e) = buzzer::play_tone(hw, self.tone_hz, self.tone_ms) {
            warn!("alarm: tone {}", e);
        }
        set(hw, Output::RedLed, phase);
        set(hw, Output::Buzzer, phase);
    }

    /// Alarm condition cleared: outputs low, phase reset.
    pub fn silence<O: ActuatorPort + ?Sized>(&mut self, out: &mut O) {
        self.active = false;
        self.phase = false;
        set(out, Output::RedLed, false);
        set(out, Output::Buzzer, false);
    }
}

fn set<O: ActuatorPort + ?Sized>(out: &mut O, output: Output, on: bool) {
    if let Err(e) = out.set_output(output, on) {
        warn!("alarm: {:?} {}", output, e);
    }
}
