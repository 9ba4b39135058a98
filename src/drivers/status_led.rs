//! Green / red acknowledgment LEDs.
//!
//! A press on the water switch is answered with one blocking 1 s pulse:
//! green when the daily watering was armed, red when it was refused.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::ports::{ActuatorPort, Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Armed,
    Refused,
}

impl Indicator {
    pub fn output(self) -> Output {
        match self {
            Self::Armed => Output::GreenLed,
            Self::Refused => Output::RedLed,
        }
    }
}

pub struct StatusLed {
    pulse_ms: u32,
    last: Option<Indicator>,
}

impl StatusLed {
    pub fn new(pulse_ms: u32) -> Self {
        Self {
            pulse_ms,
            last: None,
        }
    }

    /// Light `indicator` for the configured pulse, blocking.
    pub fn pulse<H>(&mut self, hw: &mut H, indicator: Indicator)
    where
        H: ActuatorPort + DelayNs + ?Sized,
    {
        let led = indicator.output();
        match hw.set_output(led, true) {
            Ok(()) => hw.delay_ms(self.pulse_ms),
            Err(e) => warn!("status_led: {:?} {}", led, e),
        }
        if let Err(e) = hw.set_output(led, false) {
            warn!("status_led: {:?} off {}", led, e);
        }
        self.last = Some(indicator);
    }

    pub fn last(&self) -> Option<Indicator> {
        self.last
    }
}
