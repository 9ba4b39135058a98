//! Water pump relay driver.
//!
//! The relay and the blue indicator are driven together for one blocking
//! pulse.  Both outputs are switched off before returning, even when the
//! switch-on write failed.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::ports::{ActuatorPort, Output};
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct PumpDriver {
    state: PumpState,
    pulses: u32,
}

impl PumpDriver {
    pub fn new() -> Self {
        Self {
            state: PumpState::Stopped,
            pulses: 0,
        }
    }

    /// Run the pump for `duration_ms`, blocking.
    pub fn pulse<H>(&mut self, hw: &mut H, duration_ms: u32) -> Result<(), ActuatorError>
    where
        H: ActuatorPort + DelayNs + ?Sized,
    {
        let started = hw
            .set_output(Output::PumpRelay, true)
            .and_then(|()| hw.set_output(Output::BlueLed, true));

        if started.is_ok() {
            self.state = PumpState::Running;
            info!("pump: on for {} ms", duration_ms);
            hw.delay_ms(duration_ms);
        }

        let stopped = self.stop(hw);
        if started.is_ok() {
            self.pulses = self.pulses.saturating_add(1);
        }
        started.and(stopped)
    }

    pub fn stop<O: ActuatorPort + ?Sized>(&mut self, out: &mut O) -> Result<(), ActuatorError> {
        let relay = out.set_output(Output::PumpRelay, false);
        let led = out.set_output(Output::BlueLed, false);
        if relay.is_err() {
            warn!("pump: relay did not switch off");
        }
        self.state = PumpState::Stopped;
        relay.and(led)
    }

    pub fn is_running(&self) -> bool {
        self.state == PumpState::Running
    }

    /// Completed pulses since boot.
    pub fn pulses(&self) -> u32 {
        self.pulses
    }
}

impl Default for PumpDriver {
    fn default() -> Self {
        Self::new()
    }
}
