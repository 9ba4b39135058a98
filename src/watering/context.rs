//! Shared mutable context threaded through every gate handler.
//!
//! `GateContext` is the blackboard the state handlers read from and write
//! to: the latest reading, the auto-water toggle, the daily bookkeeping and
//! the pump command the controller applies after each tick.

use crate::config::{Band, SystemConfig};
use crate::sensors::SensorReading;

/// The slice of [`SystemConfig`] the gate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// A cycle only starts below this temperature (percent).
    pub water_max_temp_pct: u8,
    /// A cycle only starts while light sits inside this band (percent).
    pub water_light: Band,
    pub pump_pulse_ms: u32,
}

impl GateConfig {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            water_max_temp_pct: config.water_max_temp_pct,
            water_light: config.water_light,
            pump_pulse_ms: config.pump_pulse_ms,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

/// What the controller must do after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateCommands {
    /// Run the blocking pump pulse now.
    pub pump_on: bool,
}

pub struct GateContext {
    // -- Inputs --
    /// Reading of the current loop iteration.
    pub reading: SensorReading,
    /// Mirror of the toggle page selection.
    pub auto_water_enabled: bool,
    /// A switch press is being evaluated by this tick.
    pub press_pending: bool,
    /// Pulse finished; the cycle may close.
    pub pulse_delivered: bool,
    /// Pulse could not start; the cycle falls back to armed.
    pub pulse_failed: bool,

    // -- Daily state (cleared on rollover) --
    /// Switch presses counted towards arming since the last rollover.
    pub presses_today: u8,
    pub watered_today: bool,
    pub daily_water_armed: bool,

    // -- Outputs --
    pub commands: GateCommands,

    pub config: GateConfig,
}

impl GateContext {
    pub fn new(config: GateConfig) -> Self {
        Self {
            reading: SensorReading::default(),
            auto_water_enabled: false,
            press_pending: false,
            pulse_delivered: false,
            pulse_failed: false,
            presses_today: 0,
            watered_today: false,
            daily_water_armed: false,
            commands: GateCommands::default(),
            config,
        }
    }

    /// Environmental window for an automatic cycle.  A moisture reading of
    /// exactly zero never qualifies.
    pub fn watering_window_open(&self) -> bool {
        let r = &self.reading;
        r.moisture_pct != 0
            && r.temperature_pct < self.config.water_max_temp_pct
            && self.config.water_light.contains(r.light_pct)
    }

    /// Clear the per-day bookkeeping.
    pub fn reset_daily(&mut self) {
        self.presses_today = 0;
        self.watered_today = false;
        self.daily_water_armed = false;
    }
}
