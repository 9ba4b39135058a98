//! Hardware adapter: bridges the raw GPIO / ADC helpers to domain ports.
//!
//! Implements [`AnalogPort`], [`ButtonPort`] and [`ActuatorPort`] on top
//! of [`hw_init`](crate::drivers::hw_init).  On non-espidf targets those
//! helpers are simulation stubs, so the adapter still links on the host.

use crate::app::ports::{ActuatorPort, AnalogPort, Button, ButtonPort, Channel, Output};
use crate::drivers::hw_init;
use crate::error::{ActuatorError, SensorError};
use crate::pins;

/// GPIO-level adapter.  Holds no peripheral handles of its own; pins are
/// configured once by [`hw_init::init_peripherals`].
pub struct HardwareAdapter;

impl HardwareAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Drive every output low.
    pub fn all_off(&mut self) {
        for output in [
            Output::PumpRelay,
            Output::BlueLed,
            Output::RedLed,
            Output::GreenLed,
            Output::Buzzer,
        ] {
            if let Err(e) = self.set_output(output, false) {
                log::warn!("all_off: {:?} {}", output, e);
            }
        }
    }
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn channel_number(channel: Channel) -> u32 {
    match channel {
        Channel::TemperatureProxy => pins::TEMPERATURE_ADC_CHANNEL,
        Channel::MoistureProxy => pins::MOISTURE_ADC_CHANNEL,
        Channel::LightProxy => pins::LIGHT_ADC_CHANNEL,
    }
}

pub fn button_gpio(button: Button) -> i32 {
    match button {
        Button::Page => pins::PAGE_BUTTON_GPIO,
        Button::Mode => pins::MODE_BUTTON_GPIO,
        Button::WaterSwitch => pins::WATER_SWITCH_GPIO,
    }
}

pub fn output_gpio(output: Output) -> i32 {
    match output {
        Output::RedLed => pins::LED_RED_GPIO,
        Output::GreenLed => pins::LED_GREEN_GPIO,
        Output::BlueLed => pins::LED_BLUE_GPIO,
        Output::Buzzer => pins::BUZZER_GPIO,
        Output::PumpRelay => pins::PUMP_RELAY_GPIO,
    }
}

// ── AnalogPort ────────────────────────────────────────────────

impl AnalogPort for HardwareAdapter {
    fn read_channel(&mut self, channel: Channel) -> Result<u16, SensorError> {
        hw_init::adc1_read(channel_number(channel))
    }
}

// ── ButtonPort ────────────────────────────────────────────────

impl ButtonPort for HardwareAdapter {
    fn is_pressed(&mut self, button: Button) -> bool {
        // Pull-up inputs: low means pressed.
        !hw_init::gpio_read(button_gpio(button))
    }
}

// ── ActuatorPort ──────────────────────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_output(&mut self, output: Output, on: bool) -> Result<(), ActuatorError> {
        hw_init::gpio_write(output_gpio(output), on)
    }
}
