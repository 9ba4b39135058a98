//! Passive buzzer tone generator.
//!
//! The tone is a square wave produced by toggling the buzzer pin with a
//! blocking half-period delay.  The control loop stalls for the whole tone.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{ActuatorPort, Output};
use crate::error::ActuatorError;

/// Half-period in microseconds and cycle count for a tone.
pub fn tone_timing(frequency_hz: u32, duration_ms: u32) -> (u32, u32) {
    if frequency_hz == 0 {
        return (0, 0);
    }
    let half_period_us = 1_000_000 / frequency_hz.saturating_mul(2);
    let cycles = frequency_hz.saturating_mul(duration_ms) / 1000;
    (half_period_us, cycles)
}

/// Play `frequency_hz` for `duration_ms`.  Stops at the first failed write
/// and leaves the pin low.
pub fn play_tone<H>(hw: &mut H, frequency_hz: u32, duration_ms: u32) -> Result<(), ActuatorError>
where
    H: ActuatorPort + DelayNs + ?Sized,
{
    let (half_us, cycles) = tone_timing(frequency_hz, duration_ms);
    for _ in 0..cycles {
        if let Err(e) = hw.set_output(Output::Buzzer, true) {
            let _ = hw.set_output(Output::Buzzer, false);
            return Err(e);
        }
        hw.delay_us(half_us);
        hw.set_output(Output::Buzzer, false)?;
        hw.delay_us(half_us);
    }
    Ok(())
}
