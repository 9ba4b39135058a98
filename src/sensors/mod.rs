//! Sensor subsystem: the [`Sampler`] and the single normalisation path.
//!
//! Each loop iteration reads the three analog channels once (no averaging,
//! no retries) and produces a fresh [`SensorReading`].  Every percentage in
//! the firmware, including the detail pages and the watering gate, comes
//! from [`normalize_pct`] / [`normalize_moisture_pct`].

use log::warn;

use crate::app::ports::{AnalogPort, Channel};

/// Full-scale count of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// Upper end of the temperature proxy scale shown on the detail page (°C).
pub const TEMPERATURE_SCALE_C: u8 = 64;

/// Scale a raw 0–4095 count to 0–100 %.  Out-of-range counts are clamped.
pub fn normalize_pct(raw: u16) -> u8 {
    let raw = u32::from(raw.min(ADC_MAX));
    (raw * 100 / u32::from(ADC_MAX)) as u8
}

/// Moisture percentage.  The probe reads higher when the soil is drier, so
/// the scaled value is inverted.
pub fn normalize_moisture_pct(raw: u16) -> u8 {
    100 - normalize_pct(raw)
}

/// One sample of every analog channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorReading {
    /// Raw joystick X count (temperature proxy).
    pub temperature_raw: u16,
    /// Raw joystick Y count (moisture proxy).
    pub moisture_raw: u16,
    /// Raw microphone count (light proxy).
    pub light_raw: u16,
    pub temperature_pct: u8,
    pub moisture_pct: u8,
    pub light_pct: u8,
}

impl SensorReading {
    /// Build a reading from raw counts through the shared normalisation.
    pub fn from_raw(temperature_raw: u16, moisture_raw: u16, light_raw: u16) -> Self {
        Self {
            temperature_raw,
            moisture_raw,
            light_raw,
            temperature_pct: normalize_pct(temperature_raw),
            moisture_pct: normalize_moisture_pct(moisture_raw),
            light_pct: normalize_pct(light_raw),
        }
    }

    /// Temperature on the 0–64 °C proxy scale used by the detail page.
    pub fn temperature_c(&self) -> u8 {
        (u16::from(self.temperature_pct) * u16::from(TEMPERATURE_SCALE_C) / 100) as u8
    }
}

/// Reads the three analog channels.
///
/// A failed conversion keeps the last good count for that channel, so a
/// flaky ADC degrades to a stale value instead of a spurious alarm.
pub struct Sampler {
    last_raw: [u16; 3],
    failed_reads: u32,
}

impl Sampler {
    pub fn new() -> Self {
        Self {
            last_raw: [0; 3],
            failed_reads: 0,
        }
    }

    pub fn sample<A: AnalogPort + ?Sized>(&mut self, adc: &mut A) -> SensorReading {
        let temperature = self.read(adc, Channel::TemperatureProxy);
        let moisture = self.read(adc, Channel::MoistureProxy);
        let light = self.read(adc, Channel::LightProxy);
        SensorReading::from_raw(temperature, moisture, light)
    }

    /// Total conversions that failed since boot.
    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }

    fn read<A: AnalogPort + ?Sized>(&mut self, adc: &mut A, channel: Channel) -> u16 {
        let slot = channel as usize;
        match adc.read_channel(channel) {
            Ok(raw) => {
                self.last_raw[slot] = raw.min(ADC_MAX);
            }
            Err(e) => {
                self.failed_reads = self.failed_reads.saturating_add(1);
                warn!("sampler: {:?} {}, keeping {}", channel, e, self.last_raw[slot]);
            }
        }
        self.last_raw[slot]
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
