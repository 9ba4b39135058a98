//! System configuration parameters
//!
//! All tunable parameters for the PlantStation.  The named constants are the
//! factory tuning of the station; [`SystemConfig::default`] is built from them.

use core::fmt;

use serde::{Deserialize, Serialize};

// --- Ideal growing bands (percent) ---
pub const LIGHT_MIN_PCT: u8 = 50;
pub const LIGHT_MAX_PCT: u8 = 90;
pub const TEMP_MIN_PCT: u8 = 20;
pub const TEMP_MAX_PCT: u8 = 35;
pub const MOISTURE_MIN_PCT: u8 = 10;
pub const MOISTURE_MAX_PCT: u8 = 50;

// --- Alarm thresholds ---
/// Soil drier than this raises the alarm.
pub const ALARM_MOISTURE_BELOW_PCT: u8 = 30;
/// Light brighter than this raises the alarm.
pub const ALARM_LIGHT_ABOVE_PCT: u8 = 80;
/// Below this moisture the alarm shows the thirst screen.
pub const THIRST_MOISTURE_BELOW_PCT: u8 = 10;

// --- Automatic watering window ---
pub const WATER_MAX_TEMP_PCT: u8 = 25;
pub const WATER_LIGHT_MIN_PCT: u8 = 15;
pub const WATER_LIGHT_MAX_PCT: u8 = 20;

// --- Auto-water toggle (joystick X raw counts) ---
pub const TOGGLE_ENABLE_ABOVE_RAW: u16 = 3080;
pub const TOGGLE_DISABLE_BELOW_RAW: u16 = 1000;

// --- Timing ---
pub const LOOP_SLEEP_MS: u32 = 195;
pub const RENDER_SETTLE_MS: u32 = 150;
pub const TICK_PERIOD_MS: u32 = 1000;
/// 24 h in milliseconds.
pub const DAILY_WINDOW_MS: u32 = 86_400_000;
pub const MODE_BUTTON_DEBOUNCE_US: u32 = 200;
pub const PUMP_PULSE_MS: u32 = 4000;
pub const INDICATOR_PULSE_MS: u32 = 1000;
pub const BLINK_HALF_PERIOD_MS: u32 = 200;
pub const ALARM_TONE_HZ: u32 = 1000;
/// Upper bound for a tone the pin toggling can still produce.
pub const MAX_TONE_HZ: u32 = 20_000;
pub const ALARM_TONE_MS: u32 = 500;
pub const TEST_COUNTDOWN_SECS: u8 = 5;
pub const THIRST_FLIP_MS: u32 = 3000;
pub const TREE_WIGGLE_MS: u32 = 100;

/// Inclusive percentage band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub min: u8,
    pub max: u8,
}

impl Band {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Health evaluation ---
    pub ideal_light: Band,
    pub ideal_temperature: Band,
    pub ideal_moisture: Band,

    // --- Alarm ---
    pub alarm_moisture_below_pct: u8,
    pub alarm_light_above_pct: u8,
    pub thirst_moisture_below_pct: u8,
    pub alarm_tone_hz: u32,
    pub alarm_tone_ms: u32,
    pub blink_half_period_ms: u32,

    // --- Watering gate ---
    pub water_max_temp_pct: u8,
    pub water_light: Band,
    pub pump_pulse_ms: u32,
    pub indicator_pulse_ms: u32,
    /// Length of the once-per-day window (milliseconds).
    pub daily_window_ms: u32,

    // --- Inputs ---
    pub toggle_enable_above_raw: u16,
    pub toggle_disable_below_raw: u16,
    pub mode_button_debounce_us: u32,

    // --- Timing ---
    /// Sleep at the end of every loop iteration (also debounces polled buttons).
    pub loop_sleep_ms: u32,
    /// Delay before each render.
    pub render_settle_ms: u32,
    /// Period of the day-window tick callback.
    pub tick_period_ms: u32,
    pub test_countdown_secs: u8,
    pub thirst_flip_ms: u32,
    pub tree_wiggle_ms: u32,
    /// Loop iterations between telemetry events (0 disables).
    pub telemetry_interval_steps: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            ideal_light: Band::new(LIGHT_MIN_PCT, LIGHT_MAX_PCT),
            ideal_temperature: Band::new(TEMP_MIN_PCT, TEMP_MAX_PCT),
            ideal_moisture: Band::new(MOISTURE_MIN_PCT, MOISTURE_MAX_PCT),

            alarm_moisture_below_pct: ALARM_MOISTURE_BELOW_PCT,
            alarm_light_above_pct: ALARM_LIGHT_ABOVE_PCT,
            thirst_moisture_below_pct: THIRST_MOISTURE_BELOW_PCT,
            alarm_tone_hz: ALARM_TONE_HZ,
            alarm_tone_ms: ALARM_TONE_MS,
            blink_half_period_ms: BLINK_HALF_PERIOD_MS,

            water_max_temp_pct: WATER_MAX_TEMP_PCT,
            water_light: Band::new(WATER_LIGHT_MIN_PCT, WATER_LIGHT_MAX_PCT),
            pump_pulse_ms: PUMP_PULSE_MS,
            indicator_pulse_ms: INDICATOR_PULSE_MS,
            daily_window_ms: DAILY_WINDOW_MS,

            toggle_enable_above_raw: TOGGLE_ENABLE_ABOVE_RAW,
            toggle_disable_below_raw: TOGGLE_DISABLE_BELOW_RAW,
            mode_button_debounce_us: MODE_BUTTON_DEBOUNCE_US,

            loop_sleep_ms: LOOP_SLEEP_MS,
            render_settle_ms: RENDER_SETTLE_MS,
            tick_period_ms: TICK_PERIOD_MS,
            test_countdown_secs: TEST_COUNTDOWN_SECS,
            thirst_flip_ms: THIRST_FLIP_MS,
            tree_wiggle_ms: TREE_WIGGLE_MS,
            telemetry_interval_steps: 30,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for band in [
            self.ideal_light,
            self.ideal_temperature,
            self.ideal_moisture,
            self.water_light,
        ] {
            if band.min > band.max {
                return Err(ConfigError::ValidationFailed("band min above max"));
            }
            if band.max > 100 {
                return Err(ConfigError::ValidationFailed("band above 100%"));
            }
        }
        if self.alarm_moisture_below_pct > 100
            || self.alarm_light_above_pct > 100
            || self.thirst_moisture_below_pct > 100
            || self.water_max_temp_pct > 100
        {
            return Err(ConfigError::ValidationFailed("threshold above 100%"));
        }
        if self.toggle_disable_below_raw >= self.toggle_enable_above_raw
            || self.toggle_enable_above_raw > crate::sensors::ADC_MAX
        {
            return Err(ConfigError::ValidationFailed("toggle thresholds inverted"));
        }
        if self.alarm_tone_hz == 0 {
            return Err(ConfigError::ValidationFailed("alarm_tone_hz is zero"));
        }
        if self.alarm_tone_hz > MAX_TONE_HZ {
            return Err(ConfigError::ValidationFailed("alarm_tone_hz above 20 kHz"));
        }
        if self.tick_period_ms == 0 || self.daily_window_ms < self.tick_period_ms {
            return Err(ConfigError::ValidationFailed("tick period / daily window"));
        }
        if self.blink_half_period_ms == 0 || self.thirst_flip_ms == 0 {
            return Err(ConfigError::ValidationFailed("zero blink period"));
        }
        Ok(())
    }
}

/// Errors from [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
