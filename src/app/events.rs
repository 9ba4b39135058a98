//! Outbound application events.
//!
//! The [`PlantController`](super::service::PlantController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

use crate::health::HealthStatus;
use crate::screen::{AlarmCause, ScreenMode};
use crate::watering::GateState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries the initial page).
    Started(ScreenMode),

    /// The active page changed.
    ModeChanged { from: ScreenMode, to: ScreenMode },

    /// A water-switch press armed today's automatic cycle.
    WateringArmed,

    /// A water-switch press was rejected because auto-water is on.
    WateringRefused,

    /// The pump pulse ran.
    CycleCompleted { pulse_ms: u32 },

    /// The pump relay did not switch on.  The gate stays armed.
    CycleFailed,

    /// The 24 h window elapsed and the daily state was cleared.
    DayRolledOver,

    AlarmRaised(AlarmCause),

    AlarmCleared,

    /// The manual-watering celebration finished.
    Celebrated { manual_waterings: u32 },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub mode: ScreenMode,
    pub gate: GateState,
    pub temperature_pct: u8,
    pub temperature_c: u8,
    pub moisture_pct: u8,
    pub light_pct: u8,
    pub health: HealthStatus,
    pub auto_water_enabled: bool,
    pub watered_today: bool,
    pub alarm: Option<AlarmCause>,
    pub manual_waterings: u32,
    /// Milliseconds into the current day window.
    pub window_elapsed_ms: u32,
    pub failed_reads: u32,
}
