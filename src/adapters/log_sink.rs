//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production, stderr on the host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | page={} gate={:?} | T={}% ({}\u{00b0}C) M={}% L={}% | \
                     health={} | auto={} watered={} | alarm={} | manual={} | \
                     window={}s | adc_fail={}",
                    t.mode.name(),
                    t.gate,
                    t.temperature_pct,
                    t.temperature_c,
                    t.moisture_pct,
                    t.light_pct,
                    t.health.label(),
                    if t.auto_water_enabled { "ON" } else { "OFF" },
                    t.watered_today,
                    t.alarm.map_or("-", |a| a.label()),
                    t.manual_waterings,
                    t.window_elapsed_ms / 1000,
                    t.failed_reads,
                );
            }
            AppEvent::Started(mode) => {
                info!("START | page={}", mode.name());
            }
            AppEvent::ModeChanged { from, to } => {
                info!("PAGE  | {} -> {}", from.name(), to.name());
            }
            AppEvent::WateringArmed => {
                info!("WATER | armed for today");
            }
            AppEvent::WateringRefused => {
                info!("WATER | refused, auto-water is ON");
            }
            AppEvent::CycleCompleted { pulse_ms } => {
                info!("WATER | cycle done, pump ran {} ms", pulse_ms);
            }
            AppEvent::CycleFailed => {
                warn!("WATER | pump did not start, still armed");
            }
            AppEvent::DayRolledOver => {
                info!("DAY   | window rolled over");
            }
            AppEvent::AlarmRaised(cause) => {
                warn!("ALARM | {}", cause.label());
            }
            AppEvent::AlarmCleared => {
                info!("ALARM | cleared");
            }
            AppEvent::Celebrated { manual_waterings } => {
                info!("CELEB | manual watering #{}", manual_waterings);
            }
        }
    }
}
