//! Application service: the hexagonal core.
//!
//! [`PlantController`] owns the page state machine, the watering gate, the
//! alarm and every blocking output routine.  All I/O flows through port
//! traits injected at call sites, so the whole loop runs against mock
//! adapters in tests.
//!
//! ```text
//!  AnalogPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!  ButtonPort ──▶ │     PlantController      │
//!                 │ Screen · Gate · Alarm    │ ──▶ DisplayPort
//! ActuatorPort ◀──│ Health · Celebration     │ ──▶ LedStripPort
//!                 └─────────────────────────┘
//!                            ▲
//!                      SharedSignals (ISR / timer)
//! ```
//!
//! One call to [`step`](PlantController::step) is one iteration of the
//! firmware's superloop, including its blocking delays.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::drivers::alarm::AlarmDriver;
use crate::drivers::button;
use crate::drivers::led_matrix::{CELEBRATION, LedMatrix};
use crate::drivers::pump::PumpDriver;
use crate::drivers::status_led::{Indicator, StatusLed};
use crate::health::{self, HealthStatus, IdealBands};
use crate::screen::{self, AlarmCause, RenderInput, ScreenController, ScreenMode, View};
use crate::sensors::{Sampler, SensorReading};
use crate::signals::SharedSignals;
use crate::watering::{GateConfig, GateState, PressOutcome, WateringGate};

use super::events::{AppEvent, TelemetryData};
use super::ports::{Board, ClockPort, DisplayPort, EventSink};

// ───────────────────────────────────────────────────────────────
// Step report
// ───────────────────────────────────────────────────────────────

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub reading: SensorReading,
    pub press: Option<PressOutcome>,
    pub celebrated: bool,
    pub pumped: bool,
    pub alarm: Option<AlarmCause>,
    pub health: HealthStatus,
    /// `None` when the render failed.
    pub view: Option<View>,
}

// ───────────────────────────────────────────────────────────────
// PlantController
// ───────────────────────────────────────────────────────────────

pub struct PlantController<'s> {
    config: SystemConfig,
    signals: &'s SharedSignals,

    sampler: Sampler,
    screen: ScreenController,
    gate: WateringGate,
    bands: IdealBands,

    alarm: AlarmDriver,
    matrix: LedMatrix,
    pump: PumpDriver,
    status_led: StatusLed,

    last_reading: SensorReading,
    last_alarm: Option<AlarmCause>,
    last_health: HealthStatus,
    manual_waterings: u32,
    step_count: u64,
}

impl<'s> PlantController<'s> {
    /// Construct the controller.  Call [`start`](Self::start) before the
    /// first [`step`](Self::step).
    pub fn new(config: SystemConfig, signals: &'s SharedSignals) -> Self {
        signals.configure(config.mode_button_debounce_us, config.daily_window_ms);
        Self {
            sampler: Sampler::new(),
            screen: ScreenController::new(&config),
            gate: WateringGate::new(GateConfig::from_config(&config)),
            bands: IdealBands::from_config(&config),
            alarm: AlarmDriver::new(&config),
            matrix: LedMatrix::new(),
            pump: PumpDriver::new(),
            status_led: StatusLed::new(config.indicator_pulse_ms),
            last_reading: SensorReading::default(),
            last_alarm: None,
            last_health: HealthStatus::Healthy,
            manual_waterings: 0,
            step_count: 0,
            config,
            signals,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Blank every output and announce the initial page.
    pub fn start<B, S>(&mut self, board: &mut B, sink: &mut S)
    where
        B: Board + ?Sized,
        S: EventSink + ?Sized,
    {
        if let Err(e) = self.pump.stop(board) {
            warn!("start: pump stop {}", e);
        }
        self.alarm.silence(board);
        blank(board);
        self.signals
            .set_auto_water_enabled(self.gate.snapshot().auto_water_enabled);

        sink.emit(&AppEvent::Started(self.screen.mode()));
        info!(
            "PlantController started on {} (pulse={}ms, window={}ms)",
            self.screen.mode().name(),
            self.gate.pulse_ms(),
            self.signals.daily_window_ms()
        );
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one iteration of the superloop.
    ///
    /// The `board` parameter satisfies every port at once; the blocking
    /// routines borrow it for both their outputs and their delays.
    pub fn step<B, S>(&mut self, board: &mut B, sink: &mut S) -> StepReport
    where
        B: Board + ?Sized,
        S: EventSink + ?Sized,
    {
        self.step_count += 1;

        // 1. Asynchronous flags
        if self.signals.take_day_rollover() {
            self.gate.on_day_rollover();
            sink.emit(&AppEvent::DayRolledOver);
        }
        if self.signals.take_mode_reset() {
            self.change_mode(ScreenMode::Test, sink);
        }

        // 2. Sensors
        let reading = self.sampler.sample(board);
        self.last_reading = reading;

        // 3. Page button
        let buttons = button::sample(board);
        if buttons.page {
            self.signals.clear_celebration();
            blank(board);
            let (from, to) = self.screen.advance();
            sink.emit(&AppEvent::ModeChanged { from, to });
        }

        // 4. Water switch
        let press = buttons
            .water_switch
            .then(|| self.handle_press(board, sink));

        // 5. Manual-watering celebration
        let celebrated = self.signals.celebration_pending();
        if celebrated {
            self.celebrate(board, sink);
        }

        // 6. Watering gate
        let enabled = self.signals.auto_water_enabled();
        let mut pumped = false;
        if self.gate.tick(&reading, enabled) {
            let pulse_ms = self.gate.pulse_ms();
            let before = self.pump.pulses();
            if let Err(e) = self.pump.pulse(board, pulse_ms) {
                warn!("pump: {}", e);
            }
            // A failed switch-off still counts as delivered water.
            pumped = self.pump.pulses() != before;
            if pumped {
                self.gate.finish_cycle();
                sink.emit(&AppEvent::CycleCompleted { pulse_ms });
            } else {
                self.gate.abort_cycle();
                sink.emit(&AppEvent::CycleFailed);
            }
        }

        // 7. Render + alarm
        board.delay_ms(self.config.render_settle_ms);
        let now_ms = board.now_ms();
        let alarm = screen::alarm_cause(&reading, &self.config, self.signals.celebration_pending());

        if alarm.is_none() && self.screen.mode() == ScreenMode::AutoWaterToggle {
            self.update_toggle(reading.temperature_raw);
        }

        let health = health::evaluate(
            &self.bands,
            reading.light_pct,
            reading.temperature_pct,
            reading.moisture_pct,
        );
        self.last_health = health;

        let input = RenderInput {
            reading: &reading,
            alarm,
            health,
            auto_water_enabled: self.signals.auto_water_enabled(),
            now_ms,
        };
        let view = match self.screen.render(board, &input) {
            Ok(view) => Some(view),
            Err(e) => {
                warn!("display: {}", e);
                None
            }
        };

        match alarm {
            Some(_) => self.alarm.sound(board, now_ms),
            None if self.alarm.is_active() => self.alarm.silence(board),
            None => {}
        }
        self.track_alarm(alarm, sink);

        // 8. Telemetry + loop sleep
        let every = u64::from(self.config.telemetry_interval_steps);
        if every > 0 && self.step_count % every == 0 {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }
        board.delay_ms(self.config.loop_sleep_ms);

        StepReport {
            reading,
            press,
            celebrated,
            pumped,
            alarm,
            health,
            view,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self) -> TelemetryData {
        let r = &self.last_reading;
        let gate = self.gate.snapshot();
        TelemetryData {
            mode: self.screen.mode(),
            gate: gate.state,
            temperature_pct: r.temperature_pct,
            temperature_c: r.temperature_c(),
            moisture_pct: r.moisture_pct,
            light_pct: r.light_pct,
            health: self.last_health,
            auto_water_enabled: self.signals.auto_water_enabled(),
            watered_today: gate.watered_today,
            alarm: self.last_alarm,
            manual_waterings: self.manual_waterings,
            window_elapsed_ms: self.signals.elapsed_ms(),
            failed_reads: self.sampler.failed_reads(),
        }
    }

    pub fn mode(&self) -> ScreenMode {
        self.screen.mode()
    }

    pub fn gate(&self) -> &WateringGate {
        &self.gate
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn manual_waterings(&self) -> u32 {
        self.manual_waterings
    }

    pub fn alarm_phase(&self) -> bool {
        self.alarm.phase()
    }

    pub fn pump_pulses(&self) -> u32 {
        self.pump.pulses()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn handle_press<B, S>(&mut self, board: &mut B, sink: &mut S) -> PressOutcome
    where
        B: Board + ?Sized,
        S: EventSink + ?Sized,
    {
        let outcome = self.gate.press(self.signals.auto_water_enabled());
        match outcome {
            PressOutcome::Armed => {
                self.status_led.pulse(board, Indicator::Armed);
                self.change_mode(ScreenMode::Blank, sink);
                sink.emit(&AppEvent::WateringArmed);
            }
            PressOutcome::Refused => {
                self.status_led.pulse(board, Indicator::Refused);
                sink.emit(&AppEvent::WateringRefused);
            }
            PressOutcome::Ignored => debug!("water switch: already used today"),
        }
        outcome
    }

    fn celebrate<B, S>(&mut self, board: &mut B, sink: &mut S)
    where
        B: Board + ?Sized,
        S: EventSink + ?Sized,
    {
        if self.signals.take_clear_screen() {
            blank(board);
        }
        self.matrix.play(CELEBRATION, board);
        self.manual_waterings = self.manual_waterings.saturating_add(1);
        self.change_mode(ScreenMode::AutoWaterToggle, sink);
        self.signals.clear_celebration();
        sink.emit(&AppEvent::Celebrated {
            manual_waterings: self.manual_waterings,
        });
    }

    fn update_toggle(&mut self, raw_x: u16) {
        let current = self.signals.auto_water_enabled();
        let next = screen::toggle_from_joystick(raw_x, current, &self.config);
        if next != current {
            self.signals.set_auto_water_enabled(next);
            info!("auto-water {}", if next { "ON" } else { "OFF" });
        }
    }

    fn change_mode<S: EventSink + ?Sized>(&mut self, to: ScreenMode, sink: &mut S) {
        if let Some(from) = self.screen.set_mode(to) {
            sink.emit(&AppEvent::ModeChanged { from, to });
        }
    }

    fn track_alarm<S: EventSink + ?Sized>(&mut self, alarm: Option<AlarmCause>, sink: &mut S) {
        if alarm == self.last_alarm {
            return;
        }
        match alarm {
            Some(cause) => sink.emit(&AppEvent::AlarmRaised(cause)),
            None => sink.emit(&AppEvent::AlarmCleared),
        }
        self.last_alarm = alarm;
    }
}

/// Clear and present an empty frame.
fn blank<D: DisplayPort + ?Sized>(display: &mut D) {
    if let Err(e) = display.clear().and_then(|()| display.flush()) {
        warn!("display: clear {}", e);
    }
}
