//! Integration tests for the water switch → gate → pump pipeline.

use super::mock_hw::{CALM, LogSink, MockBoard, WINDOW};

use plantstation::app::events::AppEvent;
use plantstation::app::ports::Output;
use plantstation::app::service::PlantController;
use plantstation::config::SystemConfig;
use plantstation::screen::ScreenMode;
use plantstation::signals::SharedSignals;
use plantstation::watering::{GateState, PressOutcome};

fn boot(signals: &SharedSignals, adc: [u16; 3]) -> (PlantController<'_>, MockBoard, LogSink) {
    boot_with(signals, adc, SystemConfig::default())
}

fn boot_with(
    signals: &SharedSignals,
    adc: [u16; 3],
    config: SystemConfig,
) -> (PlantController<'_>, MockBoard, LogSink) {
    let mut app = PlantController::new(config, signals);
    let mut board = MockBoard::new(adc);
    let mut sink = LogSink::new();
    app.start(&mut board, &mut sink);
    (app, board, sink)
}

fn press_switch(app: &mut PlantController<'_>, board: &mut MockBoard, sink: &mut LogSink) -> Option<PressOutcome> {
    board.switch_down = true;
    let report = app.step(board, sink);
    board.switch_down = false;
    report.press
}

// ── Arming ────────────────────────────────────────────────────

#[test]
fn first_press_arms_with_green_pulse_and_blank_page() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, CALM);

    assert_eq!(press_switch(&mut app, &mut board, &mut sink), Some(PressOutcome::Armed));

    assert_eq!(board.writes_to(Output::GreenLed), vec![true, false]);
    assert_eq!(app.mode(), ScreenMode::Blank);
    assert_eq!(app.gate_state(), GateState::ArmedToday);
    assert!(sink.events.contains(&AppEvent::WateringArmed));
    // 1 s indicator + settle + loop sleep
    assert!(board.elapsed_ms() >= 1000 + 150 + 195);
}

#[test]
fn press_is_refused_while_auto_water_is_on() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, CALM);
    signals.set_auto_water_enabled(true);

    assert_eq!(press_switch(&mut app, &mut board, &mut sink), Some(PressOutcome::Refused));

    assert_eq!(board.writes_to(Output::RedLed), vec![false, true, false]);
    assert!(board.writes_to(Output::GreenLed).is_empty());
    assert_eq!(app.gate_state(), GateState::Idle);
    assert!(sink.events.contains(&AppEvent::WateringRefused));
}

#[test]
fn refused_press_uses_up_the_days_arming() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, WINDOW);
    signals.set_auto_water_enabled(true);
    assert_eq!(press_switch(&mut app, &mut board, &mut sink), Some(PressOutcome::Refused));

    signals.set_auto_water_enabled(false);
    assert_eq!(press_switch(&mut app, &mut board, &mut sink), Some(PressOutcome::Ignored));
    for _ in 0..5 {
        assert!(!app.step(&mut board, &mut sink).pumped);
    }
    assert!(board.writes_to(Output::GreenLed).is_empty());
    assert_eq!(app.gate_state(), GateState::Idle);
}

#[test]
fn second_press_the_same_day_is_ignored() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, CALM);

    press_switch(&mut app, &mut board, &mut sink);
    assert_eq!(press_switch(&mut app, &mut board, &mut sink), Some(PressOutcome::Ignored));
    assert_eq!(board.writes_to(Output::GreenLed).len(), 2);
    assert_eq!(app.gate_state(), GateState::ArmedToday);
}

// ── Cycle ─────────────────────────────────────────────────────

#[test]
fn armed_gate_waits_for_window_then_pumps_once() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, CALM);
    press_switch(&mut app, &mut board, &mut sink);

    for _ in 0..5 {
        assert!(!app.step(&mut board, &mut sink).pumped);
    }
    assert!(board.writes_to(Output::PumpRelay).iter().all(|on| !on));

    board.adc = WINDOW;
    let before = board.elapsed_ms();
    assert!(app.step(&mut board, &mut sink).pumped);
    assert!(board.elapsed_ms() - before >= 4000);
    assert_eq!(
        board.writes_to(Output::PumpRelay).iter().filter(|on| **on).count(),
        1
    );
    assert!(!board.level(Output::PumpRelay));
    assert!(!board.level(Output::BlueLed));
    assert!(sink.events.contains(&AppEvent::CycleCompleted { pulse_ms: 4000 }));

    for _ in 0..10 {
        assert!(!app.step(&mut board, &mut sink).pumped);
    }
    assert_eq!(app.pump_pulses(), 1);
    assert_eq!(app.gate_state(), GateState::Idle);
    assert!(app.gate().snapshot().watered_today);
}

#[test]
fn press_inside_window_pumps_in_the_same_iteration() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, WINDOW);

    board.switch_down = true;
    let report = app.step(&mut board, &mut sink);
    assert_eq!(report.press, Some(PressOutcome::Armed));
    assert!(report.pumped);
}

#[test]
fn unarmed_gate_never_pumps() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, WINDOW);
    for _ in 0..20 {
        assert!(!app.step(&mut board, &mut sink).pumped);
    }
    assert_eq!(app.pump_pulses(), 0);
}

#[test]
fn auto_water_on_holds_an_armed_cycle() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, CALM);
    press_switch(&mut app, &mut board, &mut sink);

    signals.set_auto_water_enabled(true);
    board.adc = WINDOW;
    for _ in 0..3 {
        assert!(!app.step(&mut board, &mut sink).pumped);
    }
    signals.set_auto_water_enabled(false);
    assert!(app.step(&mut board, &mut sink).pumped);
}

#[test]
fn relay_failure_keeps_the_gate_armed_until_water_flows() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, CALM);
    press_switch(&mut app, &mut board, &mut sink);

    board.adc = WINDOW;
    board.relay_fails = true;
    assert!(!app.step(&mut board, &mut sink).pumped);
    assert!(sink.events.contains(&AppEvent::CycleFailed));
    assert!(!sink.events.iter().any(|e| matches!(e, AppEvent::CycleCompleted { .. })));
    assert_eq!(app.gate_state(), GateState::ArmedToday);
    assert!(!app.gate().snapshot().watered_today);
    assert!(!board.level(Output::BlueLed));

    board.relay_fails = false;
    assert!(app.step(&mut board, &mut sink).pumped);
    assert_eq!(app.pump_pulses(), 1);
    assert!(app.gate().snapshot().watered_today);
}

// ── Day rollover ──────────────────────────────────────────────

#[test]
fn full_day_of_ticks_rearms_the_gate() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, WINDOW);
    press_switch(&mut app, &mut board, &mut sink);
    assert_eq!(app.pump_pulses(), 1);
    assert_eq!(press_switch(&mut app, &mut board, &mut sink), Some(PressOutcome::Ignored));

    for _ in 0..86_399 {
        signals.on_tick(1000);
    }
    app.step(&mut board, &mut sink);
    assert!(!sink.events.contains(&AppEvent::DayRolledOver));

    signals.on_tick(1000);
    assert_eq!(press_switch(&mut app, &mut board, &mut sink), Some(PressOutcome::Armed));
    assert!(sink.events.contains(&AppEvent::DayRolledOver));
    assert_eq!(app.pump_pulses(), 2);
}

#[test]
fn rollover_drops_a_pending_arm() {
    let signals = SharedSignals::new();
    let config = SystemConfig {
        daily_window_ms: 3000,
        ..SystemConfig::default()
    };
    let (mut app, mut board, mut sink) = boot_with(&signals, CALM, config);
    press_switch(&mut app, &mut board, &mut sink);
    assert_eq!(app.gate_state(), GateState::ArmedToday);

    for _ in 0..3 {
        signals.on_tick(app.config().tick_period_ms);
    }
    board.adc = WINDOW;
    assert!(!app.step(&mut board, &mut sink).pumped);
    assert_eq!(app.gate_state(), GateState::Idle);
    assert!(!app.gate().snapshot().daily_water_armed);
}
