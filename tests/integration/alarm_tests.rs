//! Integration tests for alarm precedence, blinking and the thirst screen.

use super::mock_hw::{CALM, DRY, GLARE, LogSink, MockBoard, PARCHED};

use plantstation::app::events::AppEvent;
use plantstation::app::ports::Output;
use plantstation::app::service::PlantController;
use plantstation::config::SystemConfig;
use plantstation::screen::{AlarmCause, ScreenMode, View};
use plantstation::signals::SharedSignals;
use plantstation::watering::GateState;

fn boot(signals: &SharedSignals, adc: [u16; 3]) -> (PlantController<'_>, MockBoard, LogSink) {
    let mut app = PlantController::new(SystemConfig::default(), signals);
    let mut board = MockBoard::new(adc);
    let mut sink = LogSink::new();
    app.start(&mut board, &mut sink);
    (app, board, sink)
}

#[test]
fn low_moisture_preempts_the_page() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, DRY);

    let report = app.step(&mut board, &mut sink);
    assert_eq!(report.alarm, Some(AlarmCause::LowMoisture));
    assert_eq!(report.view, Some(View::Alarm(AlarmCause::LowMoisture)));
    assert!(board.shows("ALERTA"));
    assert!(board.shows("umidade baixa"));
    // The page itself is untouched underneath.
    assert_eq!(app.mode(), ScreenMode::Test);
}

#[test]
fn paging_under_alarm_moves_the_mode_but_keeps_the_alert() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, DRY);

    board.page_down = true;
    let report = app.step(&mut board, &mut sink);
    board.page_down = false;

    assert_eq!(app.mode(), ScreenMode::AutoWaterToggle);
    assert_eq!(report.view, Some(View::Alarm(AlarmCause::LowMoisture)));
    assert!(!board.shows("ON"));
}

/// temp 50 %, moisture 0 %, light 90 %.
const DROUGHT_GLARE: [u16; 3] = [2048, 4095, 3686];

#[test]
fn drought_on_moisture_page_blinks_every_step_without_pumping() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, CALM);
    for _ in 0..4 {
        board.page_down = true;
        app.step(&mut board, &mut sink);
        board.page_down = false;
    }
    assert_eq!(app.mode(), ScreenMode::MoistureDetail);

    board.adc = DROUGHT_GLARE;
    board.history.clear();
    sink.take();

    let half_period = u64::from(app.config().blink_half_period_ms);
    let mut last_ms = board.elapsed_ms();
    for _ in 0..6 {
        let report = app.step(&mut board, &mut sink);
        assert_eq!(report.reading.temperature_pct, 50);
        assert_eq!(report.reading.moisture_pct, 0);
        assert_eq!(report.reading.light_pct, 90);
        assert_eq!(report.alarm, Some(AlarmCause::Thirst));
        assert!(matches!(report.view, Some(View::Thirst(_))));
        assert!(board.shows("regue a planta!") || board.shows("ESTOU COM SEDE"));
        assert!(!board.shows("20-30%"));

        assert_eq!(board.level(Output::RedLed), app.alarm_phase());
        assert_eq!(board.level(Output::Buzzer), app.alarm_phase());
        assert!(board.elapsed_ms() - last_ms > half_period);
        last_ms = board.elapsed_ms();
    }

    let red = board.writes_to(Output::RedLed);
    assert_eq!(red.len(), 6);
    assert!(red.windows(2).all(|w| w[0] != w[1]));

    assert!(!board.writes_to(Output::PumpRelay).contains(&true));
    assert_eq!(app.pump_pulses(), 0);
    assert_eq!(app.gate_state(), GateState::Idle);
    assert_eq!(app.mode(), ScreenMode::MoistureDetail);
    assert!(!sink.events.iter().any(|e| matches!(e, AppEvent::ModeChanged { .. })));
}

#[test]
fn alarm_raises_once_and_clears_once() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, DRY);

    for _ in 0..4 {
        app.step(&mut board, &mut sink);
    }
    board.adc = CALM;
    for _ in 0..3 {
        app.step(&mut board, &mut sink);
    }

    assert_eq!(sink.count(|e| matches!(e, AppEvent::AlarmRaised(_))), 1);
    assert_eq!(sink.count(|e| *e == AppEvent::AlarmCleared), 1);
    assert!(!board.level(Output::RedLed));
    assert!(!board.level(Output::Buzzer));
}

#[test]
fn alarm_blinks_red_led_and_sounds_tone() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, GLARE);

    let start = board.elapsed_ms();
    for _ in 0..4 {
        app.step(&mut board, &mut sink);
    }

    let red = board.writes_to(Output::RedLed);
    assert!(red.contains(&true));
    assert!(red.iter().skip(1).any(|on| !on));
    // 500 toggles of 2 writes per tone, plus the latch each iteration.
    assert!(board.buzzer_writes >= 4 * 1000);
    // settle + tone + loop sleep
    assert!(board.elapsed_ms() - start >= 4 * (150 + 500 + 195));
    assert!(board.shows("luz excessiva"));
}

#[test]
fn parched_soil_shows_thirst_animation() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, PARCHED);

    let report = app.step(&mut board, &mut sink);
    assert_eq!(report.alarm, Some(AlarmCause::Thirst));
    assert!(matches!(report.view, Some(View::Thirst(_))));

    let mut saw_prompt = false;
    let mut saw_tree = false;
    for _ in 0..12 {
        app.step(&mut board, &mut sink);
        saw_prompt |= board.shows("regue a planta!");
        saw_tree |= board.shows("ESTOU COM SEDE");
    }
    assert!(saw_prompt && saw_tree);
}

#[test]
fn celebration_suppresses_moisture_alarm_until_done() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, DRY);
    signals.set_auto_water_enabled(true);
    assert!(signals.on_mode_button_edge(10_000, true));

    let report = app.step(&mut board, &mut sink);
    assert!(report.celebrated);
    // Celebration finished within the iteration, so the alarm is back.
    assert_eq!(report.alarm, Some(AlarmCause::LowMoisture));
}

#[test]
fn flush_failure_is_reported_and_loop_continues() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals, GLARE);
    board.flush_fails = true;

    let report = app.step(&mut board, &mut sink);
    assert_eq!(report.view, None);
    assert_eq!(report.alarm, Some(AlarmCause::ExcessLight));
    assert!(board.buzzer_writes > 0);

    board.flush_fails = false;
    assert!(app.step(&mut board, &mut sink).view.is_some());
}
