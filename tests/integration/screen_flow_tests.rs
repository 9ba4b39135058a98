//! Integration tests for paging, the toggle page and the manual-watering
//! celebration.

use super::mock_hw::{CALM, DisplayOp, LogSink, MockBoard};

use plantstation::app::events::AppEvent;
use plantstation::app::service::PlantController;
use plantstation::config::SystemConfig;
use plantstation::screen::{ScreenMode, View, pages};
use plantstation::signals::SharedSignals;

fn boot_with(
    config: SystemConfig,
    signals: &SharedSignals,
) -> (PlantController<'_>, MockBoard, LogSink) {
    let mut app = PlantController::new(config, signals);
    let mut board = MockBoard::new(CALM);
    let mut sink = LogSink::new();
    app.start(&mut board, &mut sink);
    (app, board, sink)
}

fn boot(signals: &SharedSignals) -> (PlantController<'_>, MockBoard, LogSink) {
    boot_with(SystemConfig::default(), signals)
}

fn press_page(app: &mut PlantController<'_>, board: &mut MockBoard, sink: &mut LogSink) {
    board.page_down = true;
    app.step(board, sink);
    board.page_down = false;
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boots_on_test_page_with_countdown() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    assert_eq!(sink.events.first(), Some(&AppEvent::Started(ScreenMode::Test)));

    let report = app.step(&mut board, &mut sink);
    assert_eq!(report.view, Some(View::Page(ScreenMode::Test)));
    assert!(board.shows("teste adc"));
    assert!(board.shows("5..."));
}

#[test]
fn countdown_gives_way_to_marker() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    for _ in 0..30 {
        app.step(&mut board, &mut sink);
    }
    assert!(!board.shows("teste adc"));
    assert!(board.presented.iter().any(|op| matches!(op, DisplayOp::Rect(_, true))));
}

// ── Paging ────────────────────────────────────────────────────

#[test]
fn page_button_cycles_one_to_six_and_wraps() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);

    let expected = [
        ScreenMode::AutoWaterToggle,
        ScreenMode::TempDetail,
        ScreenMode::LightDetail,
        ScreenMode::MoistureDetail,
        ScreenMode::HealthPanel,
        ScreenMode::Blank,
        ScreenMode::AutoWaterToggle,
    ];
    for mode in expected {
        press_page(&mut app, &mut board, &mut sink);
        assert_eq!(app.mode(), mode);
    }
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ModeChanged { .. })), 7);
}

#[test]
fn detail_pages_show_current_values() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);

    press_page(&mut app, &mut board, &mut sink);
    press_page(&mut app, &mut board, &mut sink);
    // 50 % on the 0-64 °C proxy scale
    assert!(board.shows("32"));

    press_page(&mut app, &mut board, &mut sink);
    assert!(board.shows("50"));

    press_page(&mut app, &mut board, &mut sink);
    assert!(board.shows("60"));

    press_page(&mut app, &mut board, &mut sink);
    assert!(board.shows("PAINEL DE SAUDE"));
}

#[test]
fn blank_page_draws_nothing() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    for _ in 0..6 {
        press_page(&mut app, &mut board, &mut sink);
    }
    assert_eq!(app.mode(), ScreenMode::Blank);
    assert!(board.presented.is_empty());
}

// ── Toggle page ───────────────────────────────────────────────

#[test]
fn joystick_sets_auto_water_with_hysteresis() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    press_page(&mut app, &mut board, &mut sink);
    assert_eq!(app.mode(), ScreenMode::AutoWaterToggle);
    assert!(board.presented.contains(&DisplayOp::Rect(pages::OFF_BOX, false)));

    board.adc[0] = 3500;
    app.step(&mut board, &mut sink);
    assert!(signals.auto_water_enabled());
    assert!(board.presented.contains(&DisplayOp::Rect(pages::ON_BOX, false)));

    board.adc[0] = 2000;
    app.step(&mut board, &mut sink);
    assert!(signals.auto_water_enabled());

    board.adc[0] = 900;
    app.step(&mut board, &mut sink);
    assert!(!signals.auto_water_enabled());
}

#[test]
fn joystick_is_ignored_off_the_toggle_page() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    board.adc[0] = 4000;
    for _ in 0..3 {
        app.step(&mut board, &mut sink);
    }
    assert!(!signals.auto_water_enabled());
}

// ── Celebration ───────────────────────────────────────────────

#[test]
fn mode_button_plays_celebration_and_lands_on_toggle() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    for _ in 0..2 {
        press_page(&mut app, &mut board, &mut sink);
    }
    signals.set_auto_water_enabled(true);
    assert!(signals.on_mode_button_edge(50_000, true));

    let before = board.elapsed_ms();
    let report = app.step(&mut board, &mut sink);

    assert!(report.celebrated);
    assert_eq!(board.strip_frames.len(), 10);
    assert_eq!(board.strip_frames.last().map(|f| f.lit_count()), Some(0));
    assert!(board.elapsed_ms() - before >= 3210);
    assert_eq!(app.mode(), ScreenMode::AutoWaterToggle);
    assert_eq!(app.manual_waterings(), 1);
    assert!(!signals.celebration_pending());
    assert!(sink.events.contains(&AppEvent::ModeChanged {
        from: ScreenMode::TempDetail,
        to: ScreenMode::Test,
    }));
    assert!(sink.events.contains(&AppEvent::Celebrated { manual_waterings: 1 }));
}

#[test]
fn mode_button_is_ignored_while_auto_water_is_off() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    assert!(!signals.on_mode_button_edge(50_000, true));

    let report = app.step(&mut board, &mut sink);
    assert!(!report.celebrated);
    assert!(board.strip_frames.is_empty());
}

#[test]
fn page_press_cancels_a_pending_celebration() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    signals.set_auto_water_enabled(true);
    assert!(signals.on_mode_button_edge(50_000, true));

    press_page(&mut app, &mut board, &mut sink);
    assert!(board.strip_frames.is_empty());
    assert_eq!(app.manual_waterings(), 0);
    assert_eq!(app.mode(), ScreenMode::AutoWaterToggle);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_follows_configured_interval() {
    let signals = SharedSignals::new();
    let config = SystemConfig {
        telemetry_interval_steps: 2,
        ..SystemConfig::default()
    };
    let (mut app, mut board, mut sink) = boot_with(config, &signals);
    for _ in 0..5 {
        app.step(&mut board, &mut sink);
    }
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 2);

    let t = app.build_telemetry();
    assert_eq!(t.moisture_pct, 60);
    assert_eq!(t.temperature_c, 32);
    assert_eq!(t.alarm, None);
}

#[test]
fn failed_adc_keeps_last_values() {
    let signals = SharedSignals::new();
    let (mut app, mut board, mut sink) = boot(&signals);
    let good = app.step(&mut board, &mut sink).reading;

    board.adc_fails = true;
    let stale = app.step(&mut board, &mut sink).reading;
    assert_eq!(stale, good);
    assert_eq!(app.build_telemetry().failed_reads, 3);
}
