//! PlantStation Firmware: Main Entry Point
//!
//! Hexagonal architecture around a blocking superloop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    OledDisplay    Ws2812Strip    Esp32Clock   │
//! │  (ADC+GPIO)         (DisplayPort)  (LedStripPort) (ClockPort)  │
//! │            └──────────── Station (Board) ───────────┘          │
//! │  LogEventSink (EventSink)                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           PlantController (pure logic)                 │    │
//! │  │  Screen · WateringGate · Alarm · Health                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                              ▲                                 │
//! │        SIGNALS ◀── mode button ISR · 1 s day-window timer      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::rmt::TxRmtDriver;
use esp_idf_hal::rmt::config::TransmitConfig;
use esp_idf_hal::units::Hertz;
use log::info;

use plantstation::adapters::hardware::HardwareAdapter;
use plantstation::adapters::log_sink::LogEventSink;
use plantstation::adapters::oled::OledDisplay;
use plantstation::adapters::station::Station;
use plantstation::adapters::time::Esp32Clock;
use plantstation::adapters::ws2812::Ws2812Strip;
use plantstation::app::service::PlantController;
use plantstation::config::SystemConfig;
use plantstation::drivers::{hw_init, hw_timer};
use plantstation::error::Error;
use plantstation::pins;
use plantstation::signals::SIGNALS;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PlantStation v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;
    info!("config: {}", serde_json::to_string(&config)?);

    // Applies the configured debounce and day window to SIGNALS before the
    // ISR and the timer can fire.
    let mut app = PlantController::new(config, &SIGNALS);

    // ── 3. Raw peripherals (ADC, GPIO, mode ISR, day timer) ───
    hw_init::init_peripherals()
        .map_err(Error::from)
        .context("peripheral init")?;
    hw_init::init_isr_service()
        .map_err(Error::from)
        .context("mode button ISR")?;
    hw_timer::start_timers(app.config().tick_period_ms);

    // ── 4. Typed peripherals (I²C OLED, RMT LED matrix) ───────
    let p = Peripherals::take()?;

    // SAFETY: these pins are reserved for the OLED and the matrix in
    // `pins` and are not configured anywhere else.
    let (sda, scl, matrix_pin) = unsafe {
        (
            AnyIOPin::new(pins::I2C_SDA_GPIO),
            AnyIOPin::new(pins::I2C_SCL_GPIO),
            AnyOutputPin::new(pins::LED_MATRIX_GPIO),
        )
    };
    let i2c = I2cDriver::new(
        p.i2c1,
        sda,
        scl,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ)),
    )?;
    let oled = OledDisplay::new(i2c, pins::OLED_I2C_ADDR)
        .map_err(Error::from)
        .context("OLED init")?;

    let tx = TxRmtDriver::new(
        p.rmt.channel0,
        matrix_pin,
        &TransmitConfig::new().clock_divider(1),
    )?;
    let matrix = Ws2812Strip::new(tx)
        .map_err(Error::from)
        .context("LED matrix init")?;

    let mut board = Station {
        hw: HardwareAdapter::new(),
        clock: Esp32Clock::new(),
        oled,
        matrix,
    };
    board.hw.all_off();

    // ── 5. Controller ─────────────────────────────────────────
    let mut sink = LogEventSink::new();
    app.start(&mut board, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Superloop ──────────────────────────────────────────
    loop {
        app.step(&mut board, &mut sink);
    }
}
