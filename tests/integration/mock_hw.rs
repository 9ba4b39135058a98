//! Mock board for integration tests.
//!
//! One struct implements every port so it can be handed to
//! `PlantController::step` as the whole board.  Time is simulated: every
//! blocking delay advances the clock instead of sleeping.

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;
use plantstation::app::events::AppEvent;
use plantstation::app::ports::{
    ActuatorPort, AnalogPort, Button, ButtonPort, Channel, ClockPort, DisplayPort, EventSink,
    LedStripPort, Output, Rect,
};
use plantstation::drivers::led_matrix::LedMatrixFrame;
use plantstation::error::{ActuatorError, DisplayError, SensorError};

// ── Raw ADC presets ───────────────────────────────────────────

/// Temperature 50 %, moisture 60 %, light 50 %: no alarm, no watering window.
pub const CALM: [u16; 3] = [2048, 1638, 2048];
/// Temperature 19 %, moisture 60 %, light 17 %: inside the watering window.
pub const WINDOW: [u16; 3] = [800, 1638, 700];
/// Moisture 20 %.
pub const DRY: [u16; 3] = [2048, 3276, 2048];
/// Moisture 0 %.
pub const PARCHED: [u16; 3] = [2048, 4095, 2048];
/// Light 97 %.
pub const GLARE: [u16; 3] = [2048, 1638, 4000];

// ── Display call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOp {
    Clear,
    Text(String, u8, u8),
    Rect(Rect, bool),
    Line(u8, u8, u8, u8),
    Flush,
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub adc: [u16; 3],
    pub adc_fails: bool,
    pub page_down: bool,
    pub switch_down: bool,

    pub levels: HashMap<Output, bool>,
    /// Every output write except buzzer toggles.
    pub history: Vec<(Output, bool)>,
    pub buzzer_writes: u32,
    /// Switching the pump relay on fails.
    pub relay_fails: bool,

    pub display: Vec<DisplayOp>,
    /// Ops between the last clear and the last flush.
    pub presented: Vec<DisplayOp>,
    pub flush_fails: bool,

    pub strip_frames: Vec<LedMatrixFrame>,

    pub now_ns: u64,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new(adc: [u16; 3]) -> Self {
        Self {
            adc,
            adc_fails: false,
            page_down: false,
            switch_down: false,
            levels: HashMap::new(),
            history: Vec::new(),
            buzzer_writes: 0,
            relay_fails: false,
            display: Vec::new(),
            presented: Vec::new(),
            flush_fails: false,
            strip_frames: Vec::new(),
            now_ns: 0,
        }
    }

    pub fn level(&self, output: Output) -> bool {
        self.levels.get(&output).copied().unwrap_or(false)
    }

    pub fn writes_to(&self, output: Output) -> Vec<bool> {
        self.history
            .iter()
            .filter(|(o, _)| *o == output)
            .map(|(_, on)| *on)
            .collect()
    }

    /// Text drawn on the frame currently shown.
    pub fn shown_text(&self) -> Vec<&str> {
        self.presented
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text(t, _, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn shows(&self, text: &str) -> bool {
        self.shown_text().contains(&text)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.now_ns / 1_000_000
    }
}

impl AnalogPort for MockBoard {
    fn read_channel(&mut self, channel: Channel) -> Result<u16, SensorError> {
        if self.adc_fails {
            return Err(SensorError::AdcReadFailed);
        }
        Ok(self.adc[channel as usize])
    }
}

impl ButtonPort for MockBoard {
    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Page => self.page_down,
            Button::WaterSwitch => self.switch_down,
            Button::Mode => false,
        }
    }
}

impl ActuatorPort for MockBoard {
    fn set_output(&mut self, output: Output, on: bool) -> Result<(), ActuatorError> {
        if self.relay_fails && output == Output::PumpRelay && on {
            return Err(ActuatorError::GpioWriteFailed);
        }
        self.levels.insert(output, on);
        if output == Output::Buzzer {
            self.buzzer_writes += 1;
        } else {
            self.history.push((output, on));
        }
        Ok(())
    }
}

impl DisplayPort for MockBoard {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.push(DisplayOp::Clear);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) -> Result<(), DisplayError> {
        self.display.push(DisplayOp::Text(text.to_string(), x, y));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, fill: bool) -> Result<(), DisplayError> {
        self.display.push(DisplayOp::Rect(rect, fill));
        Ok(())
    }

    fn draw_line(&mut self, x0: u8, y0: u8, x1: u8, y1: u8) -> Result<(), DisplayError> {
        self.display.push(DisplayOp::Line(x0, y0, x1, y1));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.flush_fails {
            return Err(DisplayError::FlushFailed);
        }
        let start = self
            .display
            .iter()
            .rposition(|op| *op == DisplayOp::Clear)
            .map_or(0, |i| i + 1);
        self.presented = self.display[start..].to_vec();
        self.display.push(DisplayOp::Flush);
        Ok(())
    }
}

impl LedStripPort for MockBoard {
    fn write_frame(&mut self, frame: &LedMatrixFrame) -> Result<(), ActuatorError> {
        self.strip_frames.push(frame.clone());
        Ok(())
    }
}

impl DelayNs for MockBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns += u64::from(ns);
    }
}

impl ClockPort for MockBoard {
    fn now_us(&self) -> u64 {
        self.now_ns / 1000
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn take(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
