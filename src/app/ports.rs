//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PlantController (domain)
//! ```
//!
//! Driven adapters (ADC, buttons, outputs, OLED, LED strip, clock, event
//! sinks) implement these traits.  The
//! [`PlantController`](super::service::PlantController) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Interrupt registration and the periodic day-window tick are not ports:
//! they are wired by the device adapters straight into
//! [`SharedSignals`](crate::signals::SharedSignals).

use embedded_hal::delay::DelayNs;

use crate::drivers::led_matrix::LedMatrixFrame;
use crate::error::{ActuatorError, DisplayError, SensorError};

// ───────────────────────────────────────────────────────────────
// Analog input port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Logical ADC channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    /// Joystick X: simulated temperature.
    TemperatureProxy = 0,
    /// Joystick Y: simulated soil moisture.
    MoistureProxy = 1,
    /// Microphone: ambient light stand-in.
    LightProxy = 2,
}

pub trait AnalogPort {
    /// One blocking conversion, 0–4095.
    fn read_channel(&mut self, channel: Channel) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Digital input port
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Advances the display page.
    Page,
    /// Interrupt-driven manual-watering acknowledgment.  Its level is
    /// sampled by the edge handler; the loop never polls it.
    Mode,
    /// Joystick push switch, arms the daily watering.
    WaterSwitch,
}

/// Button levels.
pub trait ButtonPort {
    /// `true` while the (active-low) button is held down.
    fn is_pressed(&mut self, button: Button) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Digital output port (domain → hardware)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Output {
    RedLed,
    GreenLed,
    /// Mirrors the pump relay while a watering pulse runs.
    BlueLed,
    Buzzer,
    PumpRelay,
}

pub trait ActuatorPort {
    fn set_output(&mut self, output: Output, on: bool) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (128x64 monochrome bitmap)
// ───────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u8,
    pub y: u8,
    pub w: u8,
    pub h: u8,
}

impl Rect {
    pub const fn new(x: u8, y: u8, w: u8, h: u8) -> Self {
        Self { x, y, w, h }
    }
}

/// Drawing calls only touch the frame buffer; nothing is visible until
/// [`flush`](DisplayPort::flush).
pub trait DisplayPort {
    /// Blank the frame buffer.
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: u8, y: u8) -> Result<(), DisplayError>;

    /// Outline (or fill) a rectangle.
    fn draw_rect(&mut self, rect: Rect, fill: bool) -> Result<(), DisplayError>;

    /// Draw a one-pixel line between two points.
    fn draw_line(&mut self, x0: u8, y0: u8, x1: u8, y1: u8) -> Result<(), DisplayError>;

    /// Present the frame buffer.
    fn flush(&mut self) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Addressable LED strip port
// ───────────────────────────────────────────────────────────────

pub trait LedStripPort {
    /// Blocking transmit of all 25 pixels (G, R, B, padding per word).
    fn write_frame(&mut self, frame: &LedMatrixFrame) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time plus blocking delays.
pub trait ClockPort: DelayNs {
    /// Microseconds since boot.
    fn now_us(&self) -> u64;

    /// Milliseconds since boot.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

// ───────────────────────────────────────────────────────────────
// Board (everything the control loop touches)
// ───────────────────────────────────────────────────────────────

/// Convenience bound for a single adapter implementing every port.
pub trait Board: AnalogPort + ButtonPort + ActuatorPort + DisplayPort + LedStripPort + ClockPort {}

impl<T> Board for T where
    T: AnalogPort + ButtonPort + ActuatorPort + DisplayPort + LedStripPort + ClockPort
{
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
