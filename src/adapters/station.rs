//! The assembled board: one value implementing every port.
//!
//! [`PlantController::step`](crate::app::service::PlantController::step)
//! borrows a single `&mut impl Board`; this struct satisfies that bound by
//! delegating each port to the adapter that owns the peripheral.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{
    ActuatorPort, AnalogPort, Button, ButtonPort, Channel, ClockPort, DisplayPort, LedStripPort,
    Output, Rect,
};
use crate::drivers::led_matrix::LedMatrixFrame;
use crate::error::{ActuatorError, DisplayError, SensorError};

use super::hardware::HardwareAdapter;
use super::oled::OledDisplay;
use super::time::Esp32Clock;
use super::ws2812::Ws2812Strip;

pub struct Station {
    pub hw: HardwareAdapter,
    pub clock: Esp32Clock,
    pub oled: OledDisplay,
    pub matrix: Ws2812Strip,
}

impl AnalogPort for Station {
    fn read_channel(&mut self, channel: Channel) -> Result<u16, SensorError> {
        self.hw.read_channel(channel)
    }
}

impl ButtonPort for Station {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.hw.is_pressed(button)
    }
}

impl ActuatorPort for Station {
    fn set_output(&mut self, output: Output, on: bool) -> Result<(), ActuatorError> {
        self.hw.set_output(output, on)
    }
}

impl DisplayPort for Station {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.oled.clear()
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) -> Result<(), DisplayError> {
        self.oled.draw_text(text, x, y)
    }

    fn draw_rect(&mut self, rect: Rect, fill: bool) -> Result<(), DisplayError> {
        self.oled.draw_rect(rect, fill)
    }

    fn draw_line(&mut self, x0: u8, y0: u8, x1: u8, y1: u8) -> Result<(), DisplayError> {
        self.oled.draw_line(x0, y0, x1, y1)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.oled.flush()
    }
}

impl LedStripPort for Station {
    fn write_frame(&mut self, frame: &LedMatrixFrame) -> Result<(), ActuatorError> {
        self.matrix.write_frame(frame)
    }
}

impl DelayNs for Station {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}

impl ClockPort for Station {
    fn now_us(&self) -> u64 {
        self.clock.now_us()
    }
}
