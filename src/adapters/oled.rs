//! SSD1306 128x64 OLED adapter (I²C, buffered graphics mode).
//!
//! Implements [`DisplayPort`] with `embedded-graphics` primitives drawn into
//! the driver's frame buffer; [`flush`](DisplayPort::flush) pushes the
//! buffer over the bus.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X9;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use esp_idf_hal::i2c::I2cDriver;
use log::info;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::app::ports::{DisplayPort, Rect};
use crate::error::DisplayError;

type Panel = Ssd1306<
    I2CInterface<I2cDriver<'static>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

pub struct OledDisplay {
    panel: Panel,
}

impl OledDisplay {
    /// Wrap an initialised I²C bus and bring the panel up blank.
    pub fn new(i2c: I2cDriver<'static>, address: u8) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel.init().map_err(|_| DisplayError::FlushFailed)?;
        panel.clear_buffer();
        panel.flush().map_err(|_| DisplayError::FlushFailed)?;
        info!("oled: 128x64 panel ready");
        Ok(Self { panel })
    }
}

fn point(x: u8, y: u8) -> Point {
    Point::new(i32::from(x), i32::from(y))
}

impl DisplayPort for OledDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.panel.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);
        Text::with_baseline(text, point(x, y), style, Baseline::Top)
            .draw(&mut self.panel)
            .map(|_| ())
            .map_err(|_| DisplayError::DrawFailed)
    }

    fn draw_rect(&mut self, rect: Rect, fill: bool) -> Result<(), DisplayError> {
        let style = if fill {
            PrimitiveStyle::with_fill(BinaryColor::On)
        } else {
            PrimitiveStyle::with_stroke(BinaryColor::On, 1)
        };
        Rectangle::new(
            point(rect.x, rect.y),
            Size::new(u32::from(rect.w), u32::from(rect.h)),
        )
        .into_styled(style)
        .draw(&mut self.panel)
        .map_err(|_| DisplayError::DrawFailed)
    }

    fn draw_line(&mut self, x0: u8, y0: u8, x1: u8, y1: u8) -> Result<(), DisplayError> {
        Line::new(point(x0, y0), point(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.panel)
            .map_err(|_| DisplayError::DrawFailed)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.panel.flush().map_err(|_| DisplayError::FlushFailed)
    }
}
