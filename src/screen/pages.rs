//! Page layouts for the 128x64 OLED.
//!
//! Coordinates are (x, y) of the top-left corner in pixels.  Text uses the
//! display's fixed 8-pixel font.

use core::fmt::Write;

use heapless::String;

use crate::app::ports::{DisplayPort, Rect};
use crate::error::DisplayError;
use crate::health::HealthStatus;
use crate::screen::{AlarmCause, ThirstFrame};

pub const WIDTH: u8 = 128;
pub const HEIGHT: u8 = 64;

const BORDER: Rect = Rect::new(0, 0, WIDTH, HEIGHT);
const HEADER: Rect = Rect::new(0, 0, WIDTH, 18);
const UPPER_HALF: Rect = Rect::new(0, 0, WIDTH, 32);

// ── Detail pages ─────────────────────────────────────────────

/// Static text of one "DADOS COLETADOS" page.
pub struct DetailLayout {
    pub title: &'static str,
    pub title_x: u8,
    pub ideal_label_x: u8,
    pub ideal_range: &'static str,
    pub unit: &'static str,
}

pub const TEMPERATURE_DETAIL: DetailLayout = DetailLayout {
    title: "<temperatura>",
    title_x: 14,
    ideal_label_x: 7,
    ideal_range: "20-35c",
    unit: "c",
};

pub const LIGHT_DETAIL: DetailLayout = DetailLayout {
    title: "<luminosidade>",
    title_x: 10,
    ideal_label_x: 7,
    ideal_range: "50-70%",
    unit: "%",
};

pub const MOISTURE_DETAIL: DetailLayout = DetailLayout {
    title: "<umidade>",
    title_x: 26,
    ideal_label_x: 6,
    ideal_range: "20-30%",
    unit: "%",
};

const VALUE_X: u8 = 63;
const UNIT_X: u8 = 80;
const DIVIDER_X: u8 = 57;
const DIVIDER_Y: u8 = 47;

pub fn draw_detail<D: DisplayPort + ?Sized>(
    d: &mut D,
    layout: &DetailLayout,
    value: u8,
) -> Result<(), DisplayError> {
    d.draw_text("DADOS COLETADOS", 7, 6)?;
    d.draw_line(DIVIDER_X, 32, DIVIDER_X, HEIGHT - 1)?;
    d.draw_rect(HEADER, false)?;
    d.draw_rect(UPPER_HALF, false)?;
    d.draw_rect(BORDER, false)?;
    d.draw_text(layout.title, layout.title_x, 21)?;
    d.draw_text("ideal:", layout.ideal_label_x, 34)?;
    d.draw_text(layout.ideal_range, VALUE_X, 34)?;
    d.draw_line(0, DIVIDER_Y, WIDTH - 1, DIVIDER_Y)?;
    d.draw_text("atual:", 7, 52)?;
    d.draw_text(&number(value), VALUE_X, 52)?;
    d.draw_text(layout.unit, UNIT_X, 52)
}

// ── Auto-water toggle ────────────────────────────────────────

pub const ON_BOX: Rect = Rect::new(24, 25, 30, 22);
pub const OFF_BOX: Rect = Rect::new(74, 25, 30, 22);

pub fn draw_toggle<D: DisplayPort + ?Sized>(d: &mut D, enabled: bool) -> Result<(), DisplayError> {
    d.draw_text("REGA AUTOMATICA", 3, 6)?;
    d.draw_text("ON", 32, 34)?;
    d.draw_text("OFF", 78, 34)?;
    d.draw_rect(if enabled { ON_BOX } else { OFF_BOX }, false)
}

// ── Health panel ─────────────────────────────────────────────

pub fn draw_health<D: DisplayPort + ?Sized>(
    d: &mut D,
    status: HealthStatus,
) -> Result<(), DisplayError> {
    d.draw_text("PAINEL DE SAUDE", 3, 6)?;
    d.draw_rect(HEADER, false)?;
    d.draw_rect(BORDER, false)?;
    d.draw_text("Status:", 10, 25)?;
    d.draw_text(status.label(), 10, 34)
}

// ── Test page ────────────────────────────────────────────────

const MARKER: u8 = 8;

pub fn draw_test_countdown<D: DisplayPort + ?Sized>(
    d: &mut D,
    secs: u8,
) -> Result<(), DisplayError> {
    d.draw_text("teste adc", 12, 32)?;
    d.draw_rect(BORDER, false)?;
    let mut s: String<8> = String::new();
    let _ = write!(s, "{secs}...");
    d.draw_text(&s, 88, 32)
}

/// Position of the 8x8 joystick marker for raw X/Y counts.
pub fn marker_position(raw_x: u16, raw_y: u16) -> (u8, u8) {
    let max = u32::from(crate::sensors::ADC_MAX);
    let span_x = u32::from(WIDTH - MARKER);
    let span_y = u32::from(HEIGHT - MARKER);
    let x = u32::from(raw_x).min(max) * span_x / max;
    let y = span_y - u32::from(raw_y).min(max) * span_y / max;
    (x as u8, y as u8)
}

pub fn draw_test_marker<D: DisplayPort + ?Sized>(
    d: &mut D,
    raw_x: u16,
    raw_y: u16,
) -> Result<(), DisplayError> {
    d.draw_rect(BORDER, false)?;
    let (x, y) = marker_position(raw_x, raw_y);
    d.draw_rect(Rect::new(x, y, MARKER, MARKER), true)
}

// ── Alarm screens ────────────────────────────────────────────

pub fn draw_alert<D: DisplayPort + ?Sized>(
    d: &mut D,
    cause: AlarmCause,
) -> Result<(), DisplayError> {
    d.draw_rect(HEADER, false)?;
    d.draw_rect(BORDER, false)?;
    d.draw_text("ALERTA", 40, 6)?;
    d.draw_text(cause.label(), 10, 34)
}

/// Tree parts relative to the resting position: (rect, filled).
const TREE: [(Rect, bool); 6] = [
    // trunk
    (Rect::new(62, 37, 4, 8), false),
    // pot
    (Rect::new(57, 45, 14, 6), true),
    (Rect::new(58, 51, 12, 1), true),
    // canopy
    (Rect::new(58, 31, 12, 6), true),
    (Rect::new(60, 27, 8, 4), true),
    (Rect::new(62, 23, 4, 4), true),
];

pub fn draw_thirst<D: DisplayPort + ?Sized>(
    d: &mut D,
    frame: ThirstFrame,
) -> Result<(), DisplayError> {
    match frame {
        ThirstFrame::Prompt => {
            d.draw_text("regue a planta!", 6, 30)?;
            d.draw_text("<pressione A>", 16, 48)
        }
        ThirstFrame::Tree { raised } => {
            let (dx, dy) = if raised { (2, 4) } else { (0, 0) };
            d.draw_rect(BORDER, false)?;
            for (part, fill) in TREE {
                d.draw_rect(Rect::new(part.x + dx, part.y + dy, part.w, part.h), fill)?;
            }
            d.draw_text("ESTOU COM SEDE", 7, 6)
        }
    }
}

fn number(value: u8) -> String<4> {
    let mut s = String::new();
    let _ = write!(s, "{value}");
    s
}
