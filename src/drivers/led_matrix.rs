//! 5x5 addressable LED matrix: frame buffer and the celebration script.
//!
//! The frame is a plain canvas.  Nothing reaches the strip until
//! [`LedStripPort::write_frame`] is called, and the celebration pushes the
//! whole frame after every pixel change so the reveal is visible step by step.
//!
//! ## Wire format
//!
//! Each pixel is sent as one 32-bit word, most significant byte first:
//!
//! ```text
//!  31      24 23      16 15       8 7        0
//! ┌──────────┬──────────┬──────────┬──────────┐
//! │  Green   │   Red    │   Blue   │ (unused) │
//! └──────────┴──────────┴──────────┴──────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::ports::LedStripPort;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const LED_COUNT: usize = 25;

const OFF: Rgb = (0, 0, 0);
const SMILE_GREEN: Rgb = (0, 100, 0);

/// Pack one pixel into the strip's GRB-padded word.
pub const fn grb_word((r, g, b): Rgb) -> u32 {
    ((g as u32) << 24) | ((r as u32) << 16) | ((b as u32) << 8)
}

/// 25 RGB pixels, indexed in strip order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedMatrixFrame {
    pixels: [Rgb; LED_COUNT],
}

impl LedMatrixFrame {
    pub const fn new() -> Self {
        Self {
            pixels: [OFF; LED_COUNT],
        }
    }

    /// Set one pixel.  Indices past the end are ignored.
    pub fn set(&mut self, index: usize, colour: Rgb) {
        if let Some(px) = self.pixels.get_mut(index) {
            *px = colour;
        }
    }

    pub fn get(&self, index: usize) -> Rgb {
        self.pixels.get(index).copied().unwrap_or(OFF)
    }

    pub fn clear(&mut self) {
        self.pixels = [OFF; LED_COUNT];
    }

    pub fn pixels(&self) -> &[Rgb; LED_COUNT] {
        &self.pixels
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != OFF).count()
    }

    /// Words in transmission order.
    pub fn words(&self) -> impl Iterator<Item = u32> + '_ {
        self.pixels.iter().map(|p| grb_word(*p))
    }
}

impl Default for LedMatrixFrame {
    fn default() -> Self {
        Self::new()
    }
}

// ── Celebration script ───────────────────────────────────────

/// One step of a matrix animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixStep {
    /// Change one pixel and push the frame.
    Set(usize, Rgb),
    /// Blank every pixel and push the frame.
    Clear,
    Wait(u32),
}

const LEFT_EYE: usize = 18;
const RIGHT_EYE: usize = 16;

/// Eyes, then the smile pixel by pixel, one wink of the left eye, blank.
pub const CELEBRATION: &[MatrixStep] = &[
    MatrixStep::Wait(10),
    MatrixStep::Set(LEFT_EYE, SMILE_GREEN),
    MatrixStep::Set(RIGHT_EYE, SMILE_GREEN),
    MatrixStep::Wait(500),
    MatrixStep::Set(9, SMILE_GREEN),
    MatrixStep::Wait(100),
    MatrixStep::Set(1, SMILE_GREEN),
    MatrixStep::Wait(100),
    MatrixStep::Set(2, SMILE_GREEN),
    MatrixStep::Wait(100),
    MatrixStep::Set(3, SMILE_GREEN),
    MatrixStep::Wait(100),
    MatrixStep::Set(5, SMILE_GREEN),
    MatrixStep::Wait(100),
    MatrixStep::Wait(1000),
    MatrixStep::Set(LEFT_EYE, OFF),
    MatrixStep::Wait(700),
    MatrixStep::Set(LEFT_EYE, SMILE_GREEN),
    MatrixStep::Wait(500),
    MatrixStep::Clear,
];

/// Owns the frame buffer and plays scripts on it.
pub struct LedMatrix {
    frame: LedMatrixFrame,
    write_failures: u32,
}

impl LedMatrix {
    pub fn new() -> Self {
        Self {
            frame: LedMatrixFrame::new(),
            write_failures: 0,
        }
    }

    pub fn frame(&self) -> &LedMatrixFrame {
        &self.frame
    }

    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    /// Play `script` to completion.  Blocks for the sum of its waits.
    pub fn play<H>(&mut self, script: &[MatrixStep], hw: &mut H)
    where
        H: LedStripPort + DelayNs + ?Sized,
    {
        for step in script {
            match *step {
                MatrixStep::Set(index, colour) => {
                    self.frame.set(index, colour);
                    self.push(hw);
                }
                MatrixStep::Clear => {
                    self.frame.clear();
                    self.push(hw);
                }
                MatrixStep::Wait(ms) => hw.delay_ms(ms),
            }
        }
    }

    fn push<S: LedStripPort + ?Sized>(&mut self, strip: &mut S) {
        if let Err(e) = strip.write_frame(&self.frame) {
            self.write_failures = self.write_failures.saturating_add(1);
            warn!("matrix: {}", e);
        }
    }
}

impl Default for LedMatrix {
    fn default() -> Self {
        Self::new()
    }
}

/// Total blocking time of a script in milliseconds.
pub fn script_duration_ms(script: &[MatrixStep]) -> u32 {
    script
        .iter()
        .map(|s| match s {
            MatrixStep::Wait(ms) => *ms,
            _ => 0,
        })
        .sum()
}
