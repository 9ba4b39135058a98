//! WS2812B 5x5 matrix adapter over the RMT peripheral.
//!
//! Each pixel word from [`LedMatrixFrame::words`] carries G, R, B in its
//! top 24 bits; they are clocked out MSB first as 800 kHz NRZ pulses.

use core::time::Duration;

use esp_idf_hal::rmt::{FixedLengthSignal, PinState, Pulse, TxRmtDriver};

use crate::app::ports::LedStripPort;
use crate::drivers::led_matrix::{LED_COUNT, LedMatrixFrame};
use crate::error::ActuatorError;

const BITS_PER_PIXEL: usize = 24;
const SIGNAL_LEN: usize = LED_COUNT * BITS_PER_PIXEL;

/// Bit-0 and bit-1 pulse pairs at the RMT counter clock.
struct BitTiming {
    zero: (Pulse, Pulse),
    one: (Pulse, Pulse),
}

pub struct Ws2812Strip {
    tx: TxRmtDriver<'static>,
    timing: BitTiming,
}

impl Ws2812Strip {
    pub fn new(tx: TxRmtDriver<'static>) -> Result<Self, ActuatorError> {
        let hz = tx
            .counter_clock()
            .map_err(|_| ActuatorError::StripWriteFailed)?;
        let pulse = |state, ns| {
            Pulse::new_with_duration(hz, state, &Duration::from_nanos(ns))
                .map_err(|_| ActuatorError::StripWriteFailed)
        };
        let timing = BitTiming {
            zero: (pulse(PinState::High, 350)?, pulse(PinState::Low, 800)?),
            one: (pulse(PinState::High, 700)?, pulse(PinState::Low, 600)?),
        };
        Ok(Self { tx, timing })
    }
}

impl LedStripPort for Ws2812Strip {
    fn write_frame(&mut self, frame: &LedMatrixFrame) -> Result<(), ActuatorError> {
        let mut signal = FixedLengthSignal::<SIGNAL_LEN>::new();
        for (pixel, word) in frame.words().enumerate() {
            for bit in 0..BITS_PER_PIXEL {
                let set = word & (1 << (31 - bit)) != 0;
                let pair = if set { &self.timing.one } else { &self.timing.zero };
                signal
                    .set(pixel * BITS_PER_PIXEL + bit, pair)
                    .map_err(|_| ActuatorError::StripWriteFailed)?;
            }
        }
        self.tx
            .start_blocking(&signal)
            .map_err(|_| ActuatorError::StripWriteFailed)
    }
}
