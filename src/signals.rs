//! Interrupt / timer → main-loop handoff.
//!
//! Two asynchronous producers share state with the control loop:
//!
//! ```text
//! ┌──────────────────┐                 ┌──────────────────┐
//! │ Mode button ISR  │──┐              │                  │
//! │ (falling edge)   │  │  ┌────────┐  │                  │
//! └──────────────────┘  ├─▶│SIGNALS │◀─│    Main loop     │
//! ┌──────────────────┐  │  │(atomic)│  │    (consumer)    │
//! │ 1 s tick timer   │──┘  └────────┘  │                  │
//! └──────────────────┘                 └──────────────────┘
//! ```
//!
//! Every field is a single machine-word atomic.  Producers never block and
//! never update more than one field as a unit; the loop reads and clears the
//! flags at fixed points of each iteration.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::{DAILY_WINDOW_MS, MODE_BUTTON_DEBOUNCE_US};

/// Flags and counters written from interrupt context.
pub struct SharedSignals {
    /// Minimum spacing between accepted mode-button edges.
    debounce_us: AtomicU32,
    /// Length of one watering day.
    daily_window_ms: AtomicU32,

    /// Timestamp (µs, truncated) of the last edge that passed the debounce window.
    last_edge_us: AtomicU32,
    /// ISR → loop: jump to the test page before celebrating.
    mode_reset: AtomicBool,
    /// ISR → loop: play the manual-watering celebration.
    celebrate: AtomicBool,
    /// ISR → loop: blank the display before the next draw.
    clear_screen: AtomicBool,
    /// Loop → ISR: mirror of the auto-water toggle.
    auto_water_enabled: AtomicBool,

    /// Timer: milliseconds accumulated in the current day window.
    elapsed_ms: AtomicU32,
    /// Timer → loop: the day window rolled over.
    day_rollover: AtomicBool,
}

/// Process-wide instance used by the firmware's ISR and timer callbacks.
pub static SIGNALS: SharedSignals = SharedSignals::new();

impl SharedSignals {
    pub const fn new() -> Self {
        Self::with_timing(MODE_BUTTON_DEBOUNCE_US, DAILY_WINDOW_MS)
    }

    pub const fn with_timing(debounce_us: u32, daily_window_ms: u32) -> Self {
        Self {
            debounce_us: AtomicU32::new(debounce_us),
            daily_window_ms: AtomicU32::new(daily_window_ms),
            last_edge_us: AtomicU32::new(0),
            mode_reset: AtomicBool::new(false),
            celebrate: AtomicBool::new(false),
            clear_screen: AtomicBool::new(false),
            auto_water_enabled: AtomicBool::new(false),
            elapsed_ms: AtomicU32::new(0),
            day_rollover: AtomicBool::new(false),
        }
    }

    /// Apply runtime timing.  The static instance starts with the factory
    /// values; the controller overwrites them from its configuration.
    pub fn configure(&self, debounce_us: u32, daily_window_ms: u32) {
        self.debounce_us.store(debounce_us, Ordering::Relaxed);
        self.daily_window_ms.store(daily_window_ms, Ordering::Relaxed);
    }

    pub fn daily_window_ms(&self) -> u32 {
        self.daily_window_ms.load(Ordering::Relaxed)
    }

    // ── Interrupt-context producers ───────────────────────────

    /// Mode button falling-edge handler.  Lock-free; safe in an ISR.
    ///
    /// Edges closer than the debounce window to the last accepted edge are
    /// dropped.  The press only counts while auto-water is enabled and the
    /// pin still reads low.  Returns `true` when the press was accepted.
    pub fn on_mode_button_edge(&self, now_us: u32, pin_low: bool) -> bool {
        if !self.auto_water_enabled.load(Ordering::Acquire) {
            return false;
        }
        let last = self.last_edge_us.load(Ordering::Relaxed);
        if now_us.wrapping_sub(last) <= self.debounce_us.load(Ordering::Relaxed) {
            return false;
        }
        self.last_edge_us.store(now_us, Ordering::Relaxed);
        if !pin_low {
            return false;
        }
        self.clear_screen.store(true, Ordering::Release);
        self.mode_reset.store(true, Ordering::Release);
        self.celebrate.store(true, Ordering::Release);
        true
    }

    /// Periodic tick callback.  Accumulates `period_ms` and raises the
    /// rollover flag once a full day window has elapsed.
    pub fn on_tick(&self, period_ms: u32) {
        let elapsed = self
            .elapsed_ms
            .load(Ordering::Relaxed)
            .saturating_add(period_ms);
        if elapsed >= self.daily_window_ms.load(Ordering::Relaxed) {
            self.elapsed_ms.store(0, Ordering::Relaxed);
            self.day_rollover.store(true, Ordering::Release);
        } else {
            self.elapsed_ms.store(elapsed, Ordering::Relaxed);
        }
    }

    // ── Main-loop side ────────────────────────────────────────

    pub fn set_auto_water_enabled(&self, enabled: bool) {
        self.auto_water_enabled.store(enabled, Ordering::Release);
    }

    pub fn auto_water_enabled(&self) -> bool {
        self.auto_water_enabled.load(Ordering::Acquire)
    }

    pub fn take_mode_reset(&self) -> bool {
        self.mode_reset.swap(false, Ordering::AcqRel)
    }

    pub fn take_clear_screen(&self) -> bool {
        self.clear_screen.swap(false, Ordering::AcqRel)
    }

    pub fn take_day_rollover(&self) -> bool {
        self.day_rollover.swap(false, Ordering::AcqRel)
    }

    /// A celebration was requested and has not finished (or been cancelled).
    pub fn celebration_pending(&self) -> bool {
        self.celebrate.load(Ordering::Acquire)
    }

    /// Called when the celebration completes or a page press cancels it.
    pub fn clear_celebration(&self) {
        self.celebrate.store(false, Ordering::Release);
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms.load(Ordering::Relaxed)
    }
}

impl Default for SharedSignals {
    fn default() -> Self {
        Self::new()
    }
}
