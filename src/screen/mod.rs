//! Screen controller: which of the seven pages is active, and whether the
//! alarm preempts it.
//!
//! ```text
//!            page button
//!   ┌───────────────────────────────────────────────────────┐
//!   ▼                                                       │
//!  [1 AutoWaterToggle]─▶[2 Temp]─▶[3 Light]─▶[4 Moisture]─▶[5 Health]─▶[6 Blank]
//!   ▲
//!   │ celebration done
//!  [0 Test] ◀── boot / mode button
//! ```
//!
//! Mode 0 is only reachable at boot or through the mode button; paging
//! wraps from 6 straight back to 1.

pub mod pages;

use crate::config::SystemConfig;
use crate::error::DisplayError;
use crate::app::ports::DisplayPort;
use crate::health::HealthStatus;
use crate::sensors::SensorReading;

// ---------------------------------------------------------------------------
// Screen mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScreenMode {
    Test = 0,
    AutoWaterToggle = 1,
    TempDetail = 2,
    LightDetail = 3,
    MoistureDetail = 4,
    HealthPanel = 5,
    Blank = 6,
}

impl ScreenMode {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            0 => Some(Self::Test),
            1 => Some(Self::AutoWaterToggle),
            2 => Some(Self::TempDetail),
            3 => Some(Self::LightDetail),
            4 => Some(Self::MoistureDetail),
            5 => Some(Self::HealthPanel),
            6 => Some(Self::Blank),
            _ => None,
        }
    }

    /// Next page.  `Blank` wraps to `AutoWaterToggle`, never to `Test`.
    pub fn advance(self) -> Self {
        match self {
            Self::Test => Self::AutoWaterToggle,
            Self::AutoWaterToggle => Self::TempDetail,
            Self::TempDetail => Self::LightDetail,
            Self::LightDetail => Self::MoistureDetail,
            Self::MoistureDetail => Self::HealthPanel,
            Self::HealthPanel => Self::Blank,
            Self::Blank => Self::AutoWaterToggle,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::AutoWaterToggle => "auto_water",
            Self::TempDetail => "temperature",
            Self::LightDetail => "light",
            Self::MoistureDetail => "moisture",
            Self::HealthPanel => "health",
            Self::Blank => "blank",
        }
    }
}

// ---------------------------------------------------------------------------
// Alarm override
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmCause {
    /// Moisture under the thirst threshold: the thirst screen is shown.
    Thirst,
    LowMoisture,
    ExcessLight,
}

impl AlarmCause {
    pub fn label(self) -> &'static str {
        match self {
            Self::Thirst => "umidade critica",
            Self::LowMoisture => "umidade baixa",
            Self::ExcessLight => "luz excessiva",
        }
    }
}

/// Decide whether the alarm preempts normal paging.
///
/// Low moisture is ignored while a celebration is pending; excess light
/// always alarms.
pub fn alarm_cause(
    reading: &SensorReading,
    config: &SystemConfig,
    celebration_pending: bool,
) -> Option<AlarmCause> {
    if reading.moisture_pct < config.alarm_moisture_below_pct && !celebration_pending {
        if reading.moisture_pct < config.thirst_moisture_below_pct {
            return Some(AlarmCause::Thirst);
        }
        return Some(AlarmCause::LowMoisture);
    }
    if reading.light_pct > config.alarm_light_above_pct {
        return Some(AlarmCause::ExcessLight);
    }
    None
}

/// Joystick X hysteresis for the auto-water toggle page.
pub fn toggle_from_joystick(raw_x: u16, current: bool, config: &SystemConfig) -> bool {
    if raw_x > config.toggle_enable_above_raw {
        true
    } else if raw_x < config.toggle_disable_below_raw {
        false
    } else {
        current
    }
}

// ---------------------------------------------------------------------------
// Timed screen state
// ---------------------------------------------------------------------------

/// Boot-time test page countdown.  Runs once; never re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCountdown {
    remaining: u8,
    last_step_ms: u64,
}

impl TestCountdown {
    pub fn new(secs: u8) -> Self {
        Self {
            remaining: secs,
            last_step_ms: 0,
        }
    }

    /// Step the countdown at most once per second.  Returns the value to
    /// show, or `None` once the marker view has taken over.
    pub fn poll(&mut self, now_ms: u64) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        if now_ms.saturating_sub(self.last_step_ms) > 1000 {
            self.remaining -= 1;
            self.last_step_ms = now_ms;
        }
        Some(self.remaining)
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }
}

/// Alternating prompt / wiggling tree shown while the plant is thirsty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThirstAnimation {
    flip_ms: u32,
    wiggle_ms: u32,
    show_prompt: bool,
    last_flip_ms: u64,
    wiggle: u8,
    last_wiggle_ms: u64,
}

impl ThirstAnimation {
    pub fn new(flip_ms: u32, wiggle_ms: u32) -> Self {
        Self {
            flip_ms,
            wiggle_ms,
            show_prompt: false,
            last_flip_ms: 0,
            wiggle: 0,
            last_wiggle_ms: 0,
        }
    }

    fn poll(&mut self, now_ms: u64) -> ThirstFrame {
        if now_ms.saturating_sub(self.last_flip_ms) > u64::from(self.flip_ms) {
            self.show_prompt = !self.show_prompt;
            self.last_flip_ms = now_ms;
        }
        if self.show_prompt {
            return ThirstFrame::Prompt;
        }
        if now_ms.saturating_sub(self.last_wiggle_ms) > u64::from(self.wiggle_ms) {
            self.wiggle = self.wiggle.wrapping_add(1);
            self.last_wiggle_ms = now_ms;
        }
        ThirstFrame::Tree {
            raised: self.wiggle % 2 == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThirstFrame {
    Prompt,
    /// `raised` selects the shifted tree position.
    Tree { raised: bool },
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Everything a single render needs.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub reading: &'a SensorReading,
    pub alarm: Option<AlarmCause>,
    pub health: HealthStatus,
    pub auto_water_enabled: bool,
    pub now_ms: u64,
}

/// What the last render put on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Alarm(AlarmCause),
    Thirst(ThirstFrame),
    Page(ScreenMode),
}

pub struct ScreenController {
    mode: ScreenMode,
    countdown: TestCountdown,
    thirst: ThirstAnimation,
}

impl ScreenController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            mode: ScreenMode::Test,
            countdown: TestCountdown::new(config.test_countdown_secs),
            thirst: ThirstAnimation::new(config.thirst_flip_ms, config.tree_wiggle_ms),
        }
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    /// Returns the previous mode when it changed.
    pub fn set_mode(&mut self, mode: ScreenMode) -> Option<ScreenMode> {
        let prev = self.mode;
        self.mode = mode;
        (prev != mode).then_some(prev)
    }

    /// Page button.  Returns `(from, to)`.
    pub fn advance(&mut self) -> (ScreenMode, ScreenMode) {
        let from = self.mode;
        self.mode = from.advance();
        (from, self.mode)
    }

    pub fn countdown_remaining(&self) -> u8 {
        self.countdown.remaining()
    }

    /// Draw one full frame and flush it.
    pub fn render<D: DisplayPort + ?Sized>(
        &mut self,
        display: &mut D,
        input: &RenderInput<'_>,
    ) -> Result<View, DisplayError> {
        display.clear()?;
        let view = match input.alarm {
            Some(AlarmCause::Thirst) => {
                let frame = self.thirst.poll(input.now_ms);
                pages::draw_thirst(display, frame)?;
                View::Thirst(frame)
            }
            Some(cause) => {
                pages::draw_alert(display, cause)?;
                View::Alarm(cause)
            }
            None => {
                self.draw_page(display, input)?;
                View::Page(self.mode)
            }
        };
        display.flush()?;
        Ok(view)
    }

    fn draw_page<D: DisplayPort + ?Sized>(
        &mut self,
        display: &mut D,
        input: &RenderInput<'_>,
    ) -> Result<(), DisplayError> {
        let r = input.reading;
        match self.mode {
            ScreenMode::Test => match self.countdown.poll(input.now_ms) {
                Some(secs) => pages::draw_test_countdown(display, secs),
                None => pages::draw_test_marker(display, r.temperature_raw, r.moisture_raw),
            },
            ScreenMode::AutoWaterToggle => pages::draw_toggle(display, input.auto_water_enabled),
            ScreenMode::TempDetail => pages::draw_detail(
                display,
                &pages::TEMPERATURE_DETAIL,
                r.temperature_c(),
            ),
            ScreenMode::LightDetail => {
                pages::draw_detail(display, &pages::LIGHT_DETAIL, r.light_pct)
            }
            ScreenMode::MoistureDetail => {
                pages::draw_detail(display, &pages::MOISTURE_DETAIL, r.moisture_pct)
            }
            ScreenMode::HealthPanel => pages::draw_health(display, input.health),
            ScreenMode::Blank => Ok(()),
        }
    }
}
