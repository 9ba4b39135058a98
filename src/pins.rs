//! GPIO / peripheral pin assignments for the PlantStation board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Buttons (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// "A" button: falling-edge interrupt, manual-watering acknowledgment.
pub const MODE_BUTTON_GPIO: i32 = 5;
/// "B" button: polled, advances the display page.
pub const PAGE_BUTTON_GPIO: i32 = 6;
/// Joystick push switch: polled, arms the daily watering cycle.
pub const WATER_SWITCH_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Indicators, buzzer and pump relay
// ---------------------------------------------------------------------------

pub const LED_GREEN_GPIO: i32 = 11;
pub const LED_BLUE_GPIO: i32 = 12;
pub const LED_RED_GPIO: i32 = 13;
pub const BUZZER_GPIO: i32 = 17;
/// Mini water pump relay (active HIGH).
pub const PUMP_RELAY_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Analog inputs (ADC1)
// ---------------------------------------------------------------------------

/// Joystick X axis, temperature proxy.  ADC1 channel 0 (GPIO 1).
pub const TEMPERATURE_ADC_CHANNEL: u32 = 0;
/// Joystick Y axis, soil-moisture proxy.  ADC1 channel 1 (GPIO 2).
pub const MOISTURE_ADC_CHANNEL: u32 = 1;
/// Microphone, light proxy.  ADC1 channel 2 (GPIO 3).
pub const LIGHT_ADC_CHANNEL: u32 = 2;

// ---------------------------------------------------------------------------
// LED matrix (WS2812B, 5x5)
// ---------------------------------------------------------------------------

pub const LED_MATRIX_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 OLED)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
pub const OLED_I2C_ADDR: u8 = 0x3C;
pub const I2C_BAUD_HZ: u32 = 400_000;
