//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                    | Connects to            |
//! |------------|-------------------------------|------------------------|
//! | `hardware` | AnalogPort, ButtonPort,       | ESP32 ADC1, GPIO       |
//! |            | ActuatorPort                  |                        |
//! | `log_sink` | EventSink                     | Serial log output      |
//! | `time`     | ClockPort (+ DelayNs)         | esp_timer / HAL delay  |
//! | `oled`     | DisplayPort                   | SSD1306 over I²C       |
//! | `ws2812`   | LedStripPort                  | RMT channel 0          |
//! | `station`  | all of the above (`Board`)    | delegation only        |

pub mod hardware;
pub mod log_sink;
pub mod time;

#[cfg(target_os = "espidf")]
pub mod oled;
#[cfg(target_os = "espidf")]
pub mod station;
#[cfg(target_os = "espidf")]
pub mod ws2812;
