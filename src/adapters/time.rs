//! ESP32 clock adapter.
//!
//! Implements [`ClockPort`] and its blocking [`DelayNs`] supertrait.
//!
//! - **`target_os = "espidf"`**: `esp_timer_get_time()` for the monotonic
//!   count, and the HAL delay (ROM busy-wait below one RTOS tick, FreeRTOS
//!   sleep above) so buzzer half-periods stay accurate.
//! - **`not(target_os = "espidf")`**: `std::time::Instant` and
//!   `std::thread::sleep` for host-side simulation.

use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;

/// Clock for the ESP32-S3 platform.
pub struct Esp32Clock {
    #[cfg(target_os = "espidf")]
    delay: esp_idf_hal::delay::Delay,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "espidf")]
            delay: esp_idf_hal::delay::Delay::new_default(),
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for Esp32Clock {
    #[cfg(target_os = "espidf")]
    fn now_us(&self) -> u64 {
        // SAFETY: esp_timer is started by the IDF before app_main.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl DelayNs for Esp32Clock {
    #[cfg(target_os = "espidf")]
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
