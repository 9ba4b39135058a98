//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod alarm;
pub mod button;
pub mod buzzer;
pub mod hw_init;
pub mod hw_timer;
pub mod led_matrix;
pub mod pump;
pub mod status_led;
