//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control loop of the plant station: page
//! selection, alarm precedence, the daily watering gate and the manual
//! watering celebration.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
