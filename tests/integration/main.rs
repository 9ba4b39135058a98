//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one slice of the control
//! loop against the mock board.  All tests run on the host (x86_64) with no
//! real hardware required.

mod alarm_tests;
mod mock_hw;
mod screen_flow_tests;
mod watering_tests;
