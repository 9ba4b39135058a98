//! Polled button sampler.
//!
//! The page button and the joystick switch are read once per loop
//! iteration.  There is no timestamp debounce: the loop's fixed sleep
//! spaces the samples far enough apart that contact bounce is never seen,
//! and a button held across several iterations counts once per iteration.
//!
//! The mode button is interrupt-driven and handled in
//! [`signals`](crate::signals).

use crate::app::ports::{Button, ButtonPort};

/// Levels seen by one iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSample {
    pub page: bool,
    pub water_switch: bool,
}

pub fn sample<B: ButtonPort + ?Sized>(buttons: &mut B) -> ButtonSample {
    ButtonSample {
        page: buttons.is_pressed(Button::Page),
        water_switch: buttons.is_pressed(Button::WaterSwitch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Levels {
        page: bool,
        switch: bool,
    }

    impl ButtonPort for Levels {
        fn is_pressed(&mut self, button: Button) -> bool {
            match button {
                Button::Page => self.page,
                Button::WaterSwitch => self.switch,
                Button::Mode => false,
            }
        }
    }

    #[test]
    fn held_button_reported_every_sample() {
        let mut levels = Levels { page: true, switch: false };
        assert!(sample(&mut levels).page);
        assert!(sample(&mut levels).page);
        levels.page = false;
        assert_eq!(sample(&mut levels), ButtonSample::default());
    }

    #[test]
    fn switch_sampled_independently() {
        let mut levels = Levels { page: false, switch: true };
        let s = sample(&mut levels);
        assert!(s.water_switch && !s.page);
    }
}
