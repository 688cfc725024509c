//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad backend; every query reports nothing held

use super::Action;

/// Stick deflection needed before it counts as a direction press
const STICK_THRESHOLD: f32 = 0.5;

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_action_down(&self, _action: Action) -> bool {
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button, Gilrs};

    pub struct Gamepad {
        /// None when the platform backend failed to start
        gilrs: Option<Gilrs>,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    log::warn!("Gamepad backend unavailable, keyboard only: {}", e);
                    None
                }
            };
            Self { gilrs }
        }

        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            // Events are processed internally by gilrs
            while gilrs.next_event().is_some() {}
        }

        pub fn has_gamepad(&self) -> bool {
            self.gilrs.as_ref().is_some_and(|g| g.gamepads().next().is_some())
        }

        pub fn is_action_down(&self, action: Action) -> bool {
            let Some(gilrs) = self.gilrs.as_ref() else { return false };
            let Some((_, gp)) = gilrs.gamepads().next() else { return false };

            match action {
                Action::MoveLeft => {
                    gp.is_pressed(Button::DPadLeft) || gp.value(Axis::LeftStickX) < -STICK_THRESHOLD
                }
                Action::MoveRight => {
                    gp.is_pressed(Button::DPadRight) || gp.value(Axis::LeftStickX) > STICK_THRESHOLD
                }
                Action::Jump => gp.is_pressed(Button::South),
            }
        }
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

pub use platform::Gamepad;
