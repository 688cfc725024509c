//! Input state management
//!
//! Polls both keyboard (macroquad) and gamepad input, combining them into
//! a unified action-based snapshot.

use macroquad::prelude::{is_key_down, KeyCode};
use super::{Action, Gamepad, HeldActions};

/// Keyboard bindings per action; any one key held triggers the action
pub fn keys_for(action: Action) -> &'static [KeyCode] {
    match action {
        Action::MoveLeft => &[KeyCode::Left, KeyCode::A],
        Action::MoveRight => &[KeyCode::Right, KeyCode::D],
        Action::Jump => &[KeyCode::Up, KeyCode::W, KeyCode::Space],
    }
}

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        let gamepad = Gamepad::new();
        if gamepad.has_gamepad() {
            log::info!("Gamepad connected");
        }
        Self { gamepad }
    }

    /// Read every device once and return what is held this frame
    pub fn snapshot(&mut self) -> HeldActions {
        self.gamepad.poll();
        Action::ALL
            .into_iter()
            .filter(|&action| self.keyboard_down(action) || self.gamepad.is_action_down(action))
            .collect()
    }

    fn keyboard_down(&self, action: Action) -> bool {
        keys_for(action).iter().any(|&key| is_key_down(key))
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
