//! Game action definitions
//!
//! The platformer only needs three logical inputs; physical keys and
//! gamepad buttons are mapped onto these in `state.rs`.

use std::collections::HashSet;

/// All possible game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Jump];
}

/// Snapshot of the actions held down at the start of a frame.
///
/// Taken once per frame and passed into the game update, so the
/// simulation never reads input devices directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldActions {
    held: HashSet<Action>,
}

impl HeldActions {
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Horizontal intent: -1, 0 or 1. Holding both directions cancels out.
    pub fn horizontal(&self) -> i8 {
        match (self.is_held(Action::MoveLeft), self.is_held(Action::MoveRight)) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

impl FromIterator<Action> for HeldActions {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self { held: iter.into_iter().collect() }
    }
}
