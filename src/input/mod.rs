//! Input handling with gamepad support
//!
//! Polls keyboard (macroquad) and gamepad into a per-frame snapshot of
//! held logical actions.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Keyboard only

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use gamepad::Gamepad;
pub use state::*;
