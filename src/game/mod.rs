//! Game Runtime Module
//!
//! Everything that changes while playing: the world's interactive objects,
//! the player, collision resolution, per-frame orchestration and drawing.
//!
//! Frame flow:
//! - `GameState::update` reads a held-input snapshot and steps physics
//! - `collision` moves the player and resolves overlaps one axis at a time
//! - `GameState::snapshot` hands a read-only view to `renderer`

mod animation;
mod camera;
mod collision;
mod constants;
mod event;
mod player;
mod renderer;
mod state;
mod world;

pub use event::{GameEvent, RespawnCause};
pub use renderer::{draw_frame, ScreenTarget};
pub use state::GameState;
