//! Player body and collision box

use crate::world::{HitboxSettings, LevelDesc, Rect};
use super::animation::{FrameCycle, IdlePulse};
use super::constants::WALK_FRAME_TIME;

/// Horizontal facing, driven by the last direction input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Collision box as a fixed offset and size inside the sprite box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHitbox {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayerHitbox {
    /// World-space collision body for a player at `(x, y)`
    pub fn body_at(&self, x: f32, y: f32) -> Rect {
        Rect::new(x + self.offset_x, y + self.offset_y, self.width, self.height)
    }
}

impl From<HitboxSettings> for PlayerHitbox {
    fn from(s: HitboxSettings) -> Self {
        Self {
            offset_x: s.offset_x,
            offset_y: s.offset_y,
            width: s.width,
            height: s.height,
        }
    }
}

/// The player character.
///
/// `x`/`y` is the top-left of the sprite box, not of the collision body.
/// Created once; respawning moves it back to the spawn point.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Sprite box size
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    /// Negative is up
    pub jump_velocity: f32,
    pub grounded: bool,
    pub facing: Facing,
    pub hitbox: PlayerHitbox,
    /// Two-frame walk cycle; only runs while moving on the ground
    pub walk: FrameCycle,
    pub idle_pulse: IdlePulse,
}

impl Player {
    pub fn from_level(level: &LevelDesc) -> Self {
        Self {
            x: level.spawn[0],
            y: level.spawn[1],
            vx: 0.0,
            vy: 0.0,
            w: level.player.width,
            h: level.player.height,
            speed: level.player.speed,
            jump_velocity: level.player.jump_velocity,
            grounded: false,
            facing: Facing::Right,
            hitbox: level.hitbox.into(),
            walk: FrameCycle::new(WALK_FRAME_TIME),
            idle_pulse: IdlePulse::default(),
        }
    }

    /// Current collision body
    pub fn body(&self) -> Rect {
        self.hitbox.body_at(self.x, self.y)
    }

    /// Move back to the spawn point and stop.
    ///
    /// Touches only position and velocity, so calling it twice is the
    /// same as calling it once.
    pub fn respawn(&mut self, spawn: [f32; 2]) {
        self.x = spawn[0];
        self.y = spawn[1];
        self.vx = 0.0;
        self.vy = 0.0;
    }
}
