//! Collision System
//!
//! Axis-separated box collision for the player against level geometry.
//! Each frame: gravity is added to vertical velocity, then the player moves
//! and is pushed out along X, then moves and is pushed out along Y.
//!
//! Obstacles are visited in list order and the collision body is
//! recomputed after every push, so with several overlapping obstacles the
//! last push wins. Level geometry order is therefore significant.

use crate::world::Rect;
use super::player::Player;
use super::world::World;

/// Axis being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// How a single push-out touched an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contact {
    /// Horizontal block, or vertical overlap with no vertical motion
    Blocked,
    /// Came down onto the top face
    Landed,
    /// Came up into the bottom face
    HeadBump,
}

/// Result of one physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Landed on a solid or box during the Y pass (before any bounce)
    pub landed: bool,
    /// Mystery boxes opened this step (index into `World::mystery_boxes`)
    pub boxes_opened: Vec<usize>,
    /// Last bounce pad that launched the player
    pub bounced_on: Option<usize>,
}

impl CollisionResult {
    /// Coins paid out by mystery boxes this step
    pub fn coins_awarded(&self) -> u32 {
        self.boxes_opened.len() as u32
    }
}

/// Advance the player one step: gravity, then X, then Y
pub fn step_physics(player: &mut Player, world: &mut World, dt: f32) -> CollisionResult {
    let mut result = CollisionResult::default();

    player.vy += world.gravity * dt;

    player.x += player.vx * dt;
    resolve_axis(player, world, Axis::X, &mut result);

    player.y += player.vy * dt;
    player.grounded = false;
    resolve_axis(player, world, Axis::Y, &mut result);

    log::trace!(
        "physics: pos=({:.1},{:.1}) vel=({:.1},{:.1}) grounded={} landed={}",
        player.x, player.y, player.vx, player.vy, player.grounded, result.landed
    );

    result
}

/// Push the player out of everything it overlaps along one axis.
///
/// Order: static solids, then mystery boxes, then (Y only, while falling)
/// bounce pads. A bounce overrides grounding from an earlier landing.
pub fn resolve_axis(player: &mut Player, world: &mut World, axis: Axis, result: &mut CollisionResult) {
    let mut body = player.body();

    for solid in &world.solids {
        if !body.overlaps(solid) {
            continue;
        }
        if push_out(player, solid, axis) == Contact::Landed {
            result.landed = true;
        }
        body = player.body();
    }

    for (index, mystery) in world.mystery_boxes.iter_mut().enumerate() {
        if !body.overlaps(&mystery.rect) {
            continue;
        }
        match push_out(player, &mystery.rect, axis) {
            Contact::Landed => result.landed = true,
            Contact::HeadBump => {
                if mystery.open() {
                    result.boxes_opened.push(index);
                }
            }
            Contact::Blocked => {}
        }
        body = player.body();
    }

    // only checked when still falling after solids and boxes
    if axis == Axis::Y && player.vy > 0.0 {
        for (index, pad) in world.bounce_pads.iter().enumerate() {
            if !body.overlaps(&pad.rect) {
                continue;
            }
            player.y = pad.rect.y - player.hitbox.offset_y - player.hitbox.height;
            player.vy = world.bounce_velocity;
            player.grounded = false;
            result.bounced_on = Some(index);
            body = player.body();
        }
    }
}

/// Move the player so its body sits against the obstacle's face opposite
/// to the direction of travel, and stop motion on that axis.
fn push_out(player: &mut Player, obstacle: &Rect, axis: Axis) -> Contact {
    let hitbox = player.hitbox;
    match axis {
        Axis::X => {
            if player.vx > 0.0 {
                player.x = obstacle.x - hitbox.offset_x - hitbox.width;
            } else if player.vx < 0.0 {
                player.x = obstacle.right() - hitbox.offset_x;
            }
            player.vx = 0.0;
            Contact::Blocked
        }
        Axis::Y => {
            let contact = if player.vy > 0.0 {
                player.y = obstacle.y - hitbox.offset_y - hitbox.height;
                player.grounded = true;
                Contact::Landed
            } else if player.vy < 0.0 {
                player.y = obstacle.bottom() - hitbox.offset_y;
                Contact::HeadBump
            } else {
                Contact::Blocked
            };
            player.vy = 0.0;
            contact
        }
    }
}
