//! Game State Controller
//!
//! Owns the world, the player and every derived value (camera, render
//! transform, animation timers) and advances them once per frame from a
//! snapshot of held input.

use image::RgbaImage;

use crate::input::{Action, HeldActions};
use crate::world::{extract_geometry, LevelDesc};
use super::animation::FrameCycle;
use super::camera::{Camera, RenderTransform};
use super::collision::step_physics;
use super::constants::{COIN_FRAME_TIME, FALL_OUT_MARGIN, MAX_FRAME_DT};
use super::event::{EventQueue, GameEvent, RespawnCause};
use super::player::{Facing, Player};
use super::renderer::{HudCounts, RenderSnapshot};
use super::world::World;

pub struct GameState {
    pub world: World,
    pub player: Player,
    /// Fixed respawn point (sprite top-left)
    pub spawn: [f32; 2],
    pub camera: Camera,
    pub transform: RenderTransform,
    /// Spin cycle shared by every coin
    pub coin_cycle: FrameCycle,
    /// Coins paid out by mystery boxes
    pub mystery_coins: u32,
    /// What happened since the frame loop last drained it
    pub events: EventQueue<GameEvent>,
}

impl GameState {
    /// Build the play state for a level.
    ///
    /// `map_size` (from the background image) overrides the configured world
    /// size. `mask` geometry replaces the level's fallback geometry for each
    /// category it actually yields rectangles for.
    pub fn from_level(level: &LevelDesc, map_size: Option<(u32, u32)>, mask: Option<&RgbaImage>) -> Self {
        let mut world = World::from_level(level);
        let (mut width, mut height) = (level.world_width, level.world_height);
        if let Some((w, h)) = map_size {
            width = w;
            height = h;
            world.width = w as f32;
            world.height = h as f32;
        }

        if let Some(mask) = mask {
            let geometry = extract_geometry(mask, width, height);
            let applied = world.apply_mask_geometry(geometry);
            if !applied.solids {
                log::warn!("Collision mask has no solid pixels, keeping {} fallback solids", world.solids.len());
            }
            if !applied.kill_zones {
                log::warn!("Collision mask has no hazard pixels, keeping {} fallback kill zones", world.kill_zones.len());
            }
        }
        log::info!(
            "World {}x{}: {} solids, {} kill zones, {} collectibles",
            width, height, world.solids.len(), world.kill_zones.len(), world.collectibles.len()
        );

        let transform = RenderTransform::default();
        let mut camera = Camera::default();
        camera.resize(world.width, world.height, &transform);

        let state = Self {
            player: Player::from_level(level),
            spawn: level.spawn,
            world,
            camera,
            transform,
            coin_cycle: FrameCycle::new(COIN_FRAME_TIME),
            mystery_coins: 0,
            events: EventQueue::new(),
        };
        if state.spawn_falls_out() {
            log::warn!(
                "Spawn ({}, {}) is below the {}x{} world; the player will respawn every frame",
                state.spawn[0], state.spawn[1], width, height
            );
        }
        state
    }

    /// True if a fresh respawn would already be past the fall-out line
    pub fn spawn_falls_out(&self) -> bool {
        self.spawn[1] > self.world.height + FALL_OUT_MARGIN
    }

    /// Recompute scale and viewport for a new canvas size
    pub fn resize(&mut self, canvas_w: f32, canvas_h: f32) {
        self.transform = RenderTransform::cover(canvas_w, canvas_h, self.world.width, self.world.height);
        self.camera.resize(canvas_w, canvas_h, &self.transform);
        log::debug!(
            "Canvas {}x{}: scale {:.2}, view {:.0}x{:.0}",
            canvas_w, canvas_h, self.transform.scale, self.camera.view_w, self.camera.view_h
        );
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, held: &HeldActions) {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

        self.apply_input(held);

        let result = step_physics(&mut self.player, &mut self.world, dt);
        self.mystery_coins += result.coins_awarded();
        for index in result.boxes_opened {
            self.events.send(GameEvent::BoxOpened { index });
        }
        if let Some(index) = result.bounced_on {
            self.events.send(GameEvent::Bounced { index });
        }

        let player = &mut self.player;
        if player.vx.abs() > 0.0 && player.grounded {
            player.walk.advance(dt);
        } else {
            player.walk.reset();
        }
        player.idle_pulse.advance(dt);

        self.camera.follow(self.player.x, self.player.y, self.world.width, self.world.height);

        // Pickups below use this body even if a hazard respawns the player
        let body = self.player.body();
        if self.world.kill_zones.iter().any(|zone| body.overlaps(zone)) {
            self.respawn(RespawnCause::Hazard);
        }

        for (index, item) in self.world.collectibles.iter_mut().enumerate() {
            if !item.collected && body.overlaps(&item.rect) {
                item.collected = true;
                self.events.send(GameEvent::ItemCollected { index, kind: item.kind });
            }
        }

        self.coin_cycle.advance(dt);

        if self.player.y > self.world.height + FALL_OUT_MARGIN {
            self.respawn(RespawnCause::FellOut);
        }
    }

    fn apply_input(&mut self, held: &HeldActions) {
        let player = &mut self.player;
        match held.horizontal() {
            -1 => {
                player.vx = -player.speed;
                player.facing = Facing::Left;
            }
            1 => {
                player.vx = player.speed;
                player.facing = Facing::Right;
            }
            _ => player.vx = 0.0,
        }

        if held.is_held(Action::Jump) && player.grounded {
            player.vy = player.jump_velocity;
            player.grounded = false;
        }
    }

    /// Send the player back to spawn. Pickups, boxes and coins are kept.
    pub fn respawn(&mut self, cause: RespawnCause) {
        self.player.respawn(self.spawn);
        self.events.send(GameEvent::Respawn { cause });
    }

    pub fn hud(&self) -> HudCounts {
        HudCounts {
            coins_collected: self.world.collected_coin_pickups() + self.mystery_coins as usize,
            coins_total: self.world.total_coins(),
            has_key: self.world.has_key(),
        }
    }

    /// Read-only view of everything the renderer needs
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            world: &self.world,
            player: &self.player,
            camera: self.camera,
            transform: self.transform,
            coin_frame: self.coin_cycle.frame(),
            hud: self.hud(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::world::MysteryBox;
    use crate::world::{sample_level, CollectibleDesc, CollectibleKind, Rect};

    /// Empty 1000x500 world with no gravity, spawn inside the world
    fn test_level() -> LevelDesc {
        LevelDesc {
            world_width: 1000,
            world_height: 500,
            gravity: 0.0,
            spawn: [100.0, 100.0],
            fallback_solids: Vec::new(),
            fallback_kill_zones: Vec::new(),
            collectibles: Vec::new(),
            mystery_boxes: Vec::new(),
            bounce_pads: Vec::new(),
            ..sample_level()
        }
    }

    fn held(actions: &[Action]) -> HeldActions {
        actions.iter().copied().collect()
    }

    #[test]
    fn test_hazard_respawns_and_stops() {
        let mut level = test_level();
        level.fallback_kill_zones = vec![Rect::new(500.0, 300.0, 100.0, 100.0)];
        let mut state = GameState::from_level(&level, None, None);

        state.player.x = 520.0;
        state.player.y = 280.0;
        state.player.vy = 5000.0;

        state.update(0.0, &held(&[Action::MoveRight]));
        assert_eq!((state.player.x, state.player.y), (100.0, 100.0));
        assert_eq!((state.player.vx, state.player.vy), (0.0, 0.0));
        let events: Vec<_> = state.events.drain().collect();
        assert_eq!(events, vec![GameEvent::Respawn { cause: RespawnCause::Hazard }]);
    }

    #[test]
    fn test_fall_out_margin() {
        let mut state = GameState::from_level(&test_level(), None, None);

        state.player.y = 500.0 + 119.0;
        state.update(0.0, &HeldActions::default());
        assert_eq!(state.player.y, 619.0);
        assert_eq!(state.events.drain().count(), 0);

        state.player.y = 500.0 + 121.0;
        state.update(0.0, &HeldActions::default());
        assert_eq!((state.player.x, state.player.y), (100.0, 100.0));
        let events: Vec<_> = state.events.drain().collect();
        assert_eq!(events, vec![GameEvent::Respawn { cause: RespawnCause::FellOut }]);
    }

    #[test]
    fn test_respawn_twice_equals_once() {
        let mut state = GameState::from_level(&test_level(), None, None);
        state.player.x = 700.0;
        state.player.vx = 220.0;
        state.mystery_coins = 3;

        state.respawn(RespawnCause::Hazard);
        let once = state.player.clone();
        state.respawn(RespawnCause::Hazard);
        assert_eq!(state.player, once);
        assert_eq!(state.mystery_coins, 3);
    }

    #[test]
    fn test_collectibles_stay_collected() {
        let mut level = test_level();
        level.collectibles = vec![
            CollectibleDesc { kind: CollectibleKind::Coin, rect: Rect::new(100.0, 130.0, 48.0, 48.0) },
            CollectibleDesc { kind: CollectibleKind::Key, rect: Rect::new(900.0, 100.0, 48.0, 28.0) },
        ];
        let mut state = GameState::from_level(&level, None, None);

        state.update(0.0, &HeldActions::default());
        assert!(state.world.collectibles[0].collected);
        assert!(!state.world.collectibles[1].collected);
        assert_eq!(
            state.events.drain().collect::<Vec<_>>(),
            vec![GameEvent::ItemCollected { index: 0, kind: CollectibleKind::Coin }]
        );

        // still overlapping, but nothing is collected twice
        state.update(0.0, &HeldActions::default());
        assert_eq!(state.events.drain().count(), 0);

        state.respawn(RespawnCause::FellOut);
        assert!(state.world.collectibles[0].collected);

        let hud = state.hud();
        assert_eq!((hud.coins_collected, hud.coins_total, hud.has_key), (1, 1, false));
    }

    #[test]
    fn test_mystery_coins_count_towards_hud() {
        let mut level = test_level();
        level.mystery_boxes = vec![Rect::new(100.0, 50.0, 48.0, 48.0)];
        let mut state = GameState::from_level(&level, None, None);

        // body top at 145, box bottom at 98
        state.player.vy = -2000.0;
        state.update(0.033, &HeldActions::default());

        assert_eq!(state.mystery_coins, 1);
        assert!(state.world.mystery_boxes[0].used);
        assert_eq!(state.hud().coins_collected, 1);
        assert_eq!(state.hud().coins_total, 1);
        assert!(state.events.drain().any(|e| e == GameEvent::BoxOpened { index: 0 }));
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = GameState::from_level(&test_level(), None, None);
        state.update(1.0, &held(&[Action::MoveRight]));
        assert!((state.player.x - (100.0 + 220.0 * MAX_FRAME_DT)).abs() < 1e-3);

        let x = state.player.x;
        state.update(f32::NAN, &held(&[Action::MoveRight]));
        assert_eq!(state.player.x, x);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut state = GameState::from_level(&test_level(), None, None);

        state.update(0.01, &held(&[Action::MoveLeft]));
        assert_eq!(state.player.facing, Facing::Left);
        assert_eq!(state.player.vx, -220.0);

        state.update(0.01, &held(&[Action::MoveLeft, Action::MoveRight]));
        assert_eq!(state.player.vx, 0.0);
        assert_eq!(state.player.facing, Facing::Left);

        state.update(0.01, &HeldActions::default());
        assert_eq!(state.player.vx, 0.0);
        assert_eq!(state.player.facing, Facing::Left);
    }

    #[test]
    fn test_jump_needs_ground() {
        let mut level = test_level();
        level.gravity = 1700.0;
        // floor right under the spawn body (100 + 45 + 27 = 172)
        level.fallback_solids = vec![Rect::new(0.0, 172.0, 1000.0, 50.0)];
        let mut state = GameState::from_level(&level, None, None);

        state.update(0.016, &HeldActions::default());
        assert!(state.player.grounded);

        state.update(0.016, &held(&[Action::Jump]));
        assert!(!state.player.grounded);
        assert!(state.player.vy < 0.0);
        let vy = state.player.vy;

        // holding jump in the air does not re-apply the impulse
        state.update(0.016, &held(&[Action::Jump]));
        assert!(state.player.vy > vy);
    }

    #[test]
    fn test_walk_cycle_only_on_ground() {
        let mut level = test_level();
        level.gravity = 1700.0;
        level.fallback_solids = vec![Rect::new(0.0, 172.0, 1000.0, 50.0)];
        let mut state = GameState::from_level(&level, None, None);

        for _ in 0..5 {
            state.update(0.03, &held(&[Action::MoveRight]));
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.walk.frame(), 1);

        state.update(0.03, &HeldActions::default());
        assert_eq!(state.player.walk.frame(), 0);
    }

    #[test]
    fn test_coin_cycle_runs_regardless_of_player() {
        let mut state = GameState::from_level(&test_level(), None, None);
        for _ in 0..5 {
            state.update(0.033, &HeldActions::default());
        }
        assert_eq!(state.coin_cycle.frame(), 1);
        assert_eq!(state.snapshot().coin_frame, 1);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut state = GameState::from_level(&test_level(), None, None);
        state.resize(200.0, 100.0);
        assert_eq!(state.transform.scale, 1.0);
        assert_eq!((state.camera.view_w, state.camera.view_h), (200.0, 100.0));

        state.player.x = 600.0;
        state.player.y = 300.0;
        state.update(0.0, &HeldActions::default());
        assert_eq!(state.camera.x, 600.0 - 200.0 * 0.45);
        assert_eq!(state.camera.y, 300.0 - 100.0 * 0.55);
    }

    #[test]
    fn test_map_size_and_mask_override_level() {
        let mut level = test_level();
        level.fallback_solids = vec![Rect::new(0.0, 0.0, 5.0, 5.0)];
        level.fallback_kill_zones = vec![Rect::new(1.0, 1.0, 1.0, 1.0)];

        let mut mask = RgbaImage::new(40, 20);
        for x in 0..40 {
            mask.put_pixel(x, 19, image::Rgba([0, 0, 0, 255]));
        }

        let state = GameState::from_level(&level, Some((40, 20)), Some(&mask));
        assert_eq!((state.world.width, state.world.height), (40.0, 20.0));
        assert_eq!(state.world.solids, vec![Rect::new(0.0, 19.0, 40.0, 1.0)]);
        // no blue pixels, so the configured kill zones stay
        assert_eq!(state.world.kill_zones, vec![Rect::new(1.0, 1.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_spawn_below_fallback_world() {
        let level = sample_level();
        let state = GameState::from_level(&level, None, None);
        assert_eq!(state.world.height, 515.0);
        assert!(state.spawn_falls_out());

        // the map image makes the world tall enough
        let state = GameState::from_level(&level, Some((1836, 1030)), None);
        assert!(!state.spawn_falls_out());
        assert!(!GameState::from_level(&test_level(), None, None).spawn_falls_out());
    }

    #[test]
    fn test_box_state_survives_respawn() {
        let mut state = GameState::from_level(&test_level(), None, None);
        state.world.mystery_boxes.push(MysteryBox { rect: Rect::new(0.0, 0.0, 1.0, 1.0), used: true });
        state.respawn(RespawnCause::Hazard);
        assert!(state.world.mystery_boxes[0].used);
    }
}
