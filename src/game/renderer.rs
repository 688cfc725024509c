//! Frame Renderer
//!
//! Draws the map, pickups, player and HUD from a read-only snapshot of
//! game state. Drawing goes through [`RenderTarget`], so the frame layout
//! can be checked without a window.
//!
//! Map and pickups are placed in world space under the render transform.
//! The player is placed in screen space on whole pixels so the sprite
//! stays crisp. The HUD ignores the transform entirely.

use macroquad::prelude::{draw_texture_ex, vec2, Color, DrawTextureParams, Texture2D, BLACK, WHITE};

use crate::asset::SpriteSet;
use crate::world::{CollectibleKind, Rect};
use super::camera::{Camera, RenderTransform};
use super::constants::IDLE_SPEED_EPSILON;
use super::player::{Facing, Player};
use super::world::World;

pub const BACKGROUND: Color = Color::new(0.059, 0.090, 0.165, 1.0);
pub const MAP_PLACEHOLDER: Color = Color::new(0.722, 0.843, 0.859, 1.0);
pub const COIN_PLACEHOLDER: Color = Color::new(0.980, 0.800, 0.082, 1.0);
pub const PLAYER_PLACEHOLDER: Color = Color::new(0.145, 0.388, 0.922, 1.0);
pub const KEY_HIGHLIGHT: Color = Color::new(0.980, 0.800, 0.082, 0.35);
pub const KEY_DIM: Color = Color::new(0.0, 0.0, 0.0, 0.45);

/// HUD layout (screen pixels)
pub mod hud {
    pub const PADDING: f32 = 12.0;
    pub const COIN_SIZE: f32 = 24.0;
    pub const TEXT_GAP: f32 = 6.0;
    pub const TEXT_SIZE: f32 = 20.0;
    pub const KEY_GAP: f32 = 16.0;
    pub const KEY_W: f32 = 40.0;
    pub const KEY_H: f32 = 24.0;
    /// Highlight border around the key when collected
    pub const KEY_GLOW: f32 = 2.0;
}

/// How HUD text looks; `y` passed with it is the top of the text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub shadow: Option<Color>,
}

/// A surface the frame can be drawn onto. Origin top-left, y down.
pub trait RenderTarget {
    type Image;

    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Stretch `image` over `dest`, mirrored horizontally if `flip_x`
    fn draw_image(&mut self, image: &Self::Image, dest: Rect, flip_x: bool);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
    /// Width of `text` in pixels
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f32;
}

/// Counts shown in the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudCounts {
    /// Coin pickups taken plus mystery box payouts
    pub coins_collected: usize,
    /// Coin pickups plus mystery boxes
    pub coins_total: usize,
    pub has_key: bool,
}

impl HudCounts {
    pub fn coin_text(&self) -> String {
        format!("{} / {}", self.coins_collected, self.coins_total)
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub world: &'a World,
    pub player: &'a Player,
    pub camera: Camera,
    pub transform: RenderTransform,
    pub coin_frame: usize,
    pub hud: HudCounts,
}

impl RenderSnapshot<'_> {
    /// World-space rect relative to the camera, through the render transform
    fn world_to_screen(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        let t = &self.transform;
        Rect::new(x * t.scale + t.offset_x, y * t.scale + t.offset_y, w * t.scale, h * t.scale)
    }
}

/// Draw a full frame
pub fn draw_frame<T: RenderTarget>(target: &mut T, snap: &RenderSnapshot, sprites: &SpriteSet<T::Image>) {
    target.clear(BACKGROUND);
    draw_world(target, snap, sprites);
    draw_player(target, snap, sprites);
    draw_hud(target, snap, sprites);
}

fn draw_world<T: RenderTarget>(target: &mut T, snap: &RenderSnapshot, sprites: &SpriteSet<T::Image>) {
    let camera = &snap.camera;
    match &sprites.map {
        Some(map) => {
            let dest = snap.world_to_screen(
                (-camera.x).round(),
                (-camera.y).round(),
                snap.world.width,
                snap.world.height,
            );
            target.draw_image(map, dest, false);
        }
        None => {
            let dest = snap.world_to_screen(0.0, 0.0, camera.view_w, camera.view_h);
            target.fill_rect(dest, MAP_PLACEHOLDER);
        }
    }

    for item in snap.world.collectibles.iter().filter(|c| !c.collected) {
        let sprite = match item.kind {
            CollectibleKind::Key => sprites.key.as_ref(),
            CollectibleKind::Coin => sprites.coin_frame(snap.coin_frame),
        };
        if let Some(sprite) = sprite {
            let r = item.rect;
            let dest = snap.world_to_screen(r.x - camera.x, r.y - camera.y, r.w, r.h);
            target.draw_image(sprite, dest, false);
        }
    }
}

fn draw_player<T: RenderTarget>(target: &mut T, snap: &RenderSnapshot, sprites: &SpriteSet<T::Image>) {
    let player = snap.player;
    let idle_offset = if player.grounded && player.vx.abs() < IDLE_SPEED_EPSILON {
        player.idle_pulse.bob_offset()
    } else {
        0.0
    };

    let (px, py) = snap.transform.to_screen(
        player.x - snap.camera.x,
        player.y - snap.camera.y + idle_offset,
    );
    let (pw, ph) = snap.transform.scale_size(player.w, player.h);
    let dest = Rect::new(px, py, pw, ph);

    match sprites.walk_frame(player.walk.frame()) {
        // walk art faces left
        Some(frame) => target.draw_image(frame, dest, player.facing == Facing::Right),
        None => target.fill_rect(dest, PLAYER_PLACEHOLDER),
    }
}

fn draw_hud<T: RenderTarget>(target: &mut T, snap: &RenderSnapshot, sprites: &SpriteSet<T::Image>) {
    use self::hud::*;

    let coin_dest = Rect::new(PADDING, PADDING, COIN_SIZE, COIN_SIZE);
    match sprites.coin_frame(snap.coin_frame) {
        Some(coin) => target.draw_image(coin, coin_dest, false),
        None => target.fill_rect(coin_dest, COIN_PLACEHOLDER),
    }

    let style = TextStyle { size: TEXT_SIZE, color: WHITE, shadow: Some(BLACK) };
    let text = snap.hud.coin_text();
    let text_x = PADDING + COIN_SIZE + TEXT_GAP;
    target.draw_text(&text, text_x, PADDING + 2.0, &style);

    let key_x = text_x + target.measure_text(&text, &style) + KEY_GAP;
    let key_dest = Rect::new(key_x, PADDING, KEY_W, KEY_H);
    if let Some(key) = &sprites.key {
        target.draw_image(key, key_dest, false);
    }
    if snap.hud.has_key {
        let glow = Rect::new(key_x - KEY_GLOW, PADDING - KEY_GLOW, KEY_W + KEY_GLOW * 2.0, KEY_H + KEY_GLOW * 2.0);
        target.fill_rect(glow, KEY_HIGHLIGHT);
    } else {
        target.fill_rect(key_dest, KEY_DIM);
    }
}

/// Draws straight to the macroquad window
pub struct ScreenTarget;

impl RenderTarget for ScreenTarget {
    type Image = Texture2D;

    fn clear(&mut self, color: Color) {
        macroquad::window::clear_background(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        macroquad::shapes::draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn draw_image(&mut self, image: &Texture2D, dest: Rect, flip_x: bool) {
        draw_texture_ex(
            image,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                flip_x,
                ..Default::default()
            },
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        // macroquad places text by baseline
        let dims = macroquad::text::measure_text(text, None, style.size as u16, 1.0);
        let baseline = y + dims.offset_y;
        if let Some(shadow) = style.shadow {
            macroquad::text::draw_text(text, x + 1.0, baseline + 1.0, style.size, shadow);
        }
        macroquad::text::draw_text(text, x, baseline, style.size, style.color);
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f32 {
        macroquad::text::measure_text(text, None, style.size as u16, 1.0).width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameState;
    use crate::world::{sample_level, CollectibleDesc, LevelDesc};

    #[derive(Debug, Clone, PartialEq)]
    enum Cmd {
        Clear(Color),
        Fill(Rect, Color),
        Image(&'static str, Rect, bool),
        Text(String, f32, f32),
    }

    /// Records draw calls; images are just names
    #[derive(Default)]
    struct Recorder {
        cmds: Vec<Cmd>,
    }

    impl RenderTarget for Recorder {
        type Image = &'static str;

        fn clear(&mut self, color: Color) {
            self.cmds.push(Cmd::Clear(color));
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.cmds.push(Cmd::Fill(rect, color));
        }

        fn draw_image(&mut self, image: &&'static str, dest: Rect, flip_x: bool) {
            self.cmds.push(Cmd::Image(*image, dest, flip_x));
        }

        fn draw_text(&mut self, text: &str, x: f32, y: f32, _style: &TextStyle) {
            self.cmds.push(Cmd::Text(text.to_string(), x, y));
        }

        fn measure_text(&mut self, text: &str, _style: &TextStyle) -> f32 {
            text.len() as f32 * 10.0
        }
    }

    fn full_sprites() -> SpriteSet<&'static str> {
        SpriteSet {
            map: Some("map"),
            walk: [Some("walk0"), Some("walk1")],
            coin: [Some("coin0"), Some("coin1")],
            key: Some("key"),
        }
    }

    fn level() -> LevelDesc {
        LevelDesc {
            world_width: 1000,
            world_height: 500,
            spawn: [100.0, 100.0],
            collectibles: vec![
                CollectibleDesc { kind: CollectibleKind::Coin, rect: Rect::new(300.0, 100.0, 48.0, 48.0) },
                CollectibleDesc { kind: CollectibleKind::Key, rect: Rect::new(400.0, 100.0, 48.0, 28.0) },
            ],
            mystery_boxes: Vec::new(),
            ..sample_level()
        }
    }

    fn render(state: &GameState, sprites: &SpriteSet<&'static str>) -> Vec<Cmd> {
        let mut recorder = Recorder::default();
        draw_frame(&mut recorder, &state.snapshot(), sprites);
        recorder.cmds
    }

    fn player_cmd(cmds: &[Cmd]) -> Cmd {
        // clear, map, 2 pickups, then the player
        cmds[4].clone()
    }

    #[test]
    fn test_frame_order() {
        let state = GameState::from_level(&level(), None, None);
        let cmds = render(&state, &full_sprites());

        assert_eq!(cmds[0], Cmd::Clear(BACKGROUND));
        assert_eq!(cmds[1], Cmd::Image("map", Rect::new(0.0, 0.0, 1000.0, 500.0), false));
        assert_eq!(cmds[2], Cmd::Image("coin0", Rect::new(300.0, 100.0, 48.0, 48.0), false));
        assert_eq!(cmds[3], Cmd::Image("key", Rect::new(400.0, 100.0, 48.0, 28.0), false));
        assert!(matches!(cmds[4], Cmd::Image("walk0", _, _)));
    }

    #[test]
    fn test_player_faces_right_by_flipping() {
        let mut state = GameState::from_level(&level(), None, None);
        assert!(matches!(player_cmd(&render(&state, &full_sprites())), Cmd::Image(_, _, true)));

        state.player.facing = Facing::Left;
        assert!(matches!(player_cmd(&render(&state, &full_sprites())), Cmd::Image(_, _, false)));
    }

    #[test]
    fn test_player_snaps_to_pixels() {
        let mut state = GameState::from_level(&level(), None, None);
        state.transform = RenderTransform { scale: 1.5, offset_x: 0.0, offset_y: 0.0 };
        state.camera.x = 0.5;
        state.player.x = 10.0;
        state.player.y = 20.0;

        let expected = Rect::new(14.0, 30.0, 108.0, 108.0);
        assert_eq!(player_cmd(&render(&state, &full_sprites())), Cmd::Image("walk0", expected, true));
    }

    #[test]
    fn test_idle_bob_only_when_standing() {
        let mut state = GameState::from_level(&level(), None, None);
        state.player.idle_pulse.advance(std::f32::consts::FRAC_PI_2 / 6.0);
        state.camera.y = 0.25;

        state.player.grounded = true;
        let Cmd::Image(_, standing, _) = player_cmd(&render(&state, &full_sprites())) else {
            panic!("player not drawn as image");
        };
        // 100 - 0.25 - 1.5 rounds down
        assert_eq!(standing.y, 98.0);

        state.player.vx = 220.0;
        let Cmd::Image(_, running, _) = player_cmd(&render(&state, &full_sprites())) else {
            panic!("player not drawn as image");
        };
        assert_eq!(running.y, 100.0);
    }

    #[test]
    fn test_placeholders_for_missing_sprites() {
        let state = GameState::from_level(&level(), None, None);
        let cmds = render(&state, &SpriteSet::default());

        assert_eq!(cmds[1], Cmd::Fill(Rect::new(0.0, 0.0, 1000.0, 500.0), MAP_PLACEHOLDER));
        // pickups without art are skipped
        assert_eq!(cmds[2], Cmd::Fill(Rect::new(100.0, 100.0, 72.0, 72.0), PLAYER_PLACEHOLDER));
        assert_eq!(cmds[3], Cmd::Fill(Rect::new(12.0, 12.0, 24.0, 24.0), COIN_PLACEHOLDER));
    }

    #[test]
    fn test_collected_items_not_drawn() {
        let mut state = GameState::from_level(&level(), None, None);
        state.world.collectibles[0].collected = true;
        let cmds = render(&state, &full_sprites());
        assert!(!cmds.iter().any(|c| matches!(c, Cmd::Image("coin0", r, _) if r.x == 300.0)));
    }

    #[test]
    fn test_hud_layout() {
        let mut state = GameState::from_level(&level(), None, None);
        state.mystery_coins = 2;
        let cmds = render(&state, &full_sprites());
        let hud = &cmds[cmds.len() - 4..];

        assert_eq!(hud[0], Cmd::Image("coin0", Rect::new(12.0, 12.0, 24.0, 24.0), false));
        assert_eq!(hud[1], Cmd::Text("2 / 1".to_string(), 42.0, 14.0));
        // "2 / 1" measures 50 in the recorder
        let key_x = 42.0 + 50.0 + 16.0;
        assert_eq!(hud[2], Cmd::Image("key", Rect::new(key_x, 12.0, 40.0, 24.0), false));
        assert_eq!(hud[3], Cmd::Fill(Rect::new(key_x, 12.0, 40.0, 24.0), KEY_DIM));

        state.world.collectibles[1].collected = true;
        let cmds = render(&state, &full_sprites());
        let last = cmds.last().cloned();
        assert_eq!(last, Some(Cmd::Fill(Rect::new(key_x - 2.0, 10.0, 44.0, 28.0), KEY_HIGHLIGHT)));
    }
}
