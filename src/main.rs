//! Pixle Platformer: a pixel-art 2D platformer runtime
//!
//! Level collision comes from a color-coded mask image:
//! - Near-black pixels are solid terrain
//! - Blue pixels are kill zones
//! - Collision is resolved one axis at a time against solids, mystery
//!   boxes and bounce pads
//!
//! Run with an optional RON level file: `pixle-platformer levels/my_level.ron`

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod asset;
mod game;
mod input;
mod world;

use macroquad::prelude::*;
use game::{draw_frame, GameEvent, GameState, RespawnCause, ScreenTarget};
use input::InputState;
use world::{load_level, sample_level, LevelDesc};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Pixle Platformer v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Level from the first process argument, or the built-in one
fn select_level() -> LevelDesc {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("No level file given, using built-in level");
        return sample_level();
    };
    match load_level(&path) {
        Ok(level) => {
            log::info!("Loaded level {}", path);
            level
        }
        Err(e) => {
            log::warn!("Failed to load level {}: {}; using built-in level", path, e);
            sample_level()
        }
    }
}

fn log_event(event: GameEvent) {
    match event {
        GameEvent::Respawn { cause: RespawnCause::Hazard } => log::debug!("Respawn: touched a hazard"),
        GameEvent::Respawn { cause: RespawnCause::FellOut } => log::debug!("Respawn: fell out of the world"),
        GameEvent::ItemCollected { index, kind } => log::debug!("Collected {:?} #{}", kind, index),
        GameEvent::BoxOpened { index } => log::debug!("Mystery box #{} opened", index),
        GameEvent::Bounced { index } => log::debug!("Bounced on pad #{}", index),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        let _ = env_logger::Builder::from_env(env).try_init();
    }

    log::info!("=== Pixle Platformer v{} ===", VERSION);

    let level = select_level();

    // Everything is loaded before the first frame; missing files only
    // degrade visuals
    let assets = asset::load_assets(&level.assets).await;
    let mut state = GameState::from_level(&level, assets.map_size(), assets.mask.as_ref());

    let mut input = InputState::new();
    let mut target = ScreenTarget;
    let mut canvas = (0.0, 0.0);

    loop {
        let size = (screen_width(), screen_height());
        if size != canvas {
            canvas = size;
            state.resize(size.0, size.1);
        }

        let held = input.snapshot();
        state.update(get_frame_time(), &held);
        for event in state.events.drain() {
            log_event(event);
        }

        draw_frame(&mut target, &state.snapshot(), &assets.sprites);

        next_frame().await
    }
}
