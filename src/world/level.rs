//! Level loading
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! Every field falls back to the built-in "Sample A" level, so a level file
//! only needs to list what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Rect;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum rectangles in any single geometry list
    pub const MAX_RECTS: usize = 4096;
    /// Maximum world dimension in pixels
    pub const MAX_WORLD_SIZE: u32 = 16384;
    /// Maximum absolute coordinate or velocity value
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for LevelError {}

/// Kind of pickup placed in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Key,
}

/// A pickup as authored in the level file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleDesc {
    pub kind: CollectibleKind,
    pub rect: Rect,
}

/// Player body tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Sprite box size
    pub width: f32,
    pub height: f32,
    /// Horizontal run speed (px/s)
    pub speed: f32,
    /// Jump impulse; negative is up
    pub jump_velocity: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            width: 72.0,
            height: 72.0,
            speed: 220.0,
            jump_velocity: -760.0,
        }
    }
}

/// Collision box relative to the player's sprite box.
///
/// Smaller than the sprite so collisions follow the visible body,
/// not the transparent padding around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxSettings {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for HitboxSettings {
    fn default() -> Self {
        Self {
            offset_x: 18.0,
            offset_y: 45.0,
            width: 36.0,
            height: 27.0,
        }
    }
}

/// Image sources for the level. Any of them may fail to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Background art; its size becomes the world size
    pub map: String,
    /// Color-coded collision mask
    pub mask: String,
    pub walk: [String; 2],
    pub coin: [String; 2],
    pub key: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            map: "assets/SampleA.png".to_string(),
            mask: "assets/hitboxSampleA.png".to_string(),
            walk: [
                "assets/tiles/characters/tile_0000.png".to_string(),
                "assets/tiles/characters/tile_0001.png".to_string(),
            ],
            coin: [
                "assets/tiles/tile_0151.png".to_string(),
                "assets/tiles/tile_0152.png".to_string(),
            ],
            key: "assets/tiles/tile_0027.png".to_string(),
        }
    }
}

/// Complete description of a playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDesc {
    /// World size used until (and unless) the map image provides one
    pub world_width: u32,
    pub world_height: u32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Respawn position (sprite top-left)
    pub spawn: [f32; 2],
    /// Upward launch velocity from bounce pads; negative is up
    pub bounce_velocity: f32,
    pub player: PlayerSettings,
    pub hitbox: HitboxSettings,
    /// Terrain used when the mask yields no solids
    pub fallback_solids: Vec<Rect>,
    /// Kill zones used when the mask yields no hazards
    pub fallback_kill_zones: Vec<Rect>,
    pub collectibles: Vec<CollectibleDesc>,
    pub mystery_boxes: Vec<Rect>,
    pub bounce_pads: Vec<Rect>,
    pub assets: AssetPaths,
}

impl Default for LevelDesc {
    fn default() -> Self {
        sample_level()
    }
}

/// The built-in level, used when no level file is given
pub fn sample_level() -> LevelDesc {
    LevelDesc {
        world_width: 918,
        world_height: 515,
        gravity: 1700.0,
        spawn: [350.0, 820.0],
        bounce_velocity: -1400.0,
        player: PlayerSettings::default(),
        hitbox: HitboxSettings::default(),
        fallback_solids: vec![
            Rect::new(0.0, 460.0, 918.0, 55.0),
            Rect::new(0.0, 280.0, 243.0, 46.0),
            Rect::new(66.0, 326.0, 177.0, 66.0),
            Rect::new(32.0, 390.0, 104.0, 30.0),
            Rect::new(104.0, 423.0, 139.0, 37.0),
            Rect::new(250.0, 350.0, 31.0, 40.0),
            Rect::new(420.0, 398.0, 147.0, 62.0),
            Rect::new(714.0, 390.0, 104.0, 70.0),
            Rect::new(752.0, 260.0, 95.0, 130.0),
            Rect::new(442.0, 286.0, 62.0, 10.0),
        ],
        // double spike near the tree base
        fallback_kill_zones: vec![Rect::new(455.0, 478.0, 48.0, 47.0)],
        collectibles: vec![
            CollectibleDesc { kind: CollectibleKind::Coin, rect: Rect::new(1067.0, 103.0, 48.0, 48.0) },
            CollectibleDesc { kind: CollectibleKind::Coin, rect: Rect::new(1101.0, 159.0, 48.0, 48.0) },
            CollectibleDesc { kind: CollectibleKind::Coin, rect: Rect::new(998.0, 215.0, 48.0, 48.0) },
            CollectibleDesc { kind: CollectibleKind::Key, rect: Rect::new(608.0, 462.0, 48.0, 28.0) },
        ],
        mystery_boxes: vec![Rect::new(420.0, 260.0, 48.0, 48.0)],
        bounce_pads: vec![Rect::new(1020.0, 210.0, 48.0, 16.0)],
        assets: AssetPaths::default(),
    }
}

/// Check if a float is valid (not NaN or Inf, within coordinate limits)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn validate_rects(rects: &[Rect], context: &str) -> Result<(), String> {
    if rects.len() > limits::MAX_RECTS {
        return Err(format!("{}: too many rectangles ({} > {})",
            context, rects.len(), limits::MAX_RECTS));
    }
    for (i, r) in rects.iter().enumerate() {
        if !r.is_valid() || !is_valid_float(r.x) || !is_valid_float(r.y) {
            return Err(format!("{}[{}]: invalid rectangle {:?}", context, i, r));
        }
    }
    Ok(())
}

/// Validate a level to catch broken or hostile files before they reach the simulation
pub fn validate_level(level: &LevelDesc) -> Result<(), LevelError> {
    let check = || -> Result<(), String> {
        for (name, size) in [("world_width", level.world_width), ("world_height", level.world_height)] {
            if size == 0 || size > limits::MAX_WORLD_SIZE {
                return Err(format!("{} out of range: {}", name, size));
            }
        }

        let scalars = [
            ("gravity", level.gravity),
            ("spawn.x", level.spawn[0]),
            ("spawn.y", level.spawn[1]),
            ("bounce_velocity", level.bounce_velocity),
            ("player.speed", level.player.speed),
            ("player.jump_velocity", level.player.jump_velocity),
            ("hitbox.offset_x", level.hitbox.offset_x),
            ("hitbox.offset_y", level.hitbox.offset_y),
        ];
        for (name, value) in scalars {
            if !is_valid_float(value) {
                return Err(format!("{} is not a usable number: {}", name, value));
            }
        }

        let player = Rect::new(0.0, 0.0, level.player.width, level.player.height);
        if !player.is_valid() {
            return Err(format!("player size must be positive: {:?}", player));
        }
        let hitbox = Rect::new(0.0, 0.0, level.hitbox.width, level.hitbox.height);
        if !hitbox.is_valid() {
            return Err(format!("hitbox size must be positive: {:?}", hitbox));
        }

        validate_rects(&level.fallback_solids, "fallback_solids")?;
        validate_rects(&level.fallback_kill_zones, "fallback_kill_zones")?;
        validate_rects(&level.mystery_boxes, "mystery_boxes")?;
        validate_rects(&level.bounce_pads, "bounce_pads")?;
        let pickups: Vec<Rect> = level.collectibles.iter().map(|c| c.rect).collect();
        validate_rects(&pickups, "collectibles")?;

        Ok(())
    };

    check().map_err(LevelError::ValidationError)
}

/// Load a level from a RON file
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<LevelDesc, LevelError> {
    let contents = fs::read_to_string(path.as_ref())?;
    load_level_from_str(&contents)
}

/// Load a level from a RON string (for embedded levels, async loading, or testing)
pub fn load_level_from_str(s: &str) -> Result<LevelDesc, LevelError> {
    let level: LevelDesc = ron::from_str(s)?;
    validate_level(&level)?;
    Ok(level)
}
