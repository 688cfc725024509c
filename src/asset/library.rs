//! Asset loading
//!
//! Loads the level's images once at startup. A missing or broken image
//! never stops the game: it is logged and left out, and the renderer draws
//! a placeholder for it.

use image::RgbaImage;
use macroquad::file::load_file;
use macroquad::texture::{load_texture, FilterMode, Texture2D};

use crate::world::AssetPaths;
use super::SpriteSet;

/// Error type for image loading
#[derive(Debug)]
pub enum AssetError {
    /// File could not be read (or the texture could not be created)
    Missing(String),
    /// File was read but is not a usable image
    Decode(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Missing(msg) => write!(f, "Missing asset: {}", msg),
            AssetError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        AssetError::Decode(e.to_string())
    }
}

/// Everything loaded for a level
pub struct LoadedAssets {
    pub sprites: SpriteSet<Texture2D>,
    /// Collision mask, decoded to raw pixels for geometry extraction
    pub mask: Option<RgbaImage>,
}

impl LoadedAssets {
    /// Pixel size of the map image, which defines the world size
    pub fn map_size(&self) -> Option<(u32, u32)> {
        self.sprites
            .map
            .as_ref()
            .map(|map| (map.width() as u32, map.height() as u32))
    }
}

/// Load a sprite with nearest-neighbour filtering for crisp pixel art
pub async fn load_sprite(path: &str) -> Result<Texture2D, AssetError> {
    let texture = load_texture(path)
        .await
        .map_err(|e| AssetError::Missing(format!("{}: {}", path, e)))?;
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

/// Load a collision mask as CPU-side pixels
pub async fn load_mask(path: &str) -> Result<RgbaImage, AssetError> {
    let bytes = load_file(path)
        .await
        .map_err(|e| AssetError::Missing(format!("{}: {}", path, e)))?;
    decode_mask(&bytes)
}

/// Decode image bytes (any supported format) into RGBA8 pixels
pub fn decode_mask(bytes: &[u8]) -> Result<RgbaImage, AssetError> {
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgba8())
}

/// Downgrade a failed load to `None`, logging why
fn optional<T>(path: &str, result: Result<T, AssetError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Skipping {}: {}", path, e);
            None
        }
    }
}

async fn optional_sprite(path: &str) -> Option<Texture2D> {
    optional(path, load_sprite(path).await)
}

/// Load every image a level names. Always succeeds; failures become `None`.
pub async fn load_assets(paths: &AssetPaths) -> LoadedAssets {
    let sprites = SpriteSet {
        map: optional_sprite(&paths.map).await,
        walk: [
            optional_sprite(&paths.walk[0]).await,
            optional_sprite(&paths.walk[1]).await,
        ],
        coin: [
            optional_sprite(&paths.coin[0]).await,
            optional_sprite(&paths.coin[1]).await,
        ],
        key: optional_sprite(&paths.key).await,
    };
    let mask = optional(&paths.mask, load_mask(&paths.mask).await);

    log::info!(
        "Loaded {}/6 sprites, mask {}",
        sprites.loaded_count(),
        if mask.is_some() { "ok" } else { "missing" }
    );

    LoadedAssets { sprites, mask }
}
