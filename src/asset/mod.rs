//! Asset module - level images
//!
//! Sprites are GPU textures for drawing. The collision mask stays as CPU
//! pixels because it is only ever read by geometry extraction.

mod library;
mod sprites;

pub use library::{load_assets, AssetError, LoadedAssets};
pub use sprites::SpriteSet;
