//! World module - static level data
//!
//! Level descriptions loaded from RON, the rectangle primitive shared by
//! all geometry, and extraction of collision rectangles from a mask image.

mod geometry;
mod level;
mod mask;

pub use geometry::*;
pub use level::*;
pub use mask::*;
