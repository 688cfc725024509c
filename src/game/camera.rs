//! Camera and render transform
//!
//! Both are derived values. The camera is recomputed every frame from the
//! player; the transform only when the canvas changes size.

use super::constants::{CAMERA_ANCHOR_X, CAMERA_ANCHOR_Y};

/// Maps world pixels to canvas pixels with a "cover" fit.
///
/// The world is scaled up until it fills the canvas in both directions,
/// but never shrunk below 1:1. Anything that overflows is scrolled by the
/// camera instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl RenderTransform {
    pub fn cover(canvas_w: f32, canvas_h: f32, world_w: f32, world_h: f32) -> Self {
        let fit = (canvas_w / world_w).max(canvas_h / world_h);
        // NaN from a zero-sized world falls through to 1.0
        let scale = if fit > 1.0 { fit } else { 1.0 };
        Self { scale, offset_x: 0.0, offset_y: 0.0 }
    }

    /// Camera-relative world position to canvas pixels, rounded to avoid seams
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x * self.scale + self.offset_x).round(),
            (y * self.scale + self.offset_y).round(),
        )
    }

    /// World size to canvas size; never smaller than one pixel
    pub fn scale_size(&self, w: f32, h: f32) -> (f32, f32) {
        (
            (w * self.scale).round().max(1.0),
            (h * self.scale).round().max(1.0),
        )
    }
}

/// The visible window onto the world, in world pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub view_w: f32,
    pub view_h: f32,
}

impl Camera {
    /// Viewport size in world pixels for a canvas under `transform`
    pub fn resize(&mut self, canvas_w: f32, canvas_h: f32, transform: &RenderTransform) {
        self.view_w = canvas_w / transform.scale;
        self.view_h = canvas_h / transform.scale;
    }

    /// Center loosely on `(target_x, target_y)`, staying inside the world
    pub fn follow(&mut self, target_x: f32, target_y: f32, world_w: f32, world_h: f32) {
        let max_x = (world_w - self.view_w).max(0.0);
        let max_y = (world_h - self.view_h).max(0.0);
        self.x = (target_x - self.view_w * CAMERA_ANCHOR_X).clamp(0.0, max_x);
        self.y = (target_y - self.view_h * CAMERA_ANCHOR_Y).clamp(0.0, max_y);
    }
}
