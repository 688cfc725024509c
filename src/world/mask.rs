//! Collision mask extraction
//!
//! Turns a color-coded hitbox image into level rectangles. Near-black
//! pixels are solid terrain, blue pixels are kill zones, everything else
//! is empty. Each row is split into runs of one class, then runs with the
//! exact same `(x, w)` on consecutive rows are stacked into taller
//! rectangles.
//!
//! The mask may be larger (or smaller) than the world; it is centered over
//! the world, so mask pixel `(mx, my)` lands on world pixel
//! `(mx - offset_x, my - offset_y)` with `offset = floor((mask - world) / 2)`.

use std::collections::HashMap;

use image::RgbaImage;

use super::Rect;

/// Alpha must exceed this for a pixel to count as anything
const OPAQUE_ALPHA: u8 = 200;

/// What a single mask pixel represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    Solid,
    Hazard,
    Empty,
}

impl PixelClass {
    pub fn classify([r, g, b, a]: [u8; 4]) -> Self {
        if a <= OPAQUE_ALPHA {
            PixelClass::Empty
        } else if r < 25 && g < 25 && b < 25 {
            PixelClass::Solid
        } else if r < 80 && g < 80 && b > 150 {
            PixelClass::Hazard
        } else {
            PixelClass::Empty
        }
    }
}

/// Rectangles carved out of a mask, in world coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskGeometry {
    pub solids: Vec<Rect>,
    pub hazards: Vec<Rect>,
}

/// A horizontal span on one world row, already clipped to the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Run {
    x: i64,
    w: i64,
}

/// Integer rectangle used while stacking runs
#[derive(Debug, Clone, Copy)]
struct PixelRect {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

/// Extract solid and hazard rectangles from a mask image.
///
/// Output order is creation order: top to bottom, then left to right.
/// Collision resolution walks these lists in order, so the order is part
/// of the observable behavior.
pub fn extract_geometry(mask: &RgbaImage, world_width: u32, world_height: u32) -> MaskGeometry {
    let mask_w = mask.width() as i64;
    let mask_h = mask.height() as i64;
    let world_w = world_width as i64;
    let world_h = world_height as i64;

    let offset_x = (mask_w - world_w).div_euclid(2);
    let offset_y = (mask_h - world_h).div_euclid(2);

    let mut solid_rows: Vec<Vec<Run>> = vec![Vec::new(); world_height as usize];
    let mut hazard_rows: Vec<Vec<Run>> = vec![Vec::new(); world_height as usize];

    for my in 0..mask_h {
        let wy = my - offset_y;
        if wy < 0 || wy >= world_h {
            continue;
        }

        let mut mx = 0;
        while mx < mask_w {
            let class = PixelClass::classify(mask.get_pixel(mx as u32, my as u32).0);
            if class == PixelClass::Empty {
                mx += 1;
                continue;
            }

            let start = mx;
            while mx < mask_w && PixelClass::classify(mask.get_pixel(mx as u32, my as u32).0) == class {
                mx += 1;
            }

            let x0 = (start - offset_x).clamp(0, world_w);
            let x1 = (mx - offset_x).clamp(0, world_w);
            if x1 <= x0 {
                continue;
            }

            let run = Run { x: x0, w: x1 - x0 };
            match class {
                PixelClass::Solid => solid_rows[wy as usize].push(run),
                PixelClass::Hazard => hazard_rows[wy as usize].push(run),
                PixelClass::Empty => {}
            }
        }
    }

    MaskGeometry {
        solids: merge_row_runs(&solid_rows),
        hazards: merge_row_runs(&hazard_rows),
    }
}

/// Stack runs with identical `(x, w)` on consecutive rows.
///
/// Only rectangles that reached the previous row are open for extension;
/// a run with a new width always starts a fresh rectangle even when it
/// overlaps the one above it.
fn merge_row_runs(rows: &[Vec<Run>]) -> Vec<Rect> {
    let mut rects: Vec<PixelRect> = Vec::new();
    let mut open: HashMap<Run, usize> = HashMap::new();

    for (y, runs) in rows.iter().enumerate() {
        let y = y as i64;
        let mut next = HashMap::with_capacity(runs.len());

        for run in runs {
            match open.get(run) {
                Some(&idx) if rects[idx].y + rects[idx].h == y => {
                    rects[idx].h += 1;
                    next.insert(*run, idx);
                }
                _ => {
                    rects.push(PixelRect { x: run.x, y, w: run.w, h: 1 });
                    next.insert(*run, rects.len() - 1);
                }
            }
        }

        open = next;
    }

    rects
        .into_iter()
        .map(|r| Rect::new(r.x as f32, r.y as f32, r.w as f32, r.h as f32))
        .collect()
}
