//! World Model
//!
//! Level bounds, gravity and every piece of geometry the player can touch.
//! Static geometry (solids, kill zones) is fixed once loading finishes;
//! mystery boxes and collectibles carry the only state that changes
//! during play.

use crate::world::{CollectibleKind, LevelDesc, MaskGeometry, Rect};

/// A pickup in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub rect: Rect,
    /// Once set, never cleared (respawning keeps pickups)
    pub collected: bool,
}

/// A block that is solid from every side and pays out one coin when
/// first hit from below
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MysteryBox {
    pub rect: Rect,
    pub used: bool,
}

impl MysteryBox {
    pub fn new(rect: Rect) -> Self {
        Self { rect, used: false }
    }

    /// Mark the box used. Returns true only the first time.
    pub fn open(&mut self) -> bool {
        if self.used {
            return false;
        }
        self.used = true;
        true
    }
}

/// Launches the player upward when landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BouncePad {
    pub rect: Rect,
}

/// Which mask categories replaced the fallback geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskApplied {
    pub solids: bool,
    pub kill_zones: bool,
}

/// Container for all level geometry during play
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    /// Velocity given by bounce pads (negative is up)
    pub bounce_velocity: f32,
    pub solids: Vec<Rect>,
    pub kill_zones: Vec<Rect>,
    pub mystery_boxes: Vec<MysteryBox>,
    pub bounce_pads: Vec<BouncePad>,
    pub collectibles: Vec<Collectible>,
}

impl World {
    /// Build the world from a level description, using its fallback geometry
    pub fn from_level(level: &LevelDesc) -> Self {
        Self {
            width: level.world_width as f32,
            height: level.world_height as f32,
            gravity: level.gravity,
            bounce_velocity: level.bounce_velocity,
            solids: level.fallback_solids.clone(),
            kill_zones: level.fallback_kill_zones.clone(),
            mystery_boxes: level.mystery_boxes.iter().copied().map(MysteryBox::new).collect(),
            bounce_pads: level.bounce_pads.iter().map(|&rect| BouncePad { rect }).collect(),
            collectibles: level
                .collectibles
                .iter()
                .map(|c| Collectible { kind: c.kind, rect: c.rect, collected: false })
                .collect(),
        }
    }

    /// Replace fallback geometry with mask geometry, per category.
    ///
    /// A category the mask produced nothing for keeps its fallback.
    pub fn apply_mask_geometry(&mut self, geometry: MaskGeometry) -> MaskApplied {
        let mut applied = MaskApplied::default();
        if !geometry.solids.is_empty() {
            self.solids = geometry.solids;
            applied.solids = true;
        }
        if !geometry.hazards.is_empty() {
            self.kill_zones = geometry.hazards;
            applied.kill_zones = true;
        }
        applied
    }

    /// Coins available: coin pickups plus one per mystery box
    pub fn total_coins(&self) -> usize {
        self.coin_pickups().count() + self.mystery_boxes.len()
    }

    /// Coins taken so far from pickups (mystery box coins are counted by the caller)
    pub fn collected_coin_pickups(&self) -> usize {
        self.coin_pickups().filter(|c| c.collected).count()
    }

    pub fn has_key(&self) -> bool {
        self.collectibles
            .iter()
            .any(|c| c.kind == CollectibleKind::Key && c.collected)
    }

    fn coin_pickups(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles.iter().filter(|c| c.kind == CollectibleKind::Coin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::sample_level;

    #[test]
    fn test_from_sample_level() {
        let world = World::from_level(&sample_level());
        assert_eq!(world.width, 918.0);
        assert_eq!(world.solids.len(), 10);
        assert_eq!(world.kill_zones.len(), 1);
        assert_eq!(world.total_coins(), 4);
        assert!(!world.has_key());
    }

    #[test]
    fn test_empty_mask_keeps_fallback() {
        let mut world = World::from_level(&sample_level());
        let before = world.clone();

        let applied = world.apply_mask_geometry(MaskGeometry::default());
        assert_eq!(applied, MaskApplied::default());
        assert_eq!(world, before);
    }

    #[test]
    fn test_mask_replaces_each_category_independently() {
        let mut world = World::from_level(&sample_level());
        let fallback_zones = world.kill_zones.clone();

        let solids = vec![Rect::new(0.0, 0.0, 5.0, 5.0)];
        let applied = world.apply_mask_geometry(MaskGeometry { solids: solids.clone(), hazards: Vec::new() });

        assert_eq!(applied, MaskApplied { solids: true, kill_zones: false });
        assert_eq!(world.solids, solids);
        assert_eq!(world.kill_zones, fallback_zones);
    }

    #[test]
    fn test_mystery_box_opens_once() {
        let mut mystery = MysteryBox::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(mystery.open());
        assert!(!mystery.open());
        assert!(mystery.used);
    }
}
