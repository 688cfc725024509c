//! Event System
//!
//! The controller records what happened during a frame (respawns,
//! pickups, boxes, bounces) so the frame loop can react without the
//! simulation knowing about it. Nothing in the simulation reads these back.

use crate::world::CollectibleKind;

/// A queue for events of a single type.
/// Events are collected during the frame and drained by the frame loop.
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the player was sent back to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnCause {
    Hazard,
    FellOut,
}

/// Something that happened during one frame update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Respawn { cause: RespawnCause },
    /// Index into `World::collectibles`
    ItemCollected { index: usize, kind: CollectibleKind },
    /// Index into `World::mystery_boxes`
    BoxOpened { index: usize },
    /// Index into `World::bounce_pads`
    Bounced { index: usize },
}
