//! Sprite animation timers

use super::constants::{CYCLE_FRAMES, IDLE_BOB_AMPLITUDE, IDLE_PULSE_RATE};

/// Fixed-rate frame toggle.
///
/// Accumulates time and steps to the next frame whenever a full period has
/// passed, then starts counting from zero again (leftover time is dropped).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCycle {
    period: f32,
    timer: f32,
    frame: usize,
}

impl FrameCycle {
    pub fn new(period: f32) -> Self {
        Self { period, timer: 0.0, frame: 0 }
    }

    pub fn advance(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer >= self.period {
            self.timer = 0.0;
            self.frame = (self.frame + 1) % CYCLE_FRAMES;
        }
    }

    /// Back to the first frame with a fresh timer
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.frame = 0;
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}

/// Ever-advancing phase for the idle bob
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdlePulse {
    phase: f32,
}

impl IdlePulse {
    pub fn advance(&mut self, dt: f32) {
        self.phase += dt * IDLE_PULSE_RATE;
    }

    /// Vertical sprite offset; always zero or upward
    pub fn bob_offset(&self) -> f32 {
        -(self.phase.sin() * IDLE_BOB_AMPLITUDE).abs()
    }
}
