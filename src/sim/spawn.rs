//! Randomized-interval spawn scheduling
//!
//! One [`SpawnTimer`] per entity family (obstacles, rewards, clouds). The
//! timer accumulates elapsed milliseconds and fires when it reaches a
//! threshold redrawn from `[min_ms, max_ms)` after every spawn, including
//! the very first.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MS_PER_TICK;

/// Per-family spawn countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    min_ms: f32,
    max_ms: f32,
    elapsed_ms: f32,
    threshold_ms: f32,
}

impl SpawnTimer {
    /// New timer; call [`arm`](Self::arm) before the first
    /// [`advance`](Self::advance) to draw the initial threshold.
    pub fn new(min_ms: f32, max_ms: f32) -> Self {
        Self {
            min_ms,
            max_ms,
            elapsed_ms: 0.0,
            threshold_ms: max_ms,
        }
    }

    /// Redraw the threshold and restart the countdown. `scale` compresses or
    /// stretches the interval (obstacles pass `base_speed / current_speed` so
    /// faster play means shorter gaps); pass 1.0 for a fixed-range family.
    pub fn arm(&mut self, rng: &mut Pcg32, scale: f32) {
        self.threshold_ms = rng.random_range(self.min_ms..self.max_ms) * scale;
        self.elapsed_ms = 0.0;
    }

    /// Jump the countdown to `fraction` of the current threshold, so the next
    /// spawn lands quickly without skipping the randomized draw.
    pub fn pre_seed(&mut self, fraction: f32) {
        self.elapsed_ms = self.threshold_ms * fraction;
    }

    /// Advance by a frame delta (ticks), converted to milliseconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed_ms += dt * MS_PER_TICK;
        if !self.elapsed_ms.is_finite() {
            log::error!("spawn timer accumulator went non-finite, restarting countdown");
            self.elapsed_ms = 0.0;
        }
    }

    /// Whether the countdown has reached the threshold
    pub fn is_ready(&self) -> bool {
        self.elapsed_ms >= self.threshold_ms
    }

    /// Milliseconds until the next spawn
    pub fn remaining_ms(&self) -> f32 {
        (self.threshold_ms - self.elapsed_ms).max(0.0)
    }
}
