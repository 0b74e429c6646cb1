//! Scroll-speed difficulty progression
//!
//! The world scroll speed only ever increases while a session runs; nothing
//! short of a full session reset brings it back down.

use serde::{Deserialize, Serialize};

use crate::consts::FLYER_SPEED_RATIO;

/// Monotone scroll-speed controller
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Difficulty {
    base: f32,
    increment: f32,
    current: f32,
}

impl Difficulty {
    pub fn new(base: f32, increment: f32) -> Self {
        Self {
            base,
            increment,
            current: base,
        }
    }

    /// Accelerate. Called once per tick while the session runs.
    pub fn update(&mut self, dt: f32) {
        self.current += self.increment * dt;
    }

    /// Current scroll speed, pixels per tick
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Base scroll speed from the config
    pub fn base(&self) -> f32 {
        self.base
    }

    /// `current / base` speed ratio, ≥ 1.0 within a run
    pub fn ratio(&self) -> f32 {
        self.current / self.base
    }

    /// Whether the world is fast enough for flyers to spawn
    pub fn is_fast(&self) -> bool {
        self.ratio() > FLYER_SPEED_RATIO
    }

    /// Back to the base speed (full session reset only)
    pub fn reset(&mut self) {
        self.current = self.base;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_grows_monotonically() {
        let mut d = Difficulty::new(5.0, 0.001);
        let mut last = d.current();
        for _ in 0..1000 {
            d.update(1.0);
            assert!(d.current() > last);
            last = d.current();
        }
    }

    #[test]
    fn test_flyers_gated_on_ratio() {
        let mut d = Difficulty::new(5.0, 0.001);
        assert!(!d.is_fast());
        // 1.2x base is 6.0; stop well short of it
        for _ in 0..900 {
            d.update(1.0);
        }
        assert!(!d.is_fast());
        for _ in 0..200 {
            d.update(1.0);
        }
        assert!(d.is_fast());
    }

    #[test]
    fn test_reset_restores_base() {
        let mut d = Difficulty::new(5.0, 0.5);
        d.update(100.0);
        d.reset();
        assert_eq!(d.current(), 5.0);
        assert_eq!(d.ratio(), 1.0);
    }
}
