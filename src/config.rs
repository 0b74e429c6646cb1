//! Per-session world configuration
//!
//! Immutable once a session is created. All numeric fields must be finite;
//! the jump impulse is negative (up is -y), everything else positive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Validation failure for a [`WorldConfig`] field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("field `{0}` must be finite and positive, got {1}")]
    NotPositive(&'static str, f32),
    #[error("field `jump_velocity` must be finite and negative, got {0}")]
    BadJumpVelocity(f32),
    #[error("field `ground_y` ({0}) must lie inside the field height ({1})")]
    GroundOutOfField(f32, f32),
}

/// World configuration for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Play-field width in pixels
    pub width: f32,
    /// Play-field height in pixels
    pub height: f32,
    /// Downward acceleration applied while airborne, pixels per tick²
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative = upward)
    pub jump_velocity: f32,
    /// Base horizontal scroll speed, pixels per tick
    pub speed: f32,
    /// Scroll speed gained per tick while running
    pub speed_increment: f32,
    /// Base obstacle spawn interval, milliseconds
    pub obstacle_interval_ms: f32,
    /// Vertical coordinate of the ground line
    pub ground_y: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            obstacle_interval_ms: OBSTACLE_INTERVAL_MS,
            ground_y: GROUND_Y,
        }
    }
}

impl WorldConfig {
    /// Check every field against the sign/finiteness invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("width", self.width),
            ("height", self.height),
            ("gravity", self.gravity),
            ("speed", self.speed),
            ("speed_increment", self.speed_increment),
            ("obstacle_interval_ms", self.obstacle_interval_ms),
            ("ground_y", self.ground_y),
        ];
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive(name, value));
            }
        }
        if !self.jump_velocity.is_finite() || self.jump_velocity >= 0.0 {
            return Err(ConfigError::BadJumpVelocity(self.jump_velocity));
        }
        if self.ground_y > self.height {
            return Err(ConfigError::GroundOutOfField(self.ground_y, self.height));
        }
        Ok(())
    }
}
