//! Axis-aligned bounding boxes and overlap tests
//!
//! Every collision in the game is a shrunk-AABB overlap: each participant's
//! box is scaled down around its center so near misses stay forgiving.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Runner hit box shrink factor
pub const RUNNER_BOX_SHRINK: f32 = 0.6;
/// Obstacle hit box shrink factor
pub const OBSTACLE_BOX_SHRINK: f32 = 0.7;
/// Reward hit box shrink factor
pub const REWARD_BOX_SHRINK: f32 = 0.8;

/// Axis-aligned bounding box, stored as min corner + extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    /// Box centered at `center` with the given extent
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            width: size.x,
            height: size.y,
        }
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Scale the box down around its center
    pub fn shrink(&self, factor: f32) -> Self {
        Self::centered(
            self.center(),
            Vec2::new(self.width * factor, self.height * factor),
        )
    }

    /// Separating-axis overlap test: the boxes do NOT overlap iff one box's
    /// edge lies beyond the opposite edge of the other on either axis.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.y + self.height < other.y
            || self.y > other.y + other.height)
    }
}
