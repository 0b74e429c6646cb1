//! Read-only presentation snapshot
//!
//! Built fresh each tick for the renderer. Plain values only; the
//! presentation layer can hold one across frames without borrowing
//! live simulation state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::obstacle::ObstacleKind;
use crate::sim::reward::RewardKind;
use crate::sim::runner::RunnerPose;
use crate::sim::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunnerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub pose: RunnerPose,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardView {
    pub kind: RewardKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Opacity of the collect fade-out, 1.0 when uncollected
    pub alpha: f32,
    /// Grow-out scale of the collect sequence, 1.0 when uncollected
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudView {
    pub pos: Vec2,
    pub scale: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub state: SessionState,
    pub score: u64,
    pub high_score: u64,
    pub runner: RunnerView,
    pub obstacles: Vec<ObstacleView>,
    pub rewards: Vec<RewardView>,
    pub clouds: Vec<CloudView>,
    /// Ground texture scroll offset, wrapped to the tile width
    pub ground_offset: f32,
}
