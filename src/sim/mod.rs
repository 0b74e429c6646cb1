//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame deltas clamped at every integration point
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod backdrop;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod reward;
pub mod runner;
pub mod score;
pub mod session;
pub mod snapshot;
pub mod spawn;

pub use collision::{Aabb, OBSTACLE_BOX_SHRINK, REWARD_BOX_SHRINK, RUNNER_BOX_SHRINK};
pub use difficulty::Difficulty;
pub use obstacle::{Obstacle, ObstacleKind, ObstacleSystem};
pub use reward::{Reward, RewardKind, RewardSystem};
pub use runner::{Runner, RunnerPose, RunnerState};
pub use score::ScoreSystem;
pub use session::{GameEvent, GameSession, SessionState, TickInput};
pub use snapshot::FrameSnapshot;
pub use spawn::SpawnTimer;
