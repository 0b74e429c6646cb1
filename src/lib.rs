//! Pixel Rush - endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (runner physics, spawning, collisions, scoring)
//! - `config`: Validated per-session world configuration
//! - `store`: High-score persistence port (LocalStorage on web, in-memory elsewhere)
//!
//! Rendering, audio and input wiring are external adapters: they feed
//! [`sim::TickInput`] in and read [`sim::FrameSnapshot`] / [`sim::GameEvent`] out.

pub mod config;
pub mod sim;
pub mod store;

pub use config::{ConfigError, WorldConfig};
pub use sim::{FrameSnapshot, GameEvent, GameSession, SessionState, TickInput};
pub use store::{HighScoreStore, MemoryStore};

/// Game tuning constants
pub mod consts {
    /// Milliseconds represented by one nominal tick (`dt == 1.0` at 60 Hz)
    pub const MS_PER_TICK: f32 = 1000.0 / 60.0;
    /// Maximum frame delta accepted by the session, in ticks
    pub const MAX_FRAME_DELTA: f32 = 1.5;
    /// Maximum delta the runner integrates per call (jump stability)
    pub const MAX_JUMP_DELTA: f32 = 1.0;
    /// Maximum delta rewards integrate per call
    pub const MAX_REWARD_DELTA: f32 = 2.0;

    /// Play-field defaults
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    pub const GROUND_Y: f32 = 550.0;

    /// Runner defaults
    pub const RUNNER_X: f32 = 100.0;
    pub const RUNNER_WIDTH: f32 = 60.0;
    pub const RUNNER_HEIGHT: f32 = 60.0;
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_VELOCITY: f32 = -15.0;

    /// Scroll speed defaults
    pub const BASE_SPEED: f32 = 5.0;
    pub const SPEED_INCREMENT: f32 = 0.001;
    /// Speed ratio above which flyers may spawn
    pub const FLYER_SPEED_RATIO: f32 = 1.2;

    /// Obstacle spawn interval base (milliseconds)
    pub const OBSTACLE_INTERVAL_MS: f32 = 1500.0;

    /// Reward spawn interval range (milliseconds)
    pub const REWARD_INTERVAL_MIN_MS: f32 = 2000.0;
    pub const REWARD_INTERVAL_MAX_MS: f32 = 6000.0;
    /// Rewards scroll at this fraction of the base speed (never scaled by difficulty)
    pub const REWARD_SPEED_FACTOR: f32 = 0.8;
    /// Ticks of the fade-and-grow sequence after collection
    pub const REWARD_COLLECT_TICKS: f32 = 30.0;

    /// Score accrual base rate, points per tick
    pub const SCORE_BASE_RATE: f32 = 0.1;
    /// Rate multiplier applied at each 100-point tier
    pub const SCORE_RATE_GROWTH: f32 = 1.1;

    /// Cloud decoration spawn interval range (milliseconds)
    pub const CLOUD_INTERVAL_MIN_MS: f32 = 3000.0;
    pub const CLOUD_INTERVAL_MAX_MS: f32 = 6000.0;
    /// Clouds drift at this fraction of the base speed
    pub const CLOUD_SPEED_FACTOR: f32 = 0.3;
}
