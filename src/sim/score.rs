//! Score accrual, bonus points and high-score persistence
//!
//! The score climbs at a per-tick rate that compounds by 1.1x at every
//! 100-point tier, and takes instant bonus injections from collected
//! rewards. The high score goes through an injected [`HighScoreStore`];
//! a failed write degrades to session-only tracking.

use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_BASE_RATE, SCORE_RATE_GROWTH};
use crate::store::HighScoreStore;

/// Serializable scoring state (the store handle lives outside it)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ScoreState {
    value: f32,
    rate: f32,
    /// Last 100-point tier at which the rate was compounded
    rate_tier: u64,
    high_score: u64,
}

/// Time-based score accumulator with a persisted high score
pub struct ScoreSystem {
    state: ScoreState,
    running: bool,
    store: Box<dyn HighScoreStore>,
}

impl ScoreSystem {
    /// Reads the stored high score once at construction.
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load().unwrap_or(0);
        if high_score > 0 {
            log::info!("loaded high score {high_score}");
        }
        Self {
            state: ScoreState {
                value: 0.0,
                rate: SCORE_BASE_RATE,
                rate_tier: 0,
                high_score,
            },
            running: false,
            store,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Freeze the score and persist a new high score if beaten.
    /// Returns true when this run set a new record.
    pub fn stop(&mut self) -> bool {
        self.running = false;

        let final_score = self.display_value();
        if final_score > self.state.high_score {
            self.state.high_score = final_score;
            if !self.store.save(final_score) {
                log::warn!("high score write failed, keeping in-memory value {final_score}");
            }
            return true;
        }
        false
    }

    /// Accrue time-based score. The rate compounds once per 100-point tier
    /// crossed, never more than once for the same tier.
    pub fn update(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        self.state.value += self.state.rate * dt;

        let tier = self.state.value.floor() as u64 / 100;
        while self.state.rate_tier < tier {
            self.state.rate *= SCORE_RATE_GROWTH;
            self.state.rate_tier += 1;
            log::debug!(
                "score tier {} reached, rate now {:.4}/tick",
                self.state.rate_tier * 100,
                self.state.rate
            );
        }
    }

    /// Instant bonus injection (reward collection). Ignored while stopped.
    pub fn add_points(&mut self, points: u32) {
        if !self.running {
            return;
        }
        self.state.value += points as f32;
    }

    /// Back to zero at the base rate; the high score is untouched.
    pub fn reset(&mut self) {
        self.state.value = 0.0;
        self.state.rate = SCORE_BASE_RATE;
        self.state.rate_tier = 0;
    }

    /// Raw fractional score
    pub fn value(&self) -> f32 {
        self.state.value
    }

    /// Score as shown to the player
    pub fn display_value(&self) -> u64 {
        self.state.value.floor() as u64
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    /// Last 100-point tier the rate compounded at (0 before the first)
    pub fn tier(&self) -> u64 {
        self.state.rate_tier
    }

    /// Current accrual rate, points per tick
    pub fn rate(&self) -> f32 {
        self.state.rate
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl std::fmt::Debug for ScoreSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreSystem")
            .field("state", &self.state)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
