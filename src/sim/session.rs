//! Game session orchestration
//!
//! Holds the Waiting → Running → Over state machine and drives the per-tick
//! update order: runner first (a jump registered this frame beats a collision
//! computed from last frame's position), then backdrop, difficulty, obstacles,
//! rewards and score, then the lethal obstacle check, then the non-fatal
//! reward check. One `tick(input, dt)` per external clock signal; nothing
//! here blocks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, WorldConfig};
use crate::consts::MAX_FRAME_DELTA;
use crate::sim::backdrop::Backdrop;
use crate::sim::collision::RUNNER_BOX_SHRINK;
use crate::sim::difficulty::Difficulty;
use crate::sim::obstacle::ObstacleSystem;
use crate::sim::reward::RewardSystem;
use crate::sim::runner::{Runner, RunnerPose};
use crate::sim::score::ScoreSystem;
use crate::sim::snapshot::{CloudView, FrameSnapshot, ObstacleView, RewardView, RunnerView};
use crate::store::HighScoreStore;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Initial: waiting for the first start press
    Waiting,
    /// Active play
    Running,
    /// Run ended; only restart leaves this state
    Over,
}

/// Edge-triggered input for one tick. The input adapter sets a flag once per
/// physical press, never once per tick while held.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump: bool,
    pub start: bool,
    pub restart: bool,
}

/// Events emitted toward the presentation layer, drained from each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    Restarted,
    PoseChanged(RunnerPose),
    RewardCollected { value: u32 },
    /// Crossed a 100-point tier; `score` is the tier boundary (100, 200, ...)
    ScoreMilestone { score: u64 },
    GameOver {
        score: u64,
        high_score: u64,
        new_high_score: bool,
    },
}

/// The orchestrator owning every subsystem
pub struct GameSession {
    config: WorldConfig,
    state: SessionState,
    seed: u64,
    rng: Pcg32,
    runner: Runner,
    difficulty: Difficulty,
    obstacles: ObstacleSystem,
    rewards: RewardSystem,
    score: ScoreSystem,
    backdrop: Backdrop,
}

impl GameSession {
    /// Validates the config, reads the persisted high score, seeds the RNG.
    pub fn new(
        config: WorldConfig,
        seed: u64,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("new session, seed {seed}");
        Ok(Self {
            config,
            state: SessionState::Waiting,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            runner: Runner::new(config),
            difficulty: Difficulty::new(config.speed, config.speed_increment),
            obstacles: ObstacleSystem::new(config),
            rewards: RewardSystem::new(config),
            score: ScoreSystem::new(store),
            backdrop: Backdrop::new(config),
        })
    }

    /// Advance one frame. `dt` is wall-clock elapsed time normalized to
    /// nominal ticks; it is clamped here before any subsystem sees it.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if input.start {
            self.start_with(&mut events);
        }
        if input.restart {
            self.restart_with(&mut events);
        }
        if input.jump && self.state == SessionState::Running {
            let before = self.runner.pose();
            self.runner.jump();
            if self.runner.pose() != before {
                events.push(GameEvent::PoseChanged(self.runner.pose()));
            }
        }

        if self.state != SessionState::Running {
            return events;
        }

        if !dt.is_finite() {
            log::warn!("discarding non-finite frame delta {dt}");
            return events;
        }
        let dt = dt.clamp(0.0, MAX_FRAME_DELTA);

        // Update order per the session contract; each subsystem only sees
        // its own state plus the values passed here, so a bad frame in one
        // cannot corrupt another.
        let pose_before = self.runner.pose();
        self.runner.update(dt);
        if self.runner.pose() != pose_before {
            events.push(GameEvent::PoseChanged(self.runner.pose()));
        }

        self.backdrop.update(dt, self.difficulty.current(), &mut self.rng);
        self.difficulty.update(dt);
        self.obstacles.update(
            dt,
            self.difficulty.current(),
            self.difficulty.ratio(),
            self.difficulty.is_fast(),
            &mut self.rng,
        );
        self.rewards.update(dt, &mut self.rng);
        let tier_before = self.score.tier();
        self.score.update(dt);
        for tier in tier_before + 1..=self.score.tier() {
            events.push(GameEvent::ScoreMilestone { score: tier * 100 });
        }

        // Lethal check first; a fatal overlap ends the tick's gameplay
        let runner_box = self.runner.aabb().shrink(RUNNER_BOX_SHRINK);
        if self.obstacles.check_collisions(&runner_box) {
            self.game_over(&mut events);
            return events;
        }

        // Reward collection is independent and never ends the session
        let score = &mut self.score;
        self.rewards.check_collisions(&runner_box, &mut |value| {
            score.add_points(value);
            events.push(GameEvent::RewardCollected { value });
        });

        events
    }

    /// Begin play. Valid only from Waiting; otherwise a silent no-op.
    pub fn start(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.start_with(&mut events);
        events
    }

    /// Start a fresh run after a game over. Valid only from Over; otherwise
    /// a silent no-op.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.restart_with(&mut events);
        events
    }

    fn start_with(&mut self, events: &mut Vec<GameEvent>) {
        if self.state != SessionState::Waiting {
            return;
        }
        self.state = SessionState::Running;
        self.arm_subsystems(events);
        events.push(GameEvent::Started);
        log::info!("session started");
    }

    fn restart_with(&mut self, events: &mut Vec<GameEvent>) {
        if self.state != SessionState::Over {
            return;
        }
        self.runner.reset();
        self.difficulty.reset();
        self.obstacles.reset(&mut self.rng);
        self.rewards.reset(&mut self.rng);
        self.score.reset();
        self.backdrop.reset(&mut self.rng);

        // Straight back into play, skipping Waiting
        self.state = SessionState::Running;
        self.arm_subsystems(events);
        events.push(GameEvent::Restarted);
        log::info!("session restarted");
    }

    fn arm_subsystems(&mut self, events: &mut Vec<GameEvent>) {
        self.runner.run();
        events.push(GameEvent::PoseChanged(self.runner.pose()));
        self.obstacles
            .start(&mut self.rng, self.difficulty.is_fast(), self.difficulty.ratio());
        self.rewards.start(&mut self.rng);
        self.score.start();
    }

    fn game_over(&mut self, events: &mut Vec<GameEvent>) {
        self.state = SessionState::Over;
        self.runner.die();
        events.push(GameEvent::PoseChanged(self.runner.pose()));
        self.obstacles.stop();
        self.rewards.stop();
        let new_high_score = self.score.stop();

        let score = self.score.display_value();
        let high_score = self.score.high_score();
        log::info!("game over: score {score}, high score {high_score}");
        events.push(GameEvent::GameOver {
            score,
            high_score,
            new_high_score,
        });
    }

    /// Read-only presentation snapshot of the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            state: self.state,
            score: self.score.display_value(),
            high_score: self.score.high_score(),
            runner: RunnerView {
                pos: self.runner.position(),
                size: self.runner.size(),
                pose: self.runner.pose(),
            },
            obstacles: self
                .obstacles
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    kind: o.kind,
                    pos: o.pos,
                    size: o.size,
                })
                .collect(),
            rewards: self
                .rewards
                .rewards()
                .iter()
                .map(|r| RewardView {
                    kind: r.kind,
                    pos: r.pos,
                    size: r.size,
                    alpha: r.alpha(),
                    scale: r.scale(),
                })
                .collect(),
            clouds: self
                .backdrop
                .clouds()
                .iter()
                .map(|c| CloudView {
                    pos: c.pos,
                    scale: c.scale,
                })
                .collect(),
            ground_offset: self.backdrop.ground_offset(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> &ScoreSystem {
        &self.score
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("seed", &self.seed)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}
