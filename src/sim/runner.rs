//! The player-controlled runner and its jump state machine
//!
//! States: Idle → Running → Jumping → Running (loop) → Dead, with `reset()`
//! as the only way out of Dead. The airborne flag is kept separate from the
//! state enum so a landing can resume the running state on the same tick
//! without an intermediate idle frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::consts::{MAX_JUMP_DELTA, RUNNER_HEIGHT, RUNNER_WIDTH, RUNNER_X};
use crate::sim::collision::Aabb;

/// Lifecycle state of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerState {
    /// Pre-session, standing at the ground line
    Idle,
    /// Normal ground movement
    Running,
    /// Mid jump arc
    Jumping,
    /// Terminal until `reset()`
    Dead,
}

/// Visual pose reported to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerPose {
    Idle,
    Run,
    Jump,
    Dead,
}

/// The player entity. `x` is fixed; only `y` and vertical velocity change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    config: WorldConfig,
    pos: Vec2,
    size: Vec2,
    velocity: f32,
    state: RunnerState,
    airborne: bool,
}

impl Runner {
    pub fn new(config: WorldConfig) -> Self {
        let size = Vec2::new(RUNNER_WIDTH, RUNNER_HEIGHT);
        Self {
            config,
            pos: Vec2::new(RUNNER_X, config.ground_y - size.y / 2.0),
            size,
            velocity: 0.0,
            state: RunnerState::Idle,
            airborne: false,
        }
    }

    /// Center-y when standing on the ground line
    fn ground_center_y(&self) -> f32 {
        self.config.ground_y - self.size.y / 2.0
    }

    /// Begin a jump. No-op while airborne or dead.
    pub fn jump(&mut self) {
        if self.airborne || self.state == RunnerState::Dead {
            return;
        }
        self.state = RunnerState::Jumping;
        self.airborne = true;
        self.velocity = self.config.jump_velocity;
    }

    /// Integrate the jump arc. Only acts while Jumping; `dt` is clamped to
    /// one tick so a frame hitch cannot tunnel the runner through the ground.
    pub fn update(&mut self, dt: f32) {
        if self.state != RunnerState::Jumping {
            return;
        }
        let dt = dt.min(MAX_JUMP_DELTA);

        self.velocity += self.config.gravity * dt;
        self.pos.y += self.velocity;

        if self.pos.y >= self.ground_center_y() {
            self.pos.y = self.ground_center_y();
            self.velocity = 0.0;
            self.airborne = false;
            self.run();
        }
    }

    /// Resume ground running. No-op while airborne or dead.
    pub fn run(&mut self) {
        if self.state != RunnerState::Dead && !self.airborne {
            self.state = RunnerState::Running;
        }
    }

    /// Lethal collision: freeze in the death pose until `reset()`.
    pub fn die(&mut self) {
        self.state = RunnerState::Dead;
        self.velocity = 0.0;
    }

    /// Back to Idle at the ground line
    pub fn reset(&mut self) {
        self.state = RunnerState::Idle;
        self.velocity = 0.0;
        self.airborne = false;
        self.pos.y = self.ground_center_y();
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn pose(&self) -> RunnerPose {
        match self.state {
            RunnerState::Idle => RunnerPose::Idle,
            RunnerState::Running => RunnerPose::Run,
            RunnerState::Jumping => RunnerPose::Jump,
            RunnerState::Dead => RunnerPose::Dead,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Full (unshrunk) bounding box
    pub fn aabb(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> Runner {
        Runner::new(WorldConfig::default())
    }

    #[test]
    fn test_jump_from_ground_sets_state_and_impulse() {
        let mut r = runner();
        r.run();
        r.jump();
        assert_eq!(r.state(), RunnerState::Jumping);
        assert_eq!(r.velocity(), WorldConfig::default().jump_velocity);
        assert!(r.velocity() < 0.0);
    }

    #[test]
    fn test_jump_while_jumping_is_noop() {
        let mut r = runner();
        r.jump();
        r.update(1.0);
        let velocity = r.velocity();
        let y = r.position().y;

        r.jump();
        assert_eq!(r.state(), RunnerState::Jumping);
        assert_eq!(r.velocity(), velocity);
        assert_eq!(r.position().y, y);
    }

    #[test]
    fn test_jump_and_run_while_dead_are_noops() {
        let mut r = runner();
        r.die();
        r.jump();
        assert_eq!(r.state(), RunnerState::Dead);
        r.run();
        assert_eq!(r.state(), RunnerState::Dead);
    }

    #[test]
    fn test_lands_back_on_ground_and_resumes_running() {
        let mut r = runner();
        r.run();
        r.jump();
        for _ in 0..200 {
            r.update(1.0);
        }
        assert_eq!(r.state(), RunnerState::Running);
        assert_eq!(r.velocity(), 0.0);
        let ground = WorldConfig::default().ground_y - r.size().y / 2.0;
        assert!((r.position().y - ground).abs() < 1e-4);
    }

    #[test]
    fn test_y_never_exceeds_ground_line() {
        let mut r = runner();
        let ground = WorldConfig::default().ground_y - r.size().y / 2.0;
        r.jump();
        for _ in 0..500 {
            // Oversized deltas must be clamped, not integrated
            r.update(10.0);
            assert!(r.position().y <= ground + 1e-4);
        }
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut r = runner();
        r.jump();
        r.update(1.0);
        r.die();

        r.reset();
        let once = r.clone();
        r.reset();
        assert_eq!(r.state(), once.state());
        assert_eq!(r.velocity(), once.velocity());
        assert_eq!(r.position(), once.position());
    }

    #[test]
    fn test_landing_mid_tick_keeps_running_pose() {
        let mut r = runner();
        r.run();
        r.jump();
        // Run the arc down; the tick that lands must already report Run
        let mut saw_jump = false;
        for _ in 0..200 {
            r.update(1.0);
            match r.pose() {
                RunnerPose::Jump => saw_jump = true,
                RunnerPose::Run => break,
                other => panic!("unexpected pose {other:?}"),
            }
        }
        assert!(saw_jump);
        assert_eq!(r.pose(), RunnerPose::Run);
    }
}
