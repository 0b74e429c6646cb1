//! Floating reward items: spawning, oscillation, collection
//!
//! Rewards drift left while bobbing on a sine wave, and are collected (not
//! lethal) on overlap with the runner. A collected item plays a short
//! fade-and-grow sequence before removal and is ignored by further collision
//! checks. Reward speed is a fixed fraction of the base scroll speed, so
//! rewards never get harder to reach as difficulty climbs.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::consts::{
    MAX_REWARD_DELTA, REWARD_COLLECT_TICKS, REWARD_INTERVAL_MAX_MS, REWARD_INTERVAL_MIN_MS,
    REWARD_SPEED_FACTOR,
};
use crate::sim::collision::{Aabb, REWARD_BOX_SHRINK};
use crate::sim::spawn::SpawnTimer;

/// Vertical bob amplitude in pixels
const FLOAT_AMPLITUDE: f32 = 0.8;
/// Float phase advance per tick, radians
const FLOAT_SPEED: f32 = 0.03;

/// Reward variants with fixed point values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardKind {
    Coin,
    Star,
    Gem,
}

impl RewardKind {
    /// Points granted on collection
    pub fn value(&self) -> u32 {
        match self {
            RewardKind::Coin => 10,
            RewardKind::Star => 20,
            RewardKind::Gem => 50,
        }
    }

    /// Sprite extent in pixels
    pub fn size(&self) -> Vec2 {
        match self {
            RewardKind::Coin => Vec2::new(32.0, 32.0),
            RewardKind::Star => Vec2::new(36.0, 36.0),
            RewardKind::Gem => Vec2::new(32.0, 40.0),
        }
    }
}

/// A live reward item, centered at `pos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    pub kind: RewardKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Oscillation center recorded at spawn
    center_y: f32,
    /// Angular accumulator for the vertical bob; never reset mid-flight
    float_phase: f32,
    pub collected: bool,
    /// Ticks elapsed in the fade-and-grow sequence
    collect_ticks: f32,
}

impl Reward {
    fn spawn(kind: RewardKind, config: &WorldConfig, rng: &mut Pcg32) -> Self {
        let size = kind.size();
        // A band the runner can reach with one jump
        let center_y = rng.random_range(config.ground_y - 170.0..config.ground_y - 80.0);
        Self {
            kind,
            pos: Vec2::new(config.width + size.x, center_y),
            size,
            speed: config.speed * REWARD_SPEED_FACTOR,
            center_y,
            float_phase: rng.random_range(0.0..TAU),
            collected: false,
            collect_ticks: 0.0,
        }
    }

    /// Advance the drift and bob, or the collection sequence once collected.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_REWARD_DELTA);
        if self.collected {
            self.collect_ticks += dt;
            return;
        }

        self.pos.x -= self.speed * dt;
        self.float_phase += FLOAT_SPEED * dt;
        self.pos.y = self.center_y + self.float_phase.sin() * FLOAT_AMPLITUDE;
    }

    /// Full (unshrunk) bounding box
    pub fn aabb(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }

    /// Sprite opacity for the presentation layer (1 → 0 while fading out)
    pub fn alpha(&self) -> f32 {
        if self.collected {
            (1.0 - self.collect_ticks / REWARD_COLLECT_TICKS).max(0.0)
        } else {
            1.0
        }
    }

    /// Sprite scale for the presentation layer (grows while fading out)
    pub fn scale(&self) -> f32 {
        if self.collected {
            1.0 + self.collect_ticks * 0.05
        } else {
            1.0
        }
    }

    /// Whether the collection sequence has finished
    fn sequence_done(&self) -> bool {
        self.collected && self.collect_ticks >= REWARD_COLLECT_TICKS
    }

    /// Motionless reward at an exact position, for collision tests
    #[cfg(test)]
    pub(crate) fn pinned_at(kind: RewardKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: kind.size(),
            speed: 0.0,
            center_y: pos.y,
            float_phase: 0.0,
            collected: false,
            collect_ticks: 0.0,
        }
    }
}

/// Owns all live rewards and their spawn cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardSystem {
    config: WorldConfig,
    rewards: Vec<Reward>,
    timer: SpawnTimer,
    running: bool,
    spawn_count: u32,
}

impl RewardSystem {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            rewards: Vec::new(),
            timer: SpawnTimer::new(REWARD_INTERVAL_MIN_MS, REWARD_INTERVAL_MAX_MS),
            running: false,
            spawn_count: 0,
        }
    }

    /// Start spawning. The first countdown is pre-seeded to 90% so a reward
    /// appears shortly after play begins instead of a full random interval.
    pub fn start(&mut self, rng: &mut Pcg32) {
        self.running = true;
        self.timer.arm(rng, 1.0);
        self.timer.pre_seed(0.9);
        log::debug!(
            "reward spawner armed, first item in {:.0} ms",
            self.timer.remaining_ms()
        );
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance all rewards, retire finished or off-screen items, spawn on
    /// schedule.
    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        if !self.running {
            return;
        }

        // Back-to-front so in-place removal never skips an element
        for i in (0..self.rewards.len()).rev() {
            let reward = &mut self.rewards[i];
            reward.update(dt);

            if reward.sequence_done() || reward.pos.x < -reward.size.x {
                self.rewards.remove(i);
            }
        }

        self.timer.advance(dt);
        if self.timer.is_ready() {
            self.spawn_reward(rng);
            self.timer.arm(rng, 1.0);
        }
    }

    /// Non-fatal collection check. Invokes `on_collect` synchronously with
    /// the item's point value, exactly once per item; collected items are
    /// excluded from further checks while their fade sequence plays.
    pub fn check_collisions(&mut self, runner_box: &Aabb, on_collect: &mut dyn FnMut(u32)) {
        for reward in &mut self.rewards {
            if reward.collected {
                continue;
            }
            if reward.aabb().shrink(REWARD_BOX_SHRINK).overlaps(runner_box) {
                reward.collected = true;
                reward.collect_ticks = 0.0;
                on_collect(reward.kind.value());
            }
        }
    }

    /// Drop every reward (cancelling in-flight collection sequences) and
    /// re-arm the spawn timer. The system stays stopped until `start()`.
    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.running = false;
        self.rewards.clear();
        self.spawn_count = 0;
        self.timer.arm(rng, 1.0);
    }

    fn spawn_reward(&mut self, rng: &mut Pcg32) {
        // Cumulative weights: coin 60%, star 30%, gem 10%
        let r: f32 = rng.random();
        let kind = if r < 0.6 {
            RewardKind::Coin
        } else if r < 0.9 {
            RewardKind::Star
        } else {
            RewardKind::Gem
        };

        self.spawn_count += 1;
        self.rewards.push(Reward::spawn(kind, &self.config, rng));
        log::debug!(
            "spawned reward #{} ({:?}), {} in flight",
            self.spawn_count,
            kind,
            self.rewards.len()
        );
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub(crate) fn plant_for_test(&mut self, reward: Reward) {
        self.rewards.push(reward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn system() -> (RewardSystem, Pcg32) {
        (
            RewardSystem::new(WorldConfig::default()),
            Pcg32::seed_from_u64(9),
        )
    }

    fn overlap_box(reward: &Reward) -> Aabb {
        Aabb::centered(reward.pos, Vec2::new(60.0, 60.0))
    }

    #[test]
    fn test_collection_callback_fires_exactly_once() {
        let (mut sys, mut rng) = system();
        sys.running = true;
        sys.rewards.push(Reward::spawn(
            RewardKind::Coin,
            &WorldConfig::default(),
            &mut rng,
        ));
        let hit_box = overlap_box(&sys.rewards[0]);

        let mut collected = Vec::new();
        sys.check_collisions(&hit_box, &mut |v| collected.push(v));
        assert_eq!(collected, vec![10]);

        // Item is mid-sequence: further checks must ignore it
        sys.check_collisions(&hit_box, &mut |v| collected.push(v));
        assert_eq!(collected, vec![10]);
    }

    #[test]
    fn test_collected_item_fades_then_vanishes() {
        let (mut sys, mut rng) = system();
        sys.running = true;
        sys.rewards.push(Reward::spawn(
            RewardKind::Star,
            &WorldConfig::default(),
            &mut rng,
        ));
        let hit_box = overlap_box(&sys.rewards[0]);
        sys.check_collisions(&hit_box, &mut |_| {});

        sys.update(10.0, &mut rng);
        let reward = &sys.rewards[0];
        assert!(reward.alpha() < 1.0);
        assert!(reward.scale() > 1.0);

        for _ in 0..20 {
            sys.update(2.0, &mut rng);
        }
        assert!(sys.rewards().is_empty());
    }

    #[test]
    fn test_oscillates_around_spawn_center() {
        let (_, mut rng) = system();
        let mut reward = Reward::spawn(RewardKind::Coin, &WorldConfig::default(), &mut rng);
        reward.speed = 0.0; // isolate the bob
        let center = reward.center_y;
        for _ in 0..300 {
            reward.update(1.0);
            assert!((reward.pos.y - center).abs() <= FLOAT_AMPLITUDE + 1e-4);
        }
    }

    #[test]
    fn test_spawn_band_is_jump_reachable() {
        let (_, mut rng) = system();
        let config = WorldConfig::default();
        for _ in 0..100 {
            let reward = Reward::spawn(RewardKind::Gem, &config, &mut rng);
            assert!(reward.center_y >= config.ground_y - 170.0);
            assert!(reward.center_y < config.ground_y - 80.0);
        }
    }

    #[test]
    fn test_speed_is_fixed_fraction_of_base() {
        let (_, mut rng) = system();
        let config = WorldConfig::default();
        let reward = Reward::spawn(RewardKind::Coin, &config, &mut rng);
        assert_eq!(reward.speed, config.speed * REWARD_SPEED_FACTOR);
    }

    #[test]
    fn test_first_spawn_arrives_quickly() {
        let (mut sys, mut rng) = system();
        sys.start(&mut rng);
        // 10% of the 6000 ms worst case is 600 ms = 36 ticks
        for _ in 0..40 {
            sys.update(1.0, &mut rng);
        }
        assert!(!sys.rewards().is_empty());
    }

    #[test]
    fn test_reset_cancels_in_flight_sequence() {
        let (mut sys, mut rng) = system();
        sys.running = true;
        sys.rewards.push(Reward::spawn(
            RewardKind::Coin,
            &WorldConfig::default(),
            &mut rng,
        ));
        let hit_box = overlap_box(&sys.rewards[0]);
        sys.check_collisions(&hit_box, &mut |_| {});

        sys.reset(&mut rng);
        assert!(sys.rewards().is_empty());
        assert!(!sys.is_running());
    }
}
