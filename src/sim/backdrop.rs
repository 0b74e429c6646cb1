//! Ambient decoration: drifting clouds and the ground scroll offset
//!
//! Purely cosmetic. Nothing here participates in collisions or scoring;
//! the snapshot carries it so the renderer can draw a moving world.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::consts::{CLOUD_INTERVAL_MAX_MS, CLOUD_INTERVAL_MIN_MS, CLOUD_SPEED_FACTOR};
use crate::sim::spawn::SpawnTimer;

/// Cloud sprite base width before scaling
const CLOUD_WIDTH: f32 = 128.0;
/// Ground texture tile width the scroll offset wraps at
const GROUND_TILE_WIDTH: f32 = 64.0;

/// One drifting cloud
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub scale: f32,
}

/// Cloud spawner plus ground scroll accumulator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backdrop {
    config: WorldConfig,
    clouds: Vec<Cloud>,
    timer: SpawnTimer,
    speed: f32,
    ground_offset: f32,
}

impl Backdrop {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            clouds: Vec::new(),
            timer: SpawnTimer::new(CLOUD_INTERVAL_MIN_MS, CLOUD_INTERVAL_MAX_MS),
            speed: config.speed * CLOUD_SPEED_FACTOR,
            ground_offset: 0.0,
        }
    }

    /// Drift clouds, scroll the ground at the current world speed, spawn new
    /// clouds on schedule.
    pub fn update(&mut self, dt: f32, current_speed: f32, rng: &mut Pcg32) {
        for i in (0..self.clouds.len()).rev() {
            let cloud = &mut self.clouds[i];
            cloud.pos.x -= self.speed * dt;
            if cloud.pos.x < -CLOUD_WIDTH * cloud.scale {
                self.clouds.remove(i);
            }
        }

        self.ground_offset = (self.ground_offset + current_speed * dt) % GROUND_TILE_WIDTH;

        self.timer.advance(dt);
        if self.timer.is_ready() {
            self.spawn_cloud(rng);
            self.timer.arm(rng, 1.0);
        }
    }

    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.clouds.clear();
        self.ground_offset = 0.0;
        self.timer.arm(rng, 1.0);
    }

    fn spawn_cloud(&mut self, rng: &mut Pcg32) {
        // Upper band of the sky; the band degenerates gracefully on short fields
        let min_y = 60.0;
        let max_y = (self.config.ground_y - 500.0).max(min_y + 1.0);
        self.clouds.push(Cloud {
            pos: Vec2::new(
                self.config.width + CLOUD_WIDTH,
                rng.random_range(min_y..max_y),
            ),
            scale: rng.random_range(0.4..0.8),
        });
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn ground_offset(&self) -> f32 {
        self.ground_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_clouds_drift_left_and_retire() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut backdrop = Backdrop::new(WorldConfig::default());
        backdrop.spawn_cloud(&mut rng);
        let start_x = backdrop.clouds()[0].pos.x;

        backdrop.update(1.0, 5.0, &mut rng);
        assert!(backdrop.clouds()[0].pos.x < start_x);

        for _ in 0..2000 {
            backdrop.update(1.0, 5.0, &mut rng);
        }
        // Everything spawned so far has had time to cross the field
        assert!(backdrop.clouds().iter().all(|c| c.pos.x > -200.0));
    }

    #[test]
    fn test_ground_offset_wraps() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut backdrop = Backdrop::new(WorldConfig::default());
        for _ in 0..100 {
            backdrop.update(1.5, 7.0, &mut rng);
            assert!(backdrop.ground_offset() >= 0.0);
            assert!(backdrop.ground_offset() < GROUND_TILE_WIDTH);
        }
    }

    #[test]
    fn test_reset_clears_sky() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut backdrop = Backdrop::new(WorldConfig::default());
        for _ in 0..500 {
            backdrop.update(1.0, 5.0, &mut rng);
        }
        backdrop.reset(&mut rng);
        assert!(backdrop.clouds().is_empty());
        assert_eq!(backdrop.ground_offset(), 0.0);
    }
}
