//! Obstacles: spawning, scrolling and lethal collision checks

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::sim::collision::{Aabb, OBSTACLE_BOX_SHRINK};
use crate::sim::spawn::SpawnTimer;

/// Obstacle variants. Blockers sit on the ground line; flyers hover in a
/// band that punishes badly timed jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    SmallBlocker,
    LargeBlocker,
    Flyer,
}

impl ObstacleKind {
    /// Sprite extent in pixels
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::SmallBlocker => Vec2::new(40.0, 40.0),
            ObstacleKind::LargeBlocker => Vec2::new(50.0, 100.0),
            ObstacleKind::Flyer => Vec2::new(46.0, 40.0),
        }
    }

    pub fn is_flyer(&self) -> bool {
        matches!(self, ObstacleKind::Flyer)
    }
}

/// A live obstacle, centered at `pos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Obstacle {
    fn spawn(kind: ObstacleKind, config: &WorldConfig, rng: &mut Pcg32) -> Self {
        let size = kind.size();
        let y = if kind.is_flyer() {
            rng.random_range(config.ground_y - 120.0..config.ground_y - 40.0)
        } else {
            // Grounded kinds stand on the ground line
            config.ground_y - size.y / 2.0
        };
        Self {
            kind,
            pos: Vec2::new(config.width + size.x, y),
            size,
            speed: config.speed,
        }
    }

    /// Full (unshrunk) bounding box
    pub fn aabb(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }

    /// Lethal-overlap test against the runner's already-shrunk box
    pub fn hits(&self, runner_box: &Aabb) -> bool {
        self.aabb().shrink(OBSTACLE_BOX_SHRINK).overlaps(runner_box)
    }
}

/// Owns all live obstacles and their spawn cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSystem {
    config: WorldConfig,
    obstacles: Vec<Obstacle>,
    timer: SpawnTimer,
    running: bool,
}

impl ObstacleSystem {
    pub fn new(config: WorldConfig) -> Self {
        let interval = config.obstacle_interval_ms;
        Self {
            config,
            obstacles: Vec::new(),
            timer: SpawnTimer::new(interval * 0.7, interval * 1.3),
            running: false,
        }
    }

    /// Start spawning; the first obstacle appears immediately.
    pub fn start(&mut self, rng: &mut Pcg32, is_fast: bool, speed_ratio: f32) {
        self.running = true;
        self.spawn_obstacle(rng, is_fast);
        self.timer.arm(rng, 1.0 / speed_ratio);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance all obstacles at the shared scroll speed, retire those whose
    /// right edge has passed the left boundary, and spawn on schedule.
    pub fn update(&mut self, dt: f32, current_speed: f32, speed_ratio: f32, is_fast: bool, rng: &mut Pcg32) {
        if !self.running {
            return;
        }

        // Back-to-front so in-place removal never skips an element
        for i in (0..self.obstacles.len()).rev() {
            let obstacle = &mut self.obstacles[i];
            obstacle.speed = current_speed;
            obstacle.pos.x -= obstacle.speed * dt;

            if obstacle.pos.x < -obstacle.size.x {
                self.obstacles.remove(i);
            }
        }

        self.timer.advance(dt);
        if self.timer.is_ready() {
            self.spawn_obstacle(rng, is_fast);
            // Higher speed ratio means shorter gaps
            self.timer.arm(rng, 1.0 / speed_ratio);
        }
    }

    /// True on the first lethal overlap. `runner_box` is the runner's
    /// already-shrunk hit box.
    pub fn check_collisions(&self, runner_box: &Aabb) -> bool {
        self.obstacles.iter().any(|o| o.hits(runner_box))
    }

    /// Clear the field and re-arm the spawn timer at base cadence.
    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.obstacles.clear();
        self.timer.arm(rng, 1.0);
        self.running = true;
    }

    fn spawn_obstacle(&mut self, rng: &mut Pcg32, is_fast: bool) {
        // Single draw against cumulative weights: flyer 10% (speed-gated),
        // else small 40% / large 50% of the unconditioned range.
        let r: f32 = rng.random();
        let kind = if r < 0.1 && is_fast {
            ObstacleKind::Flyer
        } else if r < 0.5 {
            ObstacleKind::SmallBlocker
        } else {
            ObstacleKind::LargeBlocker
        };

        let obstacle = Obstacle::spawn(kind, &self.config, rng);
        log::debug!(
            "spawned {:?} at x={:.1} ({} live)",
            kind,
            obstacle.pos.x,
            self.obstacles.len() + 1
        );
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn system() -> (ObstacleSystem, Pcg32) {
        (
            ObstacleSystem::new(WorldConfig::default()),
            Pcg32::seed_from_u64(42),
        )
    }

    #[test]
    fn test_no_flyers_at_low_speed() {
        let (mut sys, mut rng) = system();
        sys.running = true;
        for _ in 0..500 {
            sys.spawn_obstacle(&mut rng, false);
        }
        assert!(sys.obstacles().iter().all(|o| !o.kind.is_flyer()));
    }

    #[test]
    fn test_flyers_appear_once_fast() {
        let (mut sys, mut rng) = system();
        sys.running = true;
        for _ in 0..500 {
            sys.spawn_obstacle(&mut rng, true);
        }
        let flyers = sys.obstacles().iter().filter(|o| o.kind.is_flyer()).count();
        // ~10% of 500 draws
        assert!(flyers > 20 && flyers < 100, "got {flyers} flyers");
    }

    #[test]
    fn test_flyer_spawns_inside_air_band() {
        let (sys, mut rng) = system();
        let config = sys.config;
        for _ in 0..100 {
            let flyer = Obstacle::spawn(ObstacleKind::Flyer, &config, &mut rng);
            assert!(flyer.pos.y >= config.ground_y - 120.0);
            assert!(flyer.pos.y < config.ground_y - 40.0);
        }
    }

    #[test]
    fn test_obstacle_scrolls_off_and_is_removed() {
        // WorldConfig{speed=5, speed_increment=0.001, ground_y=550}: an
        // obstacle spawned at t=0 must vanish after crossing x = -width.
        let (mut sys, mut rng) = system();
        sys.start(&mut rng, false, 1.0);
        assert_eq!(sys.obstacles().len(), 1);

        // Freeze spawning so only the first obstacle is in play
        sys.timer = SpawnTimer::new(1e9, 2e9);
        sys.timer.arm(&mut rng, 1.0);

        let mut ticks = 0;
        while !sys.obstacles().is_empty() {
            sys.update(1.0, 5.0, 1.0, false, &mut rng);
            ticks += 1;
            assert!(ticks < 10_000, "obstacle never retired");
        }
        assert!(sys.obstacles().is_empty());
    }

    #[test]
    fn test_all_obstacles_track_current_speed() {
        let (mut sys, mut rng) = system();
        sys.start(&mut rng, true, 1.0);
        for _ in 0..20 {
            sys.update(1.0, 9.5, 1.5, true, &mut rng);
        }
        assert!(sys.obstacles().iter().all(|o| o.speed == 9.5));
    }

    #[test]
    fn test_collision_detects_overlap() {
        let (mut sys, mut rng) = system();
        let config = sys.config;
        sys.obstacles.push(Obstacle::spawn(
            ObstacleKind::SmallBlocker,
            &config,
            &mut rng,
        ));
        sys.obstacles[0].pos.x = 100.0;

        // Runner-sized box sharing the obstacle's spot
        let runner_box =
            Aabb::centered(Vec2::new(100.0, config.ground_y - 20.0), Vec2::new(60.0, 60.0))
                .shrink(crate::sim::collision::RUNNER_BOX_SHRINK);
        assert!(sys.check_collisions(&runner_box));

        // Far away: no hit
        let clear_box = Aabb::centered(Vec2::new(600.0, 300.0), Vec2::new(60.0, 60.0));
        assert!(!sys.check_collisions(&clear_box));
    }

    #[test]
    fn test_reset_clears_field() {
        let (mut sys, mut rng) = system();
        sys.start(&mut rng, false, 1.0);
        for _ in 0..600 {
            sys.update(1.0, 5.0, 1.0, false, &mut rng);
        }
        assert!(!sys.obstacles().is_empty());

        sys.reset(&mut rng);
        assert!(sys.obstacles().is_empty());
        assert!(sys.is_running());
    }
}
