use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RunnerConfig;
use crate::games::{Action, Feedback, Game};

pub const LANES: [i8; 3] = [-1, 0, 1];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Barrier,
    Coin,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub lane: i8,
    /// Distance ahead of the runner. Shrinks every tick.
    pub distance: f32,
    pub kind: ObstacleKind,
    pub consumed: bool,
    pub spawned_at: u64,
}

pub struct RunnerView<'a> {
    pub started: bool,
    pub game_over: bool,
    pub lane: i8,
    pub obstacles: &'a [Obstacle],
    pub track_length: f32,
    pub speed: f32,
    pub distance: f32,
    pub score: u32,
}

pub struct Runner {
    config: RunnerConfig,
    rng: StdRng,
    started: bool,
    game_over: bool,
    lane: i8,
    speed: f32,
    obstacles: Vec<Obstacle>,
    score: u32,
    distance: f32,
    tick: u64,
    feedback: Vec<Feedback>,
}

impl Runner {
    pub fn new(config: RunnerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RunnerConfig, rng: StdRng) -> Self {
        Self {
            started: false,
            game_over: false,
            lane: 0,
            speed: config.initial_speed,
            obstacles: Vec::new(),
            score: 0,
            distance: 0.0,
            tick: 0,
            feedback: Vec::new(),
            config,
            rng,
        }
    }

    pub fn view(&self) -> RunnerView<'_> {
        RunnerView {
            started: self.started,
            game_over: self.game_over,
            lane: self.lane,
            obstacles: &self.obstacles,
            track_length: self.config.track_length,
            speed: self.speed,
            distance: self.distance,
            score: self.score,
        }
    }

    pub fn lane(&self) -> i8 {
        self.lane
    }

    fn in_hit_band(&self, obs: &Obstacle) -> bool {
        obs.distance >= self.config.hit_band_near && obs.distance <= self.config.hit_band_far
    }

    fn maybe_spawn(&mut self) {
        if self.obstacles.len() >= self.config.max_obstacles {
            return;
        }
        if !self.rng.gen_bool(self.config.spawn_chance) {
            return;
        }
        let lane = LANES[self.rng.gen_range(0..LANES.len())];
        let kind = if self.rng.gen_bool(self.config.coin_chance) {
            ObstacleKind::Coin
        } else {
            ObstacleKind::Barrier
        };
        self.try_spawn(lane, kind);
    }

    /// Place an obstacle at the far end of the track unless it would crowd
    /// one already close to the spawn line. Returns whether it was placed.
    fn try_spawn(&mut self, lane: i8, kind: ObstacleKind) -> bool {
        let spawn_at = self.config.track_length;
        let spacing = self.config.min_lane_spacing;
        let near_spawn = |o: &&Obstacle| (spawn_at - o.distance).abs() < spacing;

        if self.obstacles.iter().filter(near_spawn).any(|o| o.lane == lane) {
            return false;
        }
        // A barrier in every lane at once cannot be dodged.
        if kind == ObstacleKind::Barrier {
            let walled = self
                .obstacles
                .iter()
                .filter(near_spawn)
                .filter(|o| o.kind == ObstacleKind::Barrier && o.lane != lane)
                .count();
            if walled >= LANES.len() - 1 {
                return false;
            }
        }

        log::debug!("runner: {:?} spawned in lane {} at tick {}", kind, lane, self.tick);
        self.obstacles.push(Obstacle {
            lane,
            distance: spawn_at,
            kind,
            consumed: false,
            spawned_at: self.tick,
        });
        true
    }

    fn resolve_collisions(&mut self) {
        let lane = self.lane;
        let mut crashed = false;
        for i in 0..self.obstacles.len() {
            let hit = self.obstacles[i].lane == lane && self.in_hit_band(&self.obstacles[i]);
            if !hit {
                continue;
            }
            let obs = &mut self.obstacles[i];
            match obs.kind {
                ObstacleKind::Barrier => crashed = true,
                ObstacleKind::Coin if !obs.consumed => {
                    obs.consumed = true;
                    self.score += self.config.coin_value;
                    self.feedback.push(Feedback::Score);
                }
                ObstacleKind::Coin => {}
            }
        }
        if crashed {
            self.game_over = true;
            self.feedback.push(Feedback::Collision);
            self.feedback.push(Feedback::GameOver);
            log::info!(
                "runner: crashed in lane {} after {:.0}m, score {}",
                lane,
                self.distance,
                self.score
            );
        }
    }
}

impl Game for Runner {
    fn start(&mut self) {
        self.started = true;
    }

    fn tick(&mut self) {
        if !self.started || self.game_over {
            return;
        }
        self.tick += 1;

        self.speed = (self.speed + self.config.speed_ramp).min(self.config.max_speed);
        self.distance += self.speed;
        for obs in &mut self.obstacles {
            obs.distance -= self.speed;
        }

        self.resolve_collisions();
        if self.game_over {
            return;
        }

        let near = self.config.hit_band_near;
        self.obstacles.retain(|o| !o.consumed && o.distance >= near);
        self.maybe_spawn();
    }

    fn handle_action(&mut self, action: Action) {
        if self.game_over {
            return;
        }
        if !self.started {
            self.start();
            return;
        }
        let delta = match action {
            Action::Left => -1,
            Action::Right => 1,
            _ => return,
        };
        self.lane = (self.lane + delta).clamp(-1, 1);
        // Moving sideways into something already level with us counts.
        self.resolve_collisions();
    }

    fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Runner::with_rng(self.config.clone(), rng);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms)
    }

    fn drain_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }
}
