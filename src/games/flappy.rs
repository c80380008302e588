use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FlappyConfig;
use crate::games::{Action, Feedback, Game};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: f32,
    /// Height of the top pipe; the gap starts right below it.
    pub top_height: f32,
    pub scored: bool,
    pub spawned_at: u64,
}

pub struct FlappyView<'a> {
    pub phase: Phase,
    pub bird_x: f32,
    pub bird_y: f32,
    pub bird_size: f32,
    pub pipes: &'a [Pipe],
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub score: u32,
}

pub struct Flappy {
    config: FlappyConfig,
    rng: StdRng,
    phase: Phase,
    bird_y: f32,
    bird_vy: f32,
    pipes: Vec<Pipe>,
    score: u32,
    tick: u64,
    ticks_since_spawn: u32,
    feedback: Vec<Feedback>,
}

impl Flappy {
    pub fn new(config: FlappyConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FlappyConfig, rng: StdRng) -> Self {
        Self {
            bird_y: config.bird_start_y,
            bird_vy: 0.0,
            phase: Phase::NotStarted,
            pipes: Vec::new(),
            score: 0,
            tick: 0,
            ticks_since_spawn: 0,
            feedback: Vec::new(),
            config,
            rng,
        }
    }

    pub fn view(&self) -> FlappyView<'_> {
        FlappyView {
            phase: self.phase,
            bird_x: self.config.bird_x,
            bird_y: self.bird_y,
            bird_size: self.config.bird_size,
            pipes: &self.pipes,
            pipe_width: self.config.pipe_width,
            pipe_gap: self.config.pipe_gap,
            canvas_width: self.config.canvas_width,
            canvas_height: self.config.canvas_height,
            score: self.score,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn spawn_pipe(&mut self) {
        let c = &self.config;
        let max_top = c.canvas_height - c.pipe_gap - c.pipe_margin;
        let top_height = self.rng.gen_range(c.pipe_margin..=max_top);
        log::debug!("flappy: pipe spawned at tick {} with top {:.1}", self.tick, top_height);
        self.pipes.push(Pipe {
            x: c.canvas_width,
            top_height,
            scored: false,
            spawned_at: self.tick,
        });
    }

    fn check_collision(&self) -> bool {
        let c = &self.config;
        let top = self.bird_y;
        let bottom = self.bird_y + c.bird_size;
        if top < 0.0 || bottom > c.canvas_height {
            return true;
        }

        let left = c.bird_x;
        let right = c.bird_x + c.bird_size;
        self.pipes.iter().any(|pipe| {
            let overlaps_x = right > pipe.x && left < pipe.x + c.pipe_width;
            let outside_gap = top < pipe.top_height || bottom > pipe.top_height + c.pipe_gap;
            overlaps_x && outside_gap
        })
    }
}

impl Game for Flappy {
    fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::Playing;
        }
    }

    fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.tick += 1;

        self.bird_vy += self.config.gravity;
        self.bird_y += self.bird_vy;

        let speed = self.config.pipe_speed;
        let bird_x = self.config.bird_x;
        let pipe_width = self.config.pipe_width;
        for pipe in &mut self.pipes {
            pipe.x -= speed;
            if !pipe.scored && pipe.x + pipe_width < bird_x {
                pipe.scored = true;
                self.score += 1;
                self.feedback.push(Feedback::Score);
            }
        }
        self.pipes.retain(|pipe| pipe.x + pipe_width > 0.0);

        self.ticks_since_spawn += 1;
        if self.ticks_since_spawn >= self.config.pipe_spawn_ticks {
            self.ticks_since_spawn = 0;
            self.spawn_pipe();
        }

        if self.check_collision() {
            self.phase = Phase::GameOver;
            self.feedback.push(Feedback::Collision);
            self.feedback.push(Feedback::GameOver);
            log::info!("flappy: game over with score {}", self.score);
        }
    }

    fn handle_action(&mut self, _action: Action) {
        // Every input means "flap"; the phase decides what a flap does.
        match self.phase {
            Phase::NotStarted => self.start(),
            Phase::Playing => {
                self.bird_vy = self.config.jump_velocity;
                self.feedback.push(Feedback::Jump);
            }
            Phase::GameOver => self.restart(),
        }
    }

    fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Flappy::with_rng(self.config.clone(), rng);
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms)
    }

    fn drain_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> Flappy {
        let mut game = Flappy::new(FlappyConfig::default(), 7);
        game.handle_action(Action::Jump);
        assert_eq!(game.phase(), Phase::Playing);
        game
    }

    #[test]
    fn first_input_starts_without_physics() {
        let mut game = Flappy::new(FlappyConfig::default(), 1);
        game.handle_action(Action::Jump);
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(game.bird_vy, 0.0);
        assert_eq!(game.bird_y, 250.0);
        assert!(game.drain_feedback().is_empty());
    }

    #[test]
    fn free_fall_is_monotonic_and_ends_once() {
        let mut game = playing();
        let mut last_y = game.bird_y;
        let mut game_overs = 0;
        let count = |game: &mut Flappy| {
            game.drain_feedback()
                .iter()
                .filter(|f| **f == Feedback::GameOver)
                .count()
        };

        for _ in 0..40 {
            game.tick();
            game_overs += count(&mut game);
            assert!(!game.is_game_over());
            assert!(game.bird_y > last_y);
            last_y = game.bird_y;
        }

        for _ in 0..20 {
            if game.is_game_over() {
                break;
            }
            game.tick();
            game_overs += count(&mut game);
        }
        assert!(game.is_game_over());
        assert!(game.bird_y + game.config.bird_size > game.config.canvas_height);

        for _ in 0..10 {
            game.tick();
            game_overs += count(&mut game);
        }
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn jump_sets_fixed_impulse() {
        let mut game = playing();
        game.tick();
        game.tick();
        game.handle_action(Action::Jump);
        assert_eq!(game.bird_vy, -5.0);
        game.tick();
        assert_eq!(game.bird_vy, -4.75);
    }

    #[test]
    fn pipe_scores_exactly_once() {
        let mut game = playing();
        game.pipes.push(Pipe {
            x: 1.5,
            top_height: 200.0,
            scored: false,
            spawned_at: 0,
        });
        game.tick();
        assert_eq!(game.score, 1);
        game.tick();
        assert_eq!(game.score, 1);
        assert!(!game.is_game_over());
    }

    #[test]
    fn hitting_a_pipe_ends_the_game() {
        let mut game = playing();
        game.pipes.push(Pipe {
            x: 60.0,
            top_height: 300.0,
            scored: false,
            spawned_at: 0,
        });
        game.tick();
        assert!(game.is_game_over());
    }

    #[test]
    fn pipes_spawn_on_interval_inside_margins() {
        let mut game = playing();
        for _ in 0..90 {
            game.bird_y = 250.0;
            game.bird_vy = 0.0;
            game.tick();
        }
        assert_eq!(game.pipes.len(), 1);
        let top = game.pipes[0].top_height;
        assert!((50.0..=300.0).contains(&top));
    }

    #[test]
    fn input_after_game_over_resets_everything() {
        let mut game = playing();
        while !game.is_game_over() {
            game.tick();
        }
        game.handle_action(Action::Left);
        assert_eq!(game.phase, Phase::NotStarted);
        assert_eq!(game.bird_y, 250.0);
        assert_eq!(game.score, 0);
        assert!(game.pipes.is_empty());
    }
}
