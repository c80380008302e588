use std::time::Duration;

use crate::config::StackConfig;
use crate::games::{Action, Feedback, Game};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub width: f32,
}

impl Platform {
    fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropOutcome {
    Perfect,
    Trimmed { cut: f32 },
    Missed,
}

pub struct StackView<'a> {
    pub started: bool,
    pub game_over: bool,
    pub blocks: &'a [Platform],
    pub moving: Platform,
    pub playfield_width: f32,
    pub score: u32,
}

pub struct Stack {
    config: StackConfig,
    started: bool,
    game_over: bool,
    blocks: Vec<Platform>,
    moving: Platform,
    direction: f32,
    score: u32,
    last_drop: Option<DropOutcome>,
    feedback: Vec<Feedback>,
}

impl Stack {
    pub fn new(config: StackConfig) -> Self {
        let base = Platform {
            x: (config.playfield_width - config.base_width) / 2.0,
            width: config.base_width,
        };
        Self {
            started: false,
            game_over: false,
            blocks: vec![base],
            moving: Platform {
                x: 0.0,
                width: base.width,
            },
            direction: 1.0,
            score: 0,
            last_drop: None,
            feedback: Vec::new(),
            config,
        }
    }

    pub fn view(&self) -> StackView<'_> {
        StackView {
            started: self.started,
            game_over: self.game_over,
            blocks: &self.blocks,
            moving: self.moving,
            playfield_width: self.config.playfield_width,
            score: self.score,
        }
    }

    pub fn blocks(&self) -> &[Platform] {
        &self.blocks
    }

    pub fn last_drop(&self) -> Option<DropOutcome> {
        self.last_drop
    }

    fn top(&self) -> Platform {
        // The base block is never removed.
        self.blocks[self.blocks.len() - 1]
    }

    fn drop_platform(&mut self) {
        let below = self.top();
        let moving = self.moving;

        let (placed, outcome) = if (moving.x - below.x).abs() < self.config.perfect_tolerance {
            (below, DropOutcome::Perfect)
        } else {
            let left = moving.x.max(below.x);
            let right = moving.right().min(below.right());
            let width = right - left;
            if width <= 0.0 {
                (Platform { x: left, width }, DropOutcome::Missed)
            } else {
                let cut = moving.width - width;
                (Platform { x: left, width }, DropOutcome::Trimmed { cut })
            }
        };
        self.last_drop = Some(outcome);

        if outcome == DropOutcome::Missed {
            self.game_over = true;
            self.feedback.push(Feedback::Collision);
            self.feedback.push(Feedback::GameOver);
            log::info!("stack: missed at height {}", self.score);
            return;
        }

        self.blocks.push(placed);
        self.score += 1;
        self.feedback.push(Feedback::Score);
        log::debug!("stack: {:?}, width now {:.1}", outcome, placed.width);

        // Alternate the side the next platform slides in from.
        let max_x = self.config.playfield_width - placed.width;
        if self.blocks.len() % 2 == 0 {
            self.moving = Platform {
                x: max_x,
                width: placed.width,
            };
            self.direction = -1.0;
        } else {
            self.moving = Platform {
                x: 0.0,
                width: placed.width,
            };
            self.direction = 1.0;
        }
    }
}

impl Game for Stack {
    fn start(&mut self) {
        self.started = true;
    }

    fn tick(&mut self) {
        if !self.started || self.game_over {
            return;
        }
        let max_x = self.config.playfield_width - self.moving.width;
        self.moving.x += self.direction * self.config.step;
        if self.moving.x >= max_x {
            self.moving.x = max_x;
            self.direction = -1.0;
        } else if self.moving.x <= 0.0 {
            self.moving.x = 0.0;
            self.direction = 1.0;
        }
    }

    fn handle_action(&mut self, _action: Action) {
        if self.game_over {
            return;
        }
        if !self.started {
            self.start();
            return;
        }
        self.drop_platform();
    }

    fn restart(&mut self) {
        *self = Stack::new(self.config.clone());
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

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> Stack {
        let mut stack = Stack::new(StackConfig::default());
        stack.handle_action(Action::Drop);
        assert!(stack.started);
        stack
    }

    #[test]
    fn platform_bounces_between_bounds() {
        let mut stack = started();
        for _ in 0..60 {
            stack.tick();
        }
        assert_eq!(stack.moving.x, 60.0);
        assert_eq!(stack.direction, -1.0);
        stack.tick();
        assert_eq!(stack.moving.x, 59.0);
        for _ in 0..70 {
            stack.tick();
            assert!(stack.moving.x >= 0.0 && stack.moving.x <= 60.0);
        }
    }

    #[test]
    fn aligned_drop_keeps_width() {
        let mut stack = started();
        stack.moving.x = 30.2;
        stack.handle_action(Action::Drop);
        assert_eq!(stack.last_drop(), Some(DropOutcome::Perfect));
        assert_eq!(stack.blocks()[1], Platform { x: 30.0, width: 40.0 });
        assert_eq!(stack.score, 1);
    }

    #[test]
    fn offset_drop_trims_overhang() {
        let mut stack = started();
        stack.moving.x = 40.0;
        stack.handle_action(Action::Drop);
        assert_eq!(stack.blocks()[1], Platform { x: 40.0, width: 30.0 });
        assert_eq!(stack.moving.width, 30.0);
        assert_eq!(stack.last_drop(), Some(DropOutcome::Trimmed { cut: 10.0 }));
    }

    #[test]
    fn complete_miss_ends_game() {
        let mut stack = started();
        stack.moving.x = 0.0;
        stack.moving.width = 30.0;
        stack.handle_action(Action::Drop);
        assert!(stack.is_game_over());
        assert_eq!(stack.blocks().len(), 1);
        assert_eq!(stack.last_drop(), Some(DropOutcome::Missed));

        stack.handle_action(Action::Drop);
        assert_eq!(stack.blocks().len(), 1);
    }

    #[test]
    fn restart_leaves_single_base() {
        let mut stack = started();
        stack.moving.x = 35.0;
        stack.handle_action(Action::Drop);
        stack.restart();
        assert_eq!(stack.blocks().len(), 1);
        assert_eq!(stack.score, 0);
        assert!(!stack.started);
        assert_eq!(stack.moving.width, 40.0);
    }
}
