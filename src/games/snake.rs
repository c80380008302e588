use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SnakeConfig;
use crate::games::{Action, Feedback, Game};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }
}

pub struct SnakeView<'a> {
    pub started: bool,
    pub game_over: bool,
    pub won: bool,
    pub grid_size: usize,
    pub segments: &'a VecDeque<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
}

pub struct Snake {
    config: SnakeConfig,
    rng: StdRng,
    started: bool,
    game_over: bool,
    won: bool,
    /// Head first.
    segments: VecDeque<Cell>,
    direction: Direction,
    pending: Direction,
    food: Option<Cell>,
    score: u32,
    feedback: Vec<Feedback>,
}

impl Snake {
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SnakeConfig, rng: StdRng) -> Self {
        let mid = (config.grid_size / 2) as i32;
        let mut snake = Self {
            started: false,
            game_over: false,
            won: false,
            segments: VecDeque::from([Cell::new(mid, mid)]),
            direction: Direction::Up,
            pending: Direction::Up,
            food: None,
            score: 0,
            feedback: Vec::new(),
            config,
            rng,
        };
        snake.food = snake.random_free_cell();
        snake
    }

    pub fn view(&self) -> SnakeView<'_> {
        SnakeView {
            started: self.started,
            game_over: self.game_over,
            won: self.won,
            grid_size: self.config.grid_size,
            segments: &self.segments,
            food: self.food,
            score: self.score,
        }
    }

    pub fn segments(&self) -> &VecDeque<Cell> {
        &self.segments
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        let size = self.config.grid_size as i32;
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    fn random_free_cell(&mut self) -> Option<Cell> {
        let size = self.config.grid_size as i32;
        let free: Vec<Cell> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Cell::new(x, y)))
            .filter(|c| !self.segments.contains(c))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.gen_range(0..free.len())])
    }

    fn end(&mut self) {
        self.game_over = true;
        self.feedback.push(Feedback::GameOver);
        log::info!("snake: game over at length {}, score {}", self.segments.len(), self.score);
    }

    fn steer(&mut self, direction: Direction) {
        // Reversing straight into the neck is refused; a lone head may turn around.
        if self.segments.len() > 1 && direction.is_opposite(self.direction) {
            return;
        }
        self.pending = direction;
    }
}

impl Game for Snake {
    fn start(&mut self) {
        self.started = true;
    }

    fn tick(&mut self) {
        if !self.started || self.game_over {
            return;
        }
        self.direction = self.pending;
        let (dx, dy) = self.direction.delta();
        let head = self.head();
        let next = Cell::new(head.x + dx, head.y + dy);

        if !self.in_bounds(next) || self.segments.contains(&next) {
            self.feedback.push(Feedback::Collision);
            self.end();
            return;
        }

        self.segments.push_front(next);
        if Some(next) == self.food {
            self.score += 1;
            self.feedback.push(Feedback::Score);
            self.food = self.random_free_cell();
            if self.food.is_none() {
                self.won = true;
                self.feedback.push(Feedback::Win);
                self.end();
            }
        } else {
            self.segments.pop_back();
        }
    }

    fn handle_action(&mut self, action: Action) {
        if self.game_over {
            return;
        }
        let direction = match action {
            Action::Up => Direction::Up,
            Action::Down => Direction::Down,
            Action::Left => Direction::Left,
            Action::Right => Direction::Right,
            _ => {
                self.start();
                return;
            }
        };
        self.start();
        self.steer(direction);
    }

    fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Snake::with_rng(self.config.clone(), rng);
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
