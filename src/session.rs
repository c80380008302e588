//! One play session: exactly one engine plus the scheduler that drives it.

use std::time::Instant;

use crate::config::Config;
use crate::games::durak::Durak;
use crate::games::flappy::Flappy;
use crate::games::runner::Runner;
use crate::games::snake::Snake;
use crate::games::stack::Stack;
use crate::games::tetris::Tetris;
use crate::games::tic_tac_toe::TicTacToe;
use crate::games::{Action, Feedback, Game};
use crate::scheduler::TickScheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKind {
    Flappy,
    Runner,
    Stack,
    Snake,
    Tetris,
    TicTacToe,
    Durak,
}

impl GameKind {
    pub const ALL: [GameKind; 7] = [
        GameKind::Flappy,
        GameKind::Runner,
        GameKind::Stack,
        GameKind::Snake,
        GameKind::Tetris,
        GameKind::TicTacToe,
        GameKind::Durak,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameKind::Flappy => "Flappy",
            GameKind::Runner => "Runner",
            GameKind::Stack => "Stack",
            GameKind::Snake => "Snake",
            GameKind::Tetris => "Tetris",
            GameKind::TicTacToe => "Tic-Tac-Toe",
            GameKind::Durak => "Durak",
        }
    }

    pub fn index(self) -> usize {
        GameKind::ALL
            .iter()
            .position(|k| *k == self)
            .unwrap_or_default()
    }
}

pub enum Engine {
    Flappy(Flappy),
    Runner(Runner),
    Stack(Stack),
    Snake(Snake),
    Tetris(Tetris),
    TicTacToe(TicTacToe),
    Durak(Durak),
}

impl Engine {
    pub fn new(kind: GameKind, config: &Config, seed: u64) -> Self {
        match kind {
            GameKind::Flappy => Engine::Flappy(Flappy::new(config.flappy.clone(), seed)),
            GameKind::Runner => Engine::Runner(Runner::new(config.runner.clone(), seed)),
            GameKind::Stack => Engine::Stack(Stack::new(config.stack.clone())),
            GameKind::Snake => Engine::Snake(Snake::new(config.snake.clone(), seed)),
            GameKind::Tetris => Engine::Tetris(Tetris::new(config.tetris.clone(), seed)),
            GameKind::TicTacToe => {
                Engine::TicTacToe(TicTacToe::new(config.tic_tac_toe.clone(), seed))
            }
            GameKind::Durak => Engine::Durak(Durak::new(config.durak.clone(), seed)),
        }
    }

    pub fn as_game(&self) -> &dyn Game {
        match self {
            Engine::Flappy(g) => g,
            Engine::Runner(g) => g,
            Engine::Stack(g) => g,
            Engine::Snake(g) => g,
            Engine::Tetris(g) => g,
            Engine::TicTacToe(g) => g,
            Engine::Durak(g) => g,
        }
    }

    pub fn as_game_mut(&mut self) -> &mut dyn Game {
        match self {
            Engine::Flappy(g) => g,
            Engine::Runner(g) => g,
            Engine::Stack(g) => g,
            Engine::Snake(g) => g,
            Engine::Tetris(g) => g,
            Engine::TicTacToe(g) => g,
            Engine::Durak(g) => g,
        }
    }
}

pub struct Session {
    kind: GameKind,
    engine: Engine,
    scheduler: TickScheduler,
    paused: bool,
}

impl Session {
    pub fn new(kind: GameKind, config: &Config, seed: u64) -> Self {
        let engine = Engine::new(kind, config, seed);
        let scheduler = TickScheduler::new(engine.as_game().tick_interval());
        log::info!("session: {} opened (seed {})", kind.name(), seed);
        Self {
            kind,
            engine,
            scheduler,
            paused: false,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_active(&self) -> bool {
        !self.scheduler.is_cancelled()
    }

    pub fn start(&mut self) {
        if self.is_active() {
            self.engine.as_game_mut().start();
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        if self.is_active() && !self.paused {
            self.engine.as_game_mut().handle_action(action);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or resume the clock. Resuming does not replay the paused time.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused && !paused {
            self.scheduler.rearm();
        }
        self.paused = paused;
    }

    /// Step the engine once for every tick that is due at `now`.
    pub fn advance(&mut self, now: Instant) -> u32 {
        if self.paused {
            return 0;
        }
        let due = self.scheduler.due_ticks(now);
        let game = self.engine.as_game_mut();
        for _ in 0..due {
            game.tick();
        }
        due
    }

    pub fn restart(&mut self) {
        if !self.is_active() {
            return;
        }
        self.engine.as_game_mut().restart();
        self.paused = false;
        self.scheduler.rearm();
        log::info!("session: {} restarted", self.kind.name());
    }

    /// Stop the session for good. No tick or input reaches the engine afterwards.
    pub fn teardown(&mut self) {
        if self.is_active() {
            self.scheduler.cancel();
            log::info!("session: {} torn down", self.kind.name());
        }
    }

    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        self.engine.as_game_mut().drain_feedback()
    }

    pub fn score(&self) -> u32 {
        self.engine.as_game().score()
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.as_game().is_game_over()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}
