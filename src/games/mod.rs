pub mod durak;
pub mod flappy;
pub mod runner;
pub mod snake;
pub mod stack;
pub mod tetris;
pub mod tic_tac_toe;

use std::time::Duration;

/// Input vocabulary shared by every engine. The host maps taps, swipes and
/// keys onto these; each engine ignores the actions it has no use for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    Left,
    Right,
    Up,
    Down,
    Rotate,
    Drop,
    Select(usize),
    PlayCard(usize),
    Enough,
    Take,
}

/// Fire-and-forget notifications for haptics or sound. Never awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Jump,
    Score,
    Collision,
    LineClear(u32),
    GameOver,
    Win,
    Lose,
    Draw,
}

pub trait Game {
    /// Leave the not-started state. Calling it again has no effect.
    fn start(&mut self);
    /// Advance all time-dependent state by exactly one step.
    fn tick(&mut self);
    /// Apply an input if it is legal right now; otherwise do nothing.
    fn handle_action(&mut self, action: Action);
    /// Throw away the session and return to the initial configuration.
    fn restart(&mut self);
    fn score(&self) -> u32;
    fn is_game_over(&self) -> bool;
    fn tick_interval(&self) -> Duration;
    fn drain_feedback(&mut self) -> Vec<Feedback>;
}
