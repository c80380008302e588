use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TicTacToeConfig;
use crate::games::{Action, Feedback, Game};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    /// `X`, always moves first.
    Player,
    /// `O`.
    Bot,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::Player => Mark::Bot,
            Mark::Bot => Mark::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    BotWins,
    Draw,
}

pub type Board = [Option<Mark>; 9];

pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The first completed line on the board, if any.
pub fn completed_line(board: &Board) -> Option<(Mark, [usize; 3])> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match board[a] {
            Some(mark) if board[b] == Some(mark) && board[c] == Some(mark) => Some((mark, line)),
            _ => None,
        }
    })
}

pub fn outcome_of(board: &Board) -> Option<Outcome> {
    match completed_line(board) {
        Some((Mark::Player, _)) => Some(Outcome::PlayerWins),
        Some((Mark::Bot, _)) => Some(Outcome::BotWins),
        None if board.iter().all(Option::is_some) => Some(Outcome::Draw),
        None => None,
    }
}

/// A cell that would complete a line for `mark`.
fn finishing_move(board: &Board, mark: Mark) -> Option<usize> {
    LINES.iter().find_map(|line| {
        let owned = line.iter().filter(|&&i| board[i] == Some(mark)).count();
        let empty: Vec<usize> = line.iter().copied().filter(|&i| board[i].is_none()).collect();
        (owned == 2 && empty.len() == 1).then(|| empty[0])
    })
}

/// Win if possible, otherwise block, otherwise any empty cell at random.
pub fn choose_bot_move<R: Rng>(board: &Board, rng: &mut R) -> Option<usize> {
    if let Some(cell) = finishing_move(board, Mark::Bot) {
        return Some(cell);
    }
    if let Some(cell) = finishing_move(board, Mark::Player) {
        return Some(cell);
    }
    let empty: Vec<usize> = (0..9).filter(|&i| board[i].is_none()).collect();
    if empty.is_empty() {
        None
    } else {
        Some(empty[rng.gen_range(0..empty.len())])
    }
}

pub struct TicTacToeView<'a> {
    pub board: &'a Board,
    pub turn: Mark,
    pub outcome: Option<Outcome>,
    pub winning_line: Option<[usize; 3]>,
}

pub struct TicTacToe {
    config: TicTacToeConfig,
    rng: StdRng,
    board: Board,
    turn: Mark,
    outcome: Option<Outcome>,
    winning_line: Option<[usize; 3]>,
    bot_wait: u32,
    feedback: Vec<Feedback>,
}

impl TicTacToe {
    pub fn new(config: TicTacToeConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: TicTacToeConfig, rng: StdRng) -> Self {
        Self {
            board: [None; 9],
            turn: Mark::Player,
            outcome: None,
            winning_line: None,
            bot_wait: 0,
            feedback: Vec::new(),
            config,
            rng,
        }
    }

    pub fn view(&self) -> TicTacToeView<'_> {
        TicTacToeView {
            board: &self.board,
            turn: self.turn,
            outcome: self.outcome,
            winning_line: self.winning_line,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn place(&mut self, cell: usize, mark: Mark) {
        self.board[cell] = Some(mark);
        self.winning_line = completed_line(&self.board).map(|(_, line)| line);
        self.outcome = outcome_of(&self.board);

        match self.outcome {
            None => {
                self.turn = mark.other();
                if self.turn == Mark::Bot {
                    self.bot_wait = self.config.bot_delay_ticks;
                }
            }
            Some(outcome) => {
                self.feedback.push(match outcome {
                    Outcome::PlayerWins => Feedback::Win,
                    Outcome::BotWins => Feedback::Lose,
                    Outcome::Draw => Feedback::Draw,
                });
                self.feedback.push(Feedback::GameOver);
                log::info!("tic-tac-toe: {:?}", outcome);
            }
        }
    }

    fn bot_move(&mut self) {
        if let Some(cell) = choose_bot_move(&self.board, &mut self.rng) {
            log::debug!("tic-tac-toe: bot takes cell {}", cell);
            self.place(cell, Mark::Bot);
        }
    }
}

impl Game for TicTacToe {
    fn start(&mut self) {}

    fn tick(&mut self) {
        if self.outcome.is_some() || self.turn != Mark::Bot {
            return;
        }
        self.bot_wait = self.bot_wait.saturating_sub(1);
        if self.bot_wait == 0 {
            self.bot_move();
        }
    }

    fn handle_action(&mut self, action: Action) {
        let Action::Select(cell) = action else {
            return;
        };
        if self.outcome.is_some() || self.turn != Mark::Player {
            return;
        }
        if cell >= self.board.len() || self.board[cell].is_some() {
            return;
        }
        self.place(cell, Mark::Player);
    }

    fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = TicTacToe::with_rng(self.config.clone(), rng);
    }

    fn score(&self) -> u32 {
        u32::from(self.outcome == Some(Outcome::PlayerWins))
    }

    fn is_game_over(&self) -> bool {
        self.outcome.is_some()
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

    const X: Option<Mark> = Some(Mark::Player);
    const O: Option<Mark> = Some(Mark::Bot);
    const E: Option<Mark> = None;

    fn game_with(board: Board, turn: Mark) -> TicTacToe {
        let mut game = TicTacToe::new(TicTacToeConfig::default(), 17);
        game.board = board;
        game.turn = turn;
        game.bot_wait = 1;
        game
    }

    #[test]
    fn bot_completes_its_own_line_first() {
        let mut game = game_with([X, X, E, O, O, E, E, E, E], Mark::Bot);
        game.tick();
        assert_eq!(game.board()[5], O);
        assert_eq!(game.outcome(), Some(Outcome::BotWins));
        assert_eq!(game.view().winning_line, Some([3, 4, 5]));
        assert!(!matches!(completed_line(game.board()), Some((Mark::Player, _))));
    }

    #[test]
    fn bot_blocks_when_it_cannot_win() {
        let mut game = game_with([X, X, E, O, E, E, E, E, E], Mark::Bot);
        game.tick();
        assert_eq!(game.board()[2], O);
        assert_eq!(game.outcome(), None);
        assert_eq!(game.turn(), Mark::Player);
    }

    #[test]
    fn bot_waits_for_its_delay() {
        let mut game = TicTacToe::new(TicTacToeConfig::default(), 3);
        game.handle_action(Action::Select(4));
        assert_eq!(game.turn(), Mark::Bot);
        for _ in 0..4 {
            game.tick();
            assert_eq!(game.board().iter().filter(|c| c.is_some()).count(), 1);
        }
        game.tick();
        assert_eq!(game.board().iter().filter(|c| c.is_some()).count(), 2);
        assert_eq!(game.turn(), Mark::Player);
    }

    #[test]
    fn player_cannot_move_out_of_turn_or_onto_marks() {
        let mut game = TicTacToe::new(TicTacToeConfig::default(), 4);
        game.handle_action(Action::Select(0));
        game.handle_action(Action::Select(1));
        assert_eq!(game.board()[1], None);

        let mut game = game_with([X, E, E, E, O, E, E, E, E], Mark::Player);
        game.handle_action(Action::Select(4));
        assert_eq!(game.board()[4], O);
        assert_eq!(game.turn(), Mark::Player);
        game.handle_action(Action::Select(9));
        assert_eq!(game.turn(), Mark::Player);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let mut game = game_with([X, O, X, X, O, O, O, X, E], Mark::Player);
        game.handle_action(Action::Select(8));
        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert_eq!(game.drain_feedback(), vec![Feedback::Draw, Feedback::GameOver]);
    }

    #[test]
    fn terminal_board_ignores_input_until_restart() {
        let mut game = game_with([X, X, E, O, O, E, E, E, E], Mark::Player);
        game.handle_action(Action::Select(2));
        assert_eq!(game.outcome(), Some(Outcome::PlayerWins));
        assert_eq!(game.score(), 1);
        game.handle_action(Action::Select(5));
        assert_eq!(game.board()[5], None);

        game.restart();
        assert_eq!(game.board(), &[None; 9]);
        assert_eq!(game.turn(), Mark::Player);
        assert_eq!(game.outcome(), None);
    }
}
