use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TetrisConfig;
use crate::games::{Action, Feedback, Game};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Spawn orientation as a tight bounding matrix.
    pub fn shape(self) -> Vec<Vec<bool>> {
        let rows: &[&[u8]] = match self {
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        rows.iter()
            .map(|row| row.iter().map(|&c| c == 1).collect())
            .collect()
    }
}

pub type Grid = Vec<Vec<Option<PieceKind>>>;

#[derive(Clone, Debug, PartialEq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Vec<Vec<bool>>,
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    pub fn new(kind: PieceKind, row: i32, col: i32) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            row,
            col,
        }
    }

    pub fn width(&self) -> usize {
        self.shape.first().map_or(0, |r| r.len())
    }

    /// Absolute `(row, col)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &filled)| filled)
                .map(move |(c, _)| (self.row + r as i32, self.col + c as i32))
        })
    }

    fn shifted(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            ..self.clone()
        }
    }

    /// Quarter turn clockwise: transpose, then reverse each row.
    pub fn rotated(&self) -> Self {
        let height = self.shape.len();
        let width = self.width();
        let mut shape: Vec<Vec<bool>> = (0..width)
            .map(|c| (0..height).map(|r| self.shape[r][c]).collect())
            .collect();
        for row in &mut shape {
            row.reverse();
        }
        Self {
            shape,
            ..self.clone()
        }
    }
}

pub struct TetrisView<'a> {
    pub started: bool,
    pub game_over: bool,
    pub grid: &'a Grid,
    pub piece: Option<&'a ActivePiece>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
}

pub struct Tetris {
    config: TetrisConfig,
    rng: StdRng,
    started: bool,
    game_over: bool,
    grid: Grid,
    piece: Option<ActivePiece>,
    next: PieceKind,
    score: u32,
    lines: u32,
    feedback: Vec<Feedback>,
}

impl Tetris {
    pub fn new(config: TetrisConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: TetrisConfig, mut rng: StdRng) -> Self {
        let next = Self::random_kind(&mut rng);
        let mut tetris = Self {
            started: false,
            game_over: false,
            grid: vec![vec![None; config.cols]; config.rows],
            piece: None,
            next,
            score: 0,
            lines: 0,
            feedback: Vec::new(),
            config,
            rng,
        };
        tetris.spawn();
        tetris
    }

    // Uniform choice on every spawn, no bag.
    fn random_kind(rng: &mut StdRng) -> PieceKind {
        PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
    }

    pub fn view(&self) -> TetrisView<'_> {
        TetrisView {
            started: self.started,
            game_over: self.game_over,
            grid: &self.grid,
            piece: self.piece.as_ref(),
            next: self.next,
            score: self.score,
            lines: self.lines,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn filled_cells(&self) -> usize {
        self.grid
            .iter()
            .map(|row| row.iter().filter(|c| c.is_some()).count())
            .sum()
    }

    fn collides(&self, piece: &ActivePiece) -> bool {
        let rows = self.config.rows as i32;
        let cols = self.config.cols as i32;
        piece.cells().any(|(r, c)| {
            r < 0 || r >= rows || c < 0 || c >= cols || self.grid[r as usize][c as usize].is_some()
        })
    }

    fn spawn(&mut self) {
        let kind = self.next;
        self.next = Self::random_kind(&mut self.rng);
        let width = kind.shape()[0].len();
        let col = ((self.config.cols - width) / 2) as i32;
        let piece = ActivePiece::new(kind, 0, col);
        if self.collides(&piece) {
            self.piece = None;
            self.game_over = true;
            self.feedback.push(Feedback::GameOver);
            log::info!("tetris: spawn blocked, final score {} ({} lines)", self.score, self.lines);
            return;
        }
        self.piece = Some(piece);
    }

    /// Move the piece if the target is free. Returns whether it moved.
    fn try_move(&mut self, candidate: ActivePiece) -> bool {
        if self.collides(&candidate) {
            return false;
        }
        self.piece = Some(candidate);
        true
    }

    /// One row of gravity; locks the piece when it cannot fall.
    fn step_down(&mut self) {
        let Some(piece) = self.piece.as_ref() else {
            return;
        };
        let below = piece.shifted(1, 0);
        if !self.try_move(below) {
            self.lock();
        }
    }

    fn hard_drop(&mut self) {
        while let Some(piece) = self.piece.as_ref() {
            let below = piece.shifted(1, 0);
            if !self.try_move(below) {
                break;
            }
        }
        self.lock();
    }

    fn lock(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };
        for (r, c) in piece.cells() {
            self.grid[r as usize][c as usize] = Some(piece.kind);
        }

        let cleared = self.clear_lines();
        if cleared > 0 {
            self.lines += cleared;
            self.score += cleared * self.config.points_per_line;
            self.feedback.push(Feedback::LineClear(cleared));
            log::debug!("tetris: cleared {} line(s), score {}", cleared, self.score);
        }
        self.spawn();
    }

    fn clear_lines(&mut self) -> u32 {
        let cols = self.config.cols;
        self.grid.retain(|row| row.iter().any(|c| c.is_none()));
        let cleared = self.config.rows - self.grid.len();
        for _ in 0..cleared {
            self.grid.insert(0, vec![None; cols]);
        }
        cleared as u32
    }
}

impl Game for Tetris {
    fn start(&mut self) {
        self.started = true;
    }

    fn tick(&mut self) {
        if !self.started || self.game_over {
            return;
        }
        self.step_down();
    }

    fn handle_action(&mut self, action: Action) {
        if self.game_over {
            return;
        }
        if !self.started {
            self.start();
            return;
        }
        let Some(piece) = self.piece.as_ref() else {
            return;
        };
        match action {
            Action::Left => {
                let moved = piece.shifted(0, -1);
                self.try_move(moved);
            }
            Action::Right => {
                let moved = piece.shifted(0, 1);
                self.try_move(moved);
            }
            Action::Rotate | Action::Up => {
                let turned = piece.rotated();
                self.try_move(turned);
            }
            Action::Down => self.step_down(),
            Action::Drop => self.hard_drop(),
            _ => {}
        }
    }

    fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Tetris::with_rng(self.config.clone(), rng);
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
    use pretty_assertions::assert_eq;

    fn started(seed: u64) -> Tetris {
        let mut tetris = Tetris::new(TetrisConfig::default(), seed);
        tetris.start();
        tetris
    }

    #[test]
    fn rotation_is_transpose_then_reverse() {
        let t = ActivePiece::new(PieceKind::T, 0, 0).rotated();
        assert_eq!(
            t.shape,
            vec![vec![true, false], vec![true, true], vec![true, false]]
        );
        let i = ActivePiece::new(PieceKind::I, 0, 0).rotated();
        assert_eq!(i.shape.len(), 4);
        assert_eq!(i.width(), 1);
        let back = i.rotated().rotated().rotated();
        assert_eq!(back.shape, PieceKind::I.shape());
    }

    #[test]
    fn spawns_centered_on_top_row() {
        let tetris = Tetris::new(TetrisConfig::default(), 9);
        let piece = tetris.piece().unwrap();
        assert_eq!(piece.row, 0);
        assert_eq!(piece.col, ((10 - piece.width()) / 2) as i32);
    }

    #[test]
    fn wall_blocks_horizontal_move() {
        let mut tetris = started(1);
        tetris.piece = Some(ActivePiece::new(PieceKind::O, 5, 0));
        tetris.handle_action(Action::Left);
        assert_eq!(tetris.piece().unwrap().col, 0);
        tetris.handle_action(Action::Right);
        assert_eq!(tetris.piece().unwrap().col, 1);
    }

    #[test]
    fn rotation_into_stack_is_rejected() {
        let mut tetris = started(2);
        // Horizontal I lying on the floor with a block where the vertical one would go.
        tetris.piece = Some(ActivePiece::new(PieceKind::I, 10, 3));
        tetris.grid[11][3] = Some(PieceKind::O);
        let before = tetris.piece().cloned();
        tetris.handle_action(Action::Rotate);
        assert_eq!(tetris.piece().cloned(), before);
    }

    #[test]
    fn completing_a_row_clears_it_and_shifts_down() {
        let mut tetris = started(3);
        for c in 1..10 {
            tetris.grid[19][c] = Some(PieceKind::O);
        }
        tetris.grid[18][5] = Some(PieceKind::S);
        tetris.piece = Some(ActivePiece::new(PieceKind::I, 0, 0).rotated());

        let before = tetris.filled_cells();
        tetris.handle_action(Action::Drop);

        assert_eq!(tetris.score, 100);
        assert_eq!(tetris.lines_cleared(), 1);
        assert_eq!(tetris.filled_cells(), before + 4 - 10);
        assert_eq!(tetris.grid[19][5], Some(PieceKind::S));
        assert_eq!(tetris.grid[19][0], Some(PieceKind::I));
        assert_eq!(tetris.grid[17][0], Some(PieceKind::I));
        assert_eq!(tetris.grid[16][0], None);
        assert!(tetris.grid[0].iter().all(|c| c.is_none()));
        assert_eq!(tetris.grid.len(), 20);
        assert!(tetris.grid.iter().all(|row| row.len() == 10));
        assert_eq!(tetris.drain_feedback(), vec![Feedback::LineClear(1)]);
    }

    #[test]
    fn score_is_linear_in_rows() {
        let mut tetris = started(4);
        for r in 16..20 {
            for c in 1..10 {
                tetris.grid[r][c] = Some(PieceKind::Z);
            }
        }
        tetris.piece = Some(ActivePiece::new(PieceKind::I, 0, 0).rotated());
        tetris.handle_action(Action::Drop);
        assert_eq!(tetris.lines_cleared(), 4);
        assert_eq!(tetris.score, 400);
        assert_eq!(tetris.filled_cells(), 0);
    }

    #[test]
    fn gravity_tick_locks_at_floor() {
        let mut tetris = started(5);
        tetris.piece = Some(ActivePiece::new(PieceKind::O, 18, 4));
        tetris.tick();
        assert_eq!(tetris.grid[18][4], Some(PieceKind::O));
        assert_eq!(tetris.grid[19][5], Some(PieceKind::O));
        assert_eq!(tetris.piece().unwrap().row, 0);
    }

    #[test]
    fn blocked_spawn_is_game_over() {
        let mut tetris = started(6);
        for row in tetris.grid.iter_mut().take(2) {
            for cell in row.iter_mut().skip(2).take(6) {
                *cell = Some(PieceKind::T);
            }
        }
        tetris.piece = Some(ActivePiece::new(PieceKind::O, 18, 0));
        tetris.tick();
        assert!(tetris.is_game_over());
        // Nothing may be left hovering over the locked cells.
        assert!(tetris.piece().is_none());
        let filled = tetris.filled_cells();
        tetris.tick();
        tetris.handle_action(Action::Drop);
        assert_eq!(tetris.filled_cells(), filled);
    }
}
