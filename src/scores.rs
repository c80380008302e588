use miniarcade::GameKind;

const NUM_GAMES: usize = GameKind::ALL.len();

/// Best score per game for as long as the program runs. Nothing is saved.
#[derive(Clone, Default)]
pub struct SessionBests {
    best: [u32; NUM_GAMES],
    /// Set once a finished game has been counted, so it is counted only once.
    recorded: [bool; NUM_GAMES],
}

impl SessionBests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current state of a session. Returns true when a finished game
    /// sets a new best.
    pub fn observe(&mut self, kind: GameKind, game_over: bool, score: u32) -> bool {
        let idx = kind.index();
        if !game_over {
            self.recorded[idx] = false;
            return false;
        }
        if self.recorded[idx] {
            return false;
        }
        self.recorded[idx] = true;
        if score > self.best[idx] {
            self.best[idx] = score;
            log::info!("new best for {}: {}", kind.name(), score);
            true
        } else {
            false
        }
    }

    pub fn best(&self, kind: GameKind) -> u32 {
        self.best[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_game_is_counted_once() {
        let mut bests = SessionBests::new();
        assert!(!bests.observe(GameKind::Snake, false, 3));
        assert!(bests.observe(GameKind::Snake, true, 3));
        assert!(!bests.observe(GameKind::Snake, true, 3));
        assert_eq!(bests.best(GameKind::Snake), 3);
        assert_eq!(bests.best(GameKind::Tetris), 0);
    }

    #[test]
    fn lower_score_keeps_the_best() {
        let mut bests = SessionBests::new();
        bests.observe(GameKind::Stack, true, 9);
        bests.observe(GameKind::Stack, false, 0);
        assert!(!bests.observe(GameKind::Stack, true, 4));
        assert_eq!(bests.best(GameKind::Stack), 9);
    }
}
