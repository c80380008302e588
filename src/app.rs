use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use miniarcade::games::Feedback;
use miniarcade::session::Engine;
use miniarcade::{Action, Config, GameKind, Session};

use crate::scores::SessionBests;

const TILE_COLUMNS: usize = 4;

#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    Game(GameKind),
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        std::iter::once(Tab::Home)
            .chain(GameKind::ALL.iter().map(|&k| Tab::Game(k)))
            .collect()
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Game(GameKind::Flappy) => " Flappy ",
            Tab::Game(GameKind::Runner) => " Runner ",
            Tab::Game(GameKind::Stack) => " Stack ",
            Tab::Game(GameKind::Snake) => " Snake ",
            Tab::Game(GameKind::Tetris) => " Tetris ",
            Tab::Game(GameKind::TicTacToe) => " XO ",
            Tab::Game(GameKind::Durak) => " Durak ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Game(kind) => kind.index() + 1,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize,
    pub session: Option<Session>,
    pub config: Config,
    pub bests: SessionBests,
    pub show_bests: bool,
    /// Board cell (tic-tac-toe) or hand position (durak) under the cursor.
    pub cursor: usize,
    /// Most recent engine event, flashed in the help row until replaced.
    pub last_feedback: Option<Feedback>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            session: None,
            config,
            bests: SessionBests::new(),
            show_bests: false,
            cursor: 0,
            last_feedback: None,
        }
    }

    pub fn on_frame(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.advance(now);
        self.collect_feedback();
    }

    fn collect_feedback(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for fb in session.drain_feedback() {
            log::debug!("{}: {:?}", session.kind().name(), fb);
            self.last_feedback = Some(fb);
        }
        self.bests
            .observe(session.kind(), session.is_game_over(), session.score());
        self.clamp_cursor();
    }

    /// Replace whatever is running with a fresh session of `kind`.
    fn open(&mut self, kind: GameKind) {
        self.close();
        let seed = rand::random::<u64>();
        self.session = Some(Session::new(kind, &self.config, seed));
        self.current_tab = Tab::Game(kind);
        self.cursor = 0;
        self.last_feedback = None;
    }

    fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.teardown();
        }
        self.current_tab = Tab::Home;
    }

    fn switch_to(&mut self, tab: Tab) {
        match tab {
            Tab::Home => self.close(),
            Tab::Game(kind) => self.open(kind),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if self.current_tab == Tab::Home => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc if self.current_tab != Tab::Home => {
                self.close();
                return;
            }
            _ => {}
        }

        if self.current_tab == Tab::Home {
            self.on_home_key(key);
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                session.restart();
                self.cursor = 0;
                self.last_feedback = None;
                return;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !session.is_game_over() {
                    let paused = session.is_paused();
                    session.set_paused(!paused);
                }
                return;
            }
            KeyCode::Enter | KeyCode::Char(' ') if session.is_game_over() => {
                session.restart();
                self.cursor = 0;
                self.last_feedback = None;
                return;
            }
            _ => {}
        }

        if let Some(action) = self.map_key(key) {
            if let Some(session) = self.session.as_mut() {
                session.handle_action(action);
            }
            self.collect_feedback();
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        if !key.modifiers.is_empty() {
            return;
        }
        let count = GameKind::ALL.len();
        match key.code {
            KeyCode::Char(c @ '1'..='7') => {
                let idx = c as usize - '1' as usize;
                self.selected_game = idx;
                self.open(GameKind::ALL[idx]);
            }
            KeyCode::Char('h') | KeyCode::Char('H') => self.show_bests = !self.show_bests,
            KeyCode::Right => self.selected_game = (self.selected_game + 1) % count,
            KeyCode::Left => self.selected_game = (self.selected_game + count - 1) % count,
            KeyCode::Down | KeyCode::Up => {
                let moved = if self.selected_game < TILE_COLUMNS {
                    self.selected_game + TILE_COLUMNS
                } else {
                    self.selected_game - TILE_COLUMNS
                };
                if moved < count {
                    self.selected_game = moved;
                }
            }
            KeyCode::Enter => self.open(GameKind::ALL[self.selected_game]),
            _ => {}
        }
    }

    /// Translate a key into the engine's input vocabulary. Cursor movement
    /// for board and card games is handled here and never reaches the engine.
    fn map_key(&mut self, key: KeyEvent) -> Option<Action> {
        let kind = self.session.as_ref()?.kind();
        let code = key.code;
        match kind {
            GameKind::Flappy => match code {
                KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('w') => {
                    Some(Action::Jump)
                }
                _ => None,
            },
            GameKind::Runner => match code {
                KeyCode::Left | KeyCode::Char('a') => Some(Action::Left),
                KeyCode::Right | KeyCode::Char('d') => Some(Action::Right),
                KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Jump),
                _ => None,
            },
            GameKind::Stack => match code {
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Down => Some(Action::Drop),
                _ => None,
            },
            GameKind::Snake => match code {
                KeyCode::Up | KeyCode::Char('w') => Some(Action::Up),
                KeyCode::Down | KeyCode::Char('s') => Some(Action::Down),
                KeyCode::Left | KeyCode::Char('a') => Some(Action::Left),
                KeyCode::Right | KeyCode::Char('d') => Some(Action::Right),
                KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Jump),
                _ => None,
            },
            GameKind::Tetris => match code {
                KeyCode::Left | KeyCode::Char('a') => Some(Action::Left),
                KeyCode::Right | KeyCode::Char('d') => Some(Action::Right),
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('x') => Some(Action::Rotate),
                KeyCode::Down | KeyCode::Char('s') => Some(Action::Down),
                KeyCode::Char(' ') => Some(Action::Drop),
                KeyCode::Enter => Some(Action::Jump),
                _ => None,
            },
            GameKind::TicTacToe => match code {
                KeyCode::Char(c @ '1'..='9') => Some(Action::Select(c as usize - '1' as usize)),
                KeyCode::Left => {
                    self.cursor = (self.cursor + 8) % 9;
                    None
                }
                KeyCode::Right => {
                    self.cursor = (self.cursor + 1) % 9;
                    None
                }
                KeyCode::Up => {
                    self.cursor = (self.cursor + 6) % 9;
                    None
                }
                KeyCode::Down => {
                    self.cursor = (self.cursor + 3) % 9;
                    None
                }
                KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Select(self.cursor)),
                _ => None,
            },
            GameKind::Durak => match code {
                KeyCode::Char(c @ '1'..='9') => Some(Action::PlayCard(c as usize - '1' as usize)),
                KeyCode::Left => {
                    self.cursor = self.cursor.saturating_sub(1);
                    None
                }
                KeyCode::Right => {
                    self.cursor += 1;
                    self.clamp_cursor();
                    None
                }
                KeyCode::Char(' ') | KeyCode::Enter => Some(Action::PlayCard(self.cursor)),
                KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::Take),
                KeyCode::Char('e') | KeyCode::Char('E') => Some(Action::Enough),
                _ => None,
            },
        }
    }

    fn clamp_cursor(&mut self) {
        if let Some(Engine::Durak(durak)) = self.session.as_ref().map(Session::engine) {
            let len = durak.view().human_hand.len();
            self.cursor = self.cursor.min(len.saturating_sub(1));
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn landed_platform_is_kept_for_display_until_restart() {
        let mut app = App::new(Config::default());
        press(&mut app, KeyCode::Char('3'));
        assert!(app.current_tab == Tab::Game(GameKind::Stack));
        assert_eq!(app.last_feedback, None);

        // First press starts the tower, the second drops onto the base.
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.last_feedback, Some(Feedback::Score));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.last_feedback, None);
    }
}
