pub mod durak;
pub mod flappy;
pub mod home;
pub mod runner;
pub mod snake;
pub mod stack;
pub mod tabs;
pub mod tetris;
pub mod tic_tac_toe;

use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::session::Engine;
use miniarcade::{Feedback, Session};

use crate::app::{App, Tab};

/// A character grid the field renderers paint into before it becomes lines.
pub type Canvas = Vec<Vec<(char, Style)>>;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),   // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match (app.current_tab, app.session.as_ref()) {
        (Tab::Game(_), Some(session)) => render_session(frame, chunks[1], app, session),
        _ => home::render_home(frame, chunks[1], app.selected_game, app.show_bests, &app.bests),
    }
}

fn render_session(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let best = app.bests.best(session.kind());
    let [status, field, help] = game_layout(frame, area, session);
    match session.engine() {
        Engine::Flappy(game) => flappy::render(frame, [status, field], game, best),
        Engine::Runner(game) => runner::render(frame, [status, field], game, best),
        Engine::Stack(game) => stack::render(frame, [status, field], game, best),
        Engine::Snake(game) => snake::render(frame, [status, field], game, best),
        Engine::Tetris(game) => tetris::render(frame, [status, field], game, best),
        Engine::TicTacToe(game) => {
            tic_tac_toe::render(frame, [status, field], game, app.cursor)
        }
        Engine::Durak(game) => durak::render(frame, [status, field], game, app.cursor),
    }
    render_help(frame, help, session, app.last_feedback);
}

/// Draw the outer block and split it into status bar, field and help row.
fn game_layout(frame: &mut Frame, area: Rect, session: &Session) -> [Rect; 3] {
    let kind = session.kind();
    let color = home::accent(kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(format!(" {} {} ", home::icon(kind), kind.name()))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(4),    // Game field
            Constraint::Length(1), // Help
        ])
        .split(inner);
    [chunks[0], chunks[1], chunks[2]]
}

fn render_help(frame: &mut Frame, area: Rect, session: &Session, last: Option<Feedback>) {
    let line = if session.is_game_over() {
        Line::from(vec![
            Span::styled(
                " GAME OVER ",
                Style::default()
                    .fg(Color::Rgb(255, 80, 80))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" Score {}  ", session.score()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                "Enter/R: play again  Esc: home",
                Style::default().fg(Color::Rgb(140, 140, 140)),
            ),
        ])
    } else if session.is_paused() {
        Line::from(Span::styled(
            " ⏸ PAUSED  P to resume ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        let mut spans = Vec::new();
        if let Some(flash) = last.and_then(feedback_flash) {
            spans.push(flash);
        }
        spans.push(Span::styled(
            format!(" {}  R restart  P pause  Esc home", home::controls_hint(session.kind())),
            Style::default().fg(Color::Rgb(100, 100, 120)),
        ));
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Short label for the most recent engine event. Flaps are too frequent to show.
fn feedback_flash(feedback: Feedback) -> Option<Span<'static>> {
    let (text, color) = match feedback {
        Feedback::Score => ("+1 ".to_string(), Color::Rgb(255, 215, 0)),
        Feedback::LineClear(1) => ("1 line ".to_string(), Color::Rgb(80, 220, 255)),
        Feedback::LineClear(n) => (format!("{} lines ", n), Color::Rgb(80, 220, 255)),
        Feedback::Collision => ("💥 ".to_string(), Color::Rgb(255, 80, 80)),
        Feedback::Win => ("🏆 win ".to_string(), Color::Rgb(255, 215, 0)),
        Feedback::Lose => ("lost ".to_string(), Color::Rgb(255, 80, 80)),
        Feedback::Draw => ("draw ".to_string(), Color::Rgb(180, 180, 200)),
        Feedback::Jump | Feedback::GameOver => return None,
    };
    Some(Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)))
}

pub fn status_line(spans: Vec<Span<'static>>) -> Paragraph<'static> {
    let mut out = Vec::with_capacity(spans.len() * 2);
    for (i, span) in spans.into_iter().enumerate() {
        if i > 0 {
            out.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        out.push(span);
    }
    Paragraph::new(Line::from(out))
}

pub fn score_span(score: u32) -> Span<'static> {
    Span::styled(
        format!(" Score: {:05}", score),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn best_span(best: u32) -> Span<'static> {
    Span::styled(format!("🏆 Best: {:05}", best), Style::default().fg(Color::Cyan))
}

pub fn canvas(width: usize, height: usize, fill: Style) -> Canvas {
    vec![vec![(' ', fill); width]; height]
}

pub fn canvas_lines(canvas: Canvas) -> Vec<Line<'static>> {
    canvas
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, style)| Span::styled(ch.to_string(), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Paint `ch` at a signed position, ignoring anything off the canvas.
pub fn plot(canvas: &mut Canvas, x: i32, y: i32, ch: char, style: Style) {
    if x < 0 || y < 0 {
        return;
    }
    if let Some(cell) = canvas
        .get_mut(y as usize)
        .and_then(|row| row.get_mut(x as usize))
    {
        *cell = (ch, style);
    }
}

/// Centre a `width` x `height` rect inside `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
