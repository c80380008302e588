use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::games::tic_tac_toe::{Mark, Outcome, TicTacToe};

use super::status_line;

const CELL_W: u16 = 7;
const CELL_H: u16 = 3;

pub fn render(frame: &mut Frame, [status, field]: [Rect; 2], game: &TicTacToe, cursor: usize) {
    let view = game.view();
    let message = match (view.outcome, view.turn) {
        (Some(Outcome::PlayerWins), _) => Span::styled("You win! 🎉", Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)),
        (Some(Outcome::BotWins), _) => Span::styled("The bot wins", Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD)),
        (Some(Outcome::Draw), _) => Span::styled("Draw", Style::default().fg(Color::Rgb(180, 180, 200)).add_modifier(Modifier::BOLD)),
        (None, Mark::Player) => Span::styled(" Your move (X)", Style::default().fg(Color::Rgb(80, 200, 255))),
        (None, Mark::Bot) => Span::styled(" Bot is thinking…", Style::default().fg(Color::Rgb(140, 140, 160))),
    };
    frame.render_widget(status_line(vec![message]), status);

    let board_area = super::centered(field, CELL_W * 3 + 2, CELL_H * 3 + 2);
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(120, 60, 60)));
    let inner = outer.inner(board_area);
    frame.render_widget(outer, board_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(CELL_H); 3])
        .split(inner);
    for (r, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CELL_W); 3])
            .split(*row_area);
        for (c, cell_area) in cols.iter().enumerate() {
            let idx = r * 3 + c;
            let on_line = view.winning_line.is_some_and(|line| line.contains(&idx));
            let (text, mut style) = match view.board[idx] {
                Some(Mark::Player) => ("X".to_string(), Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
                Some(Mark::Bot) => ("O".to_string(), Style::default().fg(Color::Rgb(255, 120, 120)).add_modifier(Modifier::BOLD)),
                None => ((idx + 1).to_string(), Style::default().fg(Color::Rgb(60, 60, 80))),
            };
            if on_line {
                style = style.bg(Color::Rgb(80, 70, 20));
            }
            let border = if idx == cursor && view.outcome.is_none() {
                Style::default().fg(Color::Rgb(255, 220, 80))
            } else {
                Style::default().fg(Color::Rgb(60, 60, 80))
            };
            let cell = Paragraph::new(Line::from(Span::styled(text, style)))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(cell, *cell_area);
        }
    }
}
