use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::games::tetris::{PieceKind, Tetris};

use super::{best_span, canvas, canvas_lines, plot, score_span, status_line};

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Rgb(80, 220, 255),
        PieceKind::O => Color::Rgb(255, 220, 80),
        PieceKind::T => Color::Rgb(200, 120, 255),
        PieceKind::S => Color::Rgb(100, 220, 100),
        PieceKind::Z => Color::Rgb(240, 80, 80),
        PieceKind::J => Color::Rgb(80, 120, 255),
        PieceKind::L => Color::Rgb(255, 160, 60),
    }
}

pub fn render(frame: &mut Frame, [status, field]: [Rect; 2], game: &Tetris, best: u32) {
    let view = game.view();
    frame.render_widget(
        status_line(vec![
            score_span(view.score),
            best_span(best),
            Span::styled(format!("Lines {}", view.lines), Style::default().fg(Color::Rgb(80, 200, 255))),
        ]),
        status,
    );

    let rows = view.grid.len() as i32;
    let cols = view.grid.first().map_or(0, |r| r.len()) as i32;
    // Well (2 columns per cell) plus a side panel for the next piece.
    let well_w = cols * 2 + 2;
    let area = super::centered(field, (well_w + 12) as u16, (rows + 2) as u16);
    let mut grid = canvas(area.width as usize, area.height as usize, Style::default());

    let wall = Style::default().fg(Color::Rgb(90, 90, 120));
    for y in 0..=rows {
        plot(&mut grid, 0, y, '│', wall);
        plot(&mut grid, well_w - 1, y, '│', wall);
    }
    for x in 0..well_w {
        plot(&mut grid, x, rows, '─', wall);
    }
    plot(&mut grid, 0, rows, '└', wall);
    plot(&mut grid, well_w - 1, rows, '┘', wall);

    let block = |grid: &mut super::Canvas, row: i32, col: i32, style: Style| {
        plot(grid, 1 + col * 2, row, '█', style);
        plot(grid, 2 + col * 2, row, '█', style);
    };

    for (r, line) in view.grid.iter().enumerate() {
        for (c, cell) in line.iter().enumerate() {
            match cell {
                Some(kind) => block(&mut grid, r as i32, c as i32, Style::default().fg(piece_color(*kind))),
                None => plot(&mut grid, 2 + c as i32 * 2, r as i32, '·', Style::default().fg(Color::Rgb(40, 40, 55))),
            }
        }
    }
    if let Some(piece) = view.piece {
        let style = Style::default().fg(piece_color(piece.kind)).add_modifier(Modifier::BOLD);
        for (r, c) in piece.cells() {
            block(&mut grid, r, c, style);
        }
    }

    let label = Style::default().fg(Color::Rgb(140, 140, 160));
    for (i, ch) in "Next".chars().enumerate() {
        plot(&mut grid, well_w + 2 + i as i32, 1, ch, label);
    }
    let next_style = Style::default().fg(piece_color(view.next));
    for (r, row) in view.next.shape().iter().enumerate() {
        for (c, filled) in row.iter().enumerate() {
            if *filled {
                plot(&mut grid, well_w + 2 + c as i32 * 2, 3 + r as i32, '█', next_style);
                plot(&mut grid, well_w + 3 + c as i32 * 2, 3 + r as i32, '█', next_style);
            }
        }
    }

    frame.render_widget(Paragraph::new(canvas_lines(grid)), area);

    if !view.started && !view.game_over {
        frame.render_widget(
            Paragraph::new("Press any key to start")
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            super::centered(field, 26, 1),
        );
    }
}
