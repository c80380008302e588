use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::games::snake::Snake;

use super::{best_span, canvas, canvas_lines, plot, score_span, status_line};

pub fn render(frame: &mut Frame, [status, field]: [Rect; 2], game: &Snake, best: u32) {
    let view = game.view();
    let mut spans = vec![
        score_span(view.score),
        best_span(best),
        Span::styled(
            format!("Length {}", view.segments.len()),
            Style::default().fg(Color::Rgb(80, 220, 80)),
        ),
    ];
    if view.won {
        spans.push(Span::styled(
            "🏁 Board filled!",
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(status_line(spans), status);

    // Two columns per cell keeps the board roughly square.
    let n = view.grid_size as i32;
    let area = super::centered(field, (n * 2 + 2) as u16, (n + 2) as u16);
    let mut grid = canvas(area.width as usize, area.height as usize, Style::default());

    let wall = Style::default().fg(Color::Rgb(60, 120, 60));
    let right = n * 2 + 1;
    for x in 0..=right {
        plot(&mut grid, x, 0, '─', wall);
        plot(&mut grid, x, n + 1, '─', wall);
    }
    for y in 0..=n + 1 {
        let (l, r) = match y {
            0 => ('┌', '┐'),
            y if y == n + 1 => ('└', '┘'),
            _ => ('│', '│'),
        };
        plot(&mut grid, 0, y, l, wall);
        plot(&mut grid, right, y, r, wall);
    }

    let cell = |grid: &mut super::Canvas, x: i32, y: i32, ch: char, style: Style| {
        plot(grid, 1 + x * 2, 1 + y, ch, style);
        plot(grid, 2 + x * 2, 1 + y, ch, style);
    };

    if let Some(food) = view.food {
        cell(&mut grid, food.x, food.y, '●', Style::default().fg(Color::Rgb(255, 80, 80)));
    }
    let body = Style::default().fg(Color::Rgb(80, 200, 80));
    for seg in view.segments.iter().skip(1) {
        cell(&mut grid, seg.x, seg.y, '█', body);
    }
    if let Some(head) = view.segments.front() {
        let head_color = if view.game_over && !view.won {
            Color::Rgb(255, 80, 80)
        } else {
            Color::Rgb(160, 255, 120)
        };
        cell(&mut grid, head.x, head.y, '█', Style::default().fg(head_color));
    }

    frame.render_widget(Paragraph::new(canvas_lines(grid)), area);

    if !view.started {
        frame.render_widget(
            Paragraph::new("Press an arrow to start")
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            super::centered(field, 26, 1),
        );
    }
}
