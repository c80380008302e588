use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::games::stack::{DropOutcome, Platform, Stack};

use super::{best_span, canvas, canvas_lines, plot, score_span, status_line};

const PALETTE: [Color; 6] = [
    Color::Rgb(255, 140, 80),
    Color::Rgb(255, 200, 80),
    Color::Rgb(120, 220, 120),
    Color::Rgb(80, 200, 255),
    Color::Rgb(160, 120, 255),
    Color::Rgb(255, 100, 160),
];

pub fn render(frame: &mut Frame, [status, field]: [Rect; 2], game: &Stack, best: u32) {
    let view = game.view();
    let last = match game.last_drop() {
        Some(DropOutcome::Perfect) => Span::styled("PERFECT!", Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)),
        Some(DropOutcome::Trimmed { cut }) => Span::styled(format!("trimmed {:.1}", cut), Style::default().fg(Color::Rgb(180, 180, 200))),
        Some(DropOutcome::Missed) => Span::styled("missed", Style::default().fg(Color::Rgb(255, 80, 80))),
        None => Span::raw(""),
    };
    frame.render_widget(status_line(vec![score_span(view.score), best_span(best), last]), status);

    let w = field.width as usize;
    let h = field.height as i32;
    if w == 0 || h < 2 {
        return;
    }
    let scale = w as f32 / view.playfield_width;
    let mut grid = canvas(w, h as usize, Style::default());

    let paint = |grid: &mut super::Canvas, platform: &Platform, row: i32, style: Style| {
        let x0 = (platform.x * scale).round() as i32;
        let x1 = ((platform.x + platform.width) * scale).round() as i32;
        for x in x0..x1.max(x0 + 1) {
            plot(grid, x, row, '█', style);
        }
    };

    // Keep the top of the tower in view with one free row for the moving block.
    let visible = (h - 1) as usize;
    let skip = view.blocks.len().saturating_sub(visible);
    for (i, block) in view.blocks.iter().enumerate().skip(skip) {
        let row = h - 1 - (i - skip) as i32;
        paint(&mut grid, block, row, Style::default().fg(PALETTE[i % PALETTE.len()]));
    }
    if !view.game_over {
        let row = h - 1 - (view.blocks.len() - skip) as i32;
        let color = PALETTE[view.blocks.len() % PALETTE.len()];
        paint(&mut grid, &view.moving, row, Style::default().fg(color).add_modifier(Modifier::BOLD));
    }

    frame.render_widget(Paragraph::new(canvas_lines(grid)), field);

    if !view.started {
        frame.render_widget(
            Paragraph::new("Press Space to drop")
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            super::centered(field, 24, 1),
        );
    }
}
