use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::games::flappy::{Flappy, Phase};

use super::{best_span, canvas, canvas_lines, plot, score_span, status_line};

pub fn render(frame: &mut Frame, [status, field]: [Rect; 2], game: &Flappy, best: u32) {
    let view = game.view();
    frame.render_widget(status_line(vec![score_span(view.score), best_span(best)]), status);

    let w = field.width as usize;
    let h = field.height as usize;
    if w == 0 || h == 0 {
        return;
    }
    // Canvas units per terminal cell.
    let sx = view.canvas_width / w as f32;
    let sy = view.canvas_height / h as f32;

    let sky = Style::default().bg(Color::Rgb(20, 30, 60));
    let mut grid = canvas(w, h, sky);

    let pipe_style = Style::default().fg(Color::Rgb(60, 200, 80)).bg(Color::Rgb(20, 30, 60));
    for pipe in view.pipes {
        let x0 = (pipe.x / sx).floor() as i32;
        let x1 = ((pipe.x + view.pipe_width) / sx).ceil() as i32;
        let gap_top = (pipe.top_height / sy).round() as i32;
        let gap_bottom = ((pipe.top_height + view.pipe_gap) / sy).round() as i32;
        for x in x0..x1 {
            for y in 0..h as i32 {
                if y < gap_top || y >= gap_bottom {
                    plot(&mut grid, x, y, '█', pipe_style);
                }
            }
        }
    }

    let bird_color = if view.phase == Phase::GameOver {
        Color::Rgb(255, 80, 80)
    } else {
        Color::Rgb(255, 220, 80)
    };
    let bx = ((view.bird_x + view.bird_size / 2.0) / sx) as i32;
    let by = ((view.bird_y + view.bird_size / 2.0) / sy) as i32;
    plot(
        &mut grid,
        bx,
        by,
        '@',
        sky.fg(bird_color).add_modifier(Modifier::BOLD),
    );

    frame.render_widget(Paragraph::new(canvas_lines(grid)), field);

    if view.phase == Phase::NotStarted {
        let prompt = super::centered(field, 26, 1);
        frame.render_widget(
            Paragraph::new("Press Space to start")
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            prompt,
        );
    }
}
