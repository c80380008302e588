use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::games::runner::{ObstacleKind, Runner, LANES};

use super::{best_span, canvas, canvas_lines, plot, score_span, status_line};

const LANE_WIDTH: i32 = 9;

pub fn render(frame: &mut Frame, [status, field]: [Rect; 2], game: &Runner, best: u32) {
    let view = game.view();
    frame.render_widget(
        status_line(vec![
            score_span(view.score),
            best_span(best),
            Span::styled(
                format!("⚡ {:.2}", view.speed),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("{:.0} m", view.distance),
                Style::default().fg(Color::Rgb(140, 140, 160)),
            ),
        ]),
        status,
    );

    let h = field.height as i32;
    let track_w = LANE_WIDTH * LANES.len() as i32 + 2;
    let area = super::centered(field, track_w as u16, field.height);
    if h < 2 || area.width == 0 {
        return;
    }
    let mut grid = canvas(area.width as usize, area.height as usize, Style::default());

    let rail = Style::default().fg(Color::Rgb(90, 90, 110));
    for y in 0..h {
        plot(&mut grid, 0, y, '┃', rail);
        plot(&mut grid, track_w - 1, y, '┃', rail);
        for divider in 1..LANES.len() as i32 {
            if y % 2 == 0 {
                plot(&mut grid, divider * LANE_WIDTH, y, '┆', rail);
            }
        }
    }

    let lane_centre = |lane: i8| (lane as i32 + 1) * LANE_WIDTH + LANE_WIDTH / 2;
    // The runner stands on the bottom row; distance maps upward from there.
    let runner_row = h - 1;
    let row_of = |distance: f32| runner_row - ((distance / view.track_length) * runner_row as f32) as i32;

    for obs in view.obstacles.iter().filter(|o| !o.consumed) {
        let y = row_of(obs.distance);
        let x = lane_centre(obs.lane);
        match obs.kind {
            ObstacleKind::Barrier => {
                let style = Style::default().fg(Color::Rgb(220, 80, 80)).add_modifier(Modifier::BOLD);
                for dx in -2..=2 {
                    plot(&mut grid, x + dx, y, '▀', style);
                }
            }
            ObstacleKind::Coin => {
                plot(&mut grid, x, y, '◎', Style::default().fg(Color::Rgb(255, 215, 0)));
            }
        }
    }

    let runner_style = if view.game_over {
        Style::default().fg(Color::Rgb(255, 80, 80))
    } else {
        Style::default().fg(Color::Rgb(200, 120, 255))
    }
    .add_modifier(Modifier::BOLD);
    plot(&mut grid, lane_centre(view.lane), runner_row, '▲', runner_style);

    frame.render_widget(Paragraph::new(canvas_lines(grid)), area);

    if !view.started && !view.game_over {
        frame.render_widget(
            Paragraph::new("Press Space to run")
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            super::centered(field, 24, 1),
        );
    }
}
