use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

use super::home;

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let paused = app.session.as_ref().is_some_and(|s| s.is_paused());
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let active = *t == app.current_tab;
            let color = match t {
                Tab::Home => Color::Rgb(200, 120, 255),
                Tab::Game(kind) => home::accent(*kind),
            };
            let style = if active {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            let mut spans = vec![Span::styled(t.title().to_string(), style)];
            if active && paused {
                spans.push(Span::styled("⏸ ", Style::default().fg(Color::Rgb(255, 220, 80))));
            }
            Line::from(spans)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
                .border_type(BorderType::Rounded)
                .title(" 🕹 MiniArcade ")
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(200, 120, 255))
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
