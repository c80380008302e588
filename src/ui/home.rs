use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::GameKind;

use crate::scores::SessionBests;

const BANNER: &str = r#"
 ╔══════════════════════════════════════════════════════════════════╗
 ║  ███╗   ███╗██╗███╗   ██╗██╗     █████╗ ██████╗  ██████╗ █████╗  ║
 ║  ████╗ ████║██║████╗  ██║██║    ██╔══██╗██╔══██╗██╔════╝██╔══██╗ ║
 ║  ██╔████╔██║██║██╔██╗ ██║██║    ███████║██████╔╝██║     ███████║ ║
 ║  ██║╚██╔╝██║██║██║╚██╗██║██║    ██╔══██║██╔══██╗██║     ██╔══██║ ║
 ║  ██║ ╚═╝ ██║██║██║ ╚████║██║    ██║  ██║██║  ██║╚██████╗██║  ██║ ║
 ║  ╚═╝     ╚═╝╚═╝╚═╝  ╚═══╝╚═╝    ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝ ║
 ╚══════════════════════════════════════════════════════════════════╝"#;

struct GameTile {
    icon: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
    /// (keys, what they do)
    controls: &'static [(&'static str, &'static str)],
}

const GAME_TILES: [GameTile; 7] = [
    GameTile {
        icon: "🐦",
        desc: "Flap through\nthe pipes!",
        color: Color::Rgb(255, 210, 80),
        border_color: Color::Rgb(140, 110, 40),
        controls: &[("Space / ↑", "Flap"), ("Enter", "Start")],
    },
    GameTile {
        icon: "🏃",
        desc: "Switch lanes,\ngrab coins!",
        color: Color::Rgb(200, 120, 255),
        border_color: Color::Rgb(100, 60, 140),
        controls: &[("← / →  a / d", "Change lane"), ("Space", "Start")],
    },
    GameTile {
        icon: "🧱",
        desc: "Drop blocks\nstraight up!",
        color: Color::Rgb(255, 140, 80),
        border_color: Color::Rgb(140, 70, 40),
        controls: &[("Space / ↓", "Drop block")],
    },
    GameTile {
        icon: "🐍",
        desc: "Eat and grow\nwithout biting!",
        color: Color::Rgb(80, 220, 80),
        border_color: Color::Rgb(40, 120, 40),
        controls: &[("↑ ↓ ← →  wasd", "Steer"), ("Space", "Start")],
    },
    GameTile {
        icon: "🟦",
        desc: "Clear lines\nbefore the top!",
        color: Color::Rgb(100, 180, 255),
        border_color: Color::Rgb(50, 90, 140),
        controls: &[
            ("← / →", "Move piece"),
            ("↑ / x", "Rotate"),
            ("↓", "Soft drop"),
            ("Space", "Hard drop"),
        ],
    },
    GameTile {
        icon: "❌",
        desc: "Three in a row\nagainst the bot",
        color: Color::Rgb(220, 80, 80),
        border_color: Color::Rgb(120, 40, 40),
        controls: &[("1-9", "Mark a cell"), ("↑ ↓ ← →", "Move cursor"), ("Enter", "Mark cursor")],
    },
    GameTile {
        icon: "🃏",
        desc: "Shed your cards,\ndon't be the fool",
        color: Color::Rgb(120, 220, 200),
        border_color: Color::Rgb(60, 110, 100),
        controls: &[
            ("← / →", "Pick card"),
            ("Enter / 1-9", "Play card"),
            ("T", "Take the table"),
            ("E", "Enough (end attack)"),
        ],
    },
];

pub fn icon(kind: GameKind) -> &'static str {
    GAME_TILES[kind.index()].icon
}

pub fn accent(kind: GameKind) -> Color {
    GAME_TILES[kind.index()].color
}

/// One-line summary of the in-game keys for the help row.
pub fn controls_hint(kind: GameKind) -> String {
    GAME_TILES[kind.index()]
        .controls
        .iter()
        .map(|(keys, what)| format!("{}: {}", keys, what))
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_game_tile(frame: &mut Frame, area: Rect, kind: GameKind, selected: bool) {
    let tile = &GAME_TILES[kind.index()];
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("[{}] ", kind.index() + 1),
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(kind.name(), Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];

    let desc_color = if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) };
    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(Span::styled(desc_line, Style::default().fg(desc_color))));
    }

    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn key_line(keys: &str, what: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<17}", keys), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(what.to_string(), Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn game_controls(kind: GameKind) -> Vec<Line<'static>> {
    let tile = &GAME_TILES[kind.index()];
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} {}", tile.icon, kind.name()),
            Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(tile.controls.iter().map(|(keys, what)| key_line(keys, what)));
    lines.push(key_line("R", "Restart"));
    lines.push(key_line("P", "Pause"));
    lines
}

pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize, show_bests: bool, bests: &SessionBests) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(12), // Game tiles (2 rows)
            Constraint::Min(10),    // Controls area
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  ⚡ Seven quick games, one keyboard ⚡  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games: ↑↓←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    // 4 on top, 3 below
    let tile_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(games_inner);

    for (row, row_area) in tile_rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(*row_area);
        for (col, col_area) in cols.iter().enumerate() {
            let idx = row * 4 + col;
            if let Some(&kind) = GameKind::ALL.get(idx) {
                render_game_tile(frame, *col_area, kind, selected_game == idx);
            }
        }
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    let nav = vec![
        Line::from(""),
        key_line("Tab / Shift+Tab", "Switch tabs"),
        key_line("1-7", "Launch game"),
        key_line("↑ ↓ ← →", "Select game"),
        key_line("Enter", "Play selected"),
        key_line("Esc", "Return to Home"),
        key_line("q / Ctrl+C", "Quit"),
    ];
    let controls = Paragraph::new(nav).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let kind = GameKind::ALL[selected_game.min(GameKind::ALL.len() - 1)];
    let game_ctrl = Paragraph::new(game_controls(kind)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(format!(" 🎮 {} Control ", kind.name()))
            .title_style(Style::default().fg(accent(kind)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Rgb(80, 80, 100)),
        ),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("H", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" Session bests", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);

    if show_bests {
        render_bests_overlay(frame, area, bests);
    }
}

fn render_bests_overlay(frame: &mut Frame, area: Rect, bests: &SessionBests) {
    let overlay_area = super::centered(
        area,
        40u16.min(area.width.saturating_sub(4)),
        14u16.min(area.height.saturating_sub(4)),
    );
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" 🏆 Session Bests ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![Line::from("")];
    for kind in GameKind::ALL {
        let best = bests.best(kind);
        let value = if best > 0 {
            Span::styled(
                best.to_string(),
                Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("-", Style::default().fg(Color::Rgb(60, 60, 80)))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", icon(kind)), Style::default()),
            Span::styled(
                format!("{:<14}", kind.name()),
                Style::default().fg(accent(kind)).add_modifier(Modifier::BOLD),
            ),
            value,
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("H", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" to close", Style::default().fg(Color::Rgb(80, 80, 100))),
    ]));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25))),
        inner,
    );
}
