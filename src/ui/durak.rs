use ratatui::prelude::*;
use ratatui::widgets::*;

use miniarcade::games::durak::{Card, Durak, Outcome, Side};

use super::status_line;

fn card_span(card: Card, style: Style) -> Span<'static> {
    let color = if card.suit.is_red() {
        Color::Rgb(240, 90, 90)
    } else {
        Color::Rgb(220, 220, 230)
    };
    Span::styled(format!("[{:>3}]", card.to_string()), style.fg(color))
}

pub fn render(frame: &mut Frame, [status, field]: [Rect; 2], game: &Durak, cursor: usize) {
    let view = game.view();
    let trump = view.trump.suit;

    let role = match view.attacker {
        Side::Human => "You attack",
        Side::Bot => "You defend",
    };
    frame.render_widget(
        status_line(vec![
            Span::styled(format!(" Round {}", view.round), Style::default().fg(Color::Rgb(120, 220, 200))),
            Span::styled(role, Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
            Span::styled(format!("Deck {}", view.deck_len), Style::default().fg(Color::Rgb(140, 140, 160))),
            Span::styled(format!("Discard {}", view.discard_len), Style::default().fg(Color::Rgb(100, 100, 120))),
        ]),
        status,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Bot hand + trump
            Constraint::Min(4),    // Table
            Constraint::Length(3), // Human hand
            Constraint::Length(1), // Prompt
        ])
        .split(field);

    let mut top = vec![
        Span::styled("Bot ", Style::default().fg(Color::Rgb(255, 120, 120)).add_modifier(Modifier::BOLD)),
        Span::styled("[▒▒▒]".repeat(view.bot_hand_len), Style::default().fg(Color::Rgb(90, 60, 120))),
        Span::raw("   Trump "),
        card_span(view.trump, Style::default().add_modifier(Modifier::BOLD)),
    ];
    if view.deck_len == 0 {
        top.push(Span::styled(" (taken)", Style::default().fg(Color::Rgb(100, 100, 120))));
    }
    frame.render_widget(
        Paragraph::new(Line::from(top)).block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::Rgb(50, 90, 80)))),
        chunks[0],
    );

    let attacks: Vec<Span> = view
        .table
        .iter()
        .flat_map(|slot| [card_span(slot.attack, Style::default()), Span::raw(" ")])
        .collect();
    let defenses: Vec<Span> = view
        .table
        .iter()
        .flat_map(|slot| {
            let span = match slot.defense {
                Some(card) => card_span(card, Style::default().add_modifier(Modifier::BOLD)),
                None => Span::styled("[   ]", Style::default().fg(Color::Rgb(60, 60, 80))),
            };
            [span, Span::raw(" ")]
        })
        .collect();
    let table = Paragraph::new(vec![Line::from(""), Line::from(attacks), Line::from(defenses)])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(40, 110, 70)))
                .title(" Table "),
        );
    frame.render_widget(table, chunks[1]);

    let playable = |card: Card| match view.attacker {
        Side::Human => game.can_attack_with(card),
        Side::Bot => game.can_defend_with(card),
    };
    let hand: Vec<Span> = view
        .human_hand
        .iter()
        .enumerate()
        .flat_map(|(i, &card)| {
            let mut style = Style::default();
            if !playable(card) {
                style = style.add_modifier(Modifier::DIM);
            }
            if card.suit == trump {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if i == cursor {
                style = style.bg(Color::Rgb(70, 70, 30)).add_modifier(Modifier::BOLD);
            }
            [card_span(card, style), Span::raw(" ")]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(hand)).block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::Rgb(50, 90, 80))).title(" You ")),
        chunks[2],
    );

    let prompt = match view.outcome {
        Some(Outcome::HumanWins) => Span::styled("You shed every card. You win!", Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)),
        Some(Outcome::BotWins) => Span::styled("You are the durak.", Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD)),
        Some(Outcome::Draw) => Span::styled("Both hands empty: a draw.", Style::default().fg(Color::Rgb(180, 180, 200)).add_modifier(Modifier::BOLD)),
        None if view.bot_thinking => Span::styled("Bot is thinking…", Style::default().fg(Color::Rgb(140, 140, 160))),
        None => match view.attacker {
            Side::Human => Span::styled("Play a card of a rank on the table, or E to end the attack", Style::default().fg(Color::Rgb(140, 140, 160))),
            Side::Bot => Span::styled("Beat the open card, or T to take the table", Style::default().fg(Color::Rgb(140, 140, 160))),
        },
    };
    frame.render_widget(Paragraph::new(Line::from(prompt)).alignment(Alignment::Center), chunks[3]);
}
