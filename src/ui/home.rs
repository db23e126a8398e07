use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::games::GameKind;
use crate::scores::{HighScores, SCORES_PER_GAME};
use crate::ui::clock_text;

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════════════════════╗
 ║  ███╗   ███╗██╗███╗   ██╗██╗ ██████╗ █████╗ ██████╗ ███████╗  ║
 ║  ████╗ ████║██║████╗  ██║██║██╔════╝██╔══██╗██╔══██╗██╔════╝  ║
 ║  ██╔████╔██║██║██╔██╗ ██║██║██║     ███████║██║  ██║█████╗    ║
 ║  ██║╚██╔╝██║██║██║╚██╗██║██║██║     ██╔══██║██║  ██║██╔══╝    ║
 ║  ██║ ╚═╝ ██║██║██║ ╚████║██║╚██████╗██║  ██║██████╔╝███████╗  ║
 ║  ╚═╝     ╚═╝╚═╝╚═╝  ╚═══╝╚═╝ ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝  ║
 ╚════════════════════════════════════════════════════════════════════╝"#;

struct Blurb {
    desc: &'static str,
    color: Color,
    border_color: Color,
    controls: &'static [(&'static str, &'static str)],
}

fn blurb(kind: GameKind) -> Blurb {
    match kind {
        GameKind::Snake => Blurb {
            desc: "Eat and grow,\ndon't bite yourself!",
            color: Color::Rgb(74, 222, 128),
            border_color: Color::Rgb(40, 120, 40),
            controls: &[("↑ ↓ ← →  / WASD", "Steer"), ("Edges", "Wrap around")],
        },
        GameKind::Flyer => Blurb {
            desc: "Flap through\nthe gaps!",
            color: Color::Rgb(251, 191, 36),
            border_color: Color::Rgb(140, 100, 30),
            controls: &[("Space / ↑ / Enter", "Flap"), ("Gap passed", "+1 point")],
        },
        GameKind::Memory => Blurb {
            desc: "Find every\nmatching pair!",
            color: Color::Rgb(99, 102, 241),
            border_color: Color::Rgb(50, 50, 130),
            controls: &[("Card letter", "Flip card"), ("Each pair tried", "-1 point")],
        },
        GameKind::Puzzle => Blurb {
            desc: "Slide the tiles\nback in order!",
            color: Color::Rgb(168, 85, 247),
            border_color: Color::Rgb(90, 45, 130),
            controls: &[("↑ ↓ ← →", "Slide into the gap"), ("Tile letter", "Slide that tile")],
        },
        GameKind::Quiz => Blurb {
            desc: "Test your\nknowledge!",
            color: Color::Rgb(236, 72, 153),
            border_color: Color::Rgb(130, 40, 80),
            controls: &[("1-4 / a-d", "Answer"), ("Right answer", "+20 points")],
        },
    }
}

fn render_game_tile(frame: &mut Frame, area: Rect, kind: GameKind, selected: bool, high_scores: &HighScores) {
    let b = blurb(kind);
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { b.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { b.color };
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("[{}] ", kind.index() + 1),
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{} ", kind.icon())),
        Span::styled(kind.name(), Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];
    let desc_color = if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) };
    for desc_line in b.desc.split('\n') {
        lines.push(Line::from(Span::styled(desc_line, Style::default().fg(desc_color))));
    }
    if let Some(best) = high_scores.top_scores(kind).first() {
        lines.push(Line::from(Span::styled(
            format!("Best {}", best.score),
            Style::default().fg(Color::Rgb(255, 215, 0)),
        )));
    }
    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn key_line(key: &str, what: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<20}", key), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(what.to_string(), Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn game_controls(kind: GameKind) -> Vec<Line<'static>> {
    let b = blurb(kind);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} {}", kind.icon(), kind.name()),
            Style::default().fg(b.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, what) in b.controls {
        lines.push(key_line(key, what));
    }
    lines.push(key_line("R", "Restart"));
    lines.push(key_line("P", "Pause"));
    lines
}

pub fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),  // Banner
            Constraint::Length(2),  // Subtitle or notice
            Constraint::Length(8),  // Game tiles
            Constraint::Min(8),     // Controls area
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = match &app.notice {
        Some(notice) => Span::styled(
            format!("  ⚠ {}  ", notice),
            Style::default().fg(Color::Rgb(239, 68, 68)).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            "  ⚡ Five quick games ⚡  ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    };
    frame.render_widget(Paragraph::new(Line::from(subtitle)).alignment(Alignment::Center), chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games: ←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let kinds = GameKind::all();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(kinds.iter().map(|_| Constraint::Ratio(1, kinds.len() as u32)))
        .split(games_inner);
    for (i, &kind) in kinds.iter().enumerate() {
        render_game_tile(frame, cols[i], kind, app.selected_game == i, &app.high_scores);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[3]);

    let mut nav = vec![
        Line::from(""),
        key_line("Tab / Shift+Tab", "Switch tabs"),
        key_line("1-5", "Launch game"),
        key_line("← →", "Select game"),
        key_line("Enter", "Play selected"),
        key_line("Esc", "Return to Home"),
        key_line("H", "High scores"),
        key_line("q / Ctrl+C", "Quit"),
    ];
    nav.push(Line::from(""));
    let controls = Paragraph::new(nav).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let selected = kinds[app.selected_game.min(kinds.len() - 1)];
    let game_ctrl = Paragraph::new(game_controls(selected)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(format!(" 🎮 {} ", selected.name()))
            .title_style(Style::default().fg(blurb(selected).color).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Rgb(80, 80, 100)),
        ),
        Span::styled("  │  played ", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled(
            clock_text(app.high_scores.total_play_time()),
            Style::default().fg(Color::Rgb(80, 200, 255)),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);

    if app.show_high_scores {
        render_high_scores_overlay(frame, area, &app.high_scores);
    }
}

fn render_high_scores_overlay(frame: &mut Frame, area: Rect, high_scores: &HighScores) {
    let overlay_w = 44u16.min(area.width.saturating_sub(4));
    let overlay_h = 28u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" 🏆 High Scores ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    const MEDALS: [(&str, Color); SCORES_PER_GAME] = [
        ("🥇", Color::Rgb(255, 215, 0)),
        ("🥈", Color::Rgb(192, 192, 192)),
        ("🥉", Color::Rgb(205, 127, 50)),
    ];

    let mut lines = vec![Line::from("")];
    for &kind in GameKind::all() {
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", kind.icon())),
            Span::styled(kind.name(), Style::default().fg(blurb(kind).color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  ({} played)", high_scores.games_played(kind)),
                Style::default().fg(Color::Rgb(80, 80, 100)),
            ),
        ]));
        let best = high_scores.top_scores(kind);
        if best.is_empty() {
            lines.push(Line::from(Span::styled(
                "    No scores yet",
                Style::default().fg(Color::Rgb(60, 60, 80)),
            )));
        }
        for (entry, (medal, color)) in best.iter().zip(MEDALS) {
            lines.push(Line::from(vec![
                Span::raw(format!("    {} ", medal)),
                Span::styled(format!("{:<9} ", entry.name), Style::default().fg(Color::Rgb(200, 200, 220))),
                Span::styled(entry.score.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("H", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" to close", Style::default().fg(Color::Rgb(80, 80, 100))),
    ]));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25))), inner);
}
