pub mod home;
pub mod tabs;

use std::time::Duration;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, GameSlot, Tab};
use crate::games::{flyer, memory, puzzle, quiz, snake, GameKind, Machine};
use crate::session::Status;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Home => home::render_home(frame, chunks[1], app),
        Tab::Game(kind) => render_game(frame, chunks[1], kind, app.slot(kind)),
    }
}

/// `mm:ss`.
pub fn clock_text(played: Duration) -> String {
    let secs = played.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn score_text(slot: &GameSlot) -> String {
    let live = slot.live_score.get();
    match slot.session.machine() {
        // These only score on completion; show what is still on the table.
        Machine::Memory(m) if !m.is_complete() => format!("{} (up to {})", live, m.potential_score()),
        Machine::Puzzle(p) if !p.is_solved() => format!("{} (up to {})", live, p.potential_score()),
        _ => live.to_string(),
    }
}

fn help_text(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Snake => "↑↓←→ / WASD steer",
        GameKind::Flyer => "Space / ↑ flap",
        GameKind::Memory => "letter flips a card",
        GameKind::Puzzle => "↑↓←→ slide, or a tile's letter",
        GameKind::Quiz => "1-4 or a-d answer",
    }
}

fn render_game(frame: &mut Frame, area: Rect, kind: GameKind, slot: &GameSlot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Min(0),    // Board
            Constraint::Length(1), // Help
        ])
        .split(area);

    let session = &slot.session;
    let (status, status_color) = match session.status() {
        Status::Idle => ("READY", Color::Rgb(120, 120, 140)),
        Status::Running => ("PLAYING", Color::Rgb(34, 197, 94)),
        Status::Paused => ("PAUSED", Color::Rgb(251, 191, 36)),
        Status::Ended => ("GAME OVER", Color::Rgb(239, 68, 68)),
    };
    let bar = Line::from(vec![
        Span::styled(format!(" {} {} ", kind.icon(), kind.name()), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("│ Score ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled(score_text(slot), Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ⏱ ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled(clock_text(session.play_time()), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" │ ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled(status, Style::default().fg(status_color).add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(bar), chunks[0]);

    match session.machine() {
        Machine::Snake(g) => snake::render::render(g, frame, chunks[1]),
        Machine::Flyer(g) => flyer::render::render(g, frame, chunks[1]),
        Machine::Memory(g) => memory::render::render(g, frame, chunks[1]),
        Machine::Puzzle(g) => puzzle::render::render(g, frame, chunks[1]),
        Machine::Quiz(g) => quiz::render::render(g, frame, chunks[1]),
    }

    let help = Line::from(vec![
        Span::styled(format!(" {}", help_text(kind)), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled("  │  P pause  R restart  Esc home", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]);
    frame.render_widget(Paragraph::new(help), chunks[2]);

    if session.status() == Status::Ended {
        render_game_over(frame, chunks[1], slot);
    }
}

fn render_game_over(frame: &mut Frame, area: Rect, slot: &GameSlot) {
    let w = 30u16.min(area.width);
    let h = 5u16.min(area.height);
    let rect = Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    );
    frame.render_widget(Clear, rect);
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Final score {}", slot.live_score.get()),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("R to play again", Style::default().fg(Color::Rgb(140, 140, 140)))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Rgb(239, 68, 68)))
            .style(Style::default().bg(Color::Rgb(15, 15, 25))),
    );
    frame.render_widget(text, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_text_is_minutes_and_seconds() {
        assert_eq!(clock_text(Duration::ZERO), "00:00");
        assert_eq!(clock_text(Duration::from_millis(61_900)), "01:01");
        assert_eq!(clock_text(Duration::from_secs(3600)), "60:00");
    }
}
