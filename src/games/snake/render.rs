use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{Cell, Phase, Snake};
use crate::input::Direction;

pub fn render(snake: &Snake, frame: &mut Frame, area: Rect) {
    let size = snake.grid_size();
    let head = snake.head();
    let food = snake.food();
    let dead = snake.phase() == Phase::Over;

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(size as usize);
    for y in 0..size {
        let mut spans = Vec::with_capacity(size as usize);
        for x in 0..size {
            let cell = Cell::new(x, y);
            let span = if cell == head {
                let color = if dead { Color::Rgb(220, 60, 60) } else { Color::Rgb(140, 255, 140) };
                let eyes = match snake.heading() {
                    Direction::Up => "▀▀",
                    Direction::Down => "▄▄",
                    Direction::Left => "◀█",
                    Direction::Right => "█▶",
                };
                Span::styled(eyes, Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else if snake.body().contains(&cell) {
                Span::styled("▓▓", Style::default().fg(Color::Rgb(74, 222, 128)))
            } else if Some(cell) == food {
                Span::styled("◆ ", Style::default().fg(Color::Rgb(239, 68, 68)).add_modifier(Modifier::BOLD))
            } else {
                let dot = if (x + y) % 2 == 0 { "· " } else { "  " };
                Span::styled(dot, Style::default().fg(Color::Rgb(40, 50, 80)))
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let field_w = (size as u16 * 2 + 2).min(area.width);
    let field_h = (size as u16 + 2).min(area.height);
    let field = Rect::new(
        area.x + (area.width - field_w) / 2,
        area.y + (area.height - field_h) / 2,
        field_w,
        field_h,
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 80, 120)))
        .style(Style::default().bg(Color::Rgb(26, 26, 46)));
    frame.render_widget(Paragraph::new(lines).block(block), field);
}
