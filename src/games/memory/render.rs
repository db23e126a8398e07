use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{Face, Memory, SYMBOLS};
use crate::input::cell_label;

const CARD_W: u16 = 8;
const CARD_H: u16 = 4;

pub fn render(memory: &Memory, frame: &mut Frame, area: Rect) {
    let cols = memory.columns().max(1);
    let rows = memory.cards().len().div_ceil(cols);

    let board_w = (cols as u16 * CARD_W).min(area.width);
    let board_h = (rows as u16 * CARD_H + 2).min(area.height);
    let board = Rect::new(
        area.x + (area.width - board_w) / 2,
        area.y + (area.height - board_h) / 2,
        board_w,
        board_h,
    );

    for (i, card) in memory.cards().iter().enumerate() {
        let (col, row) = ((i % cols) as u16, (i / cols) as u16);
        let x = board.x + col * CARD_W;
        let y = board.y + row * CARD_H;
        if x + CARD_W > board.x + board.width || y + CARD_H > board.y + board.height {
            continue;
        }
        let rect = Rect::new(x, y, CARD_W, CARD_H);

        let (face, border) = match card.face {
            Face::Hidden => ("??", Color::Rgb(99, 102, 241)),
            Face::Revealed => (SYMBOLS[card.symbol % SYMBOLS.len()], Color::Rgb(251, 191, 36)),
            Face::Matched => (SYMBOLS[card.symbol % SYMBOLS.len()], Color::Rgb(34, 197, 94)),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                cell_label(i).to_string(),
                Style::default().fg(Color::Gray),
            ));
        let text = Paragraph::new(Span::styled(
            face,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(text, rect);
    }

    let status = if memory.is_locked() { "..." } else { "" };
    let footer = Line::from(vec![
        Span::styled(
            format!("Pairs {}/{}  ", memory.matched_pairs(), memory.cards().len() / 2),
            Style::default().fg(Color::Rgb(34, 197, 94)),
        ),
        Span::styled(
            format!("Moves {}  ", memory.moves()),
            Style::default().fg(Color::Rgb(251, 191, 36)),
        ),
        Span::styled(status, Style::default().fg(Color::DarkGray)),
    ]);
    let footer_area = Rect::new(board.x, board.y + board.height.saturating_sub(1), board.width, 1);
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), footer_area);
}
