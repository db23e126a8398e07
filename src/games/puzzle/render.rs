use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{Puzzle, BLANK};
use crate::input::cell_label;

const TILE_W: u16 = 8;
const TILE_H: u16 = 3;

pub fn render(puzzle: &Puzzle, frame: &mut Frame, area: Rect) {
    let n = puzzle.size() as u16;
    let board_w = (n * TILE_W + 2).min(area.width);
    let board_h = (n * TILE_H + 2).min(area.height);
    let board = Rect::new(
        area.x + (area.width - board_w) / 2,
        area.y + (area.height - board_h) / 2,
        board_w,
        board_h,
    );
    let solved = puzzle.is_solved();
    let frame_color = if solved { Color::Rgb(34, 197, 94) } else { Color::Rgb(168, 85, 247) };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(frame_color))
        .title(format!(" Moves {} ", puzzle.moves()));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    for (i, &tile) in puzzle.tiles().iter().enumerate() {
        let (col, row) = ((i as u16) % n, (i as u16) / n);
        let rect = Rect::new(inner.x + col * TILE_W, inner.y + row * TILE_H, TILE_W, TILE_H);
        if rect.right() > inner.right() || rect.bottom() > inner.bottom() {
            continue;
        }
        if tile == BLANK {
            continue;
        }
        let in_place = tile as usize == i + 1;
        let color = if in_place { Color::Rgb(34, 197, 94) } else { Color::Rgb(96, 165, 250) };
        let tile_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                cell_label(i).to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        let label = Paragraph::new(Span::styled(
            tile.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(tile_block);
        frame.render_widget(label, rect);
    }
}
