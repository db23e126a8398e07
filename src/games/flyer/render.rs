use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{Flyer, Phase};

pub fn render(flyer: &Flyer, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 140, 200)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let w = inner.width as usize;
    let h = inner.height as usize;
    if w == 0 || h == 0 {
        return;
    }

    let r = flyer.rules();
    let sx = w as f32 / r.field_width;
    let sy = h as f32 / r.field_height;

    let sky = Style::default().bg(Color::Rgb(30, 60, 100));
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', sky); w]; h];

    // Obstacles: solid columns with an opening.
    let pipe = Style::default().fg(Color::Rgb(34, 197, 94)).bg(Color::Rgb(20, 110, 50));
    for o in flyer.obstacles() {
        let left = (o.x * sx).floor() as i32;
        let right = ((o.x + r.obstacle_width) * sx).ceil() as i32;
        let gap_top = (o.gap_top * sy).floor() as i32;
        let gap_bottom = ((o.gap_top + r.gap) * sy).ceil() as i32;
        for x in left.max(0)..right.min(w as i32) {
            for y in 0..h as i32 {
                if y < gap_top || y >= gap_bottom {
                    let ch = if y == gap_top - 1 || y == gap_bottom { '▀' } else { '█' };
                    grid[y as usize][x as usize] = (ch, pipe);
                }
            }
        }
    }

    // Actor.
    let ax = ((r.actor_x + r.actor_size / 2.0) * sx) as i32;
    let ay = ((flyer.y() + r.actor_size / 2.0) * sy) as i32;
    if ax >= 0 && (ax as usize) < w && ay >= 0 && (ay as usize) < h {
        let (ch, color) = match flyer.phase() {
            Phase::Terminal => ('✖', Color::Rgb(239, 68, 68)),
            _ if flyer.velocity() < 0.0 => ('▲', Color::Rgb(251, 191, 36)),
            _ => ('●', Color::Rgb(251, 191, 36)),
        };
        grid[ay as usize][ax as usize] = (
            ch,
            Style::default().fg(color).bg(Color::Rgb(30, 60, 100)).add_modifier(Modifier::BOLD),
        );
    }

    let lines: Vec<Line<'static>> = grid
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
