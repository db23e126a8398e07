use ratatui::prelude::*;
use ratatui::widgets::*;

use super::Quiz;

pub fn render(quiz: &Quiz, frame: &mut Frame, area: Rect) {
    let width = area.width.min(64);
    let panel = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);

    let Some(question) = quiz.current() else {
        let done = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Quiz complete!",
                Style::default().fg(Color::Rgb(34, 197, 94)).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} of {} correct", quiz.correct(), quiz.total())),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(done, panel);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(panel);

    let prompt = Paragraph::new(question.prompt.as_str())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(236, 72, 153)))
                .title(format!(" Question {}/{} ", quiz.cursor() + 1, quiz.total())),
        );
    frame.render_widget(prompt, chunks[0]);

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = match quiz.selected() {
                Some(_) if i == question.correct => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(34, 197, 94)),
                Some(chosen) if chosen == i => Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(239, 68, 68)),
                _ => Style::default().fg(Color::Gray),
            };
            Line::from(Span::styled(format!(" {}) {} ", i + 1, option), style))
        })
        .collect();
    let options = Paragraph::new(lines).block(Block::default().padding(Padding::new(2, 2, 1, 0)));
    frame.render_widget(options, chunks[1]);
}
