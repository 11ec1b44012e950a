//! AI conversation log component

use super::super::state::DashboardState;
use crate::format::format_datetime;

use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_conversations(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut lines: Vec<Line> = Vec::new();
    for entry in &state.conversations {
        lines.push(Line::from(Span::styled(
            format_datetime(&entry.timestamp),
            Style::default().fg(Color::DarkGray),
        )));
        for text_line in entry.ai_response.lines() {
            lines.push(Line::from(Span::raw(text_line.to_string())));
        }
        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No conversation entries yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("CONVERSATIONS [3]")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    f.render_widget(paragraph, area);
}
