//! Activity log panel component
//!
//! Renders worker events with compact timestamps

use super::super::state::DashboardState;
use crate::error_classifier::LogLevel;
use crate::events::{EventType, Source};

use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn source_color(source: Source) -> Color {
    match source {
        Source::MarketPoller => Color::Yellow,
        Source::PortfolioPoller => Color::Cyan,
        Source::UpdateChecker => Color::Magenta,
        Source::Action => Color::Green,
    }
}

/// Compact `MM-DD HH:MM` rendering of an event timestamp.
fn format_compact_timestamp(timestamp: &str) -> String {
    match (timestamp.get(5..10), timestamp.get(11..16)) {
        (Some(month_day), Some(hour_min)) => format!("{} {}", month_day, hour_min),
        _ => timestamp.to_string(),
    }
}

pub fn render_logs(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let max_logs = (area.height.saturating_sub(3)) as usize;
    let log_count = max_logs.max(1);

    let log_lines: Vec<Line> = state
        .activity_logs
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .take(log_count)
        .map(|event| {
            let status_icon = match (event.event_type, event.log_level) {
                (EventType::Success, _) => "✅",
                (EventType::Error, LogLevel::Warn) => "",
                (EventType::Error, _) => "❌",
                _ => "",
            };
            Line::from(vec![
                Span::raw(format!("{} ", status_icon)),
                Span::styled(
                    format!("{} ", format_compact_timestamp(&event.timestamp)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    event.msg.clone(),
                    Style::default().fg(source_color(event.source)),
                ),
            ])
        })
        .collect();

    let paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Starting up...")])
    } else {
        Paragraph::new(log_lines)
    };

    let block = Block::default()
        .title("ACTIVITY LOG")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(paragraph.block(block).wrap(Wrap { trim: true }), area);
}
