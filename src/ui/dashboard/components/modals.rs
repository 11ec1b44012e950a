//! Modal rendering
//!
//! Draws the active modal centered over the dashboard

use super::super::state::{DashboardState, FormState, Modal};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

/// Centered rectangle taking the given percentage of the frame.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn render_modal(f: &mut Frame, state: &DashboardState) {
    let Some(modal) = &state.modal else {
        return;
    };

    let (title, lines) = match modal {
        Modal::AddModel(form) => {
            let mut lines = form_lines(form);
            if !state.provider_model_hints.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Available: {}", state.provider_model_hints.join(", ")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ("ADD MODEL", lines)
        }
        Modal::AddProvider(form) => {
            let mut lines = form_lines(form);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Existing providers ([x] delete, [t] test):",
                Style::default().fg(Color::DarkGray),
            )));
            let field_count = form.fields.len();
            if state.providers.is_empty() {
                lines.push(Line::from(Span::styled(
                    "  (none)",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for (i, provider) in state.providers.iter().enumerate() {
                let selected = form.focus == field_count + i;
                let style = if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} {} ({})",
                        if selected { ">" } else { " " },
                        provider.name,
                        provider.api_url
                    ),
                    style,
                )));
            }
            ("PROVIDERS", lines)
        }
        Modal::Settings(form) => ("SETTINGS", form_lines(form)),
        Modal::Password(form) => {
            let mut lines = vec![Line::from(Span::styled(
                state
                    .pending_action
                    .as_ref()
                    .map(|a| format!("Password required to {}", a.describe()))
                    .unwrap_or_else(|| "Password required".to_string()),
                Style::default().fg(Color::LightYellow),
            ))];
            lines.push(Line::from(""));
            lines.extend(form_lines(form));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[Enter] Confirm  [Esc] Cancel",
                Style::default().fg(Color::DarkGray),
            )));
            ("PASSWORD", lines)
        }
        Modal::Update => {
            let mut lines = Vec::new();
            if let Some(info) = &state.update_info {
                lines.push(Line::from(format!(
                    "Version {} is available (current: {})",
                    info.latest_version, info.current_version
                )));
                if let Some(notes) = &info.release_notes {
                    lines.push(Line::from(""));
                    for note_line in notes.lines() {
                        lines.push(Line::from(note_line.to_string()));
                    }
                }
                if let Some(url) = &info.release_url {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        url.clone(),
                        Style::default().fg(Color::LightBlue),
                    )));
                }
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[Enter] Dismiss for 24h  [Esc] Close",
                Style::default().fg(Color::DarkGray),
            )));
            ("UPDATE AVAILABLE", lines)
        }
        Modal::Alert(msg) => (
            "NOTICE",
            vec![
                Line::from(msg.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    "[Enter] OK",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
    };

    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::LightYellow))
        .padding(Padding::uniform(1));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(paragraph, area);
}

/// Renders form fields with a cursor marker on the focused one. Masked
/// fields display bullets instead of their contents.
fn form_lines<'a>(form: &'a FormState) -> Vec<Line<'a>> {
    form.fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = form.focus == i;
            let shown = if field.masked {
                "\u{2022}".repeat(field.value.len())
            } else {
                field.value.clone()
            };
            let marker = if focused { "> " } else { "  " };
            let value_style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{:<28}", format!("{}:", field.label)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(shown, value_style),
                Span::styled(if focused { "_" } else { "" }, value_style),
            ])
        })
        .collect()
}
