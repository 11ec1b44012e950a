//! Dashboard header component
//!
//! Renders the title bar and the update banner

use super::super::state::DashboardState;
use crate::events::ViewMode;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let view_label = match state.view {
        ViewMode::Aggregated => "ALL MODELS".to_string(),
        ViewMode::SingleModel(id) => state
            .models
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.to_uppercase())
            .unwrap_or_else(|| format!("MODEL {}", id)),
    };
    let title = Paragraph::new(format!(
        "AITRADE DASHBOARD v{} - {} [{}]",
        version,
        view_label,
        state.time_range.as_param()
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    let (banner_text, banner_color) = if state.update_banner_visible() {
        let latest = state
            .update_info
            .as_ref()
            .map(|info| info.latest_version.as_str())
            .unwrap_or("");
        (
            format!("Update available: {} - press [v] for details", latest),
            Color::LightYellow,
        )
    } else {
        (
            format!("{} | {}", state.environment, state.display_mode),
            Color::DarkGray,
        )
    };
    let banner = Paragraph::new(banner_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(banner_color))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(banner, header_chunks[1]);
}
