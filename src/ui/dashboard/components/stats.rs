//! Stats bar component
//!
//! Renders the four headline stats for the active view

use super::super::state::DashboardState;
use super::tone_color;
use crate::format::{StatKind, format_stat, pnl_tone};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_stats(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let portfolio = state.active_portfolio();
    let (total, cash, realized, unrealized) = match portfolio {
        Some(p) => (p.total_value, p.cash, p.realized_pnl, p.unrealized_pnl),
        None => (0.0, 0.0, 0.0, 0.0),
    };
    let capital = portfolio.and_then(|p| p.initial_capital);

    let cells = [
        ("TOTAL VALUE", StatKind::Total, total, false),
        ("CASH", StatKind::Cash, cash, false),
        ("REALIZED P&L", StatKind::Realized, realized, true),
        ("UNREALIZED P&L", StatKind::Unrealized, unrealized, true),
    ];

    for (i, (label, kind, value, is_pnl)) in cells.iter().enumerate() {
        let text = format_stat(*kind, *value, state.display_mode, capital, state.locale);
        let color = tone_color(pnl_tone(*value, *is_pnl));
        let cell = Paragraph::new(vec![
            Line::from(Span::styled(
                *label,
                Style::default().add_modifier(Modifier::DIM),
            )),
            Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        f.render_widget(cell, chunks[i]);
    }
}
