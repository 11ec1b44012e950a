//! Open positions table component

use super::super::state::DashboardState;
use super::tone_color;
use crate::format::{format_pnl, pnl_tone};

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

pub fn render_positions(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let positions = state
        .active_portfolio()
        .map(|p| p.positions.as_slice())
        .unwrap_or_default();

    let header = Row::new(["COIN", "SIDE", "QTY", "AVG PRICE", "PRICE", "LEV", "P&L"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = positions
        .iter()
        .map(|p| {
            let side_color = match p.side {
                crate::api::types::Side::Long => Color::LightGreen,
                crate::api::types::Side::Short => Color::LightRed,
            };
            let current = p
                .current_price
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string());
            Row::new(vec![
                Cell::from(p.coin.clone()),
                Cell::from(p.side.to_string()).style(Style::default().fg(side_color)),
                Cell::from(format!("{:.4}", p.quantity)),
                Cell::from(format!("{:.2}", p.avg_price)),
                Cell::from(current),
                Cell::from(format!("{}x", p.leverage)),
                Cell::from(format_pnl(p.pnl, true, state.locale))
                    .style(Style::default().fg(tone_color(pnl_tone(p.pnl, true)))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(5),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title("POSITIONS [1]")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(table, area);
}
