//! Trade history table component

use super::super::state::DashboardState;
use super::tone_color;
use crate::format::{format_datetime, format_pnl, pnl_tone};

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

pub fn render_trades(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header = Row::new(["TIME", "COIN", "SIGNAL", "QTY", "PRICE", "P&L", "FEE"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .trades
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(format_datetime(&t.timestamp))
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(t.coin.clone()),
                Cell::from(t.signal.label()),
                Cell::from(format!("{:.4}", t.quantity)),
                Cell::from(format!("{:.2}", t.price)),
                Cell::from(format_pnl(t.pnl, true, state.locale))
                    .style(Style::default().fg(tone_color(pnl_tone(t.pnl, true)))),
                Cell::from(format!("{:.2}", t.fee)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(19),
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(12),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title("TRADES [2]")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(table, area);
}
