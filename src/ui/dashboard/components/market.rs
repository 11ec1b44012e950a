//! Market prices panel component

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_market(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let lines: Vec<Line> = if state.market_prices.is_empty() {
        vec![Line::from(Span::styled(
            "Waiting for prices...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        state
            .market_prices
            .iter()
            .map(|(coin, quote)| {
                let change_color = if quote.change_24h > 0.0 {
                    Color::LightGreen
                } else if quote.change_24h < 0.0 {
                    Color::LightRed
                } else {
                    Color::Gray
                };
                Line::from(vec![
                    Span::styled(format!("{:<6}", coin), Style::default().fg(Color::White)),
                    Span::raw(format!("${:>12.2}  ", quote.price)),
                    Span::styled(
                        format!("{:+.2}%", quote.change_24h),
                        Style::default().fg(change_color),
                    ),
                ])
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("MARKET")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    f.render_widget(paragraph, area);
}
