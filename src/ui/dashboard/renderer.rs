//! Dashboard main renderer

use super::components::{
    chart, conversations, footer, header, logs, market, modals, models_panel, positions, stats,
    trades,
};
use super::state::{DashboardState, DetailTab};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(22),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(main_chunks[1]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(content_chunks[0]);
    models_panel::render_models_panel(f, left_chunks[0], state);
    market::render_market(f, left_chunks[1], state);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(45),
            Constraint::Fill(1),
        ])
        .split(content_chunks[1]);
    stats::render_stats(f, right_chunks[0], state);
    chart::render_chart(f, right_chunks[1], state);

    match state.tab {
        DetailTab::Positions => positions::render_positions(f, right_chunks[2], state),
        DetailTab::Trades => trades::render_trades(f, right_chunks[2], state),
        DetailTab::Conversations => conversations::render_conversations(f, right_chunks[2], state),
    }

    logs::render_logs(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);

    modals::render_modal(f, state);
}
