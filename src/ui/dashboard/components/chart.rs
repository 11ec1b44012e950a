//! Account value chart component
//!
//! Renders the chart model built by `dashboard::chart`

use super::super::chart::{ChartModel, multi_series, single_series};
use super::super::state::DashboardState;
use crate::events::ViewMode;

use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightGreen,
    Color::LightBlue,
    Color::LightRed,
];

pub fn render_chart(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    // Rebuilt from scratch every render.
    let model: ChartModel = match state.view {
        ViewMode::Aggregated => multi_series(&state.aggregated_series),
        ViewMode::SingleModel(_) => {
            let current = state
                .model_portfolio
                .as_ref()
                .map(|p| p.total_value)
                .unwrap_or(0.0);
            single_series(&state.model_history, current, "Account value")
        }
    };

    let datasets: Vec<Dataset> = model
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            Dataset::default()
                .name(series.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(&series.points)
        })
        .collect();

    let x_labels: Vec<Span> = model
        .x_labels
        .iter()
        .map(|l| Span::styled(l.clone(), Style::default().fg(Color::DarkGray)))
        .collect();
    let y_labels: Vec<Span> = [model.y_bounds[0], model.y_bounds[1] / 2.0, model.y_bounds[1]]
        .iter()
        .map(|v| Span::styled(format!("${:.0}", v), Style::default().fg(Color::DarkGray)))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("ACCOUNT VALUE")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .bounds(model.x_bounds)
                .labels(x_labels)
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds(model.y_bounds)
                .labels(y_labels)
                .style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(chart, area);
}
