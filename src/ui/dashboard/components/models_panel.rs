//! Models panel component
//!
//! Renders the model list with the aggregated entry pinned on top

use super::super::state::DashboardState;
use crate::events::ViewMode;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding};

pub fn render_models_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut items: Vec<ListItem> = Vec::with_capacity(state.models.len() + 1);

    let aggregated_active = state.view == ViewMode::Aggregated;
    items.push(ListItem::new(Line::from(Span::styled(
        "ALL MODELS",
        Style::default()
            .fg(if aggregated_active {
                Color::Cyan
            } else {
                Color::Gray
            })
            .add_modifier(Modifier::BOLD),
    ))));

    if state.models.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No models yet - press [n] to add one",
            Style::default().fg(Color::DarkGray),
        ))));
    } else {
        for model in &state.models {
            let active = state.view == ViewMode::SingleModel(model.id);
            items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    model.name.clone(),
                    Style::default().fg(if active { Color::Cyan } else { Color::White }),
                ),
                Span::styled(
                    format!(" ({})", model.model_name),
                    Style::default().fg(Color::DarkGray),
                ),
            ])));
        }
    }

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_row));

    let list = List::new(items)
        .block(
            Block::default()
                .title("MODELS")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(40, 48, 56)));

    f.render_stateful_widget(list, area, &mut list_state);
}
