//! Dashboard footer component
//!
//! Renders key hints

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = if state.modal.is_some() {
        "[Esc] Close | [Enter] Confirm | [Tab] Next field".to_string()
    } else {
        "[Q] Quit | [Enter] Select | [A] All | [1-3] Tabs | [M] Mode | [T] Range | \
         [R] Refresh | [N] Model | [P] Provider | [S] Settings | [D] Delete | [U] Update"
            .to_string()
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
