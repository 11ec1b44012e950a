//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod chart;
pub mod conversations;
pub mod footer;
pub mod header;
pub mod logs;
pub mod market;
pub mod modals;
pub mod models_panel;
pub mod positions;
pub mod stats;
pub mod trades;

use crate::format::PnlTone;
use ratatui::prelude::Color;

/// Terminal color for a P&L tone. The same mapping applies in every locale.
pub fn tone_color(tone: PnlTone) -> Color {
    match tone {
        PnlTone::Positive => Color::LightGreen,
        PnlTone::Negative => Color::LightRed,
        PnlTone::Neutral => Color::Gray,
    }
}
