//! Color constants and styles for the dashboard

use ratatui::prelude::*;

pub const TITLE_COLOR: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;
pub const INDEX_COLOR: Color = Color::DarkGray;
pub const ROW_ALT_BG: Color = Color::Indexed(235);
pub const BAR_EMPTY: Color = Color::DarkGray;
pub const STATUS_BAR_BG: Color = Color::Indexed(236);
pub const STATUS_KEY_COLOR: Color = Color::Cyan;
pub const FLASH_SUCCESS: Color = Color::Green;
pub const FLASH_ERROR: Color = Color::Red;
pub const SLIDER_FILLED: Color = Color::Cyan;
pub const SLIDER_SELECTED: Color = Color::Yellow;

pub const HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
pub const ROW_SELECTED: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Traffic-light color for a score relative to the table maximum.
/// High score is good here, so the scale runs green at the top.
pub fn score_color(score: f64, max_score: f64) -> Color {
    let percentage = if max_score > 0.0 {
        (score / max_score) * 100.0
    } else {
        0.0
    };

    if percentage >= 70.0 {
        Color::Green
    } else if percentage >= 40.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Traffic-light color for a risk value; high risk is bad.
pub fn risk_color(risk: f64) -> Color {
    if risk >= 0.25 {
        Color::Red
    } else if risk >= 0.18 {
        Color::Yellow
    } else {
        Color::Green
    }
}
