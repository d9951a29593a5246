//! Color constants for the TUI.

use ratatui::style::Color;

pub const HEADER_FG: Color = Color::White;
pub const HEADER_BG: Color = Color::DarkGray;
pub const FOOTER_FG: Color = Color::DarkGray;
/// Category heading rows.
pub const CATEGORY_FG: Color = Color::Cyan;
/// Rows the gate currently blocks.
pub const BLOCKED_FG: Color = Color::DarkGray;
/// Rows with a non-zero quantity.
pub const SELECTED_FG: Color = Color::Green;
pub const HEAVY_DUTY_FG: Color = Color::Yellow;
pub const WARNING_FG: Color = Color::Yellow;
pub const STATUS_FG: Color = Color::Magenta;
pub const LOAD_LOW: Color = Color::Green;
pub const LOAD_MID: Color = Color::Yellow;
pub const LOAD_HIGH: Color = Color::Red;

/// Gauge color by how much of the recommended rating is used.
pub fn load_color(ratio: f64) -> Color {
    if ratio < 0.6 {
        LOAD_LOW
    } else if ratio < 0.85 {
        LOAD_MID
    } else {
        LOAD_HIGH
    }
}
