// src/gui/components/mod.rs
pub mod change_table;
pub mod export_bar;
pub mod panel;
pub mod summary;

use eframe::egui::Color32;

use crate::score::Level;

pub fn level_color(level: Level) -> Color32 {
    let (r, g, b) = level.rgb();
    Color32::from_rgb(r, g, b)
}

/// Colour for a percentage, using the same thresholds as the overall level.
pub fn percent_color(percent: u8) -> Color32 {
    level_color(Level::from_score(percent))
}
