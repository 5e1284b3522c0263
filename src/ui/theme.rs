// instrscope - ui/theme.rs
//
// Colour scheme and layout constants for the chart window.
// No dependencies on app state or business logic.

use crate::render::series_rgb;
use egui::Color32;

/// Line colour for the series at `index`; matches the file output.
pub fn series_colour(index: usize) -> Color32 {
    let (r, g, b) = series_rgb(index);
    Color32::from_rgb(r, g, b)
}

/// Grid line colour.
pub fn grid_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(55, 65, 81) // Gray 700
    } else {
        Color32::from_rgb(229, 231, 235) // Gray 200
    }
}

/// Legend and tooltip background.
pub fn overlay_bg(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_premultiplied(17, 24, 39, 230) // Gray 900
    } else {
        Color32::from_rgba_premultiplied(255, 255, 255, 235)
    }
}

/// Hover guide line colour.
pub const HOVER_GUIDE: Color32 = Color32::from_rgb(156, 163, 175); // Gray 400

/// Layout constants.
pub const MARGIN_LEFT: f32 = 72.0;
pub const MARGIN_RIGHT: f32 = 24.0;
pub const MARGIN_TOP: f32 = 40.0;
pub const MARGIN_BOTTOM: f32 = 48.0;
pub const TITLE_FONT_SIZE: f32 = 18.0;
pub const LABEL_FONT_SIZE: f32 = 12.0;
pub const LINE_WIDTH: f32 = 2.0;
pub const POINT_RADIUS: f32 = 3.0;
pub const LEGEND_SWATCH_WIDTH: f32 = 20.0;
pub const LEGEND_PADDING: f32 = 8.0;
