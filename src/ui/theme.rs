//! Theme constants for the Xiangqi viewer

use egui::Color32;

// Board colors - warm wood tones
pub const BOARD_BG: Color32 = Color32::from_rgb(222, 184, 135); // Burlywood
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 40, 20);
pub const RIVER_TEXT: Color32 = Color32::from_rgb(120, 80, 40);

// Pieces
pub const PIECE_FACE: Color32 = Color32::from_rgb(245, 228, 196);
pub const PIECE_RIM: Color32 = Color32::from_rgb(120, 85, 45);
pub const FIRST_INK: Color32 = Color32::from_rgb(190, 30, 30);
pub const SECOND_INK: Color32 = Color32::from_rgb(25, 25, 30);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const SELECTED_RING: Color32 = Color32::from_rgb(50, 140, 230);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn target_dot() -> Color32 {
    Color32::from_rgba_unmultiplied(40, 120, 60, 170)
}

pub fn hover_own() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

// Panel text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 40.0;
pub const PIECE_RADIUS_RATIO: f32 = 0.42;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
pub const TARGET_DOT_RATIO: f32 = 0.14;
