//! Board rendering for the Xiangqi viewer

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Move, Piece, Pos, Side, COLS, ROWS};

use super::theme::*;

/// Everything the board needs to know about the current turn
pub struct BoardOverlay<'a> {
    pub side_to_move: Side,
    pub selected: Option<Pos>,
    pub targets: &'a [Pos],
    pub last_move: Option<Move>,
    pub game_over: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Draw the second side at the bottom
    flipped: bool,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
            flipped: false,
        }
    }
}

impl BoardView {
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn toggle_flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Render the board and return the clicked cell if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay<'_>) -> Option<Pos> {
        let available = ui.available_size() - Vec2::splat(20.0);

        // Fit a 9x10 point grid: 8 gaps across, 9 gaps down
        let cell_w = (available.x - 2.0 * BOARD_MARGIN) / (COLS as f32 - 1.0);
        let cell_h = (available.y - 2.0 * BOARD_MARGIN) / (ROWS as f32 - 1.0);
        self.cell_size = cell_w.min(cell_h).max(10.0);
        let size = Vec2::new(
            2.0 * BOARD_MARGIN + (COLS as f32 - 1.0) * self.cell_size,
            2.0 * BOARD_MARGIN + (ROWS as f32 - 1.0) * self.cell_size,
        );

        let (response, painter) = ui.allocate_painter(size, Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_palaces(&painter);
        self.draw_river(&painter);
        self.draw_coordinates(&painter);

        if let Some(mv) = overlay.last_move {
            self.draw_last_move(&painter, mv);
        }
        self.draw_pieces(&painter, board);

        if let Some(pos) = overlay.selected {
            let center = self.board_to_screen(pos);
            painter.circle_stroke(
                center,
                self.cell_size * PIECE_RADIUS_RATIO + 3.0,
                Stroke::new(3.0, SELECTED_RING),
            );
        }
        for &pos in overlay.targets {
            painter.circle_filled(self.board_to_screen(pos), self.cell_size * TARGET_DOT_RATIO, target_dot());
        }

        if overlay.game_over {
            return None;
        }

        let pos = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        if board.is_own(pos, overlay.side_to_move) {
            painter.circle_filled(self.board_to_screen(pos), self.cell_size * PIECE_RADIUS_RATIO, hover_own());
        }
        response.clicked().then_some(pos)
    }

    fn line(&self, painter: &Painter, a: (f32, f32), b: (f32, f32), stroke: Stroke) {
        painter.line_segment([self.grid_point(a.0, a.1), self.grid_point(b.0, b.1)], stroke);
    }

    /// Ranks run edge to edge; inner files stop at the river
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let last_row = ROWS as f32 - 1.0;
        let last_col = COLS as f32 - 1.0;

        for row in 0..ROWS {
            self.line(painter, (row as f32, 0.0), (row as f32, last_col), stroke);
        }
        for col in 0..COLS {
            let c = col as f32;
            if col == 0 || col == COLS - 1 {
                self.line(painter, (0.0, c), (last_row, c), stroke);
            } else {
                self.line(painter, (0.0, c), (4.0, c), stroke);
                self.line(painter, (5.0, c), (last_row, c), stroke);
            }
        }
    }

    fn draw_palaces(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        for top in [0.0, 7.0] {
            self.line(painter, (top, 3.0), (top + 2.0, 5.0), stroke);
            self.line(painter, (top, 5.0), (top + 2.0, 3.0), stroke);
        }
    }

    fn draw_river(&self, painter: &Painter) {
        let font = egui::FontId::proportional(self.cell_size * 0.4);
        let y = self.grid_point(4.5, 0.0).y;
        for col in [2.0, 6.0] {
            let x = self.grid_point(0.0, col).x;
            painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, "RIVER", font.clone(), RIVER_TEXT);
        }
    }

    /// File letters along top and bottom, row digits along the sides
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 0..COLS {
            let letter = (b'a' + col as u8) as char;
            let x = self.board_to_screen(Pos::at(0, col as u8)).x;
            for y in [self.board_rect.min.y + 12.0, self.board_rect.max.y - 12.0] {
                painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
            }
        }

        for row in 0..ROWS {
            let y = self.board_to_screen(Pos::at(row as u8, 0)).y;
            for x in [self.board_rect.min.x + 12.0, self.board_rect.max.x - 12.0] {
                painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, row.to_string(), font.clone(), GRID_LINE);
            }
        }
    }

    fn draw_pieces(&self, painter: &Painter, board: &Board) {
        for side in [Side::First, Side::Second] {
            for (pos, piece) in board.pieces(side) {
                self.draw_piece(painter, pos, piece);
            }
        }
    }

    /// Draw a single piece disc with its letter
    fn draw_piece(&self, painter: &Painter, pos: Pos, piece: Piece) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * PIECE_RADIUS_RATIO;
        let ink = match piece.side {
            Side::First => FIRST_INK,
            Side::Second => SECOND_INK,
        };

        // Shadow
        painter.circle_filled(
            center + Vec2::new(2.0, 2.0),
            radius,
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 50),
        );
        painter.circle_filled(center, radius, PIECE_FACE);
        painter.circle_stroke(center, radius, Stroke::new(2.0, PIECE_RIM));
        painter.circle_stroke(center, radius * 0.8, Stroke::new(1.0, ink));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            piece.kind.letter(),
            egui::FontId::proportional(radius),
            ink,
        );
    }

    fn draw_last_move(&self, painter: &Painter, mv: Move) {
        let stroke = Stroke::new(2.0, LAST_MOVE_MARKER);
        painter.line_segment([self.board_to_screen(mv.from()), self.board_to_screen(mv.to())], stroke);
        painter.circle_filled(self.board_to_screen(mv.from()), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Screen point for fractional grid coordinates in view space
    fn grid_point(&self, row: f32, col: f32) -> Pos2 {
        Pos2::new(
            self.board_rect.min.x + BOARD_MARGIN + col * self.cell_size,
            self.board_rect.min.y + BOARD_MARGIN + row * self.cell_size,
        )
    }

    /// Board cell to view cell; a flipped view puts row 0 at the bottom
    fn to_view(&self, pos: Pos) -> (u8, u8) {
        if self.flipped {
            (ROWS as u8 - 1 - pos.row(), COLS as u8 - 1 - pos.col())
        } else {
            (pos.row(), pos.col())
        }
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size + 0.5).floor() as i32;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size + 0.5).floor() as i32;
        if !Pos::is_valid(row, col) {
            return None;
        }
        let (row, col) = self.to_view(Pos::at(row as u8, col as u8));
        Some(Pos::at(row, col))
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let (row, col) = self.to_view(pos);
        self.grid_point(row as f32, col as f32)
    }
}
