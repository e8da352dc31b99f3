//! Board symmetries
//!
//! Each transform is an involution: applying it twice returns the input.

use super::{Board, BOARD_SIZE, COLS, ROWS};

/// Cell reached by a 180 degree rotation
#[inline]
pub fn flip_index(idx: usize) -> usize {
    BOARD_SIZE - 1 - idx
}

/// Cell reflected across the central file (left-right)
#[inline]
pub fn mirror_horizontal_index(idx: usize) -> usize {
    let (row, col) = (idx / COLS, idx % COLS);
    row * COLS + (COLS - 1 - col)
}

/// Cell reflected across the river (top-bottom)
#[inline]
pub fn mirror_vertical_index(idx: usize) -> usize {
    let (row, col) = (idx / COLS, idx % COLS);
    (ROWS - 1 - row) * COLS + col
}

fn permute(board: &Board, map: fn(usize) -> usize, negate: bool) -> Board {
    let src = board.cells();
    let mut cells = [0i8; BOARD_SIZE];
    for (idx, &code) in src.iter().enumerate() {
        cells[map(idx)] = if negate { -code } else { code };
    }
    Board::from_raw(cells)
}

/// The board as seen by the other side: rotated 180 degrees with every
/// piece's side swapped. Used to present a side-agnostic canonical view.
pub fn flip(board: &Board) -> Board {
    permute(board, flip_index, true)
}

/// Left-right reflection. Sides are unchanged and, since every movement
/// rule is symmetric about the central file, the result is a legal position
/// whenever the input is.
pub fn mirror_horizontal(board: &Board) -> Board {
    permute(board, mirror_horizontal_index, false)
}

/// Top-bottom reflection. Sides are unchanged, so each side's pieces end up
/// on the opponent's half; useful for augmentation experiments only.
pub fn mirror_vertical(board: &Board) -> Board {
    permute(board, mirror_vertical_index, false)
}
