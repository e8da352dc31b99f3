//! Board representation for Xiangqi

pub mod board;
pub mod moves;
pub mod transform;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::error::{EngineError, Result};

// Re-exports
pub use board::Board;
pub use moves::{Move, MoveList};
pub use transform::{flip, mirror_horizontal, mirror_vertical};

/// Number of rows (ranks)
pub const ROWS: usize = 10;
/// Number of columns (files)
pub const COLS: usize = 9;
pub const BOARD_SIZE: usize = ROWS * COLS; // 90

/// Upper bound on legal moves for one side in any reachable position.
pub const MAX_MOVES: usize = 112;

/// The two players. `First` moves first and owns the positive piece codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Sign carried by this side's piece codes
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Side::First => 1,
            Side::Second => -1,
        }
    }

    /// Side for a `+1` / `-1` player value, as used by self-play drivers.
    #[inline]
    pub fn from_sign(sign: i8) -> Option<Side> {
        match sign {
            1 => Some(Side::First),
            -1 => Some(Side::Second),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// Row step a soldier of this side takes when advancing
    #[inline]
    pub(crate) fn forward(self) -> i8 {
        match self {
            Side::First => -1,
            Side::Second => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("first"),
            Side::Second => f.write_str("second"),
        }
    }
}

/// The seven piece kinds. Discriminants are the unsigned piece codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum PieceKind {
    General = 1,
    Advisor = 2,
    Elephant = 3,
    Horse = 4,
    Chariot = 5,
    Cannon = 6,
    Soldier = 7,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// Kind for an unsigned code in `1..=7`
    #[inline]
    pub fn from_code(code: i8) -> Option<PieceKind> {
        match code {
            1 => Some(PieceKind::General),
            2 => Some(PieceKind::Advisor),
            3 => Some(PieceKind::Elephant),
            4 => Some(PieceKind::Horse),
            5 => Some(PieceKind::Chariot),
            6 => Some(PieceKind::Cannon),
            7 => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> i8 {
        self as i8
    }

    /// ASCII letter used by the text renderer (upper-case form)
    pub fn letter(self) -> char {
        match self {
            PieceKind::General => 'K',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'E',
            PieceKind::Horse => 'H',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'P',
        }
    }
}

/// A piece: kind plus owning side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    #[inline]
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Decode a signed cell value. Returns `None` for empty or invalid cells.
    #[inline]
    pub fn from_code(code: i8) -> Option<Piece> {
        let side = Side::from_sign(code.signum())?;
        let kind = PieceKind::from_code(code.checked_abs()?)?;
        Some(Piece { kind, side })
    }

    /// Signed cell value for this piece
    #[inline]
    pub fn code(self) -> i8 {
        self.kind.code() * self.side.sign()
    }

    /// Same piece, other side
    #[inline]
    pub fn flipped(self) -> Piece {
        Piece::new(self.kind, self.side.opponent())
    }

    /// Render glyph: upper-case for the first side, lower-case for the second
    pub fn glyph(self) -> char {
        let c = self.kind.letter();
        match self.side {
            Side::First => c,
            Side::Second => c.to_ascii_lowercase(),
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    row: u8,
    col: u8,
}

impl Pos {
    /// Position from untrusted coordinates.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidIndex`] if `(row, col)` is off the board. The
    /// reported index is `row * COLS + col`.
    pub fn new(row: u8, col: u8) -> Result<Self> {
        if (row as usize) < ROWS && (col as usize) < COLS {
            Ok(Self { row, col })
        } else {
            Err(EngineError::InvalidIndex {
                index: row as usize * COLS + col as usize,
            })
        }
    }

    /// Position for coordinates already known to be on the board
    #[inline]
    pub(crate) fn at(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < ROWS && (col as usize) < COLS);
        Self { row, col }
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * COLS + self.col as usize
    }

    /// Position for an index already known to be in range
    #[inline]
    pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx < BOARD_SIZE);
        Self {
            row: (idx / COLS) as u8,
            col: (idx % COLS) as u8,
        }
    }

    /// Position for an untrusted index
    pub fn try_from_index(idx: usize) -> Result<Self> {
        if idx < BOARD_SIZE {
            Ok(Self::from_index(idx))
        } else {
            Err(EngineError::InvalidIndex { index: idx })
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < ROWS as i32 && col >= 0 && col < COLS as i32
    }

    /// Step by `(dr, dc)`, or `None` when that leaves the board
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Pos> {
        let row = self.row as i32 + dr as i32;
        let col = self.col as i32 + dc as i32;
        if Pos::is_valid(row, col) {
            Some(Pos::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Inside `side`'s 3x3 palace
    #[inline]
    pub fn in_palace(self, side: Side) -> bool {
        let rows = match side {
            Side::First => 7..=9,
            Side::Second => 0..=2,
        };
        rows.contains(&self.row) && (3..=5).contains(&self.col)
    }

    /// On `side`'s own half of the river
    #[inline]
    pub fn on_own_half(self, side: Side) -> bool {
        match side {
            Side::First => self.row >= 5,
            Side::Second => self.row <= 4,
        }
    }

    /// Column letter `a..i` followed by row digit, e.g. `b9`
    pub fn notation(self) -> String {
        format!("{}{}", (b'a' + self.col) as char, self.row)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}
