//! Board structure: 90 signed cells, row-major

use once_cell::sync::Lazy;

use super::{Move, Piece, PieceKind, Pos, Side, BOARD_SIZE, COLS};
use crate::error::{BoardError, Result};

/// Back rank from file `a` to file `i`, identical for both sides.
const BACK_RANK: [PieceKind; COLS] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

/// Canonical starting position, built once and only ever cloned.
static INITIAL: Lazy<Board> = Lazy::new(|| {
    let mut board = Board::empty();
    for (side, back, cannons, soldiers) in [(Side::Second, 0, 2, 3), (Side::First, 9, 7, 6)] {
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.set(Pos::at(back, col as u8), Some(Piece::new(*kind, side)));
        }
        for col in [1, 7] {
            board.set(Pos::at(cannons, col), Some(Piece::new(PieceKind::Cannon, side)));
        }
        for col in [0, 2, 4, 6, 8] {
            board.set(Pos::at(soldiers, col), Some(Piece::new(PieceKind::Soldier, side)));
        }
    }
    board
});

/// Game board.
///
/// Cell value 0 is empty; otherwise the sign is the side and the magnitude
/// the piece kind (see [`PieceKind`]). Row 0 is the second side's back rank,
/// row 9 the first side's.
///
/// Boards are values: every operation that changes a position returns a new
/// `Board` and leaves its input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [i8; BOARD_SIZE],
}

impl Board {
    /// The standard starting position (32 pieces).
    pub fn initial() -> Self {
        INITIAL.clone()
    }

    /// A board with no pieces, as a starting point for the validated
    /// constructors. Not a legal position by itself.
    pub(crate) fn empty() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
        }
    }

    /// Build a board from untrusted raw cells.
    ///
    /// Rejects the wrong cell count, codes outside `-7..=7`, and any side
    /// without exactly one general.
    pub fn from_cells(cells: &[i8]) -> Result<Self> {
        if cells.len() != BOARD_SIZE {
            return Err(BoardError::WrongCellCount(cells.len()).into());
        }

        let mut board = Board::empty();
        for (index, &code) in cells.iter().enumerate() {
            if code != 0 && Piece::from_code(code).is_none() {
                return Err(BoardError::InvalidPieceCode { index, code }.into());
            }
            board.cells[index] = code;
        }

        board.validate()?;
        Ok(board)
    }

    /// Build a board from a list of placed pieces, validated like
    /// [`Board::from_cells`]. Later entries overwrite earlier ones.
    pub fn from_pieces<I>(pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Pos, Piece)>,
    {
        let mut board = Board::empty();
        for (pos, piece) in pieces {
            board.set(pos, Some(piece));
        }
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> Result<()> {
        for side in [Side::First, Side::Second] {
            match self.piece_count(Piece::new(PieceKind::General, side)) {
                0 => return Err(BoardError::MissingGeneral(side).into()),
                1 => {}
                _ => return Err(BoardError::DuplicateGeneral(side).into()),
            }
        }
        Ok(())
    }

    /// Raw signed cells in row-major order
    #[inline]
    pub fn cells(&self) -> &[i8; BOARD_SIZE] {
        &self.cells
    }

    /// Get piece at position
    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        Piece::from_code(self.cells[pos.to_index()])
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cells[pos.to_index()] == 0
    }

    /// True if `pos` holds a piece belonging to `side`
    #[inline]
    pub fn is_own(&self, pos: Pos, side: Side) -> bool {
        self.cells[pos.to_index()].signum() == side.sign()
    }

    /// Overwrite a cell. Crate-internal; public callers only ever receive
    /// fresh boards.
    #[inline]
    pub(crate) fn set(&mut self, pos: Pos, piece: Option<Piece>) {
        self.cells[pos.to_index()] = piece.map_or(0, Piece::code);
    }

    /// Where `side`'s general stands, if it is on the board
    pub fn general_pos(&self, side: Side) -> Option<Pos> {
        let code = PieceKind::General.code() * side.sign();
        self.cells
            .iter()
            .position(|&c| c == code)
            .map(Pos::from_index)
    }

    /// Pieces of one side in ascending cell order
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, &code)| {
            Piece::from_code(code)
                .filter(|p| p.side == side)
                .map(|p| (Pos::from_index(idx), p))
        })
    }

    /// Number of cells holding exactly this piece
    pub fn piece_count(&self, piece: Piece) -> usize {
        let code = piece.code();
        self.cells.iter().filter(|&&c| c == code).count()
    }

    /// Total pieces on board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Apply a move and return the resulting board.
    ///
    /// Legality is not re-checked: `mv` must come from
    /// [`possible_moves`](crate::rules::possible_moves) for the side to move.
    /// Whatever stood on the destination is overwritten.
    #[must_use]
    pub fn apply(&self, mv: Move) -> Board {
        let mut next = self.clone();
        let (from, to) = (mv.from().to_index(), mv.to().to_index());
        next.cells[to] = next.cells[from];
        next.cells[from] = 0;
        next
    }

    /// Build a board directly from cells produced by a transform.
    #[inline]
    pub(crate) fn from_raw(cells: [i8; BOARD_SIZE]) -> Self {
        Self { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
