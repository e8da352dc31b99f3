//! Terminal position detection
//!
//! Unlike international chess there is no stalemate draw: a side with no
//! legal move has lost, whether or not it is in check. Draws by repetition
//! need the game history and are tracked by [`GameHistory`](crate::game::GameHistory).

use crate::board::{Board, Side};

use super::movegen::has_legal_move;

/// Result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The game continues
    Ongoing,
    FirstWins,
    SecondWins,
    /// Only produced by callers that track history
    Draw,
}

impl Outcome {
    /// Outcome in which `side` has won
    #[inline]
    pub fn win_for(side: Side) -> Outcome {
        match side {
            Side::First => Outcome::FirstWins,
            Side::Second => Outcome::SecondWins,
        }
    }

    /// Winning side, if any
    #[inline]
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::FirstWins => Some(Side::First),
            Outcome::SecondWins => Some(Side::Second),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Signed value from `side`'s point of view: 0 while ongoing, +1 for a
    /// win, -1 for a loss, `draw_value` for a draw.
    pub fn value_for(self, side: Side, draw_value: f32) -> f32 {
        match self {
            Outcome::Ongoing => 0.0,
            Outcome::Draw => draw_value,
            _ if self.winner() == Some(side) => 1.0,
            _ => -1.0,
        }
    }
}

/// Outcome of `board` with `side_to_move` on turn.
///
/// A side whose general is gone has lost. Otherwise the side to move loses
/// exactly when it has no legal move.
pub fn winner(board: &Board, side_to_move: Side) -> Outcome {
    for side in [side_to_move, side_to_move.opponent()] {
        if board.general_pos(side).is_none() {
            return Outcome::win_for(side.opponent());
        }
    }

    if has_legal_move(board, side_to_move) {
        Outcome::Ongoing
    } else {
        Outcome::win_for(side_to_move.opponent())
    }
}
