//! Packed moves and the bounded move list

use std::fmt;
use std::ops::Index;

use super::{Pos, BOARD_SIZE, MAX_MOVES};
use crate::error::{EngineError, Result};

/// A move packed into 16 bits: high byte origin index, low byte destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u16);

impl Move {
    /// Move between two positions
    #[inline]
    pub fn new(from: Pos, to: Pos) -> Self {
        Self(((from.to_index() as u16) << 8) | to.to_index() as u16)
    }

    /// Move from raw cell indices, rejecting anything outside `[0, 90)`.
    pub fn from_indices(from: usize, to: usize) -> Result<Self> {
        Ok(Self::new(Pos::try_from_index(from)?, Pos::try_from_index(to)?))
    }

    /// Decode a packed value from an untrusted source.
    pub fn from_packed(packed: u16) -> Result<Self> {
        Self::from_indices((packed >> 8) as usize, (packed & 0xFF) as usize)
    }

    #[inline]
    pub fn packed(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn from(self) -> Pos {
        Pos::from_index((self.0 >> 8) as usize)
    }

    #[inline]
    pub fn to(self) -> Pos {
        Pos::from_index((self.0 & 0xFF) as usize)
    }

    /// Same move with both endpoints mapped through a cell permutation
    #[inline]
    pub(crate) fn map(self, f: impl Fn(usize) -> usize) -> Move {
        let from = f(self.from().to_index());
        let to = f(self.to().to_index());
        debug_assert!(from < BOARD_SIZE && to < BOARD_SIZE);
        Move::new(Pos::from_index(from), Pos::from_index(to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())
    }
}

/// Legal moves of one side, in generation order.
///
/// Holds at most [`MAX_MOVES`] entries; pushing beyond that is reported as
/// [`EngineError::CapacityExceeded`] instead of truncating. Positions in the
/// list are stable for identical input, so drivers may bind an index to a
/// policy slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            moves: Vec::with_capacity(MAX_MOVES),
        }
    }

    /// Append a move, failing once the list is full
    pub fn try_push(&mut self, mv: Move) -> Result<()> {
        if self.moves.len() >= MAX_MOVES {
            return Err(EngineError::CapacityExceeded {
                count: self.moves.len() + 1,
                capacity: MAX_MOVES,
            });
        }
        self.moves.push(mv);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Move> {
        self.moves.get(index).copied()
    }

    /// List index of a move, if present
    pub fn position(&self, mv: Move) -> Option<usize> {
        self.moves.iter().position(|&m| m == mv)
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Moves in packed form, e.g. for a driver's fixed-width buffer
    pub fn packed(&self) -> Vec<u16> {
        self.moves.iter().map(|m| m.packed()).collect()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Move {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
