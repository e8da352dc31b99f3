//! Game history and repetition draws
//!
//! A single board cannot tell whether the game has been drawn by
//! repetition, so the caller keeps a `GameHistory` alongside the game and
//! asks it for the outcome.

use std::collections::HashMap;

use tracing::debug;

use crate::board::{Board, Move, Side};
use crate::error::{EngineError, Result};
use crate::hash::{Fingerprint, ZOBRIST};
use crate::rules::{winner, Outcome};

#[derive(Debug, Clone)]
struct Ply {
    board: Board,
    side: Side,
    key: Fingerprint,
    mv: Option<Move>,
}

/// Positions of one game, oldest first.
///
/// Each entry is keyed by the board fingerprint combined with the side to
/// move, so the same layout with a different player on turn is a different
/// position.
#[derive(Debug, Clone)]
pub struct GameHistory {
    plies: Vec<Ply>,
    counts: HashMap<Fingerprint, u32>,
    repetition_limit: u32,
}

impl GameHistory {
    /// Start a history at `board` with `side` to move.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfig`] if `repetition_limit` is below 2, which
    /// would draw the game at its first position.
    pub fn new(board: Board, side: Side, repetition_limit: u32) -> Result<Self> {
        if repetition_limit < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "repetition_limit must be at least 2, got {repetition_limit}"
            )));
        }
        Ok(Self::start(board, side, repetition_limit))
    }

    /// Start a history with a limit taken from a validated [`GameConfig`](super::GameConfig)
    pub(crate) fn start(board: Board, side: Side, repetition_limit: u32) -> Self {
        debug_assert!(repetition_limit >= 2);
        let key = ZOBRIST.hash_with_side(&board, side);
        let mut counts = HashMap::new();
        counts.insert(key, 1);
        Self {
            plies: vec![Ply {
                board,
                side,
                key,
                mv: None,
            }],
            counts,
            repetition_limit,
        }
    }

    /// Record `mv` played from the current position.
    ///
    /// The move is not checked for legality; the fingerprint is updated
    /// incrementally.
    pub fn push(&mut self, mv: Move) {
        let last = self.current_ply();
        let board = last.board.apply(mv);
        let side = last.side.opponent();
        let key = ZOBRIST.update_move(last.key ^ ZOBRIST.side_key(last.side), &last.board, mv)
            ^ ZOBRIST.side_key(side);

        let seen = self.counts.entry(key).or_insert(0);
        *seen += 1;
        if *seen >= self.repetition_limit {
            debug!(occurrences = *seen, %key, "position repeated");
        }

        self.plies.push(Ply {
            board,
            side,
            key,
            mv: Some(mv),
        });
    }

    /// Take back the last move. Returns `None` at the starting position.
    pub fn pop(&mut self) -> Option<Move> {
        if self.plies.len() < 2 {
            return None;
        }
        let ply = self.plies.pop()?;
        if let Some(seen) = self.counts.get_mut(&ply.key) {
            *seen -= 1;
            if *seen == 0 {
                self.counts.remove(&ply.key);
            }
        }
        ply.mv
    }

    fn current_ply(&self) -> &Ply {
        // Never empty: `new` pushes the root and `pop` keeps it
        &self.plies[self.plies.len() - 1]
    }

    pub fn board(&self) -> &Board {
        &self.current_ply().board
    }

    pub fn side_to_move(&self) -> Side {
        self.current_ply().side
    }

    /// Fingerprint of the current position including the side to move
    pub fn key(&self) -> Fingerprint {
        self.current_ply().key
    }

    /// Moves played so far
    pub fn len(&self) -> usize {
        self.plies.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves played so far, oldest first
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.plies.iter().filter_map(|p| p.mv)
    }

    /// Last move played, if any
    pub fn last_move(&self) -> Option<Move> {
        self.current_ply().mv
    }

    /// How often the current position has occurred
    pub fn repetitions(&self) -> u32 {
        self.counts.get(&self.key()).copied().unwrap_or(0)
    }

    pub fn is_repetition_draw(&self) -> bool {
        self.repetitions() >= self.repetition_limit
    }

    /// Outcome of the current position, including repetition draws.
    pub fn outcome(&self) -> Outcome {
        let ply = self.current_ply();
        match winner(&ply.board, ply.side) {
            Outcome::Ongoing if self.is_repetition_draw() => Outcome::Draw,
            outcome => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn horse_shuffle() -> [Move; 4] {
        [
            Move::new(Pos::at(9, 1), Pos::at(7, 2)),
            Move::new(Pos::at(0, 1), Pos::at(2, 2)),
            Move::new(Pos::at(7, 2), Pos::at(9, 1)),
            Move::new(Pos::at(2, 2), Pos::at(0, 1)),
        ]
    }

    #[test]
    fn test_history_starts_at_root() {
        let history = GameHistory::new(Board::initial(), Side::First, 3).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.side_to_move(), Side::First);
        assert_eq!(history.repetitions(), 1);
        assert_eq!(history.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_history_incremental_key() {
        let mut history = GameHistory::new(Board::initial(), Side::First, 3).unwrap();
        for mv in horse_shuffle().into_iter().take(3) {
            history.push(mv);
            assert_eq!(
                history.key(),
                ZOBRIST.hash_with_side(history.board(), history.side_to_move())
            );
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.side_to_move(), Side::Second);
    }

    #[test]
    fn test_history_repetition_draw() {
        let mut history = GameHistory::new(Board::initial(), Side::First, 3).unwrap();
        for _ in 0..2 {
            for mv in horse_shuffle() {
                assert_eq!(history.outcome(), Outcome::Ongoing);
                history.push(mv);
            }
        }
        // Starting position with first to move, third time
        assert_eq!(history.repetitions(), 3);
        assert_eq!(history.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_history_side_distinguishes_positions() {
        let board = Board::initial();
        let mut history = GameHistory::new(board.clone(), Side::First, 2).unwrap();
        // Same layout, other side to move
        let other = GameHistory::new(board, Side::Second, 2).unwrap();
        assert_ne!(history.key(), other.key());

        history.push(horse_shuffle()[0]);
        assert_eq!(history.repetitions(), 1);
    }

    #[test]
    fn test_history_rejects_low_limit() {
        for limit in [0, 1] {
            assert!(matches!(
                GameHistory::new(Board::initial(), Side::First, limit),
                Err(EngineError::InvalidConfig(_))
            ));
        }
        let history = GameHistory::new(Board::initial(), Side::First, 2).unwrap();
        assert_eq!(history.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_history_pop() {
        let mut history = GameHistory::new(Board::initial(), Side::First, 3).unwrap();
        assert_eq!(history.pop(), None);

        let moves = horse_shuffle();
        history.push(moves[0]);
        history.push(moves[1]);
        assert_eq!(history.last_move(), Some(moves[1]));
        assert_eq!(history.pop(), Some(moves[1]));
        assert_eq!(history.moves().collect::<Vec<_>>(), vec![moves[0]]);
        assert_eq!(history.side_to_move(), Side::Second);

        history.pop();
        assert_eq!(history.board(), &Board::initial());
        assert_eq!(history.repetitions(), 1);
    }
}
