//! Two-player game contract for self-play drivers
//!
//! A driver only sees the [`Game`] trait: it asks for legal actions as a
//! fixed-length mask, applies an action index, reads the signed outcome
//! and requests canonical views and symmetric training samples.
//! [`XiangqiGame`] is the implementation for this engine.
//!
//! # Example
//!
//! ```
//! use xiangqi::board::Side;
//! use xiangqi::game::{Game, XiangqiGame};
//!
//! let game = XiangqiGame::new();
//! let board = game.initial_state();
//! let mask = game.valid_actions(&board, Side::First).unwrap();
//! assert_eq!(mask.count_legal(), 44);
//!
//! let (next, side) = game.next_state(&board, Side::First, 0).unwrap();
//! assert_eq!(side, Side::Second);
//! assert_eq!(game.game_ended(&next, side), 0.0);
//! ```

pub mod config;
pub mod history;
pub mod xiangqi;

pub use config::GameConfig;
pub use history::GameHistory;
pub use xiangqi::XiangqiGame;

use crate::error::Result;

/// Capability contract consumed by a tree-search trainer.
///
/// Actions are indices into a fixed action space of
/// [`action_size`](Game::action_size) slots; each state decides which
/// slots are currently legal.
pub trait Game {
    type State: Clone;
    type Player: Copy + Eq;

    fn initial_state(&self) -> Self::State;

    /// `(rows, cols)` of the board
    fn board_shape(&self) -> (usize, usize);

    /// Number of slots in action masks and policy vectors
    fn action_size(&self) -> usize;

    /// Apply `action` for `player`, returning the new state and the player
    /// to move next.
    fn next_state(
        &self,
        state: &Self::State,
        player: Self::Player,
        action: usize,
    ) -> Result<(Self::State, Self::Player)>;

    /// Legal actions for `player` as a mask of `action_size` slots
    fn valid_actions(&self, state: &Self::State, player: Self::Player) -> Result<ActionMask>;

    /// 0 while the game continues, otherwise +1 / -1 from `player`'s point
    /// of view, or the configured draw value.
    fn game_ended(&self, state: &Self::State, player: Self::Player) -> f32;

    /// The state as seen by `player`, who becomes the reference side
    fn canonical_form(&self, state: &Self::State, player: Self::Player) -> Self::State;

    /// Equivalent `(state, policy)` pairs for training, the input first.
    fn symmetries(&self, state: &Self::State, policy: &[f32]) -> Result<Vec<(Self::State, Vec<f32>)>>;

    /// Compact text key for the state
    fn string_representation(&self, state: &Self::State) -> String;

    /// Human-readable rendering
    fn display(&self, state: &Self::State) -> String;
}

/// Fixed-length legality mask over the action space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMask {
    slots: Vec<bool>,
}

impl ActionMask {
    /// All-false mask of `size` slots
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![false; size],
        }
    }

    pub(crate) fn allow(&mut self, action: usize) {
        if let Some(slot) = self.slots.get_mut(action) {
            *slot = true;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `action` is legal; out-of-range actions are not.
    #[inline]
    pub fn is_legal(&self, action: usize) -> bool {
        self.slots.get(action).copied().unwrap_or(false)
    }

    pub fn count_legal(&self) -> usize {
        self.slots.iter().filter(|&&s| s).count()
    }

    /// True when no action is legal (the side to move has lost)
    pub fn is_all_false(&self) -> bool {
        !self.slots.contains(&true)
    }

    /// Indices of legal actions in ascending order
    pub fn legal_actions(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().enumerate().filter(|(_, &s)| s).map(|(i, _)| i)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.slots
    }

    /// 1.0 for legal slots and 0.0 elsewhere
    pub fn to_f32(&self) -> Vec<f32> {
        self.slots.iter().map(|&s| if s { 1.0 } else { 0.0 }).collect()
    }
}
