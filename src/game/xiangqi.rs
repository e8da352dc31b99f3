//! Xiangqi implementation of the game contract
//!
//! Action `i` is the `i`-th entry of [`possible_moves`] for the side to
//! move. Because generation order is fixed, an action index always names
//! the same move for the same position. Order is taken from the mover's
//! side of the board, so action `i` chosen on
//! `canonical_form(board, Second)` is the move `next_state(board, Second, i)`
//! plays. A side without legal moves gets an all-false mask; there is no
//! pass action.

use tracing::debug;

use super::{ActionMask, Game, GameConfig, GameHistory};
use crate::board::transform::mirror_horizontal_index;
use crate::board::{flip, mirror_horizontal, Board, Move, MoveList, Side, COLS, ROWS};
use crate::error::{EngineError, Result};
use crate::hash::{encode, Fingerprint};
use crate::render::render;
use crate::rules::{possible_moves, winner, Outcome};

/// Game adapter over the rules engine.
#[derive(Debug, Clone, Default)]
pub struct XiangqiGame {
    config: GameConfig,
}

impl XiangqiGame {
    /// Adapter with the default [`GameConfig`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GameConfig::new(),
        }
    }

    /// Adapter with a custom configuration.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Repetition tracker starting at `board`, using this adapter's limit.
    pub fn history(&self, board: Board, side: Side) -> GameHistory {
        GameHistory::start(board, side, self.config.repetition_limit)
    }

    /// Legal moves for `side`, in action order.
    ///
    /// # Errors
    ///
    /// [`EngineError::CapacityExceeded`] if the moves do not fit the
    /// configured action space.
    pub fn legal_moves(&self, board: &Board, side: Side) -> Result<MoveList> {
        let moves = possible_moves(board, side, false)?;
        if moves.len() > self.config.action_size {
            return Err(EngineError::CapacityExceeded {
                count: moves.len(),
                capacity: self.config.action_size,
            });
        }
        Ok(moves)
    }

    /// Typed outcome with `side` to move. Repetition draws need a
    /// [`GameHistory`].
    pub fn status(&self, board: &Board, side: Side) -> Outcome {
        winner(board, side)
    }

    pub fn fingerprint(&self, board: &Board) -> Fingerprint {
        encode(board)
    }

    /// Move named by `action`, or `IllegalMove` if there is none.
    pub fn action_to_move(&self, board: &Board, side: Side, action: usize) -> Result<Move> {
        let moves = self.legal_moves(board, side)?;
        moves.get(action).ok_or_else(|| {
            debug!(action, available = moves.len(), %side, "rejected illegal action");
            EngineError::IllegalMove {
                action,
                available: moves.len(),
            }
        })
    }

    /// Action index of `mv`, if it is legal.
    pub fn move_to_action(&self, board: &Board, side: Side, mv: Move) -> Result<Option<usize>> {
        Ok(self.legal_moves(board, side)?.position(mv))
    }

    /// Re-index `policy` from the legal moves of `board` onto the legal
    /// moves of its left-right mirror.
    fn mirror_policy(&self, board: &Board, mirrored: &Board, policy: &[f32]) -> Result<Vec<f32>> {
        let moves = self.legal_moves(board, Side::First)?;
        let mirrored_moves = self.legal_moves(mirrored, Side::First)?;

        let mut out = vec![0.0; policy.len()];
        for (action, mv) in moves.iter().enumerate() {
            let target = mirrored_moves
                .position(mv.map(mirror_horizontal_index))
                .ok_or(EngineError::IllegalMove {
                    action,
                    available: mirrored_moves.len(),
                })?;
            out[target] = policy[action];
        }
        Ok(out)
    }
}

impl Game for XiangqiGame {
    type State = Board;
    type Player = Side;

    fn initial_state(&self) -> Board {
        Board::initial()
    }

    fn board_shape(&self) -> (usize, usize) {
        (ROWS, COLS)
    }

    fn action_size(&self) -> usize {
        self.config.action_size
    }

    fn next_state(&self, state: &Board, player: Side, action: usize) -> Result<(Board, Side)> {
        let mv = self.action_to_move(state, player, action)?;
        Ok((state.apply(mv), player.opponent()))
    }

    fn valid_actions(&self, state: &Board, player: Side) -> Result<ActionMask> {
        let moves = self.legal_moves(state, player)?;
        let mut mask = ActionMask::new(self.config.action_size);
        for action in 0..moves.len() {
            mask.allow(action);
        }
        Ok(mask)
    }

    fn game_ended(&self, state: &Board, player: Side) -> f32 {
        self.status(state, player).value_for(player, self.config.draw_value)
    }

    fn canonical_form(&self, state: &Board, player: Side) -> Board {
        match player {
            Side::First => state.clone(),
            Side::Second => flip(state),
        }
    }

    /// `state` must be a canonical board (first side to move) and `policy`
    /// indexed by its legal moves.
    fn symmetries(&self, state: &Board, policy: &[f32]) -> Result<Vec<(Board, Vec<f32>)>> {
        if policy.len() != self.config.action_size {
            return Err(EngineError::InvalidPolicy {
                len: policy.len(),
                expected: self.config.action_size,
            });
        }

        let mut out = vec![(state.clone(), policy.to_vec())];
        if self.config.mirror_symmetry {
            let mirrored = mirror_horizontal(state);
            let mirrored_policy = self.mirror_policy(state, &mirrored, policy)?;
            out.push((mirrored, mirrored_policy));
        }
        Ok(out)
    }

    fn string_representation(&self, state: &Board) -> String {
        encode(state).to_base64()
    }

    fn display(&self, state: &Board) -> String {
        render(state).to_string()
    }
}
