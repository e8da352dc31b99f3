//! Xiangqi (Chinese chess) rules engine
//!
//! A rules engine for self-play and tree-search drivers:
//! - 10x9 board of signed piece codes, immutable by value
//! - Deterministic legal move generation with self-check filtering
//! - Flying-general rule, palace, river, leg and screen restrictions
//! - No legal move loses (stalemate is a loss)
//! - 256-bit Zobrist fingerprints with hex and base64 text forms
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation, moves and symmetry transforms
//! - [`rules`]: Move generation, check detection and terminal positions
//! - [`hash`]: Position fingerprints
//! - [`render`]: Fixed-size text rendering
//! - [`game`]: The game contract consumed by self-play drivers
//! - [`ui`]: egui viewer used by the `xiangqi` binary
//!
//! # Quick Start
//!
//! ```
//! use xiangqi::{possible_moves, winner, Board, Move, Outcome, Pos, Side};
//!
//! let board = Board::initial();
//! let moves = possible_moves(&board, Side::First, false).unwrap();
//! assert_eq!(moves.len(), 44);
//!
//! // Horse b9 to c7
//! let next = board.apply(Move::new(Pos::new(9, 1).unwrap(), Pos::new(7, 2).unwrap()));
//! assert_eq!(winner(&next, Side::Second), Outcome::Ongoing);
//! println!("{next}");
//! ```
//!
//! # Move order
//!
//! Drivers bind list positions to policy slots, so the order of
//! [`possible_moves`] is fixed: ascending cell index, then each piece
//! kind's direction table. See [`rules::movegen`].

pub mod board;
pub mod error;
pub mod game;
pub mod hash;
pub mod render;
pub mod rules;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Move, MoveList, Piece, PieceKind, Pos, Side, BOARD_SIZE, MAX_MOVES};
pub use error::{BoardError, EngineError, Result};
pub use game::{ActionMask, Game, GameConfig, GameHistory, XiangqiGame};
pub use hash::{encode, Fingerprint};
pub use render::{render, RenderedBoard};
pub use rules::{is_in_check, possible_moves, winner, Outcome};
