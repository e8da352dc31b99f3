//! Xiangqi rules
//!
//! This module implements the rule set:
//! - Per-piece movement, with palace, river, leg and eye restrictions
//! - Check detection, including the flying-general rule
//! - Terminal positions (no legal move loses)

pub mod check;
pub mod movegen;
pub mod outcome;

// Re-exports for convenient access
pub use check::{attacks, generals_facing, is_in_check};
pub use movegen::{has_legal_move, is_legal, possible_moves};
pub use outcome::{winner, Outcome};
