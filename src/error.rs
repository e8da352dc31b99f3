//! Error types for the rules engine
//!
//! Every failure is local and deterministic: calling again with the same
//! input fails the same way, so there is nothing to retry.

use thiserror::Error;

use crate::board::Side;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors returned at the engine's API boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A cell index outside `[0, 90)`.
    #[error("cell index {index} out of range 0..90")]
    InvalidIndex { index: usize },

    /// More legal moves than the list can hold. A reachable position broke
    /// the mobility bound, which is a defect rather than a recoverable state.
    #[error("found {count} legal moves, capacity is {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },

    /// An action index that is not in the side's legal move list.
    #[error("action {action} is not legal ({available} legal moves)")]
    IllegalMove { action: usize, available: usize },

    /// Untrusted board input failed validation.
    #[error("malformed board: {0}")]
    MalformedBoard(#[from] BoardError),

    #[error("invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    /// Policy vector length does not match the action space.
    #[error("policy has {len} entries, expected {expected}")]
    InvalidPolicy { len: usize, expected: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Reasons a board built from raw cells is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected 90 cells, got {0}")]
    WrongCellCount(usize),

    #[error("cell {index} holds invalid piece code {code}")]
    InvalidPieceCode { index: usize, code: i8 },

    #[error("{0} side has no general")]
    MissingGeneral(Side),

    #[error("{0} side has more than one general")]
    DuplicateGeneral(Side),
}
