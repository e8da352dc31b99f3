//! Position fingerprints
//!
//! Contains:
//! - Zobrist hashing with 256-bit keys and O(1) incremental updates
//! - The `Fingerprint` value and its hex / base64 text forms

pub mod fingerprint;
pub mod zobrist;

pub use fingerprint::{Fingerprint, FINGERPRINT_BYTES};
pub use zobrist::{encode, ZobristTable, ZOBRIST};
