//! Engine error types
//!
//! These are defects in calling code or catalog data, never player-facing
//! conditions. Invalid commands are no-ops and a blocked spawn is the
//! game-over state; neither goes through this type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A lock cleared more rows than the scoring table covers.
    #[error("cleared {count} rows in one lock; the scoring table covers 0..=4")]
    ClearedRowsOutOfRange { count: usize },

    /// Shape data was not a square matrix.
    #[error("shape must be square, got {rows} rows with a {cols}-wide row")]
    NonSquareShape { rows: usize, cols: usize },

    /// Shape data is larger than any catalog piece.
    #[error("shape size {size} exceeds the {max}x{max} limit")]
    ShapeTooLarge { size: usize, max: usize },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
