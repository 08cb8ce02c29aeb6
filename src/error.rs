//! Error taxonomy for the solver pipeline.
//!
//! All errors are raised synchronously at the point of detection and none are
//! retried — the computation is deterministic, so a failed validation cannot
//! succeed on a second attempt.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Rounds or faces below 1.
    #[error("invalid parameters: rounds={rounds}, faces={faces} (both must be >= 1)")]
    InvalidParameter { rounds: usize, faces: usize },

    /// A value table whose storage does not match its declared dimensions.
    #[error("value table shape mismatch: declared {rounds}x{faces} but holds {len} entries")]
    ShapeMismatch {
        rounds: usize,
        faces: usize,
        len: usize,
    },

    /// An internal invariant broke: terminal row, optimality dominance,
    /// absorbing take, or a simulation cross-check.
    #[error("consistency violation: {0}")]
    ConsistencyViolation(String),
}
