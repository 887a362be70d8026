//! Error types for the checkers engine.
//!
//! Game-logic violations (illegal moves, moving out of turn) are not errors:
//! the state machine ignores them. These variants cover caller contract
//! violations only.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckersError {
    /// Row or column outside `0..8`
    #[error("square ({row}, {col}) is outside the 8x8 board")]
    OutOfBounds { row: usize, col: usize },
}

pub type CheckersResult<T> = Result<T, CheckersError>;
