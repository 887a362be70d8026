//! Checkers rules engine and minimax AI.
//!
//! `logic` holds the board, the rule engine and the game state machine;
//! `engine` holds the heuristic evaluator, the alpha-beta searcher and the
//! AI driver that plays moves on a live [`logic::game::GameState`].

pub mod engine;
pub mod error;
pub mod logic;

pub use error::{CheckersError, CheckersResult};
