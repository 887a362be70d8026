use crate::error::CheckersResult;
use crate::logic::board::Square;
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod ai;
pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;

/// A single square-to-square transition. Multi-jumps are sequences of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub start_row: u8,
    pub start_col: u8,
    pub end_row: u8,
    pub end_col: u8,
}

impl Move {
    #[must_use]
    pub const fn new(start_row: u8, start_col: u8, end_row: u8, end_col: u8) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn between(from: Square, to: Square) -> Self {
        Self::new(from.row as u8, from.col as u8, to.row as u8, to.col as u8)
    }

    pub const fn start(&self) -> CheckersResult<Square> {
        Square::new(self.start_row as usize, self.start_col as usize)
    }

    pub const fn end(&self) -> CheckersResult<Square> {
        Square::new(self.end_row as usize, self.end_col as usize)
    }

    /// Two-square diagonal hop, i.e. a capture when legal.
    #[must_use]
    pub const fn is_jump(&self) -> bool {
        self.start_row.abs_diff(self.end_row) == 2 && self.start_col.abs_diff(self.end_col) == 2
    }

    /// Midpoint of a jump.
    #[must_use]
    pub fn jumped_square(&self) -> Option<Square> {
        if !self.is_jump() {
            return None;
        }
        let row = (usize::from(self.start_row) + usize::from(self.end_row)) / 2;
        let col = (usize::from(self.start_col) + usize::from(self.end_col)) / 2;
        Square::new(row, col).ok()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_jump() { 'x' } else { '-' };
        write!(
            f,
            "({},{}){sep}({},{})",
            self.start_row, self.start_col, self.end_row, self.end_col
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

/// Static position score, positive favouring Black.
pub trait Evaluator {
    fn evaluate(&self, state: &GameState) -> i32;
}

pub trait Searcher {
    /// Best move for the side to move together with its backed-up score.
    fn search(&mut self, state: &GameState, depth: u8) -> Option<(Move, i32, SearchStats)>;
}
