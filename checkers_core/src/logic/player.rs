use crate::logic::board::PieceColor;
use serde::{Deserialize, Serialize};

/// Who decides a player's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerKind {
    #[default]
    Human,
    Ai {
        depth: u8,
        opening_book: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: PieceColor,
    pub kind: PlayerKind,
    pub score: u32,
    pub captured_pieces: u32,
    // Maintained incrementally by the game state, never rescanned.
    pub num_of_pieces: u32,
    pub num_of_kings: u32,
    pub captures_available: bool,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, color: PieceColor, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            color,
            kind,
            score: 0,
            captured_pieces: 0,
            num_of_pieces: 12,
            num_of_kings: 0,
            captures_available: false,
        }
    }
}
