use crate::engine::config::EngineConfig;
use crate::engine::search::MinimaxEngine;
use crate::engine::{Move, Searcher};
use crate::logic::game::GameState;
use crate::logic::opening::{Opening, OpeningBook};
use crate::logic::player::PlayerKind;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of one AI turn (a single hop when inside a capture chain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    pub score: i32,
    pub mv: Move,
    pub nodes_visited: u64,
}

pub struct CheckersAi {
    config: Arc<EngineConfig>,
    engine: MinimaxEngine,
    book: OpeningBook,
}

impl CheckersAi {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            engine: MinimaxEngine::new(config.clone()),
            book: OpeningBook::new(config.opening_seed),
            config,
        }
    }

    pub const fn current_opening(&self) -> Option<&'static Opening> {
        self.book.current()
    }

    /// Plays one move for the side to move on the live state. Returns `None`
    /// when there is nothing to play; the turn passes in that case.
    pub fn make_move(&mut self, game: &mut GameState) -> Option<AiMove> {
        if game.is_finished() {
            game.change_turn();
            return None;
        }

        let (depth, book_allowed) = match game.current_player().kind {
            PlayerKind::Ai {
                depth,
                opening_book,
            } => (depth, opening_book),
            PlayerKind::Human => (self.config.search_depth, true),
        };

        if book_allowed && self.config.use_opening_book {
            if let Some(mv) = self.book.next_move(game) {
                let mut after = game.clone();
                if after.apply_move(mv) {
                    let score = self.engine.evaluate(&after);
                    let name = self.book.current().map_or("?", |o| o.name);
                    info!("{} plays {mv} from the book ({name})", game.current_color());
                    *game = after;
                    game.check_end_of_game();
                    return Some(AiMove {
                        score,
                        mv,
                        nodes_visited: 0,
                    });
                }
            }
        }

        let Some((mv, score, stats)) = self.engine.search(game, depth) else {
            info!("{} has no move and passes", game.current_color());
            game.change_turn();
            return None;
        };

        let mover = game.current_color();
        if !game.apply_move(mv) {
            game.change_turn();
            return None;
        }
        game.check_end_of_game();
        info!(
            "{mover} plays {mv} (score {score}, depth {}, {} nodes, {}ms)",
            stats.depth, stats.nodes, stats.time_ms
        );

        Some(AiMove {
            score,
            mv,
            nodes_visited: stats.nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Board, Piece, PieceColor, Square};
    use crate::logic::game::{GameOptions, GameStatus};

    fn ai() -> CheckersAi {
        CheckersAi::new(Arc::new(EngineConfig {
            opening_seed: Some(9),
            ..EngineConfig::default()
        }))
    }

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_book_reply() {
        let mut game = GameState::new();
        assert!(game.move_piece(5, 0, 4, 1));

        let mut ai = ai();
        let played = ai.make_move(&mut game).unwrap();
        assert_eq!(played.mv, Move::new(2, 1, 3, 0));
        assert_eq!(played.nodes_visited, 0);
        assert_eq!(ai.current_opening().map(|o| o.name), Some("Dundee"));
        assert_eq!(game.current_color(), PieceColor::Red);
    }

    #[test]
    fn test_book_disabled_for_player() {
        let options = GameOptions {
            black_kind: PlayerKind::Ai {
                depth: 2,
                opening_book: false,
            },
            ..GameOptions::default()
        };
        let mut game = GameState::with_options(&options);
        assert!(game.move_piece(5, 0, 4, 1));

        let mut ai = ai();
        let played = ai.make_move(&mut game).unwrap();
        assert!(played.nodes_visited > 0);
        assert!(ai.current_opening().is_none());
    }

    #[test]
    fn test_finished_game_only_passes() {
        let mut board = Board::empty();
        board.add_piece(sq(2, 1), Piece::man(PieceColor::Black));
        let mut game = GameState::from_position(board, PieceColor::Black, &GameOptions::default());
        game.check_end_of_game();
        assert_eq!(game.status(), GameStatus::Finished);

        let before = game.turn_count();
        assert!(ai().make_move(&mut game).is_none());
        assert_eq!(game.current_color(), PieceColor::Red);
        assert_eq!(game.turn_count(), before + 1);
    }

    #[test]
    fn test_stuck_ai_passes() {
        let mut board = Board::empty();
        board.add_piece(sq(7, 2), Piece::man(PieceColor::Black));
        board.add_piece(sq(5, 4), Piece::man(PieceColor::Red));
        let mut game = GameState::from_position(board, PieceColor::Black, &GameOptions::default());

        assert!(ai().make_move(&mut game).is_none());
        assert_eq!(game.current_color(), PieceColor::Red);
        assert!(game.move_history(PieceColor::Black).is_empty());
    }
}
