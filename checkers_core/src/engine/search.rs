use crate::engine::config::EngineConfig;
use crate::engine::eval::HeuristicEvaluator;
use crate::engine::{Evaluator, Move, SearchStats, Searcher};
use crate::logic::board::PieceColor;
use crate::logic::game::GameState;
use log::trace;
use std::sync::Arc;
use std::time::Instant;

pub const SCORE_INF: i32 = 1_000_000;

/// Depth-limited minimax over cloned game states, Black maximizing.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: HeuristicEvaluator,
    nodes_searched: u64,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: HeuristicEvaluator::new(config.clone()),
            config,
            nodes_searched: 0,
        }
    }

    /// Nodes visited by the last search.
    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    pub fn evaluate(&self, state: &GameState) -> i32 {
        self.evaluator.evaluate(state)
    }

    /// Backed-up score of `state` and the move that achieves it. Every child
    /// hands the turn to the other side, a pending capture chain included.
    /// Leaves, finished games and positions without moves score statically.
    pub fn minimax(
        &mut self,
        state: &GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Move>) {
        self.nodes_searched += 1;

        if depth == 0 || state.is_finished() {
            return (self.evaluator.evaluate(state), None);
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return (self.evaluator.evaluate(state), None);
        }

        let mut best_score = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut best_move = None;

        for &mv in &moves {
            let mut child = state.clone();
            if !child.apply_move(mv) {
                continue;
            }
            child.end_turn();
            child.check_end_of_game();

            let (score, _) = self.minimax(&child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if self.config.alpha_beta && beta <= alpha {
                break;
            }
        }

        if best_move.is_none() {
            return (self.evaluator.evaluate(state), None);
        }
        (best_score, best_move)
    }
}

impl Searcher for MinimaxEngine {
    fn search(&mut self, state: &GameState, depth: u8) -> Option<(Move, i32, SearchStats)> {
        self.nodes_searched = 0;
        let start = Instant::now();
        let depth = depth.max(1);

        let maximizing = state.current_color() == PieceColor::Black;
        let (score, best_move) = self.minimax(state, depth, -SCORE_INF, SCORE_INF, maximizing);

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        trace!(
            "depth {} nodes {} time {}ms score {score}",
            stats.depth,
            stats.nodes,
            stats.time_ms
        );

        best_move.map(|mv| (mv, score, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Board, Piece, Square};
    use crate::logic::game::{GameOptions, TurnPhase};

    fn engine(alpha_beta: bool) -> MinimaxEngine {
        MinimaxEngine::new(Arc::new(EngineConfig {
            alpha_beta,
            ..EngineConfig::default()
        }))
    }

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn midgame() -> GameState {
        let mut state = GameState::new();
        for (sr, sc, er, ec) in [(5, 2, 4, 3), (2, 5, 3, 4), (6, 1, 5, 2), (1, 6, 2, 5)] {
            assert!(state.move_piece(sr, sc, er, ec));
        }
        state
    }

    #[test]
    fn test_alpha_beta_matches_full_width() {
        for state in [GameState::new(), midgame()] {
            for depth in 1..=3 {
                let full = engine(false).search(&state, depth).unwrap();
                let pruned = engine(true).search(&state, depth).unwrap();
                assert_eq!(full.0, pruned.0, "best move differs at depth {depth}");
                assert_eq!(full.1, pruned.1, "score differs at depth {depth}");
                assert!(pruned.2.nodes <= full.2.nodes);
            }
        }
    }

    #[test]
    fn test_takes_free_man() {
        let mut board = Board::empty();
        board.add_piece(sq(1, 0), Piece::man(PieceColor::Black));
        board.add_piece(sq(3, 2), Piece::man(PieceColor::Black));
        board.add_piece(sq(4, 3), Piece::man(PieceColor::Red));
        board.add_piece(sq(7, 0), Piece::man(PieceColor::Red));
        let state = GameState::from_position(board, PieceColor::Black, &GameOptions::default());

        let (mv, score, _) = engine(true).search(&state, 2).unwrap();
        assert_eq!(mv, Move::new(3, 2, 5, 4));
        assert!(score > 0);
    }

    #[test]
    fn test_no_moves_yields_none() {
        let mut board = Board::empty();
        // Black man on the last row cannot move, its only diagonals lead off the board.
        board.add_piece(sq(7, 0), Piece::man(PieceColor::Black));
        board.add_piece(sq(0, 1), Piece::man(PieceColor::Red));
        let state = GameState::from_position(board, PieceColor::Black, &GameOptions::default());

        let mut eng = engine(true);
        assert!(eng.search(&state, 3).is_none());
        assert_eq!(eng.nodes_searched(), 1);
    }

    #[test]
    fn test_minimizer_picks_red_move() {
        let state = GameState::new();
        let (mv, _, stats) = engine(true).search(&state, 2).unwrap();
        assert!(state.legal_moves().contains(&mv));
        assert_eq!(usize::from(mv.start_row), 5);
        assert_eq!(stats.depth, 2);
    }

    #[test]
    fn test_capture_chain_child_is_opponent_node() {
        // Black's jump over (3,2) could continue over (5,4), but the search
        // passes the turn to Red, whose reply is minimized.
        let mut board = Board::empty();
        board.add_piece(sq(2, 1), Piece::man(PieceColor::Black));
        board.add_piece(sq(3, 2), Piece::man(PieceColor::Red));
        board.add_piece(sq(5, 4), Piece::man(PieceColor::Red));
        let state = GameState::from_position(board, PieceColor::Black, &GameOptions::default());

        let hop = Move::new(2, 1, 4, 3);
        let mut after_hop = state.clone();
        assert!(after_hop.apply_move(hop));
        assert_eq!(after_hop.current_color(), PieceColor::Black);
        after_hop.end_turn();
        after_hop.check_end_of_game();
        assert_eq!(after_hop.current_color(), PieceColor::Red);
        assert_eq!(after_hop.phase(), TurnPhase::Normal);

        let mut eng = engine(false);
        let (red_reply_score, red_reply) =
            eng.minimax(&after_hop, 1, -SCORE_INF, SCORE_INF, false);
        assert_eq!(red_reply, Some(Move::new(5, 4, 3, 2)));

        let mut after_step = state.clone();
        assert!(after_step.apply_move(Move::new(2, 1, 3, 0)));
        after_step.check_end_of_game();
        let (step_score, _) = eng.minimax(&after_step, 1, -SCORE_INF, SCORE_INF, false);

        let (root_score, _) = eng.minimax(&state, 2, -SCORE_INF, SCORE_INF, true);
        assert_eq!(root_score, red_reply_score.max(step_score));
    }

    #[test]
    fn test_depth_zero_is_clamped() {
        let state = GameState::new();
        let (_, _, stats) = engine(true).search(&state, 0).unwrap();
        assert_eq!(stats.depth, 1);
        // Root plus the seven opening replies.
        assert_eq!(stats.nodes, 8);
    }
}
