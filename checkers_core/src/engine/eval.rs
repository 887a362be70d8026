use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Piece, PieceColor, Square};
use crate::logic::eval_constants::{
    in_center, mirror, BACK_ROW_GUARD_SQUARES, BACK_ROW_TURNS, PYRAMID_SQUARES, PYRAMID_TURNS,
};
use crate::logic::game::GameState;
use crate::logic::rules::{count_captures, is_capturable};
use std::sync::Arc;

/// Leaf evaluation for the minimax search. Every term is computed for both
/// colors the same way, Black added and Red subtracted.
pub struct HeuristicEvaluator {
    config: Arc<EngineConfig>,
}

impl HeuristicEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn side_score(&self, state: &GameState, color: PieceColor) -> i32 {
        let board = state.board();
        let cfg = &self.config;
        let mut score = 0;

        for sq in board.squares_of(color) {
            let Some(piece) = board.get_piece(sq) else {
                continue;
            };

            // 1. Material
            score += if piece.is_king {
                cfg.val_king
            } else {
                cfg.val_man
            };

            // 2. Safety
            if is_capturable(board, sq) {
                score -= cfg.unsafe_piece;
            } else {
                score += cfg.safe_piece;
            }

            // 3. Centre
            if in_center(sq.row, sq.col) {
                score += cfg.center_control;
            }

            // 4. Protection from behind
            if is_protected(board, sq, piece) {
                score += cfg.protected_piece;
            }
        }

        // 5. Kings beyond their material value
        let kings = i32::try_from(state.player(color).num_of_kings).unwrap_or(i32::MAX);
        score += cfg.king_count_bonus * kings;

        // 6. Jumps the opponent could make
        let threats = i32::try_from(count_captures(board, color.opposite())).unwrap_or(i32::MAX);
        score -= cfg.capture_threat * threats;

        // 7. Opening formations
        let turn = state.turn_count();
        if turn < BACK_ROW_TURNS {
            let guards = BACK_ROW_GUARD_SQUARES
                .iter()
                .filter(|&&sq| holds_man(board, oriented(sq, color), color))
                .count();
            score += cfg.back_row_guard * i32::try_from(guards).unwrap_or(0);
        }
        if turn < PYRAMID_TURNS
            && PYRAMID_SQUARES
                .iter()
                .all(|&sq| holds_man(board, oriented(sq, color), color))
        {
            score += cfg.pyramid;
        }

        score
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, state: &GameState) -> i32 {
        self.side_score(state, PieceColor::Black) - self.side_score(state, PieceColor::Red)
    }
}

/// A same-colored piece stands diagonally behind, on either flank.
fn is_protected(board: &Board, sq: Square, piece: Piece) -> bool {
    let back = -piece.color.forward();
    [-1, 1].into_iter().any(|dc| {
        sq.offset(back, dc)
            .and_then(|behind| board.get_piece(behind))
            .is_some_and(|p| p.color == piece.color)
    })
}

const fn oriented(sq: (usize, usize), color: PieceColor) -> (usize, usize) {
    match color {
        PieceColor::Black => sq,
        PieceColor::Red => mirror(sq),
    }
}

fn holds_man(board: &Board, (row, col): (usize, usize), color: PieceColor) -> bool {
    Square::new(row, col)
        .ok()
        .and_then(|sq| board.get_piece(sq))
        .is_some_and(|p| p.color == color && !p.is_king)
}
