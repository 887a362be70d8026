use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, PieceColor, Square, DIAGONALS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds,
    NoPieceAtSource,
    NotYourTurn,
    GameFinished,
    TargetOccupied,
    InvalidMovePattern,
    BackwardMove,
    NothingToCapture,
    /// Ruled out by a pending capture chain or the forced-jump rule.
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Step,
    Capture,
}

/// Checks the geometry of a move for the piece standing on `from`.
///
/// Turn order, chain continuation and forced jumps are the game state's
/// business; this only knows about the board.
pub fn check_move(board: &Board, from: Square, to: Square) -> Result<MoveKind, MoveError> {
    let piece = board.get_piece(from).ok_or(MoveError::NoPieceAtSource)?;

    if !board.is_empty_square(to) {
        return Err(MoveError::TargetOccupied);
    }

    let d_row = to.row.abs_diff(from.row);
    let d_col = to.col.abs_diff(from.col);
    if d_row != d_col || !(1..=2).contains(&d_row) {
        return Err(MoveError::InvalidMovePattern);
    }

    let dir = (signum(from.row, to.row), signum(from.col, to.col));
    if !piece.directions().contains(&dir) {
        return Err(MoveError::BackwardMove);
    }

    if d_row == 1 {
        Ok(MoveKind::Step)
    } else if can_capture(board, from, to) {
        Ok(MoveKind::Capture)
    } else {
        Err(MoveError::NothingToCapture)
    }
}

pub fn validate_move(board: &Board, from: Square, to: Square) -> bool {
    check_move(board, from, to).is_ok()
}

/// True iff `from -> to` is an exact two-square diagonal jump over an
/// opposing piece onto an empty square.
pub fn can_capture(board: &Board, from: Square, to: Square) -> bool {
    if to.row.abs_diff(from.row) != 2 || to.col.abs_diff(from.col) != 2 {
        return false;
    }
    let Some(piece) = board.get_piece(from) else {
        return false;
    };
    let Ok(mid) = Square::new((from.row + to.row) / 2, (from.col + to.col) / 2) else {
        return false;
    };

    board
        .get_piece(mid)
        .is_some_and(|victim| victim.color != piece.color)
        && board.is_empty_square(to)
}

/// Legal destinations for the piece on `from`, probing one- and two-square
/// diagonals in the directions the piece may travel.
pub fn piece_moves(board: &Board, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.get_piece(from) else {
        return moves;
    };

    for &(dr, dc) in piece.directions() {
        for dist in 1..=2 {
            if let Some(to) = from.offset(dr * dist, dc * dist) {
                if validate_move(board, from, to) {
                    moves.push(Move::between(from, to));
                }
            }
        }
    }
    moves
}

/// Capturing moves only for the piece on `from`.
pub fn piece_captures(board: &Board, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.get_piece(from) else {
        return moves;
    };

    for &(dr, dc) in piece.directions() {
        if let Some(to) = from.offset(2 * dr, 2 * dc) {
            if can_capture(board, from, to) {
                moves.push(Move::between(from, to));
            }
        }
    }
    moves
}

pub fn has_capture_from(board: &Board, from: Square) -> bool {
    !piece_captures(board, from).is_empty()
}

/// Number of capturing moves `color` has on the board, ignoring turn order.
pub fn count_captures(board: &Board, color: PieceColor) -> usize {
    board
        .squares_of(color)
        .map(|sq| piece_captures(board, sq).len())
        .sum()
}

pub fn has_any_capture(board: &Board, color: PieceColor) -> bool {
    board.squares_of(color).any(|sq| has_capture_from(board, sq))
}

/// Whether some opposing piece could jump the piece on `sq` right now.
pub fn is_capturable(board: &Board, sq: Square) -> bool {
    let Some(piece) = board.get_piece(sq) else {
        return false;
    };

    DIAGONALS.iter().any(|&(dr, dc)| {
        let (Some(attacker_sq), Some(landing)) = (sq.offset(dr, dc), sq.offset(-dr, -dc)) else {
            return false;
        };
        board.get_piece(attacker_sq).is_some_and(|attacker| {
            attacker.color != piece.color
                && attacker.directions().contains(&(-dr, -dc))
                && board.is_empty_square(landing)
        })
    })
}

const fn signum(from: usize, to: usize) -> isize {
    if to > from {
        1
    } else if to < from {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Piece;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_man_moves_forward_only() {
        let mut board = Board::empty();
        board.add_piece(sq(4, 3), Piece::man(PieceColor::Black));
        board.add_piece(sq(3, 4), Piece::man(PieceColor::Red));

        assert_eq!(check_move(&board, sq(4, 3), sq(5, 2)), Ok(MoveKind::Step));
        assert_eq!(
            check_move(&board, sq(4, 3), sq(3, 2)),
            Err(MoveError::BackwardMove)
        );
        assert_eq!(check_move(&board, sq(3, 4), sq(2, 5)), Ok(MoveKind::Step));
        assert_eq!(
            check_move(&board, sq(3, 4), sq(4, 5)),
            Err(MoveError::BackwardMove)
        );
    }

    #[test]
    fn test_man_cannot_capture_backward() {
        let mut board = Board::empty();
        board.add_piece(sq(4, 3), Piece::man(PieceColor::Black));
        board.add_piece(sq(3, 4), Piece::man(PieceColor::Red));

        // The geometry of the jump is fine, the direction is not.
        assert!(can_capture(&board, sq(4, 3), sq(2, 5)));
        assert!(!validate_move(&board, sq(4, 3), sq(2, 5)));
        assert!(piece_captures(&board, sq(4, 3)).is_empty());
    }

    #[test]
    fn test_king_moves_in_all_directions() {
        let mut board = Board::empty();
        board.add_piece(sq(4, 3), Piece::king(PieceColor::Red));
        board.add_piece(sq(5, 4), Piece::man(PieceColor::Black));

        let moves = piece_moves(&board, sq(4, 3));
        assert_eq!(moves.len(), 4);
        assert!(moves.contains(&Move::new(4, 3, 3, 2)));
        assert!(moves.contains(&Move::new(4, 3, 3, 4)));
        assert!(moves.contains(&Move::new(4, 3, 5, 2)));
        assert!(moves.contains(&Move::new(4, 3, 6, 5)));
    }

    #[test]
    fn test_capture_requires_opponent_and_empty_landing() {
        let mut board = Board::empty();
        board.add_piece(sq(5, 0), Piece::man(PieceColor::Red));
        board.add_piece(sq(4, 1), Piece::man(PieceColor::Red));
        assert!(!can_capture(&board, sq(5, 0), sq(3, 2)));

        board.set_piece(sq(4, 1), Some(Piece::man(PieceColor::Black)));
        assert!(can_capture(&board, sq(5, 0), sq(3, 2)));

        board.add_piece(sq(3, 2), Piece::man(PieceColor::Black));
        assert!(!can_capture(&board, sq(5, 0), sq(3, 2)));
        assert_eq!(
            check_move(&board, sq(5, 0), sq(3, 2)),
            Err(MoveError::TargetOccupied)
        );
    }

    #[test]
    fn test_rejects_non_diagonal_and_long_moves() {
        let board = Board::new();
        assert_eq!(
            check_move(&board, sq(2, 1), sq(3, 1)),
            Err(MoveError::InvalidMovePattern)
        );
        assert_eq!(
            check_move(&board, sq(1, 0), sq(4, 3)),
            Err(MoveError::InvalidMovePattern)
        );
        assert_eq!(
            check_move(&board, sq(3, 0), sq(4, 1)),
            Err(MoveError::NoPieceAtSource)
        );
    }

    #[test]
    fn test_is_capturable_respects_attacker_direction() {
        let mut board = Board::empty();
        board.add_piece(sq(3, 2), Piece::man(PieceColor::Black));
        // Red man below-right moves upward, so it can jump to (2,1).
        board.add_piece(sq(4, 3), Piece::man(PieceColor::Red));
        assert!(is_capturable(&board, sq(3, 2)));

        // A Red man above the Black piece cannot jump backward onto row 4.
        let mut board = Board::empty();
        board.add_piece(sq(3, 2), Piece::man(PieceColor::Black));
        board.add_piece(sq(2, 1), Piece::man(PieceColor::Red));
        assert!(!is_capturable(&board, sq(3, 2)));

        board.set_piece(sq(2, 1), Some(Piece::king(PieceColor::Red)));
        assert!(is_capturable(&board, sq(3, 2)));
    }

    #[test]
    fn test_count_captures() {
        let mut board = Board::empty();
        board.add_piece(sq(5, 2), Piece::man(PieceColor::Red));
        board.add_piece(sq(4, 1), Piece::man(PieceColor::Black));
        board.add_piece(sq(4, 3), Piece::man(PieceColor::Black));
        // Back the Red man up so the Black men have nowhere to land.
        board.add_piece(sq(6, 1), Piece::man(PieceColor::Red));
        board.add_piece(sq(6, 3), Piece::man(PieceColor::Red));

        assert_eq!(count_captures(&board, PieceColor::Red), 2);
        assert!(has_any_capture(&board, PieceColor::Red));
        assert_eq!(count_captures(&board, PieceColor::Black), 0);
    }
}
