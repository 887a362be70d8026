use crate::error::{CheckersError, CheckersResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Bitboard = u64;

pub const BOARD_SIZE: usize = 8;

pub const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    Red,
    Black,
}

impl PieceColor {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row delta of a man's forward step.
    pub const fn forward(self) -> isize {
        match self {
            Self::Red => -1,
            Self::Black => 1,
        }
    }

    /// Row on which a man of this color is crowned.
    pub const fn crowning_row(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Black => BOARD_SIZE - 1,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("Red"),
            Self::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: PieceColor,
    pub is_king: bool,
    /// Set when the side to move can jump this piece right now.
    pub capture_threatened: bool,
}

impl Piece {
    #[must_use]
    pub const fn man(color: PieceColor) -> Self {
        Self {
            color,
            is_king: false,
            capture_threatened: false,
        }
    }

    #[must_use]
    pub const fn king(color: PieceColor) -> Self {
        Self {
            color,
            is_king: true,
            capture_threatened: false,
        }
    }

    /// Diagonal directions this piece may move and capture in.
    pub fn directions(self) -> &'static [(isize, isize)] {
        const RED_MAN: [(isize, isize); 2] = [(-1, -1), (-1, 1)];
        const BLACK_MAN: [(isize, isize); 2] = [(1, -1), (1, 1)];
        if self.is_king {
            &DIAGONALS
        } else {
            match self.color {
                PieceColor::Red => &RED_MAN,
                PieceColor::Black => &BLACK_MAN,
            }
        }
    }
}

/// A square known to lie on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> CheckersResult<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(CheckersError::OutOfBounds { row, col })
        }
    }

    /// # Safety
    /// Caller must guarantee `row < 8` and `col < 8`.
    #[must_use]
    pub const unsafe fn new_unchecked(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Square reached by stepping `(dr, dc)`, if still on the board.
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Self::new(row, col).ok()
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    #[must_use]
    pub const fn from_index(sq: usize) -> Self {
        Self {
            row: sq / BOARD_SIZE,
            col: sq % BOARD_SIZE,
        }
    }

    /// Pieces only ever stand on dark squares.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // Occupancy per color: [red, black]
    pub bitboards: [Bitboard; 2],
    // Mailbox for O(1) lookup
    pub grid: [Option<Piece>; BOARD_SIZE * BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Starting layout: Black men on the dark squares of rows 0-2, Red men on
    /// rows 5-7.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_pieces(PieceColor::Black, 0..3);
        board.setup_pieces(PieceColor::Red, 5..8);
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bitboards: [0; 2],
            grid: [None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    fn setup_pieces(&mut self, color: PieceColor, rows: std::ops::Range<usize>) {
        for row in rows {
            for col in 0..BOARD_SIZE {
                let sq = unsafe { Square::new_unchecked(row, col) };
                if sq.is_dark() {
                    self.add_piece(sq, Piece::man(color));
                }
            }
        }
    }

    #[must_use]
    pub fn get_piece(&self, sq: Square) -> Option<Piece> {
        self.grid.get(sq.index()).copied().flatten()
    }

    pub fn get_piece_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        self.grid.get_mut(sq.index()).and_then(Option::as_mut)
    }

    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        // Remove existing
        self.remove_piece(sq);
        // Add new
        if let Some(p) = piece {
            self.add_piece(sq, p);
        }
    }

    pub fn add_piece(&mut self, sq: Square, piece: Piece) {
        let idx = sq.index();
        if let Some(slot) = self.grid.get_mut(idx) {
            if let Some(old) = slot.take() {
                *Self::bb_mut(&mut self.bitboards, old.color) &= !(1u64 << idx);
            }
            *slot = Some(piece);
            *Self::bb_mut(&mut self.bitboards, piece.color) |= 1u64 << idx;
        }
    }

    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let idx = sq.index();
        let removed = self.grid.get_mut(idx).and_then(Option::take);
        if let Some(p) = removed {
            *Self::bb_mut(&mut self.bitboards, p.color) &= !(1u64 << idx);
        }
        removed
    }

    /// Relocates the piece on `from` to `to`, returning it.
    pub fn move_piece_quiet(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.remove_piece(from)?;
        self.add_piece(to, piece);
        Some(piece)
    }

    pub const fn color_bb(&self, color: PieceColor) -> Bitboard {
        let [red, black] = self.bitboards;
        match color {
            PieceColor::Red => red,
            PieceColor::Black => black,
        }
    }

    // Borrows only the bitboard array, never the grid.
    fn bb_mut(bitboards: &mut [Bitboard; 2], color: PieceColor) -> &mut Bitboard {
        let [red, black] = bitboards;
        match color {
            PieceColor::Red => red,
            PieceColor::Black => black,
        }
    }

    pub const fn occupied(&self) -> Bitboard {
        let [red, black] = self.bitboards;
        red | black
    }

    #[must_use]
    pub const fn is_empty_square(&self, sq: Square) -> bool {
        self.occupied() & (1u64 << sq.index()) == 0
    }

    /// Squares holding a piece of `color`, in index order.
    pub const fn squares_of(&self, color: PieceColor) -> BitboardIterator {
        BitboardIterator::new(self.color_bb(color))
    }

    pub const fn count(&self, color: PieceColor) -> u32 {
        self.color_bb(color).count_ones()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{row}")?;
            for col in 0..BOARD_SIZE {
                let sq = unsafe { Square::new_unchecked(row, col) };
                let ch = match self.get_piece(sq) {
                    Some(Piece {
                        color: PieceColor::Black,
                        is_king,
                        ..
                    }) => {
                        if is_king {
                            'B'
                        } else {
                            'b'
                        }
                    }
                    Some(Piece {
                        color: PieceColor::Red,
                        is_king,
                        ..
                    }) => {
                        if is_king {
                            'R'
                        } else {
                            'r'
                        }
                    }
                    None if sq.is_dark() => '.',
                    None => ' ',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub struct BitboardIterator {
    bb: Bitboard,
}

impl BitboardIterator {
    pub const fn new(bb: Bitboard) -> Self {
        Self { bb }
    }
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bb == 0 {
            None
        } else {
            let lsb = usize::try_from(self.bb.trailing_zeros()).unwrap_or(0);
            self.bb &= self.bb - 1;
            Some(Square::from_index(lsb))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_setup() {
        let board = Board::new();
        assert_eq!(board.count(PieceColor::Black), 12);
        assert_eq!(board.count(PieceColor::Red), 12);

        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col).unwrap();
                match board.get_piece(sq) {
                    Some(piece) => {
                        assert!(sq.is_dark(), "piece on light square {sq:?}");
                        assert!(!piece.is_king);
                        if row <= 2 {
                            assert_eq!(piece.color, PieceColor::Black);
                        } else {
                            assert!(row >= 5, "piece in the middle rows at {sq:?}");
                            assert_eq!(piece.color, PieceColor::Red);
                        }
                    }
                    None => assert!(!sq.is_dark() || (3..=4).contains(&row)),
                }
            }
        }
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(7, 7).is_ok());
        assert_eq!(
            Square::new(8, 0),
            Err(CheckersError::OutOfBounds { row: 8, col: 0 })
        );
        let corner = Square::new(0, 1).unwrap();
        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, -1), Square::new(1, 0).ok());
    }

    #[test]
    fn test_move_piece_quiet_keeps_bitboards_in_sync() {
        let mut board = Board::new();
        let from = Square::new(2, 1).unwrap();
        let to = Square::new(3, 0).unwrap();
        board.move_piece_quiet(from, to);

        assert!(board.get_piece(from).is_none());
        assert!(board.is_empty_square(from));
        assert_eq!(board.get_piece(to), Some(Piece::man(PieceColor::Black)));
        assert!(board.squares_of(PieceColor::Black).any(|sq| sq == to));
        assert_eq!(board.count(PieceColor::Black), 12);
    }

    #[test]
    fn test_display_marks_pieces() {
        let mut board = Board::empty();
        board.add_piece(Square::new(0, 1).unwrap(), Piece::king(PieceColor::Red));
        let text = board.to_string();
        assert!(text.lines().nth(1).unwrap().contains('R'));
    }
}
