// Piece Values
pub const VAL_MAN: i32 = 100;
pub const VAL_KING: i32 = 160;

// Flat bonus per king on top of its material value.
pub const KING_COUNT_BONUS: i32 = 20;

// Safety: pieces no enemy can jump right now vs. pieces hanging.
pub const SAFE_PIECE: i32 = 6;
pub const UNSAFE_PIECE: i32 = 12;

// Per capturing move the opposing side has available.
pub const CAPTURE_THREAT: i32 = 15;

pub const CENTER_CONTROL: i32 = 5;
pub const PROTECTED_PIECE: i32 = 4;

// Early-game formations, only scored while turn_count is below the limit.
pub const BACK_ROW_GUARD: i32 = 10;
pub const BACK_ROW_TURNS: u32 = 20;
pub const PYRAMID: i32 = 15;
pub const PYRAMID_TURNS: u32 = 12;

// Central box: rows 3-4, cols 2-5.
pub const CENTER_ROWS: (usize, usize) = (3, 4);
pub const CENTER_COLS: (usize, usize) = (2, 5);

// Squares listed for Black (top of the board); Red uses the point mirror
// (7 - row, 7 - col) so the start position scores zero.
pub const BACK_ROW_GUARD_SQUARES: [(usize, usize); 2] = [(0, 1), (0, 5)];

#[rustfmt::skip]
pub const PYRAMID_SQUARES: [(usize, usize); 6] = [
    (0, 1), (0, 3), (0, 5),
        (1, 2), (1, 4),
            (2, 3),
];

#[must_use]
pub const fn mirror(sq: (usize, usize)) -> (usize, usize) {
    (7 - sq.0, 7 - sq.1)
}

#[must_use]
pub const fn in_center(row: usize, col: usize) -> bool {
    row >= CENTER_ROWS.0 && row <= CENTER_ROWS.1 && col >= CENTER_COLS.0 && col <= CENTER_COLS.1
}
