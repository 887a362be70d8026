use crate::engine::Move;
use crate::logic::board::{PieceColor, BOARD_SIZE};
use crate::logic::eval_constants::mirror;
use crate::logic::game::GameState;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A named line in standard notation: squares 1-32, first mover's men on
/// 1-12. Moves alternate leader, responder, leader, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opening {
    pub name: &'static str,
    pub moves: &'static [(u8, u8)],
}

#[rustfmt::skip]
pub const OPENINGS: &[Opening] = &[
    Opening {
        name: "Old Fourteenth",
        moves: &[
            (11, 15), (23, 19),
            (8, 11), (22, 17),
            (4, 8), (17, 13),
            (15, 18), (24, 20),
            (11, 15), (28, 24),
            (8, 11), (26, 23),
        ],
    },
    Opening {
        name: "Glasgow",
        moves: &[
            (11, 15), (23, 19),
            (8, 11), (22, 17),
            (11, 16), (24, 20),
        ],
    },
    Opening {
        name: "Laird and Lady",
        moves: &[
            (11, 15), (23, 19),
            (8, 11), (22, 17),
            (9, 13), (17, 14),
            (10, 17), (21, 14),
            (6, 10), (25, 22),
        ],
    },
    Opening {
        name: "Alma",
        moves: &[
            (11, 15), (23, 19),
            (8, 11), (22, 17),
            (3, 8), (25, 22),
            (11, 16), (26, 23),
            (16, 20), (17, 14),
        ],
    },
    Opening {
        name: "Centre",
        moves: &[
            (11, 15), (23, 19),
            (8, 11), (22, 17),
            (15, 18), (24, 20),
            (18, 22), (25, 18),
            (11, 16), (20, 11),
        ],
    },
    Opening {
        name: "Souter",
        moves: &[
            (11, 15), (23, 19),
            (9, 14), (22, 17),
            (6, 9), (17, 13),
            (2, 6), (25, 22),
            (14, 18), (22, 17),
        ],
    },
    Opening {
        name: "Fife",
        moves: &[
            (11, 15), (23, 19),
            (9, 14), (22, 17),
            (5, 9), (17, 13),
            (14, 18), (24, 20),
            (1, 5), (26, 23),
        ],
    },
    Opening {
        name: "Whilter",
        moves: &[
            (11, 15), (23, 19),
            (9, 14), (22, 17),
            (7, 11), (25, 22),
            (11, 16), (26, 23),
            (5, 9), (17, 13),
            (3, 7), (29, 25),
        ],
    },
    Opening {
        name: "Defiance",
        moves: &[
            (11, 15), (23, 19),
            (9, 14), (27, 23),
            (8, 11), (22, 18),
        ],
    },
    Opening {
        name: "Will o' the Wisp",
        moves: &[
            (11, 15), (23, 19),
            (9, 13), (22, 18),
            (15, 22), (25, 18),
            (6, 9), (27, 23),
            (8, 11), (26, 22),
            (4, 8), (29, 25),
        ],
    },
    Opening {
        name: "Second Double Corner",
        moves: &[
            (11, 15), (24, 19),
            (15, 24), (28, 19),
            (8, 11), (22, 18),
            (4, 8), (25, 22),
            (10, 14), (18, 15),
        ],
    },
    Opening {
        name: "Ayrshire Lassie",
        moves: &[
            (11, 15), (24, 20),
            (8, 11), (28, 24),
            (4, 8), (23, 19),
            (15, 18), (22, 15),
        ],
    },
    Opening {
        name: "Tillicoultry",
        moves: &[
            (11, 15), (24, 20),
            (8, 11), (23, 19),
            (15, 24), (28, 19),
            (4, 8), (22, 18),
            (9, 14), (18, 9),
            (5, 14), (25, 22),
        ],
    },
    Opening {
        name: "Single Corner",
        moves: &[
            (11, 15), (22, 18),
            (15, 22), (25, 18),
            (8, 11), (29, 25),
            (4, 8), (25, 22),
            (12, 16), (24, 20),
            (10, 15), (27, 24),
        ],
    },
    Opening {
        name: "Cross",
        moves: &[
            (11, 15), (23, 18),
            (8, 11), (27, 23),
            (4, 8), (23, 19),
            (9, 14), (18, 9),
            (5, 14), (22, 17),
            (11, 16), (26, 23),
        ],
    },
    Opening {
        name: "Switcher",
        moves: &[
            (11, 15), (21, 17),
            (9, 13), (25, 21),
            (8, 11), (17, 14),
            (10, 17), (21, 14),
            (6, 10), (23, 19),
            (10, 17), (19, 10),
        ],
    },
    Opening {
        name: "Dyke",
        moves: &[
            (11, 15), (22, 17),
            (15, 19), (24, 15),
            (10, 19), (23, 16),
            (12, 19), (25, 22),
            (9, 14), (17, 10),
            (6, 15), (21, 17),
        ],
    },
    Opening {
        name: "Maid of the Mill",
        moves: &[
            (11, 15), (22, 17),
            (8, 11), (17, 13),
            (4, 8), (24, 20),
            (15, 18), (23, 14),
            (9, 18), (28, 24),
            (11, 15), (26, 23),
        ],
    },
    Opening {
        name: "Bristol",
        moves: &[
            (11, 16), (24, 20),
            (16, 19), (23, 16),
            (12, 19), (22, 18),
            (8, 12), (25, 22),
            (10, 15), (18, 14),
        ],
    },
    Opening {
        name: "Bristol Cross",
        moves: &[
            (11, 16), (23, 18),
            (16, 20), (24, 19),
            (8, 11), (22, 17),
            (4, 8), (28, 24),
            (10, 14), (17, 10),
        ],
    },
    Opening {
        name: "Paisley",
        moves: &[
            (11, 16), (24, 19),
            (8, 11), (22, 18),
            (4, 8), (25, 22),
            (10, 14), (19, 15),
            (16, 19), (23, 16),
        ],
    },
    Opening {
        name: "Double Corner",
        moves: &[
            (9, 14), (22, 18),
            (5, 9), (24, 19),
            (11, 16), (18, 15),
        ],
    },
    Opening {
        name: "Edinburgh",
        moves: &[
            (9, 13), (22, 18),
            (6, 9), (25, 22),
            (11, 16), (24, 19),
            (8, 11), (28, 24),
            (4, 8), (22, 17),
            (13, 22), (26, 17),
        ],
    },
    Opening {
        name: "Kelso",
        moves: &[
            (10, 15), (23, 18),
            (6, 10), (27, 23),
            (12, 16), (32, 27),
            (16, 19), (23, 16),
        ],
    },
    Opening {
        name: "Denny",
        moves: &[
            (10, 14), (24, 19),
            (7, 10), (22, 17),
        ],
    },
    Opening {
        name: "Dundee",
        moves: &[
            (12, 16), (24, 20),
            (8, 12), (28, 24),
            (16, 19), (23, 16),
        ],
    },
];

/// Board coordinates of a standard-notation square, seen from the side where
/// Red starts. `None` outside 1-32.
#[must_use]
pub const fn square_from_notation(n: u8) -> Option<(usize, usize)> {
    if n == 0 || n > 32 {
        return None;
    }
    let idx = (n - 1) as usize;
    let std_row = idx / 4;
    let k = idx % 4;
    let std_col = if std_row % 2 == 0 { 2 * k + 1 } else { 2 * k };
    Some((BOARD_SIZE - 1 - std_row, BOARD_SIZE - 1 - std_col))
}

/// Length of the longest line; past this many turns the book is silent.
#[must_use]
pub fn longest_opening() -> usize {
    OPENINGS.iter().map(|o| o.moves.len()).max().unwrap_or(0)
}

impl Opening {
    /// The `idx`-th move of the line for a game in which `leader` moved first.
    #[must_use]
    pub fn move_at(&self, idx: usize, leader: PieceColor) -> Option<Move> {
        let &(from, to) = self.moves.get(idx)?;
        let orient = |sq: (usize, usize)| match leader {
            PieceColor::Red => sq,
            PieceColor::Black => mirror(sq),
        };
        let (fr, fc) = orient(square_from_notation(from)?);
        let (tr, tc) = orient(square_from_notation(to)?);
        let coord = |v: usize| u8::try_from(v).ok();
        Some(Move::new(coord(fr)?, coord(fc)?, coord(tr)?, coord(tc)?))
    }

    /// The leader's moves sit on even indices, the responder's on odd ones.
    fn follows(&self, leader_moves: &[Move], responder_moves: &[Move], leader: PieceColor) -> bool {
        let leader_ok = leader_moves
            .iter()
            .enumerate()
            .all(|(i, mv)| self.move_at(2 * i, leader) == Some(*mv));
        let responder_ok = responder_moves
            .iter()
            .enumerate()
            .all(|(i, mv)| self.move_at(2 * i + 1, leader) == Some(*mv));
        leader_ok && responder_ok
    }
}

/// Picks book replies for the side to move while the game still follows a
/// known opening.
pub struct OpeningBook {
    current: Option<&'static Opening>,
    rng: StdRng,
}

impl OpeningBook {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { current: None, rng }
    }

    pub const fn current(&self) -> Option<&'static Opening> {
        self.current
    }

    /// Re-reads both move histories and locks onto an opening they follow.
    /// The book only answers as the responder, one move behind the leader.
    pub fn identify_opening(&mut self, state: &GameState) -> Option<&'static Opening> {
        let turn = usize::try_from(state.turn_count()).unwrap_or(usize::MAX);
        if turn >= longest_opening() {
            self.current = None;
            return None;
        }

        let responder = state.current_color();
        let leader = responder.opposite();
        let leader_moves = state.move_history(leader);
        let responder_moves = state.move_history(responder);
        if leader_moves.len() != responder_moves.len() + 1 {
            self.current = None;
            return None;
        }

        let reply_idx = 2 * leader_moves.len() - 1;
        let candidates: Vec<&'static Opening> = OPENINGS
            .iter()
            .filter(|o| o.moves.len() > reply_idx)
            .filter(|o| o.follows(leader_moves, responder_moves, leader))
            .collect();

        let still_valid = self
            .current
            .is_some_and(|cur| candidates.iter().any(|c| c.name == cur.name));
        if !still_valid {
            self.current = candidates.choose(&mut self.rng).copied();
            match self.current {
                Some(o) => debug!("Following opening: {}", o.name),
                None => debug!("Position left the opening book"),
            }
        }
        self.current
    }

    /// Book reply for the side to move, provided it is legal right now.
    pub fn next_move(&mut self, state: &GameState) -> Option<Move> {
        let opening = self.identify_opening(state)?;
        let leader = state.current_color().opposite();
        let idx = 2 * state.move_history(leader).len() - 1;
        let mv = opening.move_at(idx, leader)?;
        if state.legal_moves().contains(&mv) {
            Some(mv)
        } else {
            debug!("Book move {mv} from {} is not legal here", opening.name);
            self.current = None;
            None
        }
    }
}
