use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::error::CheckersResult;
use crate::logic::board::{Board, Piece, PieceColor, Square};
use crate::logic::player::{Player, PlayerKind};
use crate::logic::rules::{self, MoveError, MoveKind};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Finished,
}

/// Whether the side to move is in the middle of a multi-jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Normal,
    /// Only further captures by the piece on this square are allowed.
    MustContinueCaptureAt(Square),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub red_name: String,
    pub red_kind: PlayerKind,
    pub black_name: String,
    pub black_kind: PlayerKind,
    pub forced_jumps: bool,
    pub first_player: PieceColor,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            red_name: "Player".to_string(),
            red_kind: PlayerKind::Human,
            black_name: "Computer".to_string(),
            black_kind: PlayerKind::Ai {
                depth: 4,
                opening_book: true,
            },
            forced_jumps: false,
            first_player: PieceColor::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub color: PieceColor,
    pub score: u32,
    pub captured_pieces: u32,
    pub num_of_pieces: u32,
    pub num_of_kings: u32,
}

/// What the persistence layer reads once a match is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub status: GameStatus,
    pub winner: Option<PieceColor>,
    pub turn_count: u32,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    // [red, black]
    players: [Player; 2],
    current: PieceColor,
    status: GameStatus,
    winner: Option<PieceColor>,
    turn_count: u32,
    move_history: [Vec<Move>; 2],
    forced_jumps_enabled: bool,
    phase: TurnPhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(&GameOptions::default())
    }

    #[must_use]
    pub fn with_options(options: &GameOptions) -> Self {
        Self::from_position(Board::new(), options.first_player, options)
    }

    /// Starts a match from an arbitrary position. Piece and king counters are
    /// taken from the board once here and maintained incrementally afterwards.
    #[must_use]
    pub fn from_position(board: Board, to_move: PieceColor, options: &GameOptions) -> Self {
        let mut red = Player::new(options.red_name.clone(), PieceColor::Red, options.red_kind);
        let mut black = Player::new(
            options.black_name.clone(),
            PieceColor::Black,
            options.black_kind,
        );
        for player in [&mut red, &mut black] {
            player.num_of_pieces = board.count(player.color);
            let kings = board
                .squares_of(player.color)
                .filter(|&sq| board.get_piece(sq).is_some_and(|p| p.is_king))
                .count();
            player.num_of_kings = u32::try_from(kings).unwrap_or(u32::MAX);
        }

        let mut state = Self {
            board,
            players: [red, black],
            current: to_move,
            status: GameStatus::InProgress,
            winner: None,
            turn_count: 0,
            move_history: [Vec::new(), Vec::new()],
            forced_jumps_enabled: options.forced_jumps,
            phase: TurnPhase::Normal,
        };
        state.refresh_turn_flags();
        state
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Contents of `(row, col)`; indices outside the board are a caller error.
    pub fn get_piece(&self, row: usize, col: usize) -> CheckersResult<Option<Piece>> {
        Ok(self.board.get_piece(Square::new(row, col)?))
    }

    pub const fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub const fn player(&self, color: PieceColor) -> &Player {
        let [red, black] = &self.players;
        match color {
            PieceColor::Red => red,
            PieceColor::Black => black,
        }
    }

    fn player_mut(&mut self, color: PieceColor) -> &mut Player {
        let [red, black] = &mut self.players;
        match color {
            PieceColor::Red => red,
            PieceColor::Black => black,
        }
    }

    pub const fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub const fn current_color(&self) -> PieceColor {
        self.current
    }

    pub const fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|color| self.player(color))
    }

    pub const fn winner_color(&self) -> Option<PieceColor> {
        self.winner
    }

    pub const fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn move_history(&self, color: PieceColor) -> &[Move] {
        let [red, black] = &self.move_history;
        match color {
            PieceColor::Red => red,
            PieceColor::Black => black,
        }
    }

    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub const fn forced_jumps_enabled(&self) -> bool {
        self.forced_jumps_enabled
    }

    /// Board-level legality of a move for whatever piece stands on the start
    /// square. Destinations off the board are rejected.
    pub fn validate_move(
        &self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> bool {
        match (
            Square::new(start_row, start_col),
            Square::new(end_row, end_col),
        ) {
            (Ok(from), Ok(to)) => rules::validate_move(&self.board, from, to),
            _ => false,
        }
    }

    pub fn can_capture(
        &self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> bool {
        match (
            Square::new(start_row, start_col),
            Square::new(end_row, end_col),
        ) {
            (Ok(from), Ok(to)) => rules::can_capture(&self.board, from, to),
            _ => false,
        }
    }

    /// Legal destinations for the piece on `(row, col)`, narrowed by a pending
    /// capture chain and the forced-jump rule.
    pub fn possible_moves(&self, row: usize, col: usize) -> CheckersResult<Vec<Move>> {
        let sq = Square::new(row, col)?;
        Ok(self.legal_moves_from(sq).to_vec())
    }

    pub fn legal_moves_from(&self, sq: Square) -> MoveList {
        if let TurnPhase::MustContinueCaptureAt(chain) = self.phase {
            if chain != sq {
                return MoveList::new();
            }
            let mut moves = rules::piece_moves(&self.board, sq);
            moves.retain(Move::is_jump);
            return moves;
        }

        let mut moves = rules::piece_moves(&self.board, sq);
        if self.forced_jumps_enabled && self.current_player().captures_available {
            moves.retain(Move::is_jump);
        }
        moves
    }

    /// Every legal move of the side to move, piece by piece in square order.
    pub fn legal_moves(&self) -> MoveList {
        if let TurnPhase::MustContinueCaptureAt(chain) = self.phase {
            return self.legal_moves_from(chain);
        }
        let mut moves = MoveList::new();
        for sq in self.board.squares_of(self.current) {
            moves.extend_from(&self.legal_moves_from(sq));
        }
        moves
    }

    pub fn has_any_legal_move(&self) -> bool {
        self.board
            .squares_of(self.current)
            .any(|sq| !self.legal_moves_from(sq).is_empty())
    }

    /// Plays a move for the current player. Illegal requests leave the state
    /// untouched; the return value tells whether the move was applied.
    pub fn move_piece(
        &mut self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> bool {
        let (Ok(sr), Ok(sc), Ok(er), Ok(ec)) = (
            u8::try_from(start_row),
            u8::try_from(start_col),
            u8::try_from(end_row),
            u8::try_from(end_col),
        ) else {
            debug!("Ignoring move with oversized coordinates");
            return false;
        };
        self.apply_move(Move::new(sr, sc, er, ec))
    }

    pub fn apply_move(&mut self, mv: Move) -> bool {
        match self.try_move(mv) {
            Ok(_) => true,
            Err(err) => {
                debug!("Rejected move {mv} for {}: {err:?}", self.current);
                false
            }
        }
    }

    fn try_move(&mut self, mv: Move) -> Result<MoveKind, MoveError> {
        if self.status == GameStatus::Finished {
            return Err(MoveError::GameFinished);
        }
        let from = mv.start().map_err(|_| MoveError::OutOfBounds)?;
        let to = mv.end().map_err(|_| MoveError::OutOfBounds)?;

        let piece = self
            .board
            .get_piece(from)
            .ok_or(MoveError::NoPieceAtSource)?;
        if piece.color != self.current {
            return Err(MoveError::NotYourTurn);
        }

        let kind = rules::check_move(&self.board, from, to)?;
        if !self.legal_moves_from(from).contains(&mv) {
            return Err(MoveError::Restricted);
        }

        let mover = self.current;

        // 1. Remove the jumped piece
        if kind == MoveKind::Capture {
            let victim = mv
                .jumped_square()
                .and_then(|mid| self.board.remove_piece(mid))
                .ok_or(MoveError::NothingToCapture)?;

            let capturer = self.player_mut(mover);
            capturer.score += if victim.is_king { 2 } else { 1 };
            capturer.captured_pieces += 1;

            let owner = self.player_mut(victim.color);
            owner.num_of_pieces = owner.num_of_pieces.saturating_sub(1);
            if victim.is_king {
                owner.num_of_kings = owner.num_of_kings.saturating_sub(1);
            }
            self.phase = TurnPhase::MustContinueCaptureAt(to);
        }

        // 2. Relocate
        self.board.move_piece_quiet(from, to);
        let [red_history, black_history] = &mut self.move_history;
        match mover {
            PieceColor::Red => red_history.push(mv),
            PieceColor::Black => black_history.push(mv),
        }

        // 3. Crown
        if !piece.is_king && to.row == mover.crowning_row() {
            if let Some(moved) = self.board.get_piece_mut(to) {
                moved.is_king = true;
            }
            self.player_mut(mover).num_of_kings += 1;
        }

        // 4. Continue the chain or hand over the turn
        if kind == MoveKind::Capture && rules::has_capture_from(&self.board, to) {
            debug!("{mover} must continue capturing from ({}, {})", to.row, to.col);
        } else {
            self.phase = TurnPhase::Normal;
            self.change_turn();
        }

        Ok(kind)
    }

    /// Closes a pending capture chain and passes the turn, so that search
    /// nodes always alternate between the two sides.
    pub(crate) fn end_turn(&mut self) {
        if let TurnPhase::MustContinueCaptureAt(_) = self.phase {
            self.phase = TurnPhase::Normal;
            self.change_turn();
        }
    }

    pub fn change_turn(&mut self) {
        self.current = self.current.opposite();
        self.turn_count += 1;
        self.refresh_turn_flags();
    }

    /// Marks the pieces the side to move can jump and, with forced jumps on,
    /// records whether it has any capture at all.
    fn refresh_turn_flags(&mut self) {
        let mover = self.current;
        let threatened: Vec<(Square, bool)> = self
            .board
            .squares_of(mover.opposite())
            .map(|sq| (sq, rules::is_capturable(&self.board, sq)))
            .chain(self.board.squares_of(mover).map(|sq| (sq, false)))
            .collect();
        for (sq, exposed) in threatened {
            if let Some(piece) = self.board.get_piece_mut(sq) {
                piece.capture_threatened = exposed;
            }
        }

        if self.forced_jumps_enabled {
            let available = rules::has_any_capture(&self.board, mover);
            self.player_mut(mover).captures_available = available;
        }
    }

    /// Resolves the game if one side is out of pieces or the side to move is
    /// stuck. Has to be called after every move.
    pub fn check_end_of_game(&mut self) {
        if self.status == GameStatus::Finished {
            return;
        }

        let red = self.player(PieceColor::Red).num_of_pieces;
        let black = self.player(PieceColor::Black).num_of_pieces;

        if red == 0 && black >= 1 {
            self.finish(Some(PieceColor::Black));
        } else if black == 0 && red >= 1 {
            self.finish(Some(PieceColor::Red));
        } else if !self.has_any_legal_move() {
            let red_score = self.player(PieceColor::Red).score;
            let black_score = self.player(PieceColor::Black).score;
            let winner = match red_score.cmp(&black_score) {
                std::cmp::Ordering::Greater => Some(PieceColor::Red),
                std::cmp::Ordering::Less => Some(PieceColor::Black),
                std::cmp::Ordering::Equal => None,
            };
            self.finish(winner);
        }
    }

    fn finish(&mut self, winner: Option<PieceColor>) {
        self.status = GameStatus::Finished;
        self.winner = winner;
        self.phase = TurnPhase::Normal;
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            status: self.status,
            winner: self.winner,
            turn_count: self.turn_count,
            players: self
                .players
                .iter()
                .map(|p| PlayerSummary {
                    name: p.name.clone(),
                    color: p.color,
                    score: p.score,
                    captured_pieces: p.captured_pieces,
                    num_of_pieces: p.num_of_pieces,
                    num_of_kings: p.num_of_kings,
                })
                .collect(),
        }
    }

    /// Logs the final result. Kept out of `finish` so searches stay quiet.
    pub fn log_result(&self) {
        match self.winner() {
            Some(p) => info!(
                "Game over after {} turns: {} ({}) wins {}-{}",
                self.turn_count,
                p.name,
                p.color,
                p.score,
                self.player(p.color.opposite()).score
            ),
            None => info!("Game over after {} turns: draw", self.turn_count),
        }
    }
}
