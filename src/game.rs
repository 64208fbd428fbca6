use crate::board::{Board, Color, Piece};
use crate::config::{GameConfig, PromotionPolicy};
use crate::error::{GameError, IllegalMoveReason};
use crate::moves::execute::{generate_legal, make_move, undo_move};
use crate::moves::square_control::in_check;
use crate::moves::types::{Move, MoveList, Undo};
use crate::output::engine_println;
use crate::square::Square;
use crate::status::{GameStatus, position_status};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, error, warn};

/// What a successful `submit_move` reports back to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub mv: Move,
    pub captured: Option<Piece>,
    pub status: GameStatus,
    pub fen: String,
}

/// One game session: the authoritative board plus everything needed for
/// undo, redo and repetition detection.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    config: GameConfig,
    history: Vec<Undo>,
    /// Key of the position before each applied move, parallel to `history`.
    snapshots: Vec<u64>,
    redo_stack: Vec<Move>,
    status: GameStatus,
}

fn illegal(from: Square, to: Square, promotion: Option<Piece>, reason: IllegalMoveReason) -> GameError {
    GameError::IllegalMove {
        from,
        to,
        promotion,
        reason,
    }
}

impl Game {
    /// Standard starting position with the default config.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_board(Board::new(), config)
    }

    pub fn from_fen(fen: &str, config: GameConfig) -> Result<Self, GameError> {
        let board = Board::from_str(fen)?;
        Ok(Self::from_board(board, config))
    }

    fn from_board(board: Board, config: GameConfig) -> Self {
        let status = position_status(&board, 1);
        Game {
            board,
            config,
            history: Vec::new(),
            snapshots: Vec::new(),
            redo_stack: Vec::new(),
            status,
        }
    }

    /// Back to the starting position, keeping the config.
    pub fn new_game(&mut self) {
        *self = Self::with_config(self.config);
    }

    /// Replace the position. On error the current game is left untouched.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), GameError> {
        *self = Self::from_fen(fen, self.config)?;
        Ok(())
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    /// Dump the board to the console, White at the bottom.
    pub fn print_board(&self) {
        engine_println!("{}", self.board.render_ascii(false));
    }

    /// Moves played so far, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|u| u.mv)
    }

    /// Times the current position has occurred, itself included.
    pub fn repetition_count(&self) -> usize {
        let key = self.board.zobrist;
        1 + self.snapshots.iter().filter(|&&k| k == key).count()
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        if !self.status.is_terminal() {
            generate_legal(&self.board, &mut moves);
        }
        moves
    }

    /// Destination squares of the legal moves starting on `from`. A
    /// promotion square appears once however many pieces it allows.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Square> {
        let mut out = Vec::new();
        for mv in self.legal_moves().iter().filter(|m| m.from == from) {
            if !out.contains(&mv.to) {
                out.push(mv.to);
            }
        }
        out
    }

    /// Validate a move request against the legal moves and play it.
    pub fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<MoveOutcome, GameError> {
        let mv = self.resolve(from, to, promotion).inspect_err(|e| {
            warn!(%from, %to, ?promotion, error = %e, "move rejected");
        })?;
        let outcome = self.play(mv)?;
        self.redo_stack.clear();
        Ok(outcome)
    }

    /// Parse coordinate notation (`e2e4`, `e7e8q`) and submit it.
    pub fn submit_uci(&mut self, text: &str) -> Result<MoveOutcome, GameError> {
        let (from, to, promotion) = parse_coordinates(text).ok_or_else(|| {
            GameError::InvalidInput(format!("expected a move like e2e4 or e7e8q, got {text:?}"))
        })?;
        self.submit_move(from, to, promotion)
    }

    /// Take back the last move.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let undo = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.snapshots.pop();
        undo_move(&mut self.board, undo);
        self.redo_stack.push(undo.mv);
        self.status = position_status(&self.board, self.repetition_count());
        debug!(mv = %undo.mv, "undo");
        Ok(undo.mv)
    }

    /// Replay the most recently undone move.
    pub fn redo(&mut self) -> Result<MoveOutcome, GameError> {
        let mv = self.redo_stack.pop().ok_or(GameError::NothingToRedo)?;
        self.play(mv).inspect_err(|_| self.redo_stack.push(mv))
    }

    /// Match a request to exactly one legal move.
    fn resolve(&self, from: Square, to: Square, promotion: Option<Piece>) -> Result<Move, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }

        match self.board.color_at(from) {
            None => return Err(illegal(from, to, promotion, IllegalMoveReason::EmptySquare)),
            Some(c) if c != self.board.side_to_move => {
                return Err(illegal(from, to, promotion, IllegalMoveReason::NotYourTurn));
            }
            Some(_) => {}
        }

        let mut legal = MoveList::new();
        generate_legal(&self.board, &mut legal);
        let candidates: MoveList = legal
            .into_iter()
            .filter(|m| m.from == from && m.to == to)
            .collect();

        let Some(first) = candidates.first().copied() else {
            return Err(illegal(from, to, promotion, IllegalMoveReason::NoSuchMove));
        };

        if !first.is_promotion() {
            return match promotion {
                Some(_) => Err(illegal(from, to, promotion, IllegalMoveReason::UnexpectedPromotion)),
                None => Ok(first),
            };
        }

        let wanted = match (promotion, self.config.promotion) {
            (Some(p), _) => p,
            (None, PromotionPolicy::AutoQueen) => Piece::Queen,
            (None, PromotionPolicy::Strict) => {
                return Err(illegal(from, to, promotion, IllegalMoveReason::PromotionRequired));
            }
        };
        candidates
            .into_iter()
            .find(|m| m.promotion == Some(wanted))
            .ok_or_else(|| illegal(from, to, promotion, IllegalMoveReason::NoSuchMove))
    }

    /// Apply a move already known to be legal, check the result and update
    /// the status. A broken invariant rolls the move back.
    fn play(&mut self, mv: Move) -> Result<MoveOutcome, GameError> {
        let mover = self.board.side_to_move;
        let undo = make_move(&mut self.board, mv);

        if let Err(msg) = self.check_invariants(mover) {
            undo_move(&mut self.board, undo);
            error!(%mv, fen = %self.board.to_fen(), %msg, "invariant violated, move rolled back");
            return Err(GameError::InvariantViolation(msg));
        }

        self.history.push(undo);
        self.snapshots.push(undo.prev_zobrist);
        self.status = position_status(&self.board, self.repetition_count());

        debug!(%mv, status = %self.status, "move played");
        Ok(MoveOutcome {
            mv,
            captured: undo.capture.map(|(_, piece, _)| piece),
            status: self.status,
            fen: self.board.to_fen(),
        })
    }

    fn check_invariants(&self, mover: Color) -> Result<(), String> {
        for color in [Color::White, Color::Black] {
            if self.board.pieces(Piece::King, color).count_ones() != 1 {
                return Err(format!("{color} no longer has exactly one king"));
            }
        }
        if in_check(&self.board, mover) {
            return Err(format!("{mover} left in check"));
        }
        self.board.validate()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

/// `e2e4` or `e7e8q` (promotion letter in either case).
pub fn parse_coordinates(text: &str) -> Option<(Square, Square, Option<Piece>)> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return None;
    }
    let from = text[0..2].parse().ok()?;
    let to = text[2..4].parse().ok()?;
    let promotion = match text[4..].chars().next() {
        Some(c) => Some(Piece::from_promotion_char(c)?),
        None => None,
    };
    Some((from, to, promotion))
}
