use crate::board::{Color, Piece};
use crate::square::Square;
use crate::status::GameStatus;
use thiserror::Error;

/// Why a textual position was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("bad piece placement: {0}")]
    Placement(String),

    #[error("bad side to move: {0:?}")]
    SideToMove(String),

    #[error("bad castling field: {0:?}")]
    Castling(String),

    #[error("castling right {right} without king and rook on their home squares")]
    CastlingWithoutPieces { right: char },

    #[error("bad en passant field: {0:?}")]
    EnPassant(String),

    #[error("bad {field} counter: {value:?}")]
    Counter { field: &'static str, value: String },

    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: u32 },

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}

/// Why a move request did not match a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    #[error("there is no piece on the origin square")]
    EmptySquare,

    #[error("it's not your turn")]
    NotYourTurn,

    #[error("that piece cannot move there")]
    NoSuchMove,

    #[error("a promotion piece must be chosen")]
    PromotionRequired,

    #[error("only pawns reaching the last rank promote")]
    UnexpectedPromotion,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move {from}{to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        reason: IllegalMoveReason,
    },

    #[error("game is already over: {0}")]
    GameOver(GameStatus),

    #[error("malformed position: {0}")]
    MalformedPosition(#[from] FenError),

    /// Text that does not describe a square or move at all.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no moves to undo")]
    NothingToUndo,

    #[error("no moves to redo")]
    NothingToRedo,

    /// Engine bug; the offending operation has been rolled back.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl GameError {
    /// Recoverable errors are the caller's fault; everything but an invariant violation.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::InvariantViolation(_))
    }
}
