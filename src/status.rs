use crate::bitboard::{DARK_SQUARES, LIGHT_SQUARES};
use crate::board::{Board, Color, Piece};
use crate::moves::execute::generate_legal;
use crate::moves::square_control::in_check;
use crate::moves::types::MoveList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plies without a pawn move or capture before the fifty-move draw.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Occurrences of one position (the current one included) that draw.
pub const REPETITION_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    /// Side to move is in check but has a reply.
    Check,
    Checkmate,
    Stalemate,
    DrawFiftyMove,
    DrawRepetition,
    DrawInsufficientMaterial,
}

impl GameStatus {
    /// Terminal states accept no further moves.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawFiftyMove
                | GameStatus::DrawRepetition
                | GameStatus::DrawInsufficientMaterial
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::DrawFiftyMove => "draw by fifty-move rule",
            GameStatus::DrawRepetition => "draw by threefold repetition",
            GameStatus::DrawInsufficientMaterial => "draw by insufficient material",
        };
        f.write_str(s)
    }
}

pub fn is_draw_by_fifty_move(board: &Board) -> bool {
    board.halfmove_clock >= FIFTY_MOVE_PLIES
}

pub fn is_draw_by_repetition(repetitions: usize) -> bool {
    repetitions >= REPETITION_LIMIT
}

/// Minimal-material table: K vs K, K + one minor vs K, and kings with any
/// number of bishops all standing on one square colour.
pub fn is_insufficient_material(board: &Board) -> bool {
    // Any pawn, rook or queen can still force mate.
    let heavy = [Piece::Pawn, Piece::Rook, Piece::Queen]
        .into_iter()
        .any(|p| board.pieces(p, Color::White) | board.pieces(p, Color::Black) != 0);
    if heavy {
        return false;
    }

    let knights = board.pieces(Piece::Knight, Color::White) | board.pieces(Piece::Knight, Color::Black);
    let bishops = board.pieces(Piece::Bishop, Color::White) | board.pieces(Piece::Bishop, Color::Black);

    match (knights.count_ones(), bishops.count_ones()) {
        // K vs K, K+N vs K, K+B vs K
        (0, 0) | (1, 0) | (0, 1) => true,
        // Same-coloured bishops can never attack a square of the other colour.
        (0, _) => bishops & LIGHT_SQUARES == 0 || bishops & DARK_SQUARES == 0,
        _ => false,
    }
}

/// Status of `board` given how many times its key has occurred (current
/// position included).
///
/// Priority (highest → lowest):
///  1) `Checkmate` / `Stalemate`
///  2) `DrawInsufficientMaterial`
///  3) `DrawRepetition`
///  4) `DrawFiftyMove`
///  5) `Check` / `Ongoing`
pub fn position_status(board: &Board, repetitions: usize) -> GameStatus {
    let mut legal = MoveList::new();
    generate_legal(board, &mut legal);
    let checked = in_check(board, board.side_to_move);

    if legal.is_empty() {
        return if checked {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }
    if is_insufficient_material(board) {
        return GameStatus::DrawInsufficientMaterial;
    }
    if is_draw_by_repetition(repetitions) {
        return GameStatus::DrawRepetition;
    }
    if is_draw_by_fifty_move(board) {
        return GameStatus::DrawFiftyMove;
    }
    if checked {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}
