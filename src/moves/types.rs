use crate::board::{CastleBits, Color, Piece};
use crate::square::Square;
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Upper bound on legal moves in any chess position is 218.
pub const MAX_MOVES: usize = 256;

pub type MoveList = ArrayVec<Move, MAX_MOVES>;

pub trait MoveBuffer: Deref<Target = [Move]> + DerefMut {
    fn push(&mut self, mv: Move);
    fn clear(&mut self);
}

impl MoveBuffer for Vec<Move> {
    fn push(&mut self, mv: Move) {
        Vec::push(self, mv);
    }
    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<const N: usize> MoveBuffer for ArrayVec<Move, N> {
    fn push(&mut self, mv: Move) {
        ArrayVec::push(self, mv);
    }
    fn clear(&mut self) {
        ArrayVec::clear(self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveFlag {
    Normal,
    Capture,
    DoublePawnPush,
    EnPassant,
    CastleKingside,
    CastleQueenside,
}

/// A move relative to the board it was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub promotion: Option<Piece>,
    pub flag: MoveFlag,
}

impl Move {
    #[inline(always)]
    pub fn new(from: Square, to: Square, piece: Piece, flag: MoveFlag) -> Self {
        Move {
            from,
            to,
            piece,
            promotion: None,
            flag,
        }
    }

    /// En passant counts as a capture.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        matches!(self.flag, MoveFlag::Capture | MoveFlag::EnPassant)
    }

    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.flag == MoveFlag::EnPassant
    }

    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        matches!(
            self.flag,
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside
        )
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    #[inline(always)]
    pub fn is_double_pawn_push(&self) -> bool {
        self.flag == MoveFlag::DoublePawnPush
    }

    /// Coordinate notation: `e2e4`, `e7e8q`.
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }

        // "{:#}" adds a tag for special moves
        if f.alternate() {
            if self.is_castling() {
                write!(f, " (castle)")?;
            } else if self.is_en_passant() {
                write!(f, " (ep)")?;
            } else if self.is_capture() {
                write!(f, " (x)")?;
            }
        }
        Ok(())
    }
}

/// Everything `undo_move` needs to restore the board exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    pub color: Color,
    /// Captured piece and the square it stood on (differs from `mv.to` for en passant).
    pub capture: Option<(Color, Piece, Square)>,
    pub castling_rook: Option<(Square /*rook_from*/, Square /*rook_to*/)>,
    pub prev_castling_rights: CastleBits,
    pub prev_en_passant: Option<Square>,
    pub prev_halfmove_clock: u32,
    pub prev_fullmove_number: u32,
    /// Zobrist key of the position before the move.
    pub prev_zobrist: u64,
}
