mod fen;
mod render;

use crate::bitboard::BitboardExt;
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod castle_bits;
mod fen_tables;
pub use castle_bits::*;
pub use fen::START_FEN;

/// Starting position constants
// White side (ranks 1 & 2)
const WHITE_PAWN_MASK: u64 = 0x0000_0000_0000_FF00;
// Rooks on a1 (bit 0) and h1 (bit 7)
const WHITE_ROOK_MASK: u64 = (1 << 0) | (1 << 7);
// Knights on b1 (bit 1) and g1 (bit 6)
const WHITE_KNIGHT_MASK: u64 = (1 << 1) | (1 << 6);
// Bishops on c1 (bit 2) and f1 (bit 5)
const WHITE_BISHOP_MASK: u64 = (1 << 2) | (1 << 5);
const WHITE_QUEEN_MASK: u64 = 1 << 3;
const WHITE_KING_MASK: u64 = 1 << 4;

// Black side (ranks 7 & 8)
const BLACK_PAWN_MASK: u64 = 0x00FF_0000_0000_0000;
const BLACK_ROOK_MASK: u64 = (1 << 56) | (1 << 63);
const BLACK_KNIGHT_MASK: u64 = (1 << 57) | (1 << 62);
const BLACK_BISHOP_MASK: u64 = (1 << 58) | (1 << 61);
const BLACK_QUEEN_MASK: u64 = 1 << 59;
const BLACK_KING_MASK: u64 = 1 << 60;

// Empty square value, no piece 0-13 will coincide with 255
pub(crate) const EMPTY_SQ: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

/// Piece kind, without colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// Piece placement plus everything else a position needs: side to move,
/// castling rights, en passant target, clocks and the Zobrist key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// [color][piece]
    pub piece_bb: [[u64; 6]; 2],
    pub occ_white: u64,
    pub occ_black: u64,
    pub occ_all: u64,
    /// 0xFF = empty, otherwise (color << 3) | piece
    pub piece_on_sq: [u8; 64],
    pub side_to_move: Color,
    /// bit 0 = White kingside, 1 = White queenside, 2 = Black kingside, 3 = Black queenside
    pub castling_rights: CastleBits,
    /// Square the capturing pawn lands on, set only right after a double push.
    pub en_passant: Option<Square>,
    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Starts at 1 and increments after Black's move.
    pub fullmove_number: u32,
    pub zobrist: u64,
}

impl Board {
    /// Recompute from current state and store into `self.zobrist`.
    #[inline]
    pub fn refresh_zobrist(&mut self) {
        self.zobrist = self.compute_zobrist_full();
    }

    #[inline(always)]
    pub(crate) fn bb(&self, color: Color, piece: Piece) -> u64 {
        self.piece_bb[color as usize][piece as usize]
    }

    /// Replace one piece bitboard, keeping occupancy, mailbox and Zobrist in step.
    #[inline(always)]
    pub(crate) fn set_bb(&mut self, color: Color, piece: Piece, new_bb: u64) {
        use crate::hash::zobrist::zobrist_keys;
        let ci = color as usize;
        let pi = piece as usize;

        let old_bb = self.piece_bb[ci][pi];
        let delta = old_bb ^ new_bb;
        if delta == 0 {
            return;
        }

        self.piece_bb[ci][pi] = new_bb;

        if color == Color::White {
            self.occ_white ^= delta;
        } else {
            self.occ_black ^= delta;
        }
        self.occ_all = self.occ_white | self.occ_black;

        let keys = zobrist_keys();

        let mut bits_to_update = delta;
        while bits_to_update != 0 {
            let single_bit = bits_to_update & bits_to_update.wrapping_neg();
            let sq_idx = single_bit.trailing_zeros() as usize;

            if new_bb & single_bit != 0 {
                self.piece_on_sq[sq_idx] = (color as u8) << 3 | (piece as u8);
            } else {
                self.piece_on_sq[sq_idx] = EMPTY_SQ;
            }

            self.zobrist ^= keys.piece[ci][pi][sq_idx];

            bits_to_update &= bits_to_update - 1;
        }
    }

    /// Put a piece on an empty square. Used by position setup and tests.
    pub fn put(&mut self, color: Color, piece: Piece, sq: Square) {
        debug_assert!(self.piece_at(sq).is_none(), "put on occupied {sq}");
        let new_bb = self.bb(color, piece) | sq.bit();
        self.set_bb(color, piece, new_bb);
    }

    /// Create an empty board (no pieces, no rights, White to move).
    pub fn new_empty() -> Self {
        let mut b = Board {
            piece_bb: [[0u64; 6]; 2],
            occ_white: 0,
            occ_black: 0,
            occ_all: 0,
            piece_on_sq: [EMPTY_SQ; 64],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist: 0,
        };
        b.refresh_zobrist();
        b
    }

    /// The standard starting position.
    pub fn new() -> Self {
        let mut b = Board::new_empty();
        b.set_bb(Color::White, Piece::Pawn, WHITE_PAWN_MASK);
        b.set_bb(Color::White, Piece::Bishop, WHITE_BISHOP_MASK);
        b.set_bb(Color::White, Piece::Knight, WHITE_KNIGHT_MASK);
        b.set_bb(Color::White, Piece::Rook, WHITE_ROOK_MASK);
        b.set_bb(Color::White, Piece::Queen, WHITE_QUEEN_MASK);
        b.set_bb(Color::White, Piece::King, WHITE_KING_MASK);

        b.set_bb(Color::Black, Piece::Pawn, BLACK_PAWN_MASK);
        b.set_bb(Color::Black, Piece::Bishop, BLACK_BISHOP_MASK);
        b.set_bb(Color::Black, Piece::Knight, BLACK_KNIGHT_MASK);
        b.set_bb(Color::Black, Piece::Rook, BLACK_ROOK_MASK);
        b.set_bb(Color::Black, Piece::Queen, BLACK_QUEEN_MASK);
        b.set_bb(Color::Black, Piece::King, BLACK_KING_MASK);

        b.side_to_move = Color::White;
        b.castling_rights = CASTLE_ALL;
        b.en_passant = None;
        b.halfmove_clock = 0;
        b.fullmove_number = 1;
        b.refresh_zobrist();
        b
    }

    /// Bitboard of all pieces (both colors).
    #[inline(always)]
    pub fn occupied(&self) -> u64 {
        self.occ_all
    }

    #[inline(always)]
    pub fn has_castling(&self, flag: CastleBits) -> bool {
        self.castling_rights & flag != 0
    }

    /// Validate that no square is occupied by more than one piece and that the
    /// mailbox agrees with the bitboards.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen: u64 = 0;
        for color in [Color::White, Color::Black] {
            for piece in ALL_PIECES {
                let bb = self.bb(color, piece);
                if seen & bb != 0 {
                    return Err(format!("{color:?} {piece:?} bitboard overlaps another piece"));
                }
                seen |= bb;
            }
        }
        if seen != self.occ_all {
            return Err("occupancy out of sync with piece bitboards".to_string());
        }
        for sq in Square::all() {
            let from_bb = self.piece_at(sq);
            let expected = ALL_PIECES.iter().find_map(|&p| {
                [Color::White, Color::Black]
                    .into_iter()
                    .find(|&c| self.bb(c, p) & sq.bit() != 0)
                    .map(|c| (c, p))
            });
            if from_bb != expected {
                return Err(format!("mailbox mismatch on {sq}"));
            }
        }
        Ok(())
    }

    /// Bitboard of all pieces for one side.
    #[inline(always)]
    pub fn occupancy(&self, color: Color) -> u64 {
        match color {
            Color::White => self.occ_white,
            Color::Black => self.occ_black,
        }
    }

    pub fn opponent_occupancy(&self, color: Color) -> u64 {
        self.occupancy(color.opposite())
    }

    #[inline(always)]
    pub fn pieces(&self, piece: Piece, color: Color) -> u64 {
        self.bb(color, piece)
    }

    /// Returns the piece and color at a given square, or None if empty.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let val = self.piece_on_sq[sq.index() as usize];
        if val == EMPTY_SQ {
            None
        } else {
            Some((Color::from_u8((val >> 3) & 1), Piece::from_u8(val & 0b111)))
        }
    }

    #[inline(always)]
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    #[inline(always)]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    #[inline(always)]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline(always)]
    pub fn has_kingside_castle(&self, color: Color) -> bool {
        self.castling_rights & kingside_right(color) != 0
    }

    #[inline(always)]
    pub fn has_queenside_castle(&self, color: Color) -> bool {
        self.castling_rights & queenside_right(color) != 0
    }

    /// Square of `color`'s king; `None` only for hand-built boards without one.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king_bb = self.pieces(Piece::King, color);
        (king_bb != 0).then(|| Square::from_index(king_bb.lsb()))
    }

    /// Full recompute from current state. Must match the incremental hash at all times.
    pub fn compute_zobrist_full(&self) -> u64 {
        use crate::hash::zobrist::{ep_file_to_hash, xor_castling_rights_delta, zobrist_keys};

        let keys = zobrist_keys();
        let mut board_hash: u64 = 0;

        for color in [Color::White, Color::Black] {
            for piece in ALL_PIECES {
                let mut bb = self.bb(color, piece);
                while bb != 0 {
                    let sq = bb.trailing_zeros() as usize;
                    board_hash ^= keys.piece[color as usize][piece as usize][sq];
                    bb &= bb - 1;
                }
            }
        }

        if self.side_to_move == Color::Black {
            board_hash ^= keys.side_to_move;
        }

        xor_castling_rights_delta(&mut board_hash, keys, 0, self.castling_rights);

        if let Some(file) = ep_file_to_hash(self) {
            board_hash ^= keys.ep_file[file as usize];
        }

        board_hash
    }

    #[cfg(debug_assertions)]
    #[inline]
    pub fn assert_hash(&self) {
        let full = self.compute_zobrist_full();
        debug_assert_eq!(
            self.zobrist, full,
            "Zobrist parity mismatch: stored={:#018x}, full={:#018x}",
            self.zobrist, full
        );
    }
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline(always)]
    pub(crate) fn from_u8(v: u8) -> Self {
        if v == 0 { Color::White } else { Color::Black }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl Piece {
    /// Decode a 0–5 value into a Piece. Only mailbox bytes reach this.
    #[inline(always)]
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            0 => Piece::Pawn,
            1 => Piece::Knight,
            2 => Piece::Bishop,
            3 => Piece::Rook,
            4 => Piece::Queen,
            _ => Piece::King,
        }
    }

    /// Lower-case letter used in coordinate notation (`e7e8q`) and FEN.
    pub fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// Parses a promotion letter, either case.
    pub fn from_promotion_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            _ => None,
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(self, Piece::Knight | Piece::Bishop)
    }
}

/// The standard starting position.
impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl FromStr for Board {
    type Err = crate::error::FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new_empty();
        board.set_fen(s)?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
