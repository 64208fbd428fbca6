// src/board/castle_bits.rs

use super::Color;

/// Underlying bit type for castling rights.
pub type CastleBits = u8;

pub const CASTLE_WK: CastleBits = 0b0001;
pub const CASTLE_WQ: CastleBits = 0b0010;
pub const CASTLE_BK: CastleBits = 0b0100;
pub const CASTLE_BQ: CastleBits = 0b1000;
pub const CASTLE_ALL: CastleBits = CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ;

/// FEN letters in K, Q, k, q order, paired with their bit.
pub const CASTLE_GLYPHS: [(char, CastleBits); 4] = [
    ('K', CASTLE_WK),
    ('Q', CASTLE_WQ),
    ('k', CASTLE_BK),
    ('q', CASTLE_BQ),
];

#[inline(always)]
pub const fn kingside_right(color: Color) -> CastleBits {
    match color {
        Color::White => CASTLE_WK,
        Color::Black => CASTLE_BK,
    }
}

#[inline(always)]
pub const fn queenside_right(color: Color) -> CastleBits {
    match color {
        Color::White => CASTLE_WQ,
        Color::Black => CASTLE_BQ,
    }
}

/// Both rights of one side; cleared together when that king moves.
#[inline(always)]
pub const fn rights_for(color: Color) -> CastleBits {
    kingside_right(color) | queenside_right(color)
}

/// The right tied to a rook standing on (or leaving, or captured on) `sq_idx`.
#[inline(always)]
pub const fn rook_corner_right(color: Color, sq_idx: u8) -> CastleBits {
    match (color, sq_idx) {
        (Color::White, 0) => CASTLE_WQ,  // a1
        (Color::White, 7) => CASTLE_WK,  // h1
        (Color::Black, 56) => CASTLE_BQ, // a8
        (Color::Black, 63) => CASTLE_BK, // h8
        _ => 0,
    }
}

/// Home squares of the king and rook a right depends on: (king, rook).
#[inline(always)]
pub const fn right_home_squares(right: CastleBits) -> (u8, u8) {
    match right {
        CASTLE_WK => (4, 7),
        CASTLE_WQ => (4, 0),
        CASTLE_BK => (60, 63),
        _ => (60, 56),
    }
}
