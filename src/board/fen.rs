use super::fen_tables::{glyph_to_piece, piece_to_glyph};
use super::{Board, CASTLE_GLYPHS, CastleBits, Color, Piece, right_home_squares};
use crate::bitboard::{RANK_1, RANK_8};
use crate::error::FenError;
use crate::moves::square_control::in_check;
use crate::square::Square;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Load a six-field FEN. On error the board is left untouched.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        let mut b = Board::new_empty();
        parse_placement(&mut b, fields[0])?;

        b.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        b.castling_rights = parse_castling(fields[2])?;
        b.en_passant = parse_en_passant(fields[3])?;

        b.halfmove_clock = fields[4].parse().map_err(|_| FenError::Counter {
            field: "halfmove",
            value: fields[4].to_string(),
        })?;
        b.fullmove_number = match fields[5].parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => {
                return Err(FenError::Counter {
                    field: "fullmove",
                    value: fields[5].to_string(),
                });
            }
        };

        validate_position(&b)?;

        b.refresh_zobrist();
        *self = b;
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let sq = Square::from_index(rank * 8 + file);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece_to_glyph(color, piece));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling_rights == 0 {
            fen.push('-');
        } else {
            for (glyph, bit) in CASTLE_GLYPHS {
                if self.castling_rights & bit != 0 {
                    fen.push(glyph);
                }
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }
}

fn parse_placement(b: &mut Board, field: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::Placement(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file: u8 = 0;
        for c in rank_str.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FenError::Placement(format!("bad empty run {c:?}")));
                }
                file += run as u8;
            } else {
                let (piece, color) = glyph_to_piece(c)
                    .ok_or_else(|| FenError::Placement(format!("unknown piece {c:?}")))?;
                let sq = Square::from_file_rank(file, rank).ok_or_else(|| {
                    FenError::Placement(format!("rank {} overflows", rank + 1))
                })?;
                b.put(color, piece, sq);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::Placement(format!("rank {} overflows", rank + 1)));
            }
        }
        if file != 8 {
            return Err(FenError::Placement(format!(
                "rank {} has {} files",
                rank + 1,
                file
            )));
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastleBits, FenError> {
    if field == "-" {
        return Ok(0);
    }
    if field.is_empty() {
        return Err(FenError::Castling(String::new()));
    }
    let mut rights: CastleBits = 0;
    // Letters must appear in K, Q, k, q order, each at most once.
    let mut next = 0;
    for c in field.chars() {
        let pos = CASTLE_GLYPHS[next..]
            .iter()
            .position(|&(glyph, _)| glyph == c)
            .ok_or_else(|| FenError::Castling(field.to_string()))?;
        rights |= CASTLE_GLYPHS[next + pos].1;
        next += pos + 1;
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    field
        .parse::<Square>()
        .map(Some)
        .map_err(|_| FenError::EnPassant(field.to_string()))
}

/// Reject placements that cannot arise in a game.
fn validate_position(b: &Board) -> Result<(), FenError> {
    for color in [Color::White, Color::Black] {
        let count = b.pieces(Piece::King, color).count_ones();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    let pawns = b.pieces(Piece::Pawn, Color::White) | b.pieces(Piece::Pawn, Color::Black);
    let misplaced = pawns & (RANK_1 | RANK_8);
    if misplaced != 0 {
        return Err(FenError::PawnOnBackRank(Square::from_index(
            misplaced.trailing_zeros() as u8,
        )));
    }

    for (glyph, bit) in CASTLE_GLYPHS {
        if b.castling_rights & bit == 0 {
            continue;
        }
        let color = if glyph.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let (king, rook) = right_home_squares(bit);
        let king_home = b.piece_at(Square::from_index(king)) == Some((color, Piece::King));
        let rook_home = b.piece_at(Square::from_index(rook)) == Some((color, Piece::Rook));
        if !king_home || !rook_home {
            return Err(FenError::CastlingWithoutPieces { right: glyph });
        }
    }

    if let Some(ep) = b.en_passant {
        // The pawn that just double-pushed belongs to the side not to move.
        let (ep_rank, pushed_idx, origin_idx) = match b.side_to_move {
            Color::White => (5, ep.index().wrapping_sub(8), ep.index() + 8),
            Color::Black => (2, ep.index() + 8, ep.index().wrapping_sub(8)),
        };
        let mover = b.side_to_move.opposite();
        let ok = ep.rank() == ep_rank
            && b.piece_at(ep).is_none()
            && b.piece_at(Square::from_index(origin_idx)).is_none()
            && b.piece_at(Square::from_index(pushed_idx)) == Some((mover, Piece::Pawn));
        if !ok {
            return Err(FenError::EnPassant(ep.to_string()));
        }
    }

    let waiting = b.side_to_move.opposite();
    if in_check(b, waiting) {
        return Err(FenError::OpponentInCheck(waiting));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn start_fen_matches_new() {
        let parsed = Board::from_str(START_FEN).unwrap();
        assert_eq!(parsed, Board::new());
        assert_eq!(Board::new().to_fen(), START_FEN);
    }

    #[test]
    fn castling_letters_must_be_ordered() {
        assert_eq!(parse_castling("KQkq").unwrap(), super::super::CASTLE_ALL);
        assert_eq!(parse_castling("Kq").unwrap().count_ones(), 2);
        assert!(parse_castling("qK").is_err());
        assert!(parse_castling("KK").is_err());
        assert!(parse_castling("X").is_err());
        assert!(parse_castling("").is_err());
    }

    #[test]
    fn failed_load_leaves_board_untouched() {
        let mut b = Board::new();
        assert!(b.set_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert_eq!(b, Board::new());
    }
}
