use crate::bitboard::{FILE_A, FILE_H};
use crate::board::{Board, Color, Piece};
use crate::moves::king::KING_ATTACKS;
use crate::moves::knight::KNIGHT_ATTACKS;
use crate::moves::pawn::pawn_attacks;
use crate::moves::sliders::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::types::{Move, MoveFlag};
use crate::square::Square;

/// Returns a bitboard showing all the squares that *piece* could attack from *square*
pub fn attacks_from(piece: Piece, color: Color, square: u8, blockers: u64) -> u64 {
    let sq = square as usize;

    match piece {
        Piece::Knight => KNIGHT_ATTACKS[sq],
        Piece::King => KING_ATTACKS[sq],
        Piece::Pawn => pawn_attacks(square, color),
        Piece::Bishop => bishop_attacks(sq, blockers),
        Piece::Rook => rook_attacks(sq, blockers),
        Piece::Queen => queen_attacks(sq, blockers),
    }
}

/// Whether any piece of `attacker` hits `square` with its raw movement
/// pattern. Pins are irrelevant here; pawns only count diagonally.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let index = square.index() as usize;
    let target = square.bit();

    // Squares a pawn of `attacker` would have to stand on to hit `target`.
    let pawn_attackers = match attacker {
        Color::White => ((target & !FILE_H) >> 7) | ((target & !FILE_A) >> 9),
        Color::Black => ((target & !FILE_A) << 7) | ((target & !FILE_H) << 9),
    };

    if pawn_attackers & board.pieces(Piece::Pawn, attacker) != 0 {
        return true;
    }
    if KNIGHT_ATTACKS[index] & board.pieces(Piece::Knight, attacker) != 0 {
        return true;
    }
    if KING_ATTACKS[index] & board.pieces(Piece::King, attacker) != 0 {
        return true;
    }

    let occupied = board.occupied();
    let queens = board.pieces(Piece::Queen, attacker);

    let straight = board.pieces(Piece::Rook, attacker) | queens;
    if straight != 0 && rook_attacks(index, occupied) & straight != 0 {
        return true;
    }

    let diagonal = board.pieces(Piece::Bishop, attacker) | queens;
    diagonal != 0 && bishop_attacks(index, occupied) & diagonal != 0
}

/// True when `side`'s king is attacked. A board without that king is never in check.
#[inline(always)]
pub fn in_check(board: &Board, side: Color) -> bool {
    board
        .king_square(side)
        .is_some_and(|king_sq| is_square_attacked(board, king_sq, side.opposite()))
}

/// The king may not castle out of, through, or into an attacked square.
pub fn is_legal_castling(board: &Board, mv: Move) -> bool {
    let color = board.side_to_move;

    let (start_idx, middle_idx, end_idx) = match (color, mv.flag) {
        (Color::White, MoveFlag::CastleKingside) => (4, 5, 6),
        (Color::White, MoveFlag::CastleQueenside) => (4, 3, 2),
        (Color::Black, MoveFlag::CastleKingside) => (60, 61, 62),
        (Color::Black, MoveFlag::CastleQueenside) => (60, 59, 58),
        _ => return false,
    };

    let opp = color.opposite();
    [start_idx, middle_idx, end_idx]
        .into_iter()
        .all(|idx| !is_square_attacked(board, Square::from_index(idx), opp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{king, knight, pawn};

    #[test]
    fn knight_attacks_center() {
        let d4 = 3 + 8 * 3;
        assert_eq!(
            attacks_from(Piece::Knight, Color::White, d4, 0),
            knight::KNIGHT_ATTACKS[d4 as usize]
        );
    }

    #[test]
    fn king_attacks_corner() {
        let h8 = 7 + 8 * 7;
        assert_eq!(
            attacks_from(Piece::King, Color::White, h8, 0),
            king::KING_ATTACKS[h8 as usize]
        );
    }

    #[test]
    fn black_pawn_attacks_edge() {
        let a5 = 8 * 4;
        assert_eq!(
            attacks_from(Piece::Pawn, Color::Black, a5, 0),
            pawn::pawn_attacks(a5, Color::Black)
        );
    }

    #[test]
    fn queen_attacks_combined() {
        let e4 = 4 + 8 * 3;
        let blockers = (1 << (e4 + 8)) | (1 << (e4 - 7));
        let expected = bishop_attacks(e4 as usize, blockers) | rook_attacks(e4 as usize, blockers);
        assert_eq!(attacks_from(Piece::Queen, Color::White, e4, blockers), expected);
    }
}
