use crate::board::castle_bits::*;
use crate::board::{Board, Color, EMPTY_SQ, Piece};
use crate::error::{GameError, IllegalMoveReason};
use crate::hash::zobrist::{ep_file_to_hash, xor_castling_rights_delta, zobrist_keys};
use crate::moves::movegen::generate_pseudo_legal;
use crate::moves::square_control::{in_check, is_legal_castling};
use crate::moves::types::{Move, MoveBuffer, MoveFlag, MoveList, Undo};
use crate::square::Square;

/// Rook origin and destination for a castling move, keyed by king destination.
#[inline(always)]
fn rook_castle_squares(king_to_idx: u8) -> Option<(Square, Square)> {
    match king_to_idx {
        6 => Some((Square::from_index(7), Square::from_index(5))), // White O-O
        2 => Some((Square::from_index(0), Square::from_index(3))), // White O-O-O
        62 => Some((Square::from_index(63), Square::from_index(61))), // Black O-O
        58 => Some((Square::from_index(56), Square::from_index(59))), // Black O-O-O
        _ => None,
    }
}

#[inline(always)]
fn remove_piece(board: &mut Board, color: Color, piece: Piece, idx: u8) {
    let new_bb = board.bb(color, piece) & !(1u64 << idx);
    board.set_bb(color, piece, new_bb);
}

#[inline(always)]
fn place_piece(board: &mut Board, color: Color, piece: Piece, idx: u8) {
    let new_bb = board.bb(color, piece) | (1u64 << idx);
    board.set_bb(color, piece, new_bb);
}

/// Square of the pawn taken by an en passant capture landing on `to`.
#[inline(always)]
fn en_passant_victim(color: Color, to: u8) -> u8 {
    match color {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

/// Play `mv` in place. The move is trusted: callers pass moves produced by
/// the generator for this exact board.
pub fn make_move(board: &mut Board, mv: Move) -> Undo {
    let keys = zobrist_keys();
    let prev_zobrist = board.zobrist;
    let color = board.side_to_move;
    let piece = mv.piece;
    let from_idx = mv.from.index();
    let to_idx = mv.to.index();

    let prev_en_passant = board.en_passant;
    let prev_halfmove_clock = board.halfmove_clock;
    let prev_fullmove_number = board.fullmove_number;
    let old_rights = board.castling_rights;

    // A live EP file is part of the key; take it out before anything moves.
    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= keys.ep_file[f as usize];
    }
    board.en_passant = None;

    // Capture
    let capture = if mv.is_en_passant() {
        let cap_idx = en_passant_victim(color, to_idx);
        remove_piece(board, color.opposite(), Piece::Pawn, cap_idx);
        Some((color.opposite(), Piece::Pawn, Square::from_index(cap_idx)))
    } else {
        let occupant = board.piece_on_sq[to_idx as usize];
        (occupant != EMPTY_SQ).then(|| {
            let cap_color = Color::from_u8(occupant >> 3);
            let cap_piece = Piece::from_u8(occupant & 0b111);
            remove_piece(board, cap_color, cap_piece, to_idx);
            (cap_color, cap_piece, mv.to)
        })
    };

    let castling_rook = if mv.is_castling() {
        rook_castle_squares(to_idx)
    } else {
        None
    };

    // Rights lost this move: king moves, rook leaves its corner, or a rook is
    // taken on its corner.
    let mut mask_to_clear: CastleBits = 0;
    if piece == Piece::King {
        mask_to_clear |= rights_for(color);
    }
    if piece == Piece::Rook {
        mask_to_clear |= rook_corner_right(color, from_idx);
    }
    if let Some((cap_color, Piece::Rook, cap_sq)) = capture {
        mask_to_clear |= rook_corner_right(cap_color, cap_sq.index());
    }
    let new_rights = old_rights & !mask_to_clear;
    if new_rights != old_rights {
        board.castling_rights = new_rights;
        xor_castling_rights_delta(&mut board.zobrist, keys, old_rights, new_rights);
    }

    remove_piece(board, color, piece, from_idx);
    match mv.promotion {
        Some(prom) => {
            debug_assert!(piece == Piece::Pawn, "only pawns promote");
            place_piece(board, color, prom, to_idx);
        }
        None => place_piece(board, color, piece, to_idx),
    }

    if let Some((rook_from, rook_to)) = castling_rook {
        remove_piece(board, color, Piece::Rook, rook_from.index());
        place_piece(board, color, Piece::Rook, rook_to.index());
    }

    if mv.flag == MoveFlag::DoublePawnPush {
        let ep_idx = (from_idx + to_idx) / 2;
        board.en_passant = Some(Square::from_index(ep_idx));
    }

    board.halfmove_clock = if capture.is_some() || piece == Piece::Pawn {
        0
    } else {
        prev_halfmove_clock.saturating_add(1)
    };
    if color == Color::Black {
        board.fullmove_number = prev_fullmove_number.saturating_add(1);
    }

    board.side_to_move = color.opposite();
    board.zobrist ^= keys.side_to_move;

    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= keys.ep_file[f as usize];
    }

    #[cfg(debug_assertions)]
    {
        debug_assert_valid_ep(board);
        board.assert_hash();
    }

    Undo {
        mv,
        color,
        capture,
        castling_rook,
        prev_castling_rights: old_rights,
        prev_en_passant,
        prev_halfmove_clock,
        prev_fullmove_number,
        prev_zobrist,
    }
}

/// Exact inverse of [`make_move`].
pub fn undo_move(board: &mut Board, undo: Undo) {
    let keys = zobrist_keys();

    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= keys.ep_file[f as usize];
    }

    board.side_to_move = undo.color;
    board.zobrist ^= keys.side_to_move;

    let cur = board.castling_rights;
    if cur != undo.prev_castling_rights {
        xor_castling_rights_delta(&mut board.zobrist, keys, cur, undo.prev_castling_rights);
        board.castling_rights = undo.prev_castling_rights;
    }

    board.halfmove_clock = undo.prev_halfmove_clock;
    board.fullmove_number = undo.prev_fullmove_number;

    let mv = undo.mv;
    let from_idx = mv.from.index();
    let to_idx = mv.to.index();

    // The piece on `to` is the promoted piece when there was a promotion.
    remove_piece(board, undo.color, mv.promotion.unwrap_or(mv.piece), to_idx);
    place_piece(board, undo.color, mv.piece, from_idx);

    // EP captures restore the pawn behind `to`, which `capture` records.
    if let Some((cap_color, cap_piece, cap_sq)) = undo.capture {
        place_piece(board, cap_color, cap_piece, cap_sq.index());
    }

    if let Some((rook_from, rook_to)) = undo.castling_rook {
        remove_piece(board, undo.color, Piece::Rook, rook_to.index());
        place_piece(board, undo.color, Piece::Rook, rook_from.index());
    }

    board.en_passant = undo.prev_en_passant;
    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= keys.ep_file[f as usize];
    }

    debug_assert_eq!(
        board.zobrist, undo.prev_zobrist,
        "undo of {} did not restore the key",
        mv
    );
}

/// Legal moves for the side to move. Each pseudo-legal move is played on a
/// scratch copy and dropped if it leaves the mover's king attacked.
pub fn generate_legal(board: &Board, moves: &mut impl MoveBuffer) {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal(board, &mut pseudo);
    moves.clear();

    let mut scratch = board.clone();
    for mv in pseudo {
        if is_legal_move(&mut scratch, mv) {
            moves.push(mv);
        }
    }
}

/// Convenience wrapper returning a fresh list.
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    generate_legal(board, &mut moves);
    moves
}

/// Whether a pseudo-legal move keeps the mover's king safe. Castling also
/// requires origin, transit and destination to be unattacked.
#[inline]
pub fn is_legal_move(board: &mut Board, mv: Move) -> bool {
    if mv.is_castling() && !is_legal_castling(board, mv) {
        return false;
    }
    let mover = board.side_to_move;
    let undo = make_move(board, mv);
    let illegal = in_check(board, mover);
    undo_move(board, undo);
    !illegal
}

/// Validated functional form: returns the successor board, or an error when
/// `mv` is not one of the legal moves of `board`.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board, GameError> {
    if !legal_moves(board).contains(&mv) {
        return Err(GameError::IllegalMove {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
            reason: IllegalMoveReason::NoSuchMove,
        });
    }
    let mut next = board.clone();
    make_move(&mut next, mv);
    Ok(next)
}

#[cfg(debug_assertions)]
#[inline]
pub(crate) fn debug_assert_valid_ep(board: &Board) {
    if let Some(ep) = board.en_passant {
        let expected_rank = match board.side_to_move {
            // Black just double-pushed
            Color::White => 5,
            Color::Black => 2,
        };
        debug_assert_eq!(
            ep.rank(),
            expected_rank,
            "EP square {ep} on wrong rank with {} to move",
            board.side_to_move
        );
    }
}
