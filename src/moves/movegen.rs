use crate::bitboard::{RANK_1, RANK_2, RANK_7, RANK_8};
use crate::board::{Board, Color, Piece, kingside_right, queenside_right};
use crate::moves::king::KING_ATTACKS;
use crate::moves::knight::KNIGHT_ATTACKS;
use crate::moves::pawn::pawn_attacks;
use crate::moves::sliders::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::types::{Move, MoveBuffer, MoveFlag};
use crate::square::Square;
use crate::utils::pop_lsb;

// Castling Constants
const WHITE_KINGSIDE_BETWEEN: u64 = 0x0000_0000_0000_0060;
const WHITE_QUEENSIDE_BETWEEN: u64 = 0x0000_0000_0000_000E;
const BLACK_KINGSIDE_BETWEEN: u64 = 0x6000_0000_0000_0000;
const BLACK_QUEENSIDE_BETWEEN: u64 = 0x0E00_0000_0000_0000;

const PROMOS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Push one move per target square, flagged capture or normal.
#[inline(always)]
fn push_piece_moves(
    from: u8,
    mut targets: u64,
    enemy: u64,
    move_piece: Piece,
    move_list: &mut impl MoveBuffer,
) {
    while targets != 0 {
        let to = pop_lsb(&mut targets);
        let is_cap = (enemy >> to) & 1 != 0;
        move_list.push(Move::new(
            Square::from_index(from),
            Square::from_index(to),
            move_piece,
            if is_cap {
                MoveFlag::Capture
            } else {
                MoveFlag::Normal
            },
        ));
    }
}

#[inline(always)]
fn push_promotions(from: u8, to: u8, flag: MoveFlag, move_list: &mut impl MoveBuffer) {
    for promo in PROMOS {
        move_list.push(Move {
            from: Square::from_index(from),
            to: Square::from_index(to),
            piece: Piece::Pawn,
            promotion: Some(promo),
            flag,
        });
    }
}

#[inline(always)]
fn kingside_between(color: Color) -> u64 {
    match color {
        Color::White => WHITE_KINGSIDE_BETWEEN,
        Color::Black => BLACK_KINGSIDE_BETWEEN,
    }
}

#[inline(always)]
fn queenside_between(color: Color) -> u64 {
    match color {
        Color::White => WHITE_QUEENSIDE_BETWEEN,
        Color::Black => BLACK_QUEENSIDE_BETWEEN,
    }
}

/// Knights, bishops, rooks and queens share one shape: attack set minus own
/// pieces minus the enemy king.
fn generate_piece_moves(
    board: &Board,
    piece: Piece,
    attacks: impl Fn(usize, u64) -> u64,
    move_list: &mut impl MoveBuffer,
) {
    let color = board.side_to_move;
    let friendly = board.occupancy(color);
    let enemy_king = board.pieces(Piece::King, color.opposite());
    let enemy_without_king = board.opponent_occupancy(color) & !enemy_king;
    let blockers = board.occupied();

    let mut bb = board.pieces(piece, color);
    while bb != 0 {
        let from = pop_lsb(&mut bb);
        let targets = attacks(from as usize, blockers) & !friendly & !enemy_king;
        push_piece_moves(from, targets, enemy_without_king, piece, move_list);
    }
}

pub fn generate_knight_moves(board: &Board, move_list: &mut impl MoveBuffer) {
    generate_piece_moves(board, Piece::Knight, |sq, _| KNIGHT_ATTACKS[sq], move_list);
}

pub fn generate_bishop_moves(board: &Board, move_list: &mut impl MoveBuffer) {
    generate_piece_moves(board, Piece::Bishop, bishop_attacks, move_list);
}

pub fn generate_rook_moves(board: &Board, move_list: &mut impl MoveBuffer) {
    generate_piece_moves(board, Piece::Rook, rook_attacks, move_list);
}

pub fn generate_queen_moves(board: &Board, move_list: &mut impl MoveBuffer) {
    generate_piece_moves(board, Piece::Queen, queen_attacks, move_list);
}

/// King steps plus castling candidates. Castling here only checks rights,
/// rook presence and empty squares; attacked squares are left to
/// `is_legal_castling` in the legal filter.
pub fn generate_king_moves(board: &Board, move_list: &mut impl MoveBuffer) {
    let color = board.side_to_move;
    let king_bb = board.pieces(Piece::King, color);

    if king_bb == 0 {
        return;
    }

    let from = king_bb.trailing_zeros() as u8;
    let friendly = board.occupancy(color);
    let enemy_king = board.pieces(Piece::King, color.opposite());
    let enemy = board.opponent_occupancy(color);

    let targets = KING_ATTACKS[from as usize] & !friendly & !enemy_king;
    push_piece_moves(from, targets, enemy, Piece::King, move_list);

    let occ = board.occupied();
    let rooks = board.pieces(Piece::Rook, color);
    let home = match color {
        Color::White => 4,
        Color::Black => 60,
    };
    if from != home {
        return;
    }

    if board.has_castling(kingside_right(color))
        && rooks & (1u64 << (home + 3)) != 0
        && occ & kingside_between(color) == 0
    {
        move_list.push(Move::new(
            Square::from_index(from),
            Square::from_index(from + 2),
            Piece::King,
            MoveFlag::CastleKingside,
        ));
    }

    if board.has_castling(queenside_right(color))
        && rooks & (1u64 << (home - 4)) != 0
        && occ & queenside_between(color) == 0
    {
        move_list.push(Move::new(
            Square::from_index(from),
            Square::from_index(from - 2),
            Piece::King,
            MoveFlag::CastleQueenside,
        ));
    }
}

pub fn generate_pawn_moves(board: &Board, move_list: &mut impl MoveBuffer) {
    let color = board.side_to_move;
    let pawns = board.pieces(Piece::Pawn, color);
    let enemy_without_king =
        board.opponent_occupancy(color) & !board.pieces(Piece::King, color.opposite());
    let empty = !board.occupied();

    // Pawns one step from promotion, and the rank they promote on.
    let (seventh, promo_rank) = match color {
        Color::White => (RANK_7, RANK_8),
        Color::Black => (RANK_2, RANK_1),
    };
    let forward = |bb: u64| match color {
        Color::White => bb << 8,
        Color::Black => bb >> 8,
    };
    let back = |to: u8, steps: u8| match color {
        Color::White => to - 8 * steps,
        Color::Black => to + 8 * steps,
    };

    // ===== 1) Single pushes (non-promoting) =====
    let single_pushes = forward(pawns) & empty & !promo_rank;
    let mut bb = single_pushes;
    while bb != 0 {
        let to = pop_lsb(&mut bb);
        move_list.push(Move::new(
            Square::from_index(back(to, 1)),
            Square::from_index(to),
            Piece::Pawn,
            MoveFlag::Normal,
        ));
    }

    // ===== 2) Double pushes from the home rank =====
    let home_rank = match color {
        Color::White => RANK_2,
        Color::Black => RANK_7,
    };
    let mut bb = forward(forward(pawns & home_rank) & empty) & empty;
    while bb != 0 {
        let to = pop_lsb(&mut bb);
        move_list.push(Move::new(
            Square::from_index(back(to, 2)),
            Square::from_index(to),
            Piece::Pawn,
            MoveFlag::DoublePawnPush,
        ));
    }

    // ===== 3) Captures, promoting or not =====
    let mut attackers = pawns;
    while attackers != 0 {
        let from = pop_lsb(&mut attackers);
        let mut targets = pawn_attacks(from, color) & enemy_without_king;
        while targets != 0 {
            let to = pop_lsb(&mut targets);
            if (1u64 << to) & promo_rank != 0 {
                push_promotions(from, to, MoveFlag::Capture, move_list);
            } else {
                move_list.push(Move::new(
                    Square::from_index(from),
                    Square::from_index(to),
                    Piece::Pawn,
                    MoveFlag::Capture,
                ));
            }
        }
    }

    // ===== 4) Promotion pushes =====
    let mut bb = forward(pawns & seventh) & empty;
    while bb != 0 {
        let to = pop_lsb(&mut bb);
        push_promotions(back(to, 1), to, MoveFlag::Normal, move_list);
    }

    // ===== 5) En passant =====
    if let Some(ep_sq) = board.en_passant {
        let ep = ep_sq.index();
        if empty & ep_sq.bit() != 0 {
            let cap_sq = back(ep, 1);
            let enemy_pawns = board.pieces(Piece::Pawn, color.opposite());
            if enemy_pawns & (1u64 << cap_sq) != 0 {
                // Our pawns that attack the target are exactly the squares an
                // enemy pawn on the target would attack.
                let mut atk = pawn_attacks(ep, color.opposite()) & pawns;
                while atk != 0 {
                    let from = pop_lsb(&mut atk);
                    move_list.push(Move::new(
                        Square::from_index(from),
                        ep_sq,
                        Piece::Pawn,
                        MoveFlag::EnPassant,
                    ));
                }
            }
        }
    }
}

/// Every move consistent with piece movement and occupancy, before the
/// king-safety filter.
pub fn generate_pseudo_legal(board: &Board, moves: &mut impl MoveBuffer) {
    moves.clear();
    generate_pawn_moves(board, moves);
    generate_knight_moves(board, moves);
    generate_bishop_moves(board, moves);
    generate_rook_moves(board, moves);
    generate_queen_moves(board, moves);
    generate_king_moves(board, moves);
}
