use std::str::FromStr;

use rookery::board::{Board, Piece};
use rookery::moves::movegen::generate_pawn_moves;
use rookery::moves::types::{MoveFlag, MoveList};

fn pawn_moves(fen: &str) -> MoveList {
    let board = Board::from_str(fen).unwrap();
    let mut moves = MoveList::new();
    generate_pawn_moves(&board, &mut moves);
    moves
}

#[test]
fn start_position_white_pawns() {
    let moves = pawn_moves("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(moves.len(), 16, "8 pushes + 8 doubles");
    assert_eq!(moves.iter().filter(|m| m.flag == MoveFlag::DoublePawnPush).count(), 8);
}

#[test]
fn start_position_black_pawns() {
    let moves = pawn_moves("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    assert_eq!(moves.len(), 16);
    assert!(moves.iter().all(|m| m.to.rank() == 5 || m.to.rank() == 4));
}

#[test]
fn promotion_pushes_only() {
    let moves = pawn_moves("7k/P7/8/8/8/8/8/K7 w - - 0 1");
    assert_eq!(moves.len(), 4, "N, B, R, Q");
    let mut promos: Vec<Piece> = moves.iter().filter_map(|m| m.promotion).collect();
    promos.sort_by_key(|p| *p as u8);
    assert_eq!(promos, vec![Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]);
}

#[test]
fn promotion_captures_only() {
    // a8 blocked by a rook, b8 holds a knight to take.
    let moves = pawn_moves("rn5k/P7/8/8/8/8/8/K7 w - - 0 1");
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|m| m.flag == MoveFlag::Capture && m.is_promotion()));
}

#[test]
fn black_promotes_on_first_rank() {
    let moves = pawn_moves("7k/8/8/8/8/8/p7/7K b - - 0 1");
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|m| m.to.rank() == 0 && m.is_promotion()));
}

#[test]
fn blocked_pawn_has_no_moves() {
    assert!(pawn_moves("7k/8/8/8/8/4p3/4P3/K7 w - - 0 1").is_empty());
}

#[test]
fn double_push_needs_both_squares_empty() {
    let moves = pawn_moves("7k/8/8/8/4p3/8/4P3/K7 w - - 0 1");
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to_uci(), "e2e3");
}

#[test]
fn en_passant_from_both_sides() {
    let moves = pawn_moves("4k3/8/8/2PpP3/8/8/8/4K3 w - d6 0 1");
    let ep: Vec<String> = moves
        .iter()
        .filter(|m| m.is_en_passant())
        .map(|m| m.to_uci())
        .collect();
    assert_eq!(ep.len(), 2);
    assert!(ep.contains(&"c5d6".to_string()));
    assert!(ep.contains(&"e5d6".to_string()));
    assert_eq!(moves.len(), 4, "two pushes plus two en passant captures");
}

#[test]
fn edge_pawns_do_not_wrap() {
    // h4 + 9 is a6; the pawn must not wrap around and take there.
    let moves = pawn_moves("7k/8/p7/8/7P/8/8/K7 w - - 0 1");
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to_uci(), "h4h5");
}
