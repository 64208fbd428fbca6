use std::str::FromStr;

use rookery::board::Board;
use rookery::moves::execute::{generate_legal, legal_moves};
use rookery::moves::movegen::generate_pseudo_legal;
use rookery::moves::square_control::in_check;
use rookery::moves::types::{Move, MoveFlag, MoveList};
use rookery::square::Square;

fn has_move(moves: &[Move], from: &str, to: &str) -> bool {
    let f = Square::from_str(from).unwrap();
    let t = Square::from_str(to).unwrap();
    moves.iter().any(|m| m.from == f && m.to == t)
}

fn legal(fen: &str) -> MoveList {
    legal_moves(&Board::from_str(fen).unwrap())
}

#[test]
fn self_check_is_filtered_out() {
    // White: Ke1, Re2. Black: Re8. Moving Re2->f2 exposes the e-file.
    let moves = legal("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
    assert!(!has_move(&moves, "e2", "f2"), "e2f2 should be filtered (self-check)");
    assert!(has_move(&moves, "e2", "e3"), "sliding along the pin stays legal");
    assert!(has_move(&moves, "e2", "e8"), "capturing the pinner stays legal");
}

#[test]
fn checking_moves_are_kept() {
    let moves = legal("4k3/4n3/8/8/8/8/8/4R2K w - - 0 1");
    assert!(has_move(&moves, "e1", "e7"), "checking capture e1e7 must survive");
}

#[test]
fn en_passant_is_illegal_when_it_opens_the_file() {
    let moves = legal("k3r3/8/8/3pP3/8/8/8/4K2R w - d6 0 1");
    assert!(!moves.iter().any(|m| m.is_en_passant()));
}

#[test]
fn en_passant_is_illegal_when_it_opens_the_rank() {
    // Both pawns leave the fifth rank, exposing Ka5 to Rh5.
    let moves = legal("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    assert!(!moves.iter().any(|m| m.is_en_passant()));
    assert!(has_move(&moves, "e5", "e6"));
}

#[test]
fn en_passant_can_resolve_check() {
    // d7-d5 gave check to Ke4; exd6 removes the checker.
    let moves = legal("8/8/8/3pP3/4K3/8/8/7k w - d6 0 1");
    assert!(moves.iter().any(|m| m.is_en_passant()));
}

#[test]
fn castling_through_attacked_square_is_filtered() {
    // Rf2 covers f1: kingside is out, queenside is fine.
    let moves = legal("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1");
    assert!(!moves.iter().any(|m| m.flag == MoveFlag::CastleKingside));
    assert!(moves.iter().any(|m| m.flag == MoveFlag::CastleQueenside));
}

#[test]
fn castling_out_of_check_is_filtered() {
    let moves = legal("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!moves.iter().any(|m| m.is_castling()));
}

#[test]
fn queenside_castle_allowed_when_only_b_file_attacked() {
    // b1 must be empty but may be attacked.
    let moves = legal("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
    assert!(moves.iter().any(|m| m.flag == MoveFlag::CastleQueenside));
}

#[test]
fn no_castling_without_right() {
    let moves = legal("4k3/8/8/8/8/8/8/R3K2R w - - 0 1");
    assert!(!moves.iter().any(|m| m.is_castling()));
}

#[test]
fn every_legal_move_keeps_king_safe() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let b = Board::from_str(fen).unwrap();
    let mut legal = MoveList::new();
    generate_legal(&b, &mut legal);
    let mut pseudo = MoveList::new();
    generate_pseudo_legal(&b, &mut pseudo);

    assert!(legal.len() <= pseudo.len());
    for mv in &legal {
        let next = rookery::moves::execute::apply_move(&b, *mv).unwrap();
        assert!(!in_check(&next, b.side_to_move), "{mv} leaves the king attacked");
    }
}

#[test]
fn checkmate_and_stalemate_have_no_moves() {
    let mated = Board::from_str("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert!(legal_moves(&mated).is_empty());
    assert!(in_check(&mated, mated.side_to_move));

    let stalemated = Board::from_str("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(legal_moves(&stalemated).is_empty());
    assert!(!in_check(&stalemated, stalemated.side_to_move));
}
