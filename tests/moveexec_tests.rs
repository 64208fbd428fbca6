use std::str::FromStr;
use rookery::board::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, Piece};
use rookery::moves::execute::{apply_move, legal_moves, make_move, undo_move};
use rookery::moves::types::{Move, MoveFlag};
use rookery::square::Square;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// The generated move with this coordinate text; panics if it is not legal.
fn legal(board: &Board, uci: &str) -> Move {
    legal_moves(board)
        .into_iter()
        .find(|m| m.to_uci() == uci)
        .unwrap_or_else(|| panic!("{uci} is not legal in {board}"))
}

fn play(board: &mut Board, line: &[&str]) {
    for uci in line {
        let mv = legal(board, uci);
        make_move(board, mv);
    }
}

#[test]
fn roundtrip_simple_move() {
    let mut b = Board::new();
    let before = b.clone();
    let undo = make_move(&mut b, legal(&before, "e2e3"));
    undo_move(&mut b, undo);
    assert_eq!(b, before);
}

#[test]
fn pawn_capture_updates_mailbox_and_clock() {
    let mut board = Board::new();
    play(&mut board, &["e2e4", "d7d5", "g1f3", "b8c6"]);
    assert_eq!(board.halfmove_clock, 2);
    let before = board.clone();

    let mv = legal(&board, "e4d5");
    assert_eq!(mv.flag, MoveFlag::Capture);
    let undo = make_move(&mut board, mv);

    assert_eq!(board.pieces(Piece::Pawn, Color::Black) & sq("d5").bit(), 0);
    assert_eq!(board.piece_at(sq("d5")), Some((Color::White, Piece::Pawn)));
    assert_eq!(board.piece_at(sq("e4")), None);
    assert_eq!(board.halfmove_clock, 0);
    assert_eq!(board.fullmove_number, 3);
    assert_eq!(undo.capture, Some((Color::Black, Piece::Pawn, sq("d5"))));

    undo_move(&mut board, undo);
    assert_eq!(board, before);
}

#[test]
fn en_passant_removes_pawn_behind_target() {
    let mut board = Board::new();
    play(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(board.en_passant, Some(sq("d6")));
    let before = board.clone();

    let mv = legal(&board, "e5d6");
    assert!(mv.is_en_passant());
    let undo = make_move(&mut board, mv);
    assert_eq!(board.piece_at(sq("d5")), None);
    assert_eq!(board.piece_at(sq("d6")), Some((Color::White, Piece::Pawn)));
    assert_eq!(board.en_passant, None);

    undo_move(&mut board, undo);
    assert_eq!(board, before);
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut board = Board::new();
    play(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert_eq!(board.en_passant, None);
    assert!(legal_moves(&board).iter().all(|m| !m.is_en_passant()));
}

#[test]
fn white_kingside_castle_moves_rook_and_revokes_rights() {
    let mut board = Board::from_str("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let before = board.clone();

    let mv = legal(&board, "e1g1");
    assert_eq!(mv.flag, MoveFlag::CastleKingside);
    let undo = make_move(&mut board, mv);

    assert_eq!(board.piece_at(sq("g1")), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(sq("f1")), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(sq("h1")), None);
    assert_eq!(board.castling_rights, CASTLE_BK | CASTLE_BQ);

    undo_move(&mut board, undo);
    assert_eq!(board, before);
}

#[test]
fn black_queenside_castle() {
    let mut board = Board::from_str("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10").unwrap();
    let mv = legal(&board, "e8c8");
    assert_eq!(mv.flag, MoveFlag::CastleQueenside);
    make_move(&mut board, mv);

    assert_eq!(board.piece_at(sq("c8")), Some((Color::Black, Piece::King)));
    assert_eq!(board.piece_at(sq("d8")), Some((Color::Black, Piece::Rook)));
    assert_eq!(board.castling_rights, CASTLE_WK | CASTLE_WQ);
    assert_eq!(board.halfmove_clock, 4);
    assert_eq!(board.fullmove_number, 11);
}

#[test]
fn rook_move_and_rook_capture_revoke_single_rights() {
    let mut board = Board::from_str("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut board, &["a1a8"]);
    // White loses Q by moving, Black loses q by capture.
    assert_eq!(board.castling_rights, CASTLE_WK | CASTLE_BK);
}

#[test]
fn promotion_with_capture_roundtrip() {
    let mut board = Board::from_str("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before = board.clone();

    let mv = legal(&board, "a7b8n");
    assert_eq!(mv.flag, MoveFlag::Capture);
    assert_eq!(mv.promotion, Some(Piece::Knight));

    let undo = make_move(&mut board, mv);
    assert_eq!(board.piece_at(sq("b8")), Some((Color::White, Piece::Knight)));
    assert_eq!(board.pieces(Piece::Pawn, Color::White), 0);
    assert_eq!(board.pieces(Piece::Rook, Color::Black), 0);

    undo_move(&mut board, undo);
    assert_eq!(board, before);
}

#[test]
fn apply_move_leaves_input_untouched() {
    let board = Board::new();
    let next = apply_move(&board, legal(&board, "g1f3")).unwrap();
    assert_eq!(board, Board::new());
    assert_eq!(next.piece_at(sq("f3")), Some((Color::White, Piece::Knight)));
    assert_eq!(next.side_to_move, Color::Black);
    assert_eq!(next.halfmove_clock, 1);
}

#[test]
fn apply_move_rejects_move_into_check() {
    // The e-file pin: the bishop may not leave e2.
    let board = Board::from_str("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
    let pinned = Move::new(sq("e2"), sq("d3"), Piece::Bishop, MoveFlag::Normal);
    assert!(apply_move(&board, pinned).is_err());
}

#[test]
fn undo_restores_long_line_exactly() {
    let mut board = Board::new();
    let start = board.clone();
    let line = [
        "e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "a7a6", "f1e2",
        "e7e5", "d4b3", "f8e7", "e1g1", "e8g8",
    ];
    let mut undos = Vec::new();
    for uci in line {
        let mv = legal(&board, uci);
        undos.push(make_move(&mut board, mv));
    }
    assert_eq!(board.castling_rights, 0);
    while let Some(u) = undos.pop() {
        undo_move(&mut board, u);
    }
    assert_eq!(board, start);
}
