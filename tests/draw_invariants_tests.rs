use rookery::config::GameConfig;
use rookery::game::Game;
use rookery::status::{FIFTY_MOVE_PLIES, GameStatus, REPETITION_LIMIT, is_draw_by_fifty_move};

fn game(fen: &str) -> Game {
    Game::from_fen(fen, GameConfig::default()).unwrap()
}

fn play(g: &mut Game, line: &[&str]) -> GameStatus {
    let mut status = g.status();
    for uci in line {
        status = g.submit_uci(uci).unwrap_or_else(|e| panic!("{uci}: {e}")).status;
    }
    status
}

#[test]
fn halfmove_clock_increments_and_resets() {
    let mut g = Game::new();
    play(&mut g, &["g1f3", "g8f6"]);
    assert_eq!(g.board().halfmove_clock, 2);
    play(&mut g, &["e2e4"]);
    assert_eq!(g.board().halfmove_clock, 0);
    play(&mut g, &["b8c6", "f3g5"]);
    assert_eq!(g.board().halfmove_clock, 2);
    play(&mut g, &["f6e4"]);
    assert_eq!(g.board().halfmove_clock, 0, "capture resets the clock");

    while g.undo().is_ok() {}
    assert_eq!(g.board().halfmove_clock, 0);
    assert_eq!(g.to_fen(), rookery::board::START_FEN);
}

#[test]
fn repetition_counts_current_position() {
    let mut g = Game::new();
    assert_eq!(g.repetition_count(), 1);
    play(&mut g, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(g.repetition_count(), 2);
    assert_eq!(g.status(), GameStatus::Ongoing);

    let status = play(&mut g, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(g.repetition_count(), REPETITION_LIMIT);
    assert_eq!(status, GameStatus::DrawRepetition);
    assert!(status.is_terminal());
}

#[test]
fn undo_out_of_repetition_reopens_the_game() {
    let mut g = Game::new();
    let line = ["b1c3", "b8c6", "c3b1", "c6b8"];
    play(&mut g, &line);
    play(&mut g, &line);
    assert_eq!(g.status(), GameStatus::DrawRepetition);

    g.undo().unwrap();
    assert_eq!(g.status(), GameStatus::Ongoing);
    // the position after the first c3b1 is the only earlier match
    assert_eq!(g.repetition_count(), 2);
    g.redo().unwrap();
    assert_eq!(g.status(), GameStatus::DrawRepetition);
}

#[test]
fn fifty_move_rule_triggers_at_100_halfmoves() {
    let mut g = game("4k3/8/8/8/8/8/8/R3K3 w - - 99 80");
    assert!(!is_draw_by_fifty_move(g.board()));
    let status = play(&mut g, &["a1a2"]);
    assert_eq!(g.board().halfmove_clock, FIFTY_MOVE_PLIES);
    assert_eq!(status, GameStatus::DrawFiftyMove);
}

#[test]
fn pawn_move_on_the_last_ply_avoids_fifty_move_draw() {
    let mut g = game("4k3/8/8/8/8/8/P7/R3K3 w - - 99 80");
    let status = play(&mut g, &["a2a3"]);
    assert_eq!(status, GameStatus::Ongoing);
    assert_eq!(g.board().halfmove_clock, 0);
}

#[test]
fn loaded_position_already_past_the_limit_is_drawn() {
    let g = game("4k3/8/8/8/8/8/8/R3K3 w - - 120 90");
    assert_eq!(g.status(), GameStatus::DrawFiftyMove);
}
