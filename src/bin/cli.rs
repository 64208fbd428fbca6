use indicatif::{ProgressBar, ProgressStyle};
use rookery::board::Board;
use rookery::error::GameError;
use rookery::game::Game;
use rookery::logger::init_logging;
use rookery::moves::execute::{legal_moves, make_move};
use rookery::moves::perft::{perft, perft_divide};
use rookery::square::Square;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::info;

const LOG_PATH: &str = "logs/rookery.log";
const MAX_CLI_PERFT: u32 = 8;

fn main() {
    if let Err(e) = init_logging(LOG_PATH, "rookery=info") {
        eprintln!("logging disabled: {e}");
    }
    info!("console session started");

    let mut game = Game::new();
    print_help();
    game.print_board();
    prompt(&game);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };

        if line.is_empty() {
            prompt(&game);
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts[0];

        match command {
            "quit" | "exit" | "q" => break,
            "help" | "?" => print_help(),
            "d" | "display" => game.print_board(),
            "fen" if parts.len() == 1 => println!("{}", game.to_fen()),
            "fen" => {
                let fen = parts[1..].join(" ");
                match game.load_fen(&fen) {
                    Ok(()) => game.print_board(),
                    Err(e) => println!("error: {e}"),
                }
            }
            "new" => {
                game.new_game();
                game.print_board();
            }
            "moves" => handle_moves(&game, parts.get(1).copied()),
            "status" => println!(
                "{} to move, {} (seen {}x)",
                game.side_to_move(),
                game.status(),
                game.repetition_count()
            ),
            "undo" => match game.undo() {
                Ok(mv) => {
                    println!("took back {mv}");
                    game.print_board();
                }
                Err(e) => println!("error: {e}"),
            },
            "redo" => report(&game_redo(&mut game), &game),
            "perft" => match parse_depth(parts.get(1)) {
                Some(depth) => run_perft(game.board(), depth),
                None => println!("usage: perft <depth 1..={MAX_CLI_PERFT}>"),
            },
            "divide" => match parse_depth(parts.get(1)) {
                Some(depth) => run_divide(game.board(), depth),
                None => println!("usage: divide <depth 1..={MAX_CLI_PERFT}>"),
            },
            _ => {
                let result = game.submit_uci(command);
                report(&result.map(|o| o.status.to_string()), &game);
            }
        }
        prompt(&game);
    }

    info!("console session ended");
}

fn game_redo(game: &mut Game) -> Result<String, GameError> {
    game.redo().map(|o| o.status.to_string())
}

fn report(result: &Result<String, GameError>, game: &Game) {
    match result {
        Ok(status) => {
            game.print_board();
            println!("{status}");
        }
        Err(e) => println!("error: {e}"),
    }
}

fn prompt(game: &Game) {
    print!("{}> ", game.side_to_move());
    let _ = io::stdout().flush();
}

fn print_help() {
    println!("commands:");
    println!("  e2e4 | e7e8q     play a move in coordinate notation");
    println!("  d                show the board");
    println!("  fen [FEN]        print the position, or load one");
    println!("  moves [square]   list legal moves, optionally from one square");
    println!("  undo | redo      step through the move history");
    println!("  new              start over");
    println!("  status           side to move and game state");
    println!("  perft <depth>    count leaf nodes");
    println!("  divide <depth>   perft split by root move");
    println!("  quit");
}

fn parse_depth(arg: Option<&&str>) -> Option<u32> {
    arg.and_then(|s| s.parse().ok())
        .filter(|d| (1..=MAX_CLI_PERFT).contains(d))
}

fn handle_moves(game: &Game, square: Option<&str>) {
    match square {
        Some(s) => match s.parse::<Square>() {
            Ok(sq) => {
                let targets: Vec<String> = game
                    .legal_moves_from(sq)
                    .iter()
                    .map(|t| t.to_string())
                    .collect();
                println!("{sq}: {}", targets.join(" "));
            }
            Err(e) => println!("error: {e}"),
        },
        None => {
            let moves: Vec<String> = game
                .legal_moves()
                .iter()
                .map(|m| format!("{m:#}"))
                .collect();
            println!("{} moves: {}", moves.len(), moves.join(", "));
        }
    }
}

/// Perft with a progress bar ticking once per root move.
fn run_perft(board: &Board, depth: u32) {
    let start = Instant::now();
    let roots = legal_moves(board);

    let pb = ProgressBar::new(roots.len() as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} root moves {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut total = 0u64;
    for mv in roots {
        pb.set_message(mv.to_uci());
        let mut child = board.clone();
        make_move(&mut child, mv);
        total += perft(&child, depth - 1);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let elapsed = start.elapsed();
    let nps = total as f64 / elapsed.as_secs_f64().max(1e-9);
    info!(depth, total, ms = elapsed.as_millis() as u64, "perft");
    println!("perft({depth}) = {total}  [{:.2?}, {:.0} nps]", elapsed, nps);
}

fn run_divide(board: &Board, depth: u32) {
    let split = perft_divide(board, depth);
    for (mv, nodes) in &split {
        println!("{mv}: {nodes}");
    }
    println!("Total: {}", split.iter().map(|(_, n)| n).sum::<u64>());
}
