use wasm_bindgen::prelude::*;

use crate::board::Piece;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Game, MoveOutcome};
use crate::moves::perft::perft;
use crate::output::engine_println;
use crate::square::Square;
use serde_json::json;
use web_time::Instant;

/// One game behind a browser board. Every call is synchronous.
#[wasm_bindgen]
pub struct RookeryGame {
    game: Game,
}

#[wasm_bindgen]
impl RookeryGame {
    /// `config_json` may be empty or e.g. `{"promotion":"auto_queen"}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<RookeryGame, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json.as_deref().map(str::trim) {
            None | Some("") => GameConfig::default(),
            Some(text) => serde_json::from_str(text)
                .map_err(|e| JsValue::from_str(&format!("bad config: {e}")))?,
        };

        Ok(RookeryGame {
            game: Game::with_config(config),
        })
    }

    /// Reset to the starting position.
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    /// Load a position. Returns false, leaving the game as it was, if the
    /// text is not a valid position.
    #[wasm_bindgen(js_name = loadFen)]
    pub fn load_fen(&mut self, fen: &str) -> bool {
        match self.game.load_fen(fen) {
            Ok(()) => true,
            Err(e) => {
                engine_println!("loadFen rejected: {e}");
                false
            }
        }
    }

    pub fn fen(&self) -> String {
        self.game.to_fen()
    }

    /// Returns JSON:
    /// `{"valid":true,"outcome":{"mv":{..},"captured":null,"status":"check","fen":".."}}`
    /// or `{"valid":false,"error":"..","kind":"illegal_move"}`.
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, from: &str, to: &str, promotion: Option<String>) -> String {
        let result = parse_request(from, to, promotion.as_deref())
            .and_then(|(from, to, promo)| self.game.submit_move(from, to, promo));
        outcome_json(result)
    }

    /// Destination squares for the piece on `square`, e.g. `["e3","e4"]`.
    /// Empty for a bad square, an empty square or the wrong side's piece.
    #[wasm_bindgen(js_name = legalMovesFrom)]
    pub fn legal_moves_from(&self, square: &str) -> js_sys::Array {
        let out = js_sys::Array::new();
        if let Ok(sq) = square.parse::<Square>() {
            for to in self.game.legal_moves_from(sq) {
                out.push(&JsValue::from_str(&to.to_string()));
            }
        }
        out
    }

    /// `"ongoing"`, `"check"`, `"checkmate"`, `"stalemate"`, `"draw_*"`.
    pub fn status(&self) -> String {
        serde_json::to_value(self.game.status())
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default()
    }

    /// `"white"` or `"black"`.
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> String {
        self.game.side_to_move().to_string()
    }

    /// Take back one move; returns it in coordinate notation, or null.
    pub fn undo(&mut self) -> Option<String> {
        self.game.undo().ok().map(|mv| mv.to_uci())
    }

    pub fn redo(&mut self) -> String {
        outcome_json(self.game.redo())
    }

    /// ASCII diagram, also echoed to the console.
    pub fn board(&self) -> String {
        self.game.print_board();
        self.game.board().render_ascii(false)
    }

    /// Leaf count from the current position, with timing on the console.
    pub fn perft(&self, depth: u32) -> f64 {
        let start = Instant::now();
        let nodes = perft(self.game.board(), depth);
        engine_println!(
            "perft({depth}) = {nodes} in {} ms",
            start.elapsed().as_millis()
        );
        nodes as f64
    }
}

fn parse_request(
    from: &str,
    to: &str,
    promotion: Option<&str>,
) -> Result<(Square, Square, Option<Piece>), GameError> {
    let square = |s: &str| {
        s.parse::<Square>()
            .map_err(|e| GameError::InvalidInput(format!("square {s:?}: {e}")))
    };
    let promo = match promotion.map(str::trim).filter(|p| !p.is_empty()) {
        None => None,
        Some(p) => {
            let mut chars = p.chars();
            let piece = match (chars.next(), chars.next()) {
                (Some(c), None) => Piece::from_promotion_char(c),
                _ => None,
            };
            Some(piece.ok_or_else(|| {
                GameError::InvalidInput(format!("promotion {p:?}: expected one of q, r, b, n"))
            })?)
        }
    };
    Ok((square(from)?, square(to)?, promo))
}

fn error_kind(e: &GameError) -> &'static str {
    match e {
        GameError::IllegalMove { .. } => "illegal_move",
        GameError::GameOver(_) => "game_over",
        GameError::MalformedPosition(_) => "malformed_position",
        GameError::InvalidInput(_) => "invalid_input",
        GameError::NothingToUndo => "nothing_to_undo",
        GameError::NothingToRedo => "nothing_to_redo",
        GameError::InvariantViolation(_) => "invariant_violation",
    }
}

fn outcome_json(result: Result<MoveOutcome, GameError>) -> String {
    let value = match result {
        Ok(outcome) => json!({ "valid": true, "outcome": outcome }),
        Err(e) => json!({ "valid": false, "error": e.to_string(), "kind": error_kind(&e) }),
    };
    value.to_string()
}
