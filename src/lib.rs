pub mod bitboard;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod hash;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub(crate) mod output;
pub mod square;
pub mod status;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use board::{Board, Color, Piece};
pub use config::{GameConfig, PromotionPolicy};
pub use error::{FenError, GameError, IllegalMoveReason};
pub use game::{Game, MoveOutcome};
pub use moves::types::{Move, MoveFlag};
pub use square::Square;
pub use status::GameStatus;
