pub mod execute;
pub mod king;
pub mod knight;
pub mod movegen;
pub mod pawn;
pub mod perft;
pub mod sliders;
pub mod square_control;
pub mod types;
