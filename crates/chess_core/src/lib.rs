//! Rules engine for a two-player chess game.
//!
//! [`Board`] tracks occupancy, [`movegen`] computes per-piece candidate
//! moves and the king-safety filter, and [`Game`] runs turns through
//! [`Game::play_turn`], which answers whether a move is legal and what
//! state results.
//!
//! Implemented rules: all piece geometry including the two-square pawn
//! advance, captures, check, checkmate and stalemate. Castling, en passant
//! and promotion are not part of this engine.

pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod types;

pub use board::*;
pub use error::*;
pub use game::*;
pub use movegen::*;
pub use types::*;
