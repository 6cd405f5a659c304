//! Error taxonomy for the engine.
//!
//! [`ChessError`] covers board-level failures (bad squares, bad setups).
//! [`MoveError`] covers every reason `play_turn` can reject a move; its
//! `Display` text is what the caller sees as the result message.

use thiserror::Error;

use crate::types::{Color, PieceKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("square ({file}, {rank}) is outside the board")]
    OutOfRange { file: i32, rank: i32 },

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),

    #[error("{color} is in check but it is not {color}'s turn")]
    OpponentInCheck { color: Color },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid coordinate: ({x}, {y}) is off the board.")]
    InvalidCoordinate { x: i32, y: i32 },

    #[error("The game is over: {0}.")]
    GameOver(&'static str),

    #[error("No piece at start position.")]
    NoPiece(Position),

    #[error("It's {turn}'s turn. You cannot move {color} pieces.")]
    WrongTurn { turn: Color, color: Color },

    #[error("Invalid move for {kind} at {from} to {to}.")]
    IllegalMove {
        kind: PieceKind,
        from: Position,
        to: Position,
    },

    #[error("Illegal move: your king would be in check!")]
    LeavesKingInCheck,
}

impl MoveError {
    /// Maps a failed coordinate conversion onto the caller-facing variant.
    pub(crate) fn from_coords([x, y]: [i32; 2]) -> Self {
        MoveError::InvalidCoordinate { x, y }
    }
}
