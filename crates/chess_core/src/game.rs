//! Turn orchestration: legality filtering, move execution and
//! check/checkmate/stalemate evaluation.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::{
    board::Board,
    error::{ChessError, MoveError},
    movegen::{candidate_moves, has_legal_move, leaves_king_in_check, legal_destinations},
    types::*,
};

/// Where the game stands for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "color", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    /// The given side is in check and has a way out.
    Check(Color),
    /// The given side is mated. Terminal.
    Checkmate(Color),
    /// Side to move has no legal move and is not in check. Terminal, drawn.
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }

    /// Status of `side` to move on `board`.
    pub fn evaluate(board: &Board, side: Color) -> GameStatus {
        let in_check = board.in_check(side);
        let can_move = has_legal_move(board, side);
        match (in_check, can_move) {
            (true, true) => GameStatus::Check(side),
            (true, false) => GameStatus::Checkmate(side),
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::InProgress,
        }
    }
}

/// One executed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub piece: PieceInfo,
    pub from: Position,
    pub to: Position,
    pub captured: Option<PieceInfo>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.captured.is_some() { "x" } else { "" };
        write!(f, "{}{}{}", self.from.to_coord(), sep, self.to.to_coord())
    }
}

/// What `play_turn` hands back to the caller. Never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub success: bool,
    pub message: String,
    /// Type of the captured piece, if the move took one.
    pub captured: Option<PieceKind>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub winner: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_piece: Option<PieceInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_piece: Option<PieceInfo>,
}

impl MoveResult {
    pub fn failure(err: &MoveError) -> Self {
        MoveResult {
            success: false,
            message: err.to_string(),
            captured: None,
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
            winner: None,
            moved_piece: None,
            captured_piece: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Standard starting position, White to move.
pub fn new_game() -> Game {
    Game::new()
}

/// A single game. Mutated only through [`Game::play_turn`]; reset means
/// building a new one and dropping this.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    status: GameStatus,
    winner: Option<Color>,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        info!("new game from the standard position");
        Game {
            board: Board::standard(),
            turn: Color::White,
            status: GameStatus::InProgress,
            winner: None,
            history: Vec::new(),
        }
    }

    /// Starts a game from an arbitrary board with `turn` to move.
    /// The board must hold exactly one king of each color, and the side
    /// not to move must not be in check (its king would be capturable).
    pub fn from_board(board: Board, turn: Color) -> Result<Self, ChessError> {
        for color in [Color::White, Color::Black] {
            let count = board.count_kings(color);
            if count != 1 {
                return Err(ChessError::KingCount { color, count });
            }
        }
        if board.in_check(turn.other()) {
            return Err(ChessError::OpponentInCheck { color: turn.other() });
        }
        let status = GameStatus::evaluate(&board, turn);
        let winner = match status {
            GameStatus::Checkmate(loser) => Some(loser.other()),
            _ => None,
        };
        Ok(Game {
            board,
            turn,
            status,
            winner,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn get_piece_at(&self, [x, y]: [i32; 2]) -> Result<Option<PieceInfo>, ChessError> {
        Ok(self.board.get_piece_at(x, y)?.map(Piece::info))
    }

    /// 8x8 grid, rows rank 7 down to rank 0, columns file 0 to 7.
    pub fn get_board_state(&self) -> Vec<Vec<Option<PieceInfo>>> {
        self.board.snapshot().rows_top_down()
    }

    pub fn board_state_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.get_board_state())
    }

    /// Destinations the side to move could legally reach from `from`.
    /// Empty for off-board squares, opponent pieces and finished games.
    pub fn legal_moves_from(&self, from: [i32; 2]) -> Vec<Position> {
        if self.is_over() {
            return Vec::new();
        }
        match Position::try_from(from) {
            Ok(pos) if self.board.piece_at(pos).map(|p| p.color) == Some(self.turn) => {
                legal_destinations(&self.board, pos)
            }
            _ => Vec::new(),
        }
    }

    /// Attempts a move for the side to move. Rejections come back as a
    /// failed [`MoveResult`]; this never panics on caller input.
    pub fn play_turn(&mut self, from: [i32; 2], to: [i32; 2]) -> MoveResult {
        match self.try_play_turn(from, to) {
            Ok(result) => result,
            Err(err) => {
                debug!(?from, ?to, turn = %self.turn, reason = %err, "move rejected");
                MoveResult::failure(&err)
            }
        }
    }

    /// As [`Game::play_turn`], with the rejection reason kept typed.
    /// Checks run in order so the most specific reason wins: coordinates,
    /// game over, empty square, wrong side, piece geometry, king safety.
    pub fn try_play_turn(&mut self, from: [i32; 2], to: [i32; 2]) -> Result<MoveResult, MoveError> {
        let from_pos = Position::try_from(from).map_err(|_| MoveError::from_coords(from))?;
        let to_pos = Position::try_from(to).map_err(|_| MoveError::from_coords(to))?;

        match self.status {
            GameStatus::Checkmate(_) => return Err(MoveError::GameOver("checkmate")),
            GameStatus::Stalemate => return Err(MoveError::GameOver("stalemate")),
            _ => {}
        }

        let piece = *self
            .board
            .piece_at(from_pos)
            .ok_or(MoveError::NoPiece(from_pos))?;

        if piece.color != self.turn {
            return Err(MoveError::WrongTurn {
                turn: self.turn,
                color: piece.color,
            });
        }

        if !candidate_moves(&piece, &self.board).contains(&to_pos) {
            return Err(MoveError::IllegalMove {
                kind: piece.kind,
                from: from_pos,
                to: to_pos,
            });
        }

        let mv = Move::new(from_pos, to_pos);
        if leaves_king_in_check(&self.board, mv) {
            return Err(MoveError::LeavesKingInCheck);
        }

        let captured = self.board.move_piece(from_pos, to_pos);
        let record = MoveRecord {
            piece: piece.info(),
            from: from_pos,
            to: to_pos,
            captured: captured.as_ref().map(Piece::info),
        };
        debug!(%record, piece = %piece.id, "move played");
        self.history.push(record);

        let mover = self.turn;
        self.turn = mover.other();
        self.status = GameStatus::evaluate(&self.board, self.turn);
        self.winner = match self.status {
            GameStatus::Checkmate(_) => Some(mover),
            _ => None,
        };

        let message = match self.status {
            GameStatus::InProgress => "Move successful".to_string(),
            GameStatus::Check(side) => {
                info!(%side, "check");
                "Check!".to_string()
            }
            GameStatus::Checkmate(side) => {
                info!(%side, winner = %mover, "checkmate");
                format!("Checkmate! {} wins!", capitalized(mover))
            }
            GameStatus::Stalemate => {
                info!(side = %self.turn, "stalemate");
                "Stalemate! The game is a draw.".to_string()
            }
        };

        Ok(MoveResult {
            success: true,
            message,
            captured: captured.map(|p| p.kind),
            is_check: matches!(self.status, GameStatus::Check(_) | GameStatus::Checkmate(_)),
            is_checkmate: matches!(self.status, GameStatus::Checkmate(_)),
            is_stalemate: self.status == GameStatus::Stalemate,
            winner: self.winner,
            moved_piece: Some(piece.info()),
            captured_piece: captured.map(|p| p.info()),
        })
    }
}

fn capitalized(c: Color) -> &'static str {
    match c {
        Color::White => "White",
        Color::Black => "Black",
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
