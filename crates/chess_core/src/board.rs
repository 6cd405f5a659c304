use std::fmt;

use crate::{error::ChessError, movegen::candidate_moves, types::*};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Occupancy of the 8x8 grid. Knows what is where, nothing about legality.
///
/// Invariant: a piece stored at square `s` has `position == s`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8], // [rank][file]
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    /// The canonical starting position, ids assigned file by file.
    pub fn standard() -> Self {
        let mut b = Board::empty();
        let mut ids = IdAllocator::default();

        let rows: [(u8, Color, [PieceKind; 8]); 4] = [
            (0, Color::White, BACK_RANK),
            (1, Color::White, [PieceKind::Pawn; 8]),
            (6, Color::Black, [PieceKind::Pawn; 8]),
            (7, Color::Black, BACK_RANK),
        ];
        for (rank, color, kinds) in rows {
            for (file, kind) in kinds.into_iter().enumerate() {
                let pos = Position::at(file as u8, rank);
                b.place(Piece::new(ids.next(color, kind), pos), pos);
            }
        }
        b
    }

    /// Builds a board from the piece-placement field of a FEN string
    /// (rank 8 first, digits for empty runs). Only the first field is read,
    /// so a full FEN line is accepted and its remaining fields ignored.
    pub fn from_placement(placement: &str) -> Result<Self, ChessError> {
        let bad = |msg: String| ChessError::InvalidPlacement(msg);

        let field = placement.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(bad(format!("expected 8 ranks, found {}", ranks.len())));
        }

        let mut parsed: Vec<(Position, Color, PieceKind)> = Vec::new();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if d == 0 {
                        return Err(bad(format!("zero-length gap in rank {}", rank + 1)));
                    }
                    file += d as u8;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(bad(format!("unknown piece character '{ch}'"))),
                    };
                    if file >= BOARD_SIZE {
                        return Err(bad(format!("too many files in rank {}", rank + 1)));
                    }
                    parsed.push((Position::at(file, rank), color, kind));
                    file += 1;
                }
                if file > BOARD_SIZE {
                    return Err(bad(format!("too many files in rank {}", rank + 1)));
                }
            }
            if file != BOARD_SIZE {
                return Err(bad(format!("not enough files in rank {}", rank + 1)));
            }
        }

        // Number pieces in board order so a full start placement gets the
        // same ids as `Board::standard`.
        parsed.sort_by_key(|(pos, _, _)| (pos.rank(), pos.file()));
        let mut b = Board::empty();
        let mut ids = IdAllocator::default();
        for (pos, color, kind) in parsed {
            b.place(Piece::new(ids.next(color, kind), pos), pos);
        }
        Ok(b)
    }

    /// Occupant of `(file, rank)`. Off-board coordinates are an error, never clamped.
    pub fn get_piece_at(&self, file: i32, rank: i32) -> Result<Option<&Piece>, ChessError> {
        let pos = Position::new(file, rank)?;
        Ok(self.piece_at(pos))
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.grid[pos.rank() as usize][pos.file() as usize].as_ref()
    }

    /// Puts `piece` on `pos`, returning whatever stood there before.
    /// No legality checks; the caller owns consistency.
    pub fn place(&mut self, mut piece: Piece, pos: Position) -> Option<Piece> {
        piece.position = pos;
        self.slot(pos).replace(piece)
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.slot(pos).take()
    }

    /// Relocates the occupant of `from` to `to` and returns the piece that
    /// was captured on `to`, if any.
    ///
    /// # Panics
    /// If `from` is empty. That is a bug in the caller, not a user error.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let moved = self
            .remove(from)
            .unwrap_or_else(|| panic!("move_piece: no piece on {from}"));
        self.place(moved, to)
    }

    /// Immutable copy of the occupancy for rendering.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells = [[None; 8]; 8];
        for pos in Position::all() {
            cells[pos.rank() as usize][pos.file() as usize] = self.piece_at(pos).map(Piece::info);
        }
        BoardSnapshot { cells }
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.position)
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces_of(color)
            .filter(|p| p.kind == PieceKind::King)
            .count()
    }

    /// True when some piece of color `by` has `target` among its candidate moves.
    pub fn is_square_attacked(&self, target: Position, by: Color) -> bool {
        self.pieces_of(by)
            .any(|p| candidate_moves(p, self).contains(&target))
    }

    /// Whether `c`'s king is attacked. A board without that king reports false.
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_position(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    fn slot(&mut self, pos: Position) -> &mut Option<Piece> {
        &mut self.grid[pos.rank() as usize][pos.file() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_SIZE).rev() {
            write!(f, "{rank} ")?;
            for file in 0..BOARD_SIZE {
                match self.piece_at(Position::at(file, rank)) {
                    Some(p) => write!(f, "[{}{}]", p.kind.symbol(), p.color.letter())?,
                    None => f.write_str("[  ]")?,
                }
            }
            writeln!(f)?;
        }
        f.write_str("  ")?;
        for file in 0..BOARD_SIZE {
            write!(f, " {file}  ")?;
        }
        Ok(())
    }
}

/// Fully materialized copy of the board's occupancy. Owning one never
/// borrows the board, so nothing done to it can reach back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    cells: [[Option<PieceInfo>; 8]; 8], // [rank][file]
}

impl BoardSnapshot {
    pub fn get(&self, pos: Position) -> Option<PieceInfo> {
        self.cells[pos.rank() as usize][pos.file() as usize]
    }

    pub fn set(&mut self, pos: Position, cell: Option<PieceInfo>) {
        self.cells[pos.rank() as usize][pos.file() as usize] = cell;
    }

    /// Rows ordered rank 7 down to rank 0, columns file 0 to 7.
    pub fn rows_top_down(&self) -> Vec<Vec<Option<PieceInfo>>> {
        self.cells.iter().rev().map(|row| row.to_vec()).collect()
    }
}

#[derive(Default)]
struct IdAllocator {
    counts: [[u8; 6]; 2],
}

impl IdAllocator {
    fn next(&mut self, color: Color, kind: PieceKind) -> PieceId {
        let c = match color {
            Color::White => 0,
            Color::Black => 1,
        };
        let slot = &mut self.counts[c][kind as usize];
        *slot += 1;
        let unnumbered = matches!(kind, PieceKind::Queen | PieceKind::King) && *slot == 1;
        PieceId {
            color,
            kind,
            ordinal: if unnumbered { 0 } else { *slot },
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
