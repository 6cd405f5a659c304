use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChessError;

/// Board edge length. Both files and ranks run `0..BOARD_SIZE`.
pub const BOARD_SIZE: u8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub(crate) fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Single-letter symbol; knights use `N` so they don't collide with kings.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A square on the board, addressed by `(file, rank)`, both in `0..8`.
///
/// Values of this type are always on the board; raw caller coordinates go
/// through [`Position::new`] or [`Position::try_from`] first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[i32; 2]", into = "[i32; 2]")]
pub struct Position {
    file: u8,
    rank: u8,
}

impl Position {
    pub fn new(file: i32, rank: i32) -> Result<Self, ChessError> {
        let range = 0..BOARD_SIZE as i32;
        if range.contains(&file) && range.contains(&rank) {
            Ok(Position {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            Err(ChessError::OutOfRange { file, rank })
        }
    }

    /// For coordinates already known to be on the board.
    pub(crate) fn at(file: u8, rank: u8) -> Position {
        debug_assert!(file < BOARD_SIZE && rank < BOARD_SIZE);
        Position { file, rank }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// The square `(df, dr)` away, or `None` when that falls off the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Position> {
        Position::new(self.file as i32 + df as i32, self.rank as i32 + dr as i32).ok()
    }

    /// Every square, rank 0 first, file 0 first within a rank.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Position { file, rank }))
    }

    /// Algebraic name such as `e2`.
    pub fn to_coord(self) -> String {
        let f = (b'a' + self.file) as char;
        let r = (b'1' + self.rank) as char;
        format!("{f}{r}")
    }
}

impl TryFrom<[i32; 2]> for Position {
    type Error = ChessError;

    fn try_from([file, rank]: [i32; 2]) -> Result<Self, Self::Error> {
        Position::new(file, rank)
    }
}

impl TryFrom<(i32, i32)> for Position {
    type Error = ChessError;

    fn try_from((file, rank): (i32, i32)) -> Result<Self, Self::Error> {
        Position::new(file, rank)
    }
}

impl From<Position> for [i32; 2] {
    fn from(pos: Position) -> Self {
        [pos.file as i32, pos.rank as i32]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

/// Stable label assigned at setup, e.g. `WP3`, `BN2`, `WQ`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub color: Color,
    pub kind: PieceKind,
    /// 1-based ordinal among same-kind pieces; 0 for unnumbered (queen, king).
    pub ordinal: u8,
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.kind.symbol())?;
        if self.ordinal > 0 {
            write!(f, "{}", self.ordinal)?;
        }
        Ok(())
    }
}

impl Serialize for PieceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    /// Square the piece stands on. Kept in step with the board by [`crate::Board`].
    pub position: Position,
}

impl Piece {
    pub fn new(id: PieceId, position: Position) -> Self {
        Piece {
            id,
            color: id.color,
            kind: id.kind,
            position,
        }
    }

    /// The renderer-facing view of this piece.
    pub fn info(&self) -> PieceInfo {
        PieceInfo {
            kind: self.kind,
            color: self.color,
            id: self.id,
        }
    }
}

/// Read-only projection of a piece: `{"type": "Pawn", "color": "white", "id": "WP1"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PieceInfo {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
    pub id: PieceId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from.to_coord(), self.to.to_coord())
    }
}
