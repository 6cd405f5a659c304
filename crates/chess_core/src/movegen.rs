use crate::{board::Board, types::*};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Squares `piece` could move to by its own geometry, from where it stands.
/// Ignores whether the move would expose the mover's king; see [`legal_moves`].
pub fn candidate_moves(piece: &Piece, board: &Board) -> Vec<Position> {
    let from = piece.position;
    let c = piece.color;
    let mut out = Vec::with_capacity(16);
    match piece.kind {
        PieceKind::Pawn => gen_pawn(board, from, c, &mut out),
        PieceKind::Knight => gen_steps(board, from, c, &KNIGHT_DELTAS, &mut out),
        PieceKind::Bishop => gen_slider(board, from, c, &DIAGONALS, &mut out),
        PieceKind::Rook => gen_slider(board, from, c, &ORTHOGONALS, &mut out),
        PieceKind::Queen => {
            gen_slider(board, from, c, &DIAGONALS, &mut out);
            gen_slider(board, from, c, &ORTHOGONALS, &mut out);
        }
        PieceKind::King => gen_steps(board, from, c, &KING_DELTAS, &mut out),
    }
    out
}

impl Piece {
    pub fn candidate_moves(&self, board: &Board) -> Vec<Position> {
        candidate_moves(self, board)
    }
}

/// Plays `mv` on a scratch copy and reports whether the mover's king is
/// then attacked. The live board is never touched.
pub fn leaves_king_in_check(board: &Board, mv: Move) -> bool {
    let mover = match board.piece_at(mv.from) {
        Some(p) => p.color,
        None => return false,
    };
    let mut scratch = board.clone();
    scratch.move_piece(mv.from, mv.to);
    scratch.in_check(mover)
}

/// Candidate moves of the piece on `from` that keep its own king safe.
pub fn legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    let mut out = candidate_moves(piece, board);
    out.retain(|&to| !leaves_king_in_check(board, Move::new(from, to)));
    out
}

/// All legal moves for `side`.
pub fn legal_moves(board: &Board, side: Color) -> Vec<Move> {
    board
        .pieces_of(side)
        .flat_map(|p| {
            legal_destinations(board, p.position)
                .into_iter()
                .map(move |to| Move::new(p.position, to))
        })
        .collect()
}

/// Short-circuiting form of `!legal_moves(..).is_empty()`.
pub fn has_legal_move(board: &Board, side: Color) -> bool {
    board.pieces_of(side).any(|p| {
        candidate_moves(p, board)
            .into_iter()
            .any(|to| !leaves_king_in_check(board, Move::new(p.position, to)))
    })
}

fn gen_pawn(board: &Board, from: Position, c: Color, out: &mut Vec<Position>) {
    let dir = c.forward();

    // forward 1, then forward 2 from the start rank over an empty square
    if let Some(to) = from.offset(0, dir) {
        if board.piece_at(to).is_none() {
            out.push(to);

            if from.rank() == c.pawn_start_rank() {
                if let Some(to2) = from.offset(0, 2 * dir) {
                    if board.piece_at(to2).is_none() {
                        out.push(to2);
                    }
                }
            }
        }
    }

    // diagonal steps only as captures
    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            if let Some(target) = board.piece_at(to) {
                if target.color != c {
                    out.push(to);
                }
            }
        }
    }
}

fn gen_steps(board: &Board, from: Position, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Position>) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Position, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Position>) {
    for &(df, dr) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod tests;
