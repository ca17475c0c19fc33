use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::{ChessMove, FLAG_CAPTURE};

/// What a moving piece of `color` finds on `square`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    OffBoard,
    Friendly,
    Empty,
    Enemy(PieceKind),
}

#[inline]
pub fn landing_for(position: &Position, square: Square, color: Color) -> Landing {
    match position.cell(square) {
        Cell::Border => Landing::OffBoard,
        Cell::Empty => Landing::Empty,
        Cell::Occupied(piece) if piece.color == color => Landing::Friendly,
        Cell::Occupied(piece) => Landing::Enemy(piece.kind),
    }
}

/// Push a quiet move or capture for a non-pawn piece. Returns true when the
/// square was empty, i.e. a sliding piece may keep going.
#[inline]
pub fn push_simple_move(
    position: &Position,
    from: Square,
    to: Square,
    piece: Piece,
    out: &mut Vec<ChessMove>,
) -> bool {
    match landing_for(position, to, piece.color) {
        Landing::Empty => {
            out.push(ChessMove::new(from, to, piece.kind, None, 0));
            true
        }
        Landing::Enemy(captured) => {
            out.push(ChessMove::new(from, to, piece.kind, Some(captured), FLAG_CAPTURE));
            false
        }
        Landing::OffBoard | Landing::Friendly => false,
    }
}
