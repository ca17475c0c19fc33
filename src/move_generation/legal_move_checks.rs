//! Attack detection.
//!
//! Every test starts from the attacked square and looks outwards, so a
//! single call touches at most eight rays plus the fixed jump offsets.
//! Sliding checks stop at the first occupant of either color.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_moves_pawn::pawn_capture_offsets;
use crate::moves::offsets::{step, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};

#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    let attacked_along = |directions: &[i8], sliders: [PieceKind; 2]| {
        directions.iter().any(|&direction| {
            match first_occupant(position, square, direction) {
                Some(piece) => piece.color == attacker && sliders.contains(&piece.kind),
                None => false,
            }
        })
    };

    if attacked_along(&ROOK_DIRECTIONS, [PieceKind::Rook, PieceKind::Queen]) {
        return true;
    }
    if attacked_along(&BISHOP_DIRECTIONS, [PieceKind::Bishop, PieceKind::Queen]) {
        return true;
    }

    let holds = |offset: i8, kind: PieceKind| {
        step(square, offset)
            .and_then(|from| position.piece_at(from))
            .is_some_and(|piece| piece == Piece::new(attacker, kind))
    };

    if KNIGHT_OFFSETS.iter().any(|&offset| holds(offset, PieceKind::Knight)) {
        return true;
    }

    // An attacking pawn sits one capture step behind the square, from its own side.
    if pawn_capture_offsets(attacker)
        .iter()
        .any(|&offset| holds(-offset, PieceKind::Pawn))
    {
        return true;
    }

    KING_OFFSETS.iter().any(|&offset| holds(offset, PieceKind::King))
}

/// First piece met walking from `square` in `direction`, if any before the border.
fn first_occupant(position: &Position, square: Square, direction: i8) -> Option<Piece> {
    let mut current = square;
    loop {
        current = step(current, direction)?;
        match position.cell(current) {
            Cell::Empty => continue,
            Cell::Border => return None,
            Cell::Occupied(piece) => return Some(piece),
        }
    }
}
