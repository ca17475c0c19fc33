//! Ray walks for bishops, rooks, and queens.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_simple_move;
use crate::moves::chess_move::ChessMove;
use crate::moves::offsets::{step, BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

pub fn generate_bishop_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<ChessMove>) {
    generate_ray_moves(position, from, piece, &BISHOP_DIRECTIONS, out);
}

pub fn generate_rook_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<ChessMove>) {
    generate_ray_moves(position, from, piece, &ROOK_DIRECTIONS, out);
}

pub fn generate_queen_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<ChessMove>) {
    generate_ray_moves(position, from, piece, &QUEEN_DIRECTIONS, out);
}

/// Walk each direction until the first occupied square or the border.
fn generate_ray_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    directions: &[i8],
    out: &mut Vec<ChessMove>,
) {
    for &direction in directions {
        let mut current = from;
        while let Some(to) = step(current, direction) {
            if !push_simple_move(position, from, to, piece, out) {
                break;
            }
            current = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::square_at;

    #[test]
    fn rook_on_empty_board_sees_fourteen_squares() {
        let mut position = Position::new_empty();
        let d4 = square_at(3, 3);
        let rook = Piece::new(Color::White, PieceKind::Rook);
        position.set_piece(d4, Some(rook));

        let mut out = Vec::new();
        generate_rook_moves(&position, d4, rook, &mut out);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn bishop_stops_at_first_blocker() {
        let mut position = Position::new_empty();
        let c1 = square_at(2, 0);
        let e3 = square_at(4, 2);
        let b2 = square_at(1, 1);
        let bishop = Piece::new(Color::White, PieceKind::Bishop);
        position.set_piece(c1, Some(bishop));
        position.set_piece(e3, Some(Piece::new(Color::Black, PieceKind::Knight)));
        position.set_piece(b2, Some(Piece::new(Color::White, PieceKind::Pawn)));

        let mut out = Vec::new();
        generate_bishop_moves(&position, c1, bishop, &mut out);
        // d2 and the capture on e3 only.
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|mv| mv.to == e3 && mv.is_capture()));
    }

    #[test]
    fn queen_combines_both_axes() {
        let mut position = Position::new_empty();
        let d4 = square_at(3, 3);
        let queen = Piece::new(Color::Black, PieceKind::Queen);
        position.set_piece(d4, Some(queen));

        let mut out = Vec::new();
        generate_queen_moves(&position, d4, queen, &mut out);
        assert_eq!(out.len(), 27);
    }
}
