use crate::game_state::chess_rules::rank_of;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{landing_for, Landing};
use crate::moves::chess_move::{
    ChessMove, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT, FLAG_PROMOTION,
};
use crate::moves::offsets::{step, NORTH, NORTH_EAST, NORTH_WEST, SOUTH, SOUTH_EAST, SOUTH_WEST};

#[inline]
pub const fn pawn_forward(color: Color) -> i8 {
    match color {
        Color::White => NORTH,
        Color::Black => SOUTH,
    }
}

#[inline]
pub const fn pawn_capture_offsets(color: Color) -> [i8; 2] {
    match color {
        Color::White => [NORTH_WEST, NORTH_EAST],
        Color::Black => [SOUTH_WEST, SOUTH_EAST],
    }
}

#[inline]
const fn start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Pushes, double pushes, captures, and en passant for the pawn on `from`.
/// Reaching the far rank is always a promotion to queen.
pub fn generate_pawn_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<ChessMove>) {
    let color = piece.color;
    let forward = pawn_forward(color);

    let promotion_flag = |to: Square| {
        if rank_of(to) == promotion_rank(color) {
            FLAG_PROMOTION
        } else {
            0
        }
    };

    if let Some(one_step) = step(from, forward) {
        if landing_for(position, one_step, color) == Landing::Empty {
            out.push(ChessMove::new(
                from,
                one_step,
                PieceKind::Pawn,
                None,
                promotion_flag(one_step),
            ));

            if rank_of(from) == start_rank(color) {
                if let Some(two_step) = step(one_step, forward) {
                    if landing_for(position, two_step, color) == Landing::Empty {
                        out.push(ChessMove::new(
                            from,
                            two_step,
                            PieceKind::Pawn,
                            None,
                            FLAG_DOUBLE_PAWN_PUSH,
                        ));
                    }
                }
            }
        }
    }

    for offset in pawn_capture_offsets(color) {
        let Some(to) = step(from, offset) else {
            continue;
        };

        match landing_for(position, to, color) {
            Landing::Enemy(captured) => out.push(ChessMove::new(
                from,
                to,
                PieceKind::Pawn,
                Some(captured),
                FLAG_CAPTURE | promotion_flag(to),
            )),
            Landing::Empty if position.en_passant_square == Some(to) => {
                if en_passant_victim(position, to, color).is_some() {
                    out.push(ChessMove::new(
                        from,
                        to,
                        PieceKind::Pawn,
                        Some(PieceKind::Pawn),
                        FLAG_CAPTURE | FLAG_EN_PASSANT,
                    ));
                }
            }
            _ => {}
        }
    }
}

/// Square of the pawn removed by an en passant capture landing on `target`.
/// That pawn sits behind the target, not on it.
pub fn en_passant_victim(position: &Position, target: Square, mover: Color) -> Option<Square> {
    let victim = step(target, -pawn_forward(mover))?;
    let expected = Piece::new(mover.opposite(), PieceKind::Pawn);
    (position.piece_at(victim) == Some(expected)).then_some(victim)
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_rules::square_at;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let position = Position::new_game();
        let e2 = square_at(4, 1);
        let mut out = Vec::new();
        generate_pawn_moves(&position, e2, Piece::new(Color::White, PieceKind::Pawn), &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|mv| mv.is_double_pawn_push()));
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut position = Position::new_empty();
        let e2 = square_at(4, 1);
        let e3 = square_at(4, 2);
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        position.set_piece(e2, Some(pawn));
        position.set_piece(e3, Some(Piece::new(Color::Black, PieceKind::Knight)));

        let mut out = Vec::new();
        generate_pawn_moves(&position, e2, pawn, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn black_pawn_promotes_on_first_rank() {
        let mut position = Position::new_empty();
        let b2 = square_at(1, 1);
        let pawn = Piece::new(Color::Black, PieceKind::Pawn);
        position.set_piece(b2, Some(pawn));
        position.set_piece(square_at(0, 0), Some(Piece::new(Color::White, PieceKind::Rook)));

        let mut out = Vec::new();
        generate_pawn_moves(&position, b2, pawn, &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|mv| mv.is_promotion()));
        assert!(out.iter().any(|mv| mv.is_capture()));
    }
}
