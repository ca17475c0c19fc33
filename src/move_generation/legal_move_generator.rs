//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, tries each candidate on
//! a scratch copy, and filters out the ones that leave the mover in check.
//! Output order is ascending origin, then ascending destination.

use crate::game_state::chess_rules::PLAYABLE_SQUARES;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{make_move_unchecked, refresh_outcome};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::chess_move::ChessMove;

/// Pseudo-legal moves of the piece on `from` (own-king safety not checked).
pub fn generate_pseudo_moves_from(
    position: &Position,
    from: Square,
    piece: Piece,
    out: &mut Vec<ChessMove>,
) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, from, piece, out),
        PieceKind::Knight => generate_knight_moves(position, from, piece, out),
        PieceKind::Bishop => generate_bishop_moves(position, from, piece, out),
        PieceKind::Rook => generate_rook_moves(position, from, piece, out),
        PieceKind::Queen => generate_queen_moves(position, from, piece, out),
        PieceKind::King => generate_king_moves(position, from, piece, out),
    }
}

fn pseudo_moves(position: &Position) -> Vec<ChessMove> {
    let side = position.side_to_move;
    let mut out = Vec::with_capacity(64);
    for square in PLAYABLE_SQUARES {
        match position.piece_at(square) {
            Some(piece) if piece.color == side => {
                generate_pseudo_moves_from(position, square, piece, &mut out)
            }
            _ => {}
        }
    }
    out
}

/// Legal moves paired with the position each one produces. Child outcomes
/// are not recomputed.
pub fn legal_successors_unscored(position: &Position) -> Vec<(ChessMove, Position)> {
    let side = position.side_to_move;
    let mut legal: Vec<(ChessMove, Position)> = pseudo_moves(position)
        .into_iter()
        .filter_map(|mv| {
            let next = make_move_unchecked(position, mv);
            (!is_king_in_check(&next, side)).then_some((mv, next))
        })
        .collect();
    legal.sort_by_key(|(mv, _)| mv.squares());
    legal
}

/// Legal moves paired with fully finalized child positions (outcome set).
pub fn legal_successors(position: &Position) -> Vec<(ChessMove, Position)> {
    let mut successors = legal_successors_unscored(position);
    for (_, next) in successors.iter_mut() {
        refresh_outcome(next);
    }
    successors
}

/// Every legal move for the side to move.
pub fn legal_moves(position: &Position) -> Vec<ChessMove> {
    legal_successors_unscored(position)
        .into_iter()
        .map(|(mv, _)| mv)
        .collect()
}

/// Short-circuiting existence check used for terminal-state detection.
pub fn has_legal_move(position: &Position) -> bool {
    let side = position.side_to_move;
    pseudo_moves(position)
        .into_iter()
        .any(|mv| !is_king_in_check(&make_move_unchecked(position, mv), side))
}

pub fn is_checkmate(position: &Position) -> bool {
    is_king_in_check(position, position.side_to_move) && !has_legal_move(position)
}

pub fn is_stalemate(position: &Position) -> bool {
    !is_king_in_check(position, position.side_to_move) && !has_legal_move(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn start_position_has_twenty_moves() {
        let position = Position::new_game();
        let moves = legal_moves(&position);
        assert_eq!(moves.len(), 20);

        for mv in moves {
            let mut copy = position.clone();
            apply_move(&mut copy, mv.from, mv.to).expect("generated move should apply");
            assert_eq!(copy.side_to_move, Color::Black);
        }
    }

    #[test]
    fn moves_are_sorted_by_origin_then_destination() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let moves = legal_moves(&position);
        assert_eq!(moves.len(), 48);
        assert!(moves.windows(2).all(|w| w[0].squares() < w[1].squares()));
    }

    #[test]
    fn queen_mate_is_detected_only_after_the_move() {
        let mut position =
            Position::from_fen("6Q1/8/8/p7/k7/5p2/1K6/8 w - - 0 5").expect("FEN should parse");
        assert!(!is_checkmate(&position));

        let g8 = algebraic_to_square("g8").expect("g8 should parse");
        let b3 = algebraic_to_square("b3").expect("b3 should parse");
        apply_move(&mut position, g8, b3).expect("Qb3 should be legal");

        assert!(is_checkmate(&position));
        assert_eq!(position.outcome, Outcome::Checkmate);
    }

    #[test]
    fn stalemate_has_no_moves_and_no_check() {
        let position = Position::from_fen("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert!(is_stalemate(&position));
        assert!(!is_checkmate(&position));
        assert!(legal_moves(&position).is_empty());
        assert_eq!(position.outcome, Outcome::Stalemate);
    }
}
