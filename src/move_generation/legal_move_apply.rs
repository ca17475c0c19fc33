//! Move validation and execution.
//!
//! Validation runs completely before anything is written: the move is
//! checked against the piece's movement law, executed on a scratch copy, and
//! only a copy whose own king is safe is ever committed. A failing call
//! leaves the caller's position exactly as it was.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_pseudo_moves_from, has_legal_move};
use crate::move_generation::legal_moves_king::{castle_move, castle_wing_for};
use crate::move_generation::legal_moves_pawn::en_passant_victim;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::square_from_index;

/// Validate `from -> to` for the side to move and return the move together
/// with the resulting position. The returned position's outcome is not yet
/// recomputed.
pub fn validate_move(
    position: &Position,
    from: Square,
    to: Square,
) -> ChessResult<(ChessMove, Position)> {
    if position.outcome == Outcome::Checkmate {
        return Err(ChessError::GameAlreadyDecided);
    }

    let from = square_from_index(from as usize)?;
    let to = square_from_index(to as usize)?;

    let piece = position
        .piece_at(from)
        .ok_or(ChessError::EmptyOrigin { square: from })?;
    if piece.color != position.side_to_move {
        return Err(ChessError::WrongTurn { square: from });
    }

    if let Some(target) = position.piece_at(to) {
        if target.color == piece.color {
            return Err(ChessError::OwnPieceCapture { square: to });
        }
    }

    let mv = if piece.kind == PieceKind::King {
        match castle_wing_for(piece.color, from, to) {
            Some(wing) => castle_move(position, piece.color, wing)?,
            None => find_movement(position, from, to, piece)?,
        }
    } else {
        find_movement(position, from, to, piece)?
    };

    let next = make_move_unchecked(position, mv);
    if is_king_in_check(&next, piece.color) {
        return Err(ChessError::SelfCheckViolation);
    }

    Ok((mv, next))
}

fn find_movement(position: &Position, from: Square, to: Square, piece: Piece) -> ChessResult<ChessMove> {
    let mut candidates = Vec::with_capacity(28);
    generate_pseudo_moves_from(position, from, piece, &mut candidates);
    candidates
        .into_iter()
        .find(|mv| mv.to == to && !mv.is_castling())
        .ok_or(ChessError::IllegalPieceMovement(piece.kind))
}

/// Validate and commit a move on `position`. On error nothing changes.
pub fn apply_move(position: &mut Position, from: Square, to: Square) -> ChessResult<ChessMove> {
    let (mv, mut next) = validate_move(position, from, to)?;
    refresh_outcome(&mut next);
    *position = next;

    debug!(
        mv = %mv,
        outcome = ?position.outcome,
        fen = %position.get_fen(),
        "move applied"
    );

    Ok(mv)
}

/// Value-returning variant of `apply_move`; the input is never touched.
pub fn play_move(position: &Position, from: Square, to: Square) -> ChessResult<(ChessMove, Position)> {
    let (mv, mut next) = validate_move(position, from, to)?;
    refresh_outcome(&mut next);
    Ok((mv, next))
}

/// Execute an already generated move on a copy. No legality checks and no
/// outcome recomputation; used for trial moves.
pub fn make_move_unchecked(position: &Position, mv: ChessMove) -> Position {
    let mover = position.side_to_move;
    let mut next = position.clone();

    let Some(moving_piece) = next.piece_at(mv.from) else {
        return next;
    };

    if mv.is_en_passant() {
        if let Some(victim) = en_passant_victim(position, mv.to, mover) {
            next.set_piece(victim, None);
        }
    }

    let placed = if mv.is_promotion() {
        Piece::new(mover, PieceKind::Queen)
    } else {
        moving_piece
    };
    next.set_piece(mv.from, None);
    next.set_piece(mv.to, Some(placed));

    if mv.is_castling() {
        if let Some(wing) = castle_wing_for(mover, mv.from, mv.to) {
            let rook = next.piece_at(wing.rook_from);
            next.set_piece(wing.rook_from, None);
            next.set_piece(wing.rook_to, rook);
        }
    }

    update_castling_rights(&mut next, mover, mv);

    next.en_passant_square = if mv.is_double_pawn_push() {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    if mv.piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = mover.opposite();
    next.ply = next.ply.saturating_add(1);
    next.push_move_pair(mv.from, mv.to);
    next.outcome = Outcome::Ongoing;

    next
}

fn update_castling_rights(position: &mut Position, mover: Color, mv: ChessMove) {
    if mv.piece == PieceKind::King {
        position.castling_rights &= match mover {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }

    // Leaving a rook home square, or capturing onto one, revokes that wing.
    for square in [mv.from, mv.to] {
        match square {
            A1 => position.castling_rights &= !CASTLE_WHITE_QUEENSIDE,
            H1 => position.castling_rights &= !CASTLE_WHITE_KINGSIDE,
            A8 => position.castling_rights &= !CASTLE_BLACK_QUEENSIDE,
            H8 => position.castling_rights &= !CASTLE_BLACK_KINGSIDE,
            _ => {}
        }
    }
}

/// Recompute `outcome` for the side now to move from scratch.
pub fn refresh_outcome(position: &mut Position) {
    let in_check = is_king_in_check(position, position.side_to_move);

    position.outcome = if !has_legal_move(position) {
        if in_check {
            Outcome::Checkmate
        } else {
            Outcome::Stalemate
        }
    } else if position.is_shuffle_draw() || position.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
        Outcome::Draw
    } else if in_check {
        Outcome::Check
    } else {
        Outcome::Ongoing
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CastleViolation;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn apply(position: &mut Position, from: &str, to: &str) -> ChessResult<ChessMove> {
        apply_move(position, sq(from), sq(to))
    }

    #[test]
    fn opening_push_flips_side_and_sets_en_passant() {
        let mut position = Position::new_game();
        let mv = apply(&mut position, "e2", "e4").expect("e4 should be legal");

        assert!(mv.is_double_pawn_push());
        assert_eq!(position.side_to_move, Color::Black);
        assert_eq!(position.en_passant_square, Some(sq("e3")));
        assert_eq!(position.fullmove_number, 1);
        assert_eq!(position.ply, 1);
        assert_eq!(
            position.get_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        apply(&mut position, "g8", "f6").expect("Nf6 should be legal");
        assert_eq!(position.en_passant_square, None);
        assert_eq!(position.fullmove_number, 2);
        assert_eq!(position.halfmove_clock, 1);
    }

    #[test]
    fn en_passant_removes_pushed_pawn_from_its_own_square() {
        let mut position =
            Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        apply(&mut position, "d7", "d5").expect("double push should be legal");
        assert_eq!(position.en_passant_square, Some(sq("d6")));

        let mv = apply(&mut position, "e5", "d6").expect("en passant should be legal");
        assert!(mv.is_en_passant());
        assert_eq!(position.piece_at(sq("d5")), None);
        assert_eq!(
            position.piece_at(sq("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(position.piece_at(sq("e5")), None);
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut position =
            Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        apply(&mut position, "d7", "d5").expect("double push should be legal");
        apply(&mut position, "e1", "f1").expect("king step should be legal");
        apply(&mut position, "e8", "f8").expect("king step should be legal");
        assert_eq!(
            apply(&mut position, "e5", "d6"),
            Err(ChessError::IllegalPieceMovement(PieceKind::Pawn))
        );
    }

    #[test]
    fn self_check_is_rejected_without_mutation() {
        // The e2 bishop is pinned against the king by the e8 rook.
        let mut position =
            Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let before = position.clone();

        assert_eq!(
            apply(&mut position, "e2", "d3"),
            Err(ChessError::SelfCheckViolation)
        );
        assert_eq!(position, before);
    }

    #[test]
    fn precondition_errors_are_typed() {
        let mut position = Position::new_game();
        let before = position.clone();

        assert_eq!(
            apply(&mut position, "e4", "e5"),
            Err(ChessError::EmptyOrigin { square: sq("e4") })
        );
        assert_eq!(
            apply(&mut position, "e7", "e5"),
            Err(ChessError::WrongTurn { square: sq("e7") })
        );
        assert_eq!(
            apply(&mut position, "a1", "a2"),
            Err(ChessError::OwnPieceCapture { square: sq("a2") })
        );
        assert_eq!(
            apply(&mut position, "f1", "c4"),
            Err(ChessError::IllegalPieceMovement(PieceKind::Bishop))
        );
        // g1 still holds the knight, so the friendly-piece check fires first.
        assert_eq!(
            apply(&mut position, "e1", "g1"),
            Err(ChessError::OwnPieceCapture { square: sq("g1") })
        );
        assert!(matches!(
            apply_move(&mut position, 20, 31),
            Err(ChessError::InvalidSquare(_))
        ));
        assert_eq!(position, before);
    }

    #[test]
    fn blocked_castle_reports_path_blocked() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3KB1R w KQkq - 0 1").expect("FEN should parse");
        let before = position.clone();
        assert_eq!(
            apply(&mut position, "e1", "g1"),
            Err(ChessError::IllegalCastle(CastleViolation::PathBlocked))
        );
        assert_eq!(position, before);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let mv = apply(&mut position, "e1", "g1").expect("castle should be legal");
        assert!(mv.is_castling());
        assert_eq!(
            position.piece_at(F1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(position.piece_at(H1), None);
        assert_eq!(position.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);

        apply(&mut position, "a8", "a1").expect("rook capture should be legal");
        assert_eq!(position.castling_rights, CASTLE_BLACK_KINGSIDE);
    }

    #[test]
    fn capturing_a_home_rook_revokes_its_wing() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").expect("FEN should parse");
        apply(&mut position, "g2", "a8").expect("bishop capture should be legal");
        assert_eq!(
            position.castling_rights,
            CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_KINGSIDE
        );
    }

    #[test]
    fn pawn_reaching_far_rank_becomes_queen() {
        let mut position =
            Position::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mv = apply(&mut position, "a7", "a8").expect("promotion should be legal");
        assert!(mv.is_promotion());
        assert_eq!(
            position.piece_at(A8),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(position.outcome, Outcome::Check);
    }

    #[test]
    fn outcome_classifies_check_mate_and_stalemate() {
        let mut check =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        apply(&mut check, "a1", "a8").expect("rook check should be legal");
        assert_eq!(check.outcome, Outcome::Check);

        let mut mate =
            Position::from_fen("4k3/R7/8/8/8/8/8/1R2K3 w - - 0 1").expect("FEN should parse");
        apply(&mut mate, "b1", "b8").expect("mating move should be legal");
        assert_eq!(mate.outcome, Outcome::Checkmate);
        assert_eq!(
            apply(&mut mate, "e8", "d8"),
            Err(ChessError::GameAlreadyDecided)
        );

        let mut stalemate =
            Position::from_fen("k7/8/8/1Q6/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        apply(&mut stalemate, "b5", "b6").expect("queen move should be legal");
        assert_eq!(stalemate.outcome, Outcome::Stalemate);
    }

    #[test]
    fn knight_shuffle_is_a_draw() {
        let mut position = Position::new_game();
        for (from, to) in [("g1", "f3"), ("g8", "f6"), ("f3", "g1")] {
            apply(&mut position, from, to).expect("knight move should be legal");
            assert_eq!(position.outcome, Outcome::Ongoing);
        }
        apply(&mut position, "f6", "g8").expect("knight move should be legal");
        assert_eq!(position.outcome, Outcome::Draw);
    }

    #[test]
    fn fifty_quiet_moves_draw() {
        let mut position =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").expect("FEN should parse");
        apply(&mut position, "a1", "a2").expect("rook move should be legal");
        assert_eq!(position.outcome, Outcome::Draw);
    }
}
