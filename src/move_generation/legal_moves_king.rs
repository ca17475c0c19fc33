use crate::errors::{CastleViolation, ChessError, ChessResult};
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_simple_move;
use crate::moves::chess_move::{ChessMove, FLAG_CASTLING};
use crate::moves::offsets::{step, KING_OFFSETS};

/// Fixed squares involved in one castling wing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty.
    pub empty: &'static [Square],
    /// Squares the king stands on, crosses, or lands on.
    pub king_path: [Square; 3],
}

pub const WHITE_KINGSIDE: CastleGeometry = CastleGeometry {
    right: CASTLE_WHITE_KINGSIDE,
    king_from: E1,
    king_to: G1,
    rook_from: H1,
    rook_to: F1,
    empty: &[F1, G1],
    king_path: [E1, F1, G1],
};

pub const WHITE_QUEENSIDE: CastleGeometry = CastleGeometry {
    right: CASTLE_WHITE_QUEENSIDE,
    king_from: E1,
    king_to: C1,
    rook_from: A1,
    rook_to: D1,
    empty: &[B1, C1, D1],
    king_path: [E1, D1, C1],
};

pub const BLACK_KINGSIDE: CastleGeometry = CastleGeometry {
    right: CASTLE_BLACK_KINGSIDE,
    king_from: E8,
    king_to: G8,
    rook_from: H8,
    rook_to: F8,
    empty: &[F8, G8],
    king_path: [E8, F8, G8],
};

pub const BLACK_QUEENSIDE: CastleGeometry = CastleGeometry {
    right: CASTLE_BLACK_QUEENSIDE,
    king_from: E8,
    king_to: C8,
    rook_from: A8,
    rook_to: D8,
    empty: &[B8, C8, D8],
    king_path: [E8, D8, C8],
};

#[inline]
pub const fn castle_wings(color: Color) -> [CastleGeometry; 2] {
    match color {
        Color::White => [WHITE_KINGSIDE, WHITE_QUEENSIDE],
        Color::Black => [BLACK_KINGSIDE, BLACK_QUEENSIDE],
    }
}

/// The wing whose king move is `from -> to`, if that pair is a castling pair.
pub fn castle_wing_for(color: Color, from: Square, to: Square) -> Option<CastleGeometry> {
    castle_wings(color)
        .into_iter()
        .find(|wing| wing.king_from == from && wing.king_to == to)
}

/// Single-step king moves plus any castling the position allows.
pub fn generate_king_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<ChessMove>) {
    for offset in KING_OFFSETS {
        if let Some(to) = step(from, offset) {
            push_simple_move(position, from, to, piece, out);
        }
    }

    for wing in castle_wings(piece.color) {
        if wing.king_from != from {
            continue;
        }
        if let Ok(mv) = castle_move(position, piece.color, wing) {
            out.push(mv);
        }
    }
}

/// Validate castling on `wing` for `color`.
pub fn castle_move(position: &Position, color: Color, wing: CastleGeometry) -> ChessResult<ChessMove> {
    if !position.has_castling_right(wing.right) {
        return Err(ChessError::IllegalCastle(CastleViolation::RightsRevoked));
    }

    let king = Piece::new(color, PieceKind::King);
    let rook = Piece::new(color, PieceKind::Rook);
    if position.piece_at(wing.king_from) != Some(king)
        || position.piece_at(wing.rook_from) != Some(rook)
    {
        return Err(ChessError::IllegalCastle(CastleViolation::KingNotHome));
    }

    if wing.empty.iter().any(|&square| !position.is_empty(square)) {
        return Err(ChessError::IllegalCastle(CastleViolation::PathBlocked));
    }

    let enemy = color.opposite();
    if is_square_attacked(position, wing.king_from, enemy) {
        return Err(ChessError::IllegalCastle(CastleViolation::WhileInCheck));
    }
    if wing.king_path[1..]
        .iter()
        .any(|&square| is_square_attacked(position, square, enemy))
    {
        return Err(ChessError::IllegalCastle(CastleViolation::ThroughCheck));
    }

    Ok(ChessMove::new(
        wing.king_from,
        wing.king_to,
        PieceKind::King,
        None,
        FLAG_CASTLING,
    ))
}
