//! Pluggable leaf evaluation.
//!
//! Search stays independent of the heuristic by delegating static scoring to
//! `BoardScorer`. Scores are always from the point of view of the side that
//! was to move at the search root ("Max").

use crate::game_state::chess_rules::{file_of, rank_of, square_at, PLAYABLE_SQUARES};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::ChessMove;

pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score a non-terminal leaf. `last_move` produced `position`.
    fn score(&self, position: &Position, last_move: Option<ChessMove>, max_color: Color) -> i32;
}

/// Shallow placeholder heuristic: central pawns and knights, knights on the
/// rim, and whether the move into this leaf was a capture.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicScorer {
    pub center_bonus: i32,
    pub knight_edge_penalty: i32,
    pub capture_bonus: i32,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self {
            center_bonus: 20,
            knight_edge_penalty: 10,
            capture_bonus: 30,
        }
    }
}

const CENTER_SQUARES: [Square; 4] = [
    square_at(3, 3),
    square_at(4, 3),
    square_at(3, 4),
    square_at(4, 4),
];

#[inline]
fn is_edge(square: Square) -> bool {
    matches!(file_of(square), 0 | 7) || matches!(rank_of(square), 0 | 7)
}

#[inline]
fn signed(value: i32, color: Color, max_color: Color) -> i32 {
    if color == max_color {
        value
    } else {
        -value
    }
}

impl BoardScorer for HeuristicScorer {
    fn score(&self, position: &Position, last_move: Option<ChessMove>, max_color: Color) -> i32 {
        let mut score = 0i32;

        for &square in &CENTER_SQUARES {
            if let Some(piece) = position.piece_at(square) {
                if matches!(piece.kind, PieceKind::Pawn | PieceKind::Knight) {
                    score += signed(self.center_bonus, piece.color, max_color);
                }
            }
        }

        for square in PLAYABLE_SQUARES {
            if !is_edge(square) {
                continue;
            }
            if let Some(piece) = position.piece_at(square) {
                if piece.kind == PieceKind::Knight {
                    score -= signed(self.knight_edge_penalty, piece.color, max_color);
                }
            }
        }

        if let Some(mv) = last_move.filter(|mv| mv.is_capture()) {
            if let Some(capturer) = position.piece_at(mv.to) {
                score += signed(self.capture_bonus, capturer.color, max_color);
            }
        }

        score
    }
}

/// Material balance with the usual centipawn values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position, _last_move: Option<ChessMove>, max_color: Color) -> i32 {
        PLAYABLE_SQUARES
            .iter()
            .filter_map(|&square| position.piece_at(square))
            .map(|piece| signed(Self::piece_value(piece.kind), piece.color, max_color))
            .sum()
    }
}

/// Leaf value including terminal states. Faster mates score higher.
pub fn leaf_score<S: BoardScorer + ?Sized>(
    scorer: &S,
    position: &Position,
    last_move: Option<ChessMove>,
    max_color: Color,
    ply: u8,
) -> i32 {
    match position.outcome {
        Outcome::Checkmate => {
            let value = MATE_SCORE - i32::from(ply);
            if position.side_to_move == max_color {
                -value
            } else {
                value
            }
        }
        Outcome::Stalemate | Outcome::Draw => 0,
        Outcome::Ongoing | Outcome::Check => scorer.score(position, last_move, max_color),
    }
}
