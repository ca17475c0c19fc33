//! Perft node counting over the legal move generator.
//!
//! Promotions are always to queen, so counts match published perft tables
//! only for depths where no promotion occurs.

use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_successors_unscored;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for (mv, next) in legal_successors_unscored(position) {
        if depth == 1 {
            total.nodes += 1;
            total.captures += u64::from(mv.is_capture());
            total.en_passant += u64::from(mv.is_en_passant());
            total.castles += u64::from(mv.is_castling());
            total.promotions += u64::from(mv.is_promotion());
        } else {
            total.merge(perft(&next, depth - 1));
        }
    }

    total
}
