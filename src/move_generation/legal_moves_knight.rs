use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_simple_move;
use crate::moves::chess_move::ChessMove;
use crate::moves::offsets::{step, KNIGHT_OFFSETS};

/// Knight jumps from `from`; nothing in between can block them.
pub fn generate_knight_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<ChessMove>) {
    for offset in KNIGHT_OFFSETS {
        if let Some(to) = step(from, offset) {
            push_simple_move(position, from, to, piece, out);
        }
    }
}
