//! Canonical chess-rule constants and mailbox geometry.
//!
//! The board is a 10-column by 12-row frame. The 8x8 playing area sits in
//! rows 2..=9 and columns 1..=8, so `a1 == 21` and `h8 == 98`; every other
//! cell is a permanent border sentinel.

use crate::game_state::chess_types::Square;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const BOARD_CELLS: usize = 120;
pub const BOARD_WIDTH: u8 = 10;

/// Number of (origin, destination) pairs kept for the shuffle-draw heuristic.
pub const RECENT_PAIR_WINDOW: usize = 4;

/// Halfmove clock value at which the fifty-move rule declares a draw.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

pub const A1: Square = 21;
pub const B1: Square = 22;
pub const C1: Square = 23;
pub const D1: Square = 24;
pub const E1: Square = 25;
pub const F1: Square = 26;
pub const G1: Square = 27;
pub const H1: Square = 28;
pub const A8: Square = 91;
pub const B8: Square = 92;
pub const C8: Square = 93;
pub const D8: Square = 94;
pub const E8: Square = 95;
pub const F8: Square = 96;
pub const G8: Square = 97;
pub const H8: Square = 98;

/// Mailbox index for zero-based `file` (a = 0) and `rank` (1st rank = 0).
#[inline]
pub const fn square_at(file: u8, rank: u8) -> Square {
    21 + file + rank * BOARD_WIDTH
}

/// Zero-based file of a playable square.
#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % BOARD_WIDTH - 1
}

/// Zero-based rank of a playable square.
#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / BOARD_WIDTH - 2
}

/// True when `index` names one of the 64 interior cells.
#[inline]
pub const fn is_playable(index: usize) -> bool {
    if index >= BOARD_CELLS {
        return false;
    }
    let column = index % BOARD_WIDTH as usize;
    let row = index / BOARD_WIDTH as usize;
    column >= 1 && column <= 8 && row >= 2 && row <= 9
}

/// All playable squares in ascending mailbox order (a1, b1, .., h8).
pub const PLAYABLE_SQUARES: [Square; 64] = generate_playable_squares();

const fn generate_playable_squares() -> [Square; 64] {
    let mut table = [0u8; 64];
    let mut rank = 0u8;
    while rank < 8 {
        let mut file = 0u8;
        while file < 8 {
            table[(rank * 8 + file) as usize] = square_at(file, rank);
            file += 1;
        }
        rank += 1;
    }
    table
}
