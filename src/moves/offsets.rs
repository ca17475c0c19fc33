//! Mailbox step vectors.
//!
//! Adding an offset to a square either lands on another playable square or on
//! a border sentinel, which is how every ray walk and jump terminates.

pub const NORTH: i8 = 10;
pub const SOUTH: i8 = -10;
pub const EAST: i8 = 1;
pub const WEST: i8 = -1;
pub const NORTH_EAST: i8 = 11;
pub const NORTH_WEST: i8 = 9;
pub const SOUTH_EAST: i8 = -9;
pub const SOUTH_WEST: i8 = -11;

pub const ROOK_DIRECTIONS: [i8; 4] = [NORTH, SOUTH, EAST, WEST];
pub const BISHOP_DIRECTIONS: [i8; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST];
pub const QUEEN_DIRECTIONS: [i8; 8] = [
    NORTH, SOUTH, EAST, WEST, NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST,
];
pub const KING_OFFSETS: [i8; 8] = QUEEN_DIRECTIONS;
pub const KNIGHT_OFFSETS: [i8; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];

/// `square + offset`, or `None` when the sum leaves the 120-cell frame.
#[inline]
pub fn step(square: u8, offset: i8) -> Option<u8> {
    let target = square as i16 + offset as i16;
    if (0..crate::game_state::chess_rules::BOARD_CELLS as i16).contains(&target) {
        Some(target as u8)
    } else {
        None
    }
}
