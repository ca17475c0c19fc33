//! Square conversions between algebraic coordinates and mailbox indices.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the internal
//! padded-board indices reused by FEN, SAN, and the programmatic move API.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{file_of, is_playable, rank_of, square_at};
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a mailbox index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Ok(square_at(file - b'a', rank - b'1'))
}

/// Validate a raw mailbox index supplied by a caller.
#[inline]
pub fn square_from_index(index: usize) -> ChessResult<Square> {
    if is_playable(index) {
        Ok(index as Square)
    } else {
        Err(ChessError::InvalidSquare(index.to_string()))
    }
}

/// Convert a mailbox index to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if !is_playable(square as usize) {
        return Err(ChessError::InvalidSquare(square.to_string()));
    }

    Ok(format!("{}{}", file_char(square), rank_char(square)))
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + file_of(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + rank_of(square))
}
