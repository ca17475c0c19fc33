//! Standard algebraic notation.
//!
//! Parsing resolves text such as `Nf3`, `exd5`, `R1e2`, `e8=Q+` or `O-O`
//! to an origin/destination pair for the side to move. Generation produces
//! the shortest unambiguous SAN for a legal move.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{file_of, rank_of, square_at, PLAYABLE_SQUARES};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::validate_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::legal_moves_king::castle_wings;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};

/// Fields recovered from one SAN token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SanParts {
    kind: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
}

#[inline]
fn file_index(ch: char) -> Option<u8> {
    ('a'..='h').contains(&ch).then(|| ch as u8 - b'a')
}

#[inline]
fn rank_index(ch: char) -> Option<u8> {
    ('1'..='8').contains(&ch).then(|| ch as u8 - b'1')
}

fn strip_suffixes(text: &str) -> &str {
    let body = text
        .strip_suffix('+')
        .or_else(|| text.strip_suffix('#'))
        .unwrap_or(text);
    body.strip_suffix("=Q").unwrap_or(body)
}

fn parse_parts(text: &str) -> ChessResult<SanParts> {
    let malformed = || ChessError::MalformedMoveText(text.to_owned());
    let chars: Vec<char> = strip_suffixes(text).chars().collect();

    let (kind, rest) = match chars.split_first() {
        Some((&first, tail)) if first.is_ascii_uppercase() => {
            (PieceKind::from_letter(first).ok_or_else(malformed)?, tail)
        }
        Some((&first, _)) if file_index(first).is_some() => (PieceKind::Pawn, chars.as_slice()),
        _ => return Err(malformed()),
    };

    let [prefix @ .., to_file, to_rank] = rest else {
        return Err(malformed());
    };
    let to = square_at(
        file_index(*to_file).ok_or_else(malformed)?,
        rank_index(*to_rank).ok_or_else(malformed)?,
    );

    let mut idx = 0;
    let from_file = prefix.get(idx).copied().and_then(file_index);
    if from_file.is_some() {
        idx += 1;
    }
    let from_rank = prefix.get(idx).copied().and_then(rank_index);
    if from_rank.is_some() {
        idx += 1;
    }
    if prefix.get(idx) == Some(&'x') {
        idx += 1;
    }
    if idx != prefix.len() {
        return Err(malformed());
    }

    Ok(SanParts {
        kind,
        from_file,
        from_rank,
        to,
    })
}

fn castle_squares(position: &Position, queenside: bool) -> (Square, Square) {
    let [kingside_wing, queenside_wing] = castle_wings(position.side_to_move);
    let wing = if queenside { queenside_wing } else { kingside_wing };
    (wing.king_from, wing.king_to)
}

/// Resolve SAN text to `(from, to)` for the side to move.
///
/// Candidates are tried in ascending square order and the first one that
/// passes full validation wins. When exactly one piece could have made the
/// move its validation error is returned as is.
///
/// The `x` capture mark is not checked, so a pawn token without a source
/// file such as `d5` also resolves to a capture like `exd5`.
pub fn parse_move_text(position: &Position, text: &str) -> ChessResult<(Square, Square)> {
    let token = text.trim();
    let body = token
        .strip_suffix('+')
        .or_else(|| token.strip_suffix('#'))
        .unwrap_or(token);
    match body {
        "O-O" | "0-0" => return Ok(castle_squares(position, false)),
        "O-O-O" | "0-0-0" => return Ok(castle_squares(position, true)),
        _ => {}
    }

    let parts = parse_parts(token)?;
    let wanted = Piece::new(position.side_to_move, parts.kind);
    let candidates: Vec<Square> = PLAYABLE_SQUARES
        .into_iter()
        .filter(|&square| position.piece_at(square) == Some(wanted))
        .filter(|&square| parts.from_file.is_none_or(|file| file_of(square) == file))
        .filter(|&square| parts.from_rank.is_none_or(|rank| rank_of(square) == rank))
        .collect();

    let mut last_error = None;
    for &from in &candidates {
        match validate_move(position, from, parts.to) {
            Ok(_) => return Ok((from, parts.to)),
            Err(err) => last_error = Some(err),
        }
    }

    match (candidates.len(), last_error) {
        (1, Some(err)) => Err(err),
        _ => Err(ChessError::AmbiguousOrUnresolvedMove(token.to_owned())),
    }
}

/// SAN for `mv`, a legal move in `before` that produced `after`.
pub fn move_to_san(before: &Position, mv: ChessMove, after: &Position) -> String {
    let mut san = String::with_capacity(8);

    if mv.is_castling() {
        san.push_str(if file_of(mv.to) < file_of(mv.from) {
            "O-O-O"
        } else {
            "O-O"
        });
    } else {
        if mv.piece == PieceKind::Pawn {
            if mv.is_capture() {
                san.push(file_char(mv.from));
            }
        } else {
            san.push(mv.piece.letter());
            san.push_str(&disambiguation(before, mv));
        }
        if mv.is_capture() {
            san.push('x');
        }
        san.push_str(&square_to_algebraic(mv.to).unwrap_or_default());
        if mv.is_promotion() {
            san.push_str("=Q");
        }
    }

    if after.outcome == Outcome::Checkmate {
        san.push('#');
    } else if is_king_in_check(after, after.side_to_move) {
        san.push('+');
    }
    san
}

fn disambiguation(before: &Position, mv: ChessMove) -> String {
    let rivals: Vec<ChessMove> = legal_moves(before)
        .into_iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }

    let shares_file = rivals.iter().any(|other| file_of(other.from) == file_of(mv.from));
    let shares_rank = rivals.iter().any(|other| rank_of(other.from) == rank_of(mv.from));
    match (shares_file, shares_rank) {
        (false, _) => file_char(mv.from).to_string(),
        (true, false) => rank_char(mv.from).to_string(),
        (true, true) => square_to_algebraic(mv.from).unwrap_or_default(),
    }
}
