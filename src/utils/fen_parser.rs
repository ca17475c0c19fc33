//! FEN-to-Position parser.
//!
//! Builds a fully-populated mailbox position from a Forsyth-Edwards Notation
//! string, including rights, clocks, and the derived game outcome.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{rank_of, square_at};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::refresh_outcome;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| malformed("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| malformed("missing side to move"))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| malformed("missing castling rights"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| malformed("missing en passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| malformed("missing halfmove clock"))?;
    let fullmove_part = parts
        .next()
        .ok_or_else(|| malformed("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(malformed("extra trailing fields"));
    }

    let mut position = Position::new_empty();

    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_square = parse_en_passant_square(en_passant_part)?;
    position.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| malformed(&format!("invalid halfmove clock '{halfmove_part}'")))?;
    position.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| malformed(&format!("invalid fullmove number '{fullmove_part}'")))?;
    if position.fullmove_number == 0 {
        return Err(malformed("fullmove number starts at 1"));
    }

    // Saturates for very large fullmove numbers.
    position.ply = (position.fullmove_number - 1)
        .saturating_mul(2)
        .saturating_add(u16::from(position.side_to_move == Color::Black));
    refresh_outcome(&mut position);

    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed(&format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(malformed("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| malformed(&format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(malformed("board rank has too many files"));
            }

            position.set_piece(square_at(file, board_rank), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(malformed("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(malformed(&format!("invalid side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }
    if castling_part.len() > 4 {
        return Err(malformed(&format!("invalid castling field '{castling_part}'")));
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        let bit = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(malformed(&format!("invalid castling character '{ch}'"))),
        };
        if rights & bit != 0 {
            return Err(malformed(&format!("repeated castling character '{ch}'")));
        }
        rights |= bit;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| malformed(&format!("invalid en passant square '{en_passant_part}'")))?;
    match rank_of(square) {
        2 | 5 => Ok(Some(square)),
        _ => Err(malformed(&format!(
            "en passant square '{en_passant_part}' must be on rank 3 or 6"
        ))),
    }
}

fn malformed(reason: &str) -> ChessError {
    ChessError::MalformedFen(reason.to_owned())
}
