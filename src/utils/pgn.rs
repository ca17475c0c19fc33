//! PGN read/write utilities for game history interchange.
//!
//! Serializes a game record to PGN text with SAN movetext and parses PGN
//! back into a replayed record.

use std::collections::BTreeMap;

use chrono::Local;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_record::GameRecord;
use crate::game_state::position::Position;

/// Seven Tag Roster plus SetUp/FEN for games that start from a custom position.
pub fn default_headers(record: &GameRecord) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Sentinel Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), record.result_code().to_owned());

    let initial_fen = record.initial().get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }
    headers
}

pub fn write_pgn(record: &GameRecord) -> String {
    write_pgn_with_headers(record.initial(), record.san_moves(), &default_headers(record))
}

pub fn write_pgn_with_headers(
    initial: &Position,
    san_moves: &[String],
    headers: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(san_moves.len() + 1);
    let mut number = initial.fullmove_number;
    let mut side = initial.side_to_move;
    for (ply, san) in san_moves.iter().enumerate() {
        match side {
            Color::White => movetext_parts.push(format!("{number}. {san}")),
            Color::Black if ply == 0 => movetext_parts.push(format!("{number}... {san}")),
            Color::Black => movetext_parts.push(san.clone()),
        }
        if side == Color::Black {
            number = number.saturating_add(1);
        }
        side = side.opposite();
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Parsed PGN: headers plus the replayed game.
#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub record: GameRecord,
    pub result: String,
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let mut record = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ChessError::MalformedPgn("SetUp is 1 but the FEN header is missing".to_owned())
        })?;
        GameRecord::from_fen(fen)?
    } else {
        GameRecord::new()
    };

    let mut result = "*".to_owned();
    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        let token = strip_move_number(token);
        if token.is_empty() {
            continue;
        }
        let cleaned = token.trim_end_matches(['!', '?']);
        if is_result_token(cleaned) {
            result = cleaned.to_owned();
            break;
        }
        record.play_san(cleaned)?;
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        record,
        result,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let malformed = || ChessError::MalformedPgn(line.to_owned());
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(malformed)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(malformed)?;
    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// Drop a leading `12.` or `12...` from a token; `12.e4` yields `e4`.
fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = &token[digits..];
    if digits > 0 && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pgn_round_trip_start_position_history() {
        let mut game = GameRecord::new();
        for san in ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"] {
            game.play_san(san).expect("SAN should apply");
        }

        let pgn = game.to_pgn();
        assert!(pgn.contains("[Event \"Sentinel Chess Game\"]"));
        assert!(pgn.contains("[Result \"*\"]"));
        assert!(!pgn.contains("[FEN "));
        assert!(pgn.contains("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 *"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.record.position(), game.position());
        assert_eq!(parsed.record.san_moves(), game.san_moves());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn custom_start_writes_setup_and_black_move_number() {
        let mut game =
            GameRecord::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 7").expect("FEN should parse");
        game.play_squares("e8", "d7").expect("Kd7 should be legal");
        game.play_squares("e2", "e4").expect("e4 should be legal");

        let pgn = game.to_pgn();
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 7\"]"));
        assert!(pgn.contains("7... Kd7 8. e4 *"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.record.initial(), game.initial());
        assert_eq!(parsed.record.position(), game.position());
    }

    #[test]
    fn move_numbers_saturate_at_the_fullmove_limit() {
        let mut game = GameRecord::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 65535")
            .expect("FEN should parse");
        game.play_squares("e8", "d7").expect("Kd7 should be legal");
        game.play_squares("e2", "e4").expect("e4 should be legal");
        game.play_squares("d7", "d6").expect("Kd6 should be legal");

        let pgn = game.to_pgn();
        assert!(pgn.contains("65535... Kd7 65535. e4 Kd6 *"));
        assert_eq!(game.position().fullmove_number, u16::MAX);
    }

    #[test]
    fn finished_game_carries_result() {
        let mut game = GameRecord::new();
        for san in ["f3", "e5", "g4", "Qh4#"] {
            game.play_san(san).expect("SAN should apply");
        }
        let pgn = game.to_pgn();
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.trim_end().ends_with("2. g4 Qh4# 0-1"));
    }

    #[test]
    fn reads_comments_variations_and_compact_numbers() {
        let text = "[Event \"Casual\"]\n\n1.e4 {best by test} e5 (1...c5) 2.Nf3! Nc6 1/2-1/2\n";
        let parsed = read_pgn(text).expect("PGN should parse");
        assert_eq!(parsed.headers.get("Event").map(String::as_str), Some("Casual"));
        assert_eq!(parsed.record.san_moves(), ["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(parsed.result, "1/2-1/2");
    }

    #[test]
    fn bad_input_is_typed() {
        assert!(matches!(
            read_pgn("[Event Casual]\n1. e4 *"),
            Err(ChessError::MalformedPgn(_))
        ));
        assert!(matches!(
            read_pgn("[SetUp \"1\"]\n1. e4 *"),
            Err(ChessError::MalformedPgn(_))
        ));
        assert!(matches!(
            read_pgn("1. e5 *"),
            Err(ChessError::AmbiguousOrUnresolvedMove(_))
        ));
    }
}
