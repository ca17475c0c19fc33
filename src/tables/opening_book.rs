//! Embedded opening book.
//!
//! Keyed by piece placement and side to move. Castling rights, en passant
//! and move counters are ignored when matching. Each key holds one reply in
//! long algebraic form.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::validate_move;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::algebraic_to_square;

const BOOK_LINES: &[(&str, Color, &str)] = &[
    // Start
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White, "e2e4"),
    // 1.e4
    ("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR", Color::Black, "e7e5"),
    ("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR", Color::White, "g1f3"),
    ("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R", Color::Black, "b8c6"),
    ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R", Color::White, "f1b5"),
    ("r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R", Color::Black, "a7a6"),
    ("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR", Color::White, "g1f3"),
    ("rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR", Color::White, "d2d4"),
    ("rnbqkbnr/pp1ppppp/2p5/8/4P3/8/PPPP1PPP/RNBQKBNR", Color::White, "d2d4"),
    ("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR", Color::White, "e4d5"),
    // 1.d4
    ("rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR", Color::Black, "d7d5"),
    ("rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR", Color::White, "c2c4"),
    ("rnbqkbnr/ppp1pppp/8/3p4/2PP4/8/PP2PPPP/RNBQKBNR", Color::Black, "e7e6"),
    // Flank openings
    ("rnbqkbnr/pppppppp/8/8/2P5/8/PP1PPPPP/RNBQKBNR", Color::Black, "e7e5"),
    ("rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R", Color::Black, "d7d5"),
];

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    by_key: HashMap<(String, Color), (Square, Square)>,
}

static DEFAULT_BOOK: LazyLock<OpeningBook> = LazyLock::new(OpeningBook::embedded);

fn parse_book_move(text: &str) -> ChessResult<(Square, Square)> {
    let malformed = || ChessError::MalformedMoveText(text.to_owned());
    let from = text.get(0..2).ok_or_else(malformed)?;
    let to = text.get(2..4).ok_or_else(malformed)?;
    if text.len() != 4 {
        return Err(malformed());
    }
    Ok((algebraic_to_square(from)?, algebraic_to_square(to)?))
}

impl OpeningBook {
    /// Book built from the embedded line table. Unparseable rows are skipped.
    pub fn embedded() -> Self {
        let mut book = Self::default();
        for &(placement, side, reply) in BOOK_LINES {
            if let Ok(squares) = parse_book_move(reply) {
                book.insert(placement, side, squares);
            }
        }
        book
    }

    pub fn global() -> &'static OpeningBook {
        &DEFAULT_BOOK
    }

    pub fn insert(&mut self, placement: &str, side: Color, squares: (Square, Square)) {
        self.by_key.insert((placement.to_owned(), side), squares);
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Stored reply for `position`, validated against the full rules.
    pub fn lookup(&self, position: &Position) -> ChessResult<ChessMove> {
        let key = (position.placement_key(), position.side_to_move);
        let &(from, to) = self.by_key.get(&key).ok_or(ChessError::OpeningBookMiss)?;
        let (mv, _) = validate_move(position, from, to)?;
        Ok(mv)
    }
}

/// Look up `position` in the embedded book.
pub fn book_move(position: &Position) -> ChessResult<ChessMove> {
    OpeningBook::global().lookup(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::apply_move;

    #[test]
    fn every_entry_is_legal_in_its_position() {
        let book = OpeningBook::embedded();
        assert_eq!(book.len(), BOOK_LINES.len());

        for &(placement, side, reply) in BOOK_LINES {
            let side_field = match side {
                Color::White => "w",
                Color::Black => "b",
            };
            let fen = format!("{placement} {side_field} KQkq - 0 1");
            let position = Position::from_fen(&fen).expect("book placement should parse");
            let mv = book.lookup(&position).expect("book entry should be legal");
            assert_eq!(mv.to_string(), reply);
        }
    }

    #[test]
    fn follows_a_main_line() {
        let mut position = Position::new_game();
        for expected in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6"] {
            let mv = book_move(&position).expect("line should stay in book");
            assert_eq!(mv.to_string(), expected);
            apply_move(&mut position, mv.from, mv.to).expect("book move should apply");
        }
        assert_eq!(book_move(&position), Err(ChessError::OpeningBookMiss));
    }

    #[test]
    fn unknown_position_misses() {
        let position =
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(book_move(&position), Err(ChessError::OpeningBookMiss));
    }

    #[test]
    fn malformed_reply_text_is_rejected() {
        assert!(parse_book_move("e2e").is_err());
        assert!(parse_book_move("e2e4q").is_err());
        assert!(parse_book_move("z9e4").is_err());
    }
}
