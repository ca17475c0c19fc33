//! Mailbox position model.
//!
//! `Position` is the only mutable entity in the engine. It owns its square
//! buffer by value, so `clone()` is a full deep copy with no shared state;
//! every hypothetical move is tried on such a copy.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::{generate_board_field, generate_fen};
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub squares: [Cell; BOARD_CELLS],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub ply: u16,

    pub outcome: Outcome,

    /// Most recent (origin, destination) pairs, oldest first.
    pub recent_move_pairs: [Option<(Square, Square)>; RECENT_PAIR_WINDOW],
}

impl Position {
    /// Board with every interior square empty and no rights.
    pub fn new_empty() -> Self {
        let mut squares = [Cell::Border; BOARD_CELLS];
        for square in PLAYABLE_SQUARES {
            squares[square as usize] = Cell::Empty;
        }

        Self {
            squares,
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            ply: 0,
            outcome: Outcome::Ongoing,
            recent_move_pairs: [None; RECENT_PAIR_WINDOW],
        }
    }

    pub fn new_game() -> Self {
        // The literal is covered by tests; fall back to an empty board rather than panic.
        parse_fen(STARTING_POSITION_FEN).unwrap_or_else(|_| Self::new_empty())
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Piece placement field of the FEN, used as the opening-book key.
    #[inline]
    pub fn placement_key(&self) -> String {
        generate_board_field(self)
    }

    #[inline]
    pub fn cell(&self, square: Square) -> Cell {
        self.squares
            .get(square as usize)
            .copied()
            .unwrap_or(Cell::Border)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cell(square).piece()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cell(square) == Cell::Empty
    }

    /// Place or clear a piece. Border cells are never written.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        if !is_playable(square as usize) {
            return;
        }
        self.squares[square as usize] = match piece {
            Some(piece) => Cell::Occupied(piece),
            None => Cell::Empty,
        };
    }

    /// Occupied squares of `color`, ascending.
    pub fn pieces_of(&self, color: Color) -> Vec<(Square, Piece)> {
        PLAYABLE_SQUARES
            .iter()
            .filter_map(|&square| match self.piece_at(square) {
                Some(piece) if piece.color == color => Some((square, piece)),
                _ => None,
            })
            .collect()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        PLAYABLE_SQUARES
            .iter()
            .copied()
            .find(|&square| self.piece_at(square) == Some(king))
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    /// Cycle the recent-pair window, dropping the oldest entry.
    pub fn push_move_pair(&mut self, from: Square, to: Square) {
        self.recent_move_pairs.rotate_left(1);
        self.recent_move_pairs[RECENT_PAIR_WINDOW - 1] = Some((from, to));
    }

    /// Both sides just moved a piece out and back again over the last four plies.
    ///
    /// This is a shuffle heuristic, not real repetition detection: it only
    /// looks at the four most recent (origin, destination) pairs.
    pub fn is_shuffle_draw(&self) -> bool {
        match self.recent_move_pairs {
            [Some(p0), Some(p1), Some(p2), Some(p3)] => {
                p2 == (p0.1, p0.0) && p3 == (p1.1, p1.0)
            }
            _ => false,
        }
    }
}
