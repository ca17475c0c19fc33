//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type returned by move validation,
//! notation parsing, and search helpers. Every variant is recoverable: the
//! position a failing call was given is left untouched, so callers can report
//! the problem and ask for another move.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Square};

/// Why a castling attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleViolation {
    /// A square between king and rook is occupied.
    PathBlocked,
    /// The king would cross or land on an attacked square.
    ThroughCheck,
    /// The king is currently in check.
    WhileInCheck,
    /// The castling right for that wing has been lost.
    RightsRevoked,
    /// King or rook is not on its home square.
    KingNotHome,
}

impl std::fmt::Display for CastleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            CastleViolation::PathBlocked => "path between king and rook is blocked",
            CastleViolation::ThroughCheck => "king would pass through an attacked square",
            CastleViolation::WhileInCheck => "king is in check",
            CastleViolation::RightsRevoked => "castling right has been revoked",
            CastleViolation::KingNotHome => "king or rook is not on its home square",
        };
        f.write_str(text)
    }
}

/// Unified error type for the rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The game already ended in checkmate.
    #[error("game is already decided")]
    GameAlreadyDecided,

    /// Index or coordinate does not name one of the 64 playable squares.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Origin holds a piece of the side not on move.
    #[error("piece on square {square} does not belong to the side to move")]
    WrongTurn { square: Square },

    /// Origin square is empty.
    #[error("no piece on origin square {square}")]
    EmptyOrigin { square: Square },

    /// Destination holds a piece of the mover's own color.
    #[error("destination square {square} holds a friendly piece")]
    OwnPieceCapture { square: Square },

    /// The piece cannot move that way.
    #[error("illegal {0:?} movement")]
    IllegalPieceMovement(PieceKind),

    /// The move would leave the mover's own king attacked.
    #[error("move would leave own king in check")]
    SelfCheckViolation,

    /// Castling refused.
    #[error("illegal castle: {0}")]
    IllegalCastle(CastleViolation),

    /// FEN text does not follow the six-field grammar.
    #[error("malformed FEN: {0}")]
    MalformedFen(String),

    /// Move token does not follow the move-text grammar.
    #[error("malformed move text: {0}")]
    MalformedMoveText(String),

    /// Move text parsed but no single legal move matches it.
    #[error("move text does not resolve to a legal move: {0}")]
    AmbiguousOrUnresolvedMove(String),

    /// PGN header or movetext could not be read.
    #[error("malformed PGN: {0}")]
    MalformedPgn(String),

    /// The opening book has no entry for the position. Callers fall back to search.
    #[error("position is not in the opening book")]
    OpeningBookMiss,
}

/// Result alias used across the crate.
pub type ChessResult<T> = Result<T, ChessError>;
