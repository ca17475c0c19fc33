//! Game record: a position plus the history that led to it.
//!
//! Every move entry point funnels through one commit path, so the current
//! position, the move list and the SAN list can never disagree.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::play_move;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::pgn::write_pgn;
use crate::utils::san::{move_to_san, parse_move_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    initial: Position,
    position: Position,
    moves: Vec<ChessMove>,
    san: Vec<String>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// PGN result code for `position`. On checkmate the side to move lost.
pub fn result_code(position: &Position) -> &'static str {
    match position.outcome {
        Outcome::Checkmate => match position.side_to_move {
            Color::White => "0-1",
            Color::Black => "1-0",
        },
        Outcome::Stalemate | Outcome::Draw => "1/2-1/2",
        Outcome::Ongoing | Outcome::Check => "*",
    }
}

impl GameRecord {
    pub fn new() -> Self {
        Self::from_position(Position::new_game())
    }

    pub fn from_position(position: Position) -> Self {
        Self {
            initial: position.clone(),
            position,
            moves: Vec::new(),
            san: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    pub fn initial(&self) -> &Position {
        &self.initial
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn moves(&self) -> &[ChessMove] {
        &self.moves
    }

    pub fn san_moves(&self) -> &[String] {
        &self.san
    }

    pub fn outcome(&self) -> Outcome {
        self.position.outcome
    }

    pub fn result_code(&self) -> &'static str {
        result_code(&self.position)
    }

    fn commit(&mut self, from: Square, to: Square) -> ChessResult<ChessMove> {
        let (mv, next) = play_move(&self.position, from, to)?;
        self.san.push(move_to_san(&self.position, mv, &next));
        self.moves.push(mv);
        self.position = next;
        Ok(mv)
    }

    /// Move by coordinate names, e.g. `("e2", "e4")`.
    pub fn play_squares(&mut self, from: &str, to: &str) -> ChessResult<ChessMove> {
        let from = algebraic_to_square(from)?;
        let to = algebraic_to_square(to)?;
        self.commit(from, to)
    }

    /// Move by mailbox index. Indices outside the playable area are rejected.
    pub fn play_indices(&mut self, from: usize, to: usize) -> ChessResult<ChessMove> {
        let from = Square::try_from(from).map_err(|_| ChessError::InvalidSquare(from.to_string()))?;
        let to = Square::try_from(to).map_err(|_| ChessError::InvalidSquare(to.to_string()))?;
        self.commit(from, to)
    }

    pub fn play_san(&mut self, text: &str) -> ChessResult<ChessMove> {
        let (from, to) = parse_move_text(&self.position, text)?;
        self.commit(from, to)
    }

    /// Play a uniformly random legal move. `None` once the game is over.
    pub fn play_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ChessResult<Option<ChessMove>> {
        if self.position.outcome.is_terminal() {
            return Ok(None);
        }
        match legal_moves(&self.position).choose(rng).copied() {
            Some(mv) => self.commit(mv.from, mv.to).map(Some),
            None => Ok(None),
        }
    }

    /// Ask `engine` for a move and play it.
    pub fn play_engine_move<E: Engine + ?Sized>(
        &mut self,
        engine: &mut E,
        params: &GoParams,
    ) -> ChessResult<Option<ChessMove>> {
        let output = engine.choose_move(&self.position, params)?;
        debug!(
            engine = engine.name(),
            mv = ?output.best_move.map(|mv| mv.to_string()),
            "engine move chosen"
        );
        match output.best_move {
            Some(mv) => self.commit(mv.from, mv.to).map(Some),
            None => Ok(None),
        }
    }

    pub fn to_pgn(&self) -> String {
        write_pgn(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_alpha_beta::AlphaBetaEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::search::minimax::SearchConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scholars_mate_by_san() {
        let mut game = GameRecord::new();
        for san in ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"] {
            game.play_san(san).expect("scholar's mate move should be legal");
        }
        assert_eq!(game.outcome(), Outcome::Checkmate);
        assert_eq!(game.result_code(), "1-0");
        assert_eq!(
            game.san_moves(),
            ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"]
        );
    }

    #[test]
    fn decided_game_rejects_moves_and_stays_put() {
        let mut game = GameRecord::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            game.play_squares(from, to).expect("fool's mate move should be legal");
        }
        assert_eq!(game.result_code(), "0-1");

        let before = game.clone();
        assert_eq!(game.play_squares("a2", "a3"), Err(ChessError::GameAlreadyDecided));
        assert_eq!(game, before);
    }

    #[test]
    fn failed_move_leaves_record_untouched() {
        let mut game = GameRecord::new();
        let before = game.clone();
        assert!(matches!(game.play_indices(0, 300), Err(ChessError::InvalidSquare(_))));
        assert!(matches!(game.play_indices(20, 21), Err(ChessError::InvalidSquare(_))));
        assert!(matches!(game.play_squares("e2", "e5"), Err(ChessError::IllegalPieceMovement(_))));
        assert_eq!(game, before);

        game.play_indices(35, 55).expect("e2e4 by index should be legal");
        assert_eq!(game.san_moves(), ["e4"]);
    }

    #[test]
    fn random_self_play_stays_consistent() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut game = GameRecord::new();
        for _ in 0..300 {
            if game.play_random(&mut rng).expect("random move should apply").is_none() {
                break;
            }
        }
        assert_eq!(game.moves().len(), game.san_moves().len());

        let mut replay = GameRecord::new();
        for san in game.san_moves() {
            replay.play_san(san).expect("recorded SAN should replay");
        }
        assert_eq!(replay.position(), game.position());
    }

    #[test]
    fn engines_play_each_other() {
        let mut white = AlphaBetaEngine::new(SearchConfig {
            max_depth: 1,
            use_opening_book: true,
        });
        let mut black = RandomEngine::with_seed(5);
        let mut game = GameRecord::new();

        for ply in 0..12 {
            let played = if ply % 2 == 0 {
                game.play_engine_move(&mut white, &GoParams::default())
            } else {
                game.play_engine_move(&mut black, &GoParams::default())
            }
            .expect("engine move should apply");
            if played.is_none() {
                break;
            }
        }
        assert_eq!(game.san_moves().first().map(String::as_str), Some("e4"));
        assert!(!game.moves().is_empty());
    }
    #[test]
    fn engines_report_their_names() {
        let white = AlphaBetaEngine::new(SearchConfig::default());
        let black = RandomEngine::with_seed(1);
        assert_eq!(white.name(), "Sentinel AlphaBeta");
        assert_eq!(black.name(), "Sentinel Random");
    }
}
