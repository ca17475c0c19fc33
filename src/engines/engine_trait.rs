//! Engine abstraction layer.
//!
//! Defines common input parameters and output payloads so different move
//! choosers can be swapped behind a single trait interface.

use crate::errors::ChessResult;
use crate::game_state::position::Position;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Overrides the engine's configured search depth.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Pick a move for the side to move. `None` when the game is decided
    /// or no legal move exists.
    fn choose_move(&mut self, position: &Position, params: &GoParams) -> ChessResult<EngineOutput>;
}
