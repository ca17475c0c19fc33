//! Alpha-beta engine with an opening book in front of the search.

use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::ChessResult;
use crate::game_state::position::Position;
use crate::search::alpha_beta::alpha_beta_search;
use crate::search::board_scoring::{BoardScorer, HeuristicScorer};
use crate::search::minimax::SearchConfig;

pub struct AlphaBetaEngine<S: BoardScorer = HeuristicScorer> {
    config: SearchConfig,
    scorer: S,
}

impl AlphaBetaEngine<HeuristicScorer> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, HeuristicScorer::default())
    }
}

impl Default for AlphaBetaEngine<HeuristicScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S: BoardScorer> AlphaBetaEngine<S> {
    pub fn with_scorer(config: SearchConfig, scorer: S) -> Self {
        Self { config, scorer }
    }
}

impl<S: BoardScorer> Engine for AlphaBetaEngine<S> {
    fn name(&self) -> &str {
        "Sentinel AlphaBeta"
    }

    fn choose_move(&mut self, position: &Position, params: &GoParams) -> ChessResult<EngineOutput> {
        let mut config = self.config;
        if let Some(depth) = params.depth {
            config.max_depth = depth;
        }
        debug!(depth = config.max_depth, book = config.use_opening_book, "engine search");

        let result = alpha_beta_search(position, &self.scorer, config);
        let mut out = EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            info_lines: Vec::new(),
        };
        if result.from_book {
            out.info_lines.push("info string book move".to_owned());
        } else {
            out.info_lines.push(format!(
                "info depth {} score cp {} nodes {}",
                result.reached_depth, result.best_score, result.nodes
            ));
        }
        Ok(out)
    }
}
