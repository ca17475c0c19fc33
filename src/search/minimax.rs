//! Exhaustive fixed-depth minimax.
//!
//! Reference search without pruning. Shares node, config, and result types
//! with the alpha-beta search so the two can be compared move for move.

use tracing::{debug, info};

use crate::errors::ChessError;
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_successors;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{leaf_score, BoardScorer};
use crate::tables::opening_book::book_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to look ahead from the root.
    pub max_depth: u8,
    pub use_opening_book: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            use_opening_book: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub from_book: bool,
}

/// One position in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub position: Position,
    /// Move that produced this node; `None` at the root.
    pub last_move: Option<ChessMove>,
    /// Root move this subtree descends from.
    pub root_move: Option<ChessMove>,
    pub ply: u8,
    pub alpha: i32,
    pub beta: i32,
}

impl SearchNode {
    pub fn root(position: &Position) -> Self {
        Self {
            position: position.clone(),
            last_move: None,
            root_move: None,
            ply: 0,
            alpha: i32::MIN,
            beta: i32::MAX,
        }
    }

    pub fn child(&self, mv: ChessMove, position: Position, alpha: i32, beta: i32) -> Self {
        Self {
            position,
            last_move: Some(mv),
            root_move: self.root_move.or(Some(mv)),
            ply: self.ply + 1,
            alpha,
            beta,
        }
    }

    /// Max nodes sit at even plies.
    #[inline]
    pub fn is_max(&self) -> bool {
        self.ply % 2 == 0
    }
}

pub(crate) struct SearchContext<'a, S: BoardScorer + ?Sized> {
    pub scorer: &'a S,
    pub max_color: Color,
    pub max_depth: u8,
    pub nodes: u64,
}

impl<'a, S: BoardScorer + ?Sized> SearchContext<'a, S> {
    pub fn new(scorer: &'a S, position: &Position, config: SearchConfig) -> Self {
        Self {
            scorer,
            max_color: position.side_to_move,
            max_depth: config.max_depth,
            nodes: 0,
        }
    }

    /// Nodes at the depth limit or in a decided game are scored directly.
    pub fn leaf_value(&self, node: &SearchNode) -> Option<i32> {
        (node.ply >= self.max_depth || node.position.outcome.is_terminal()).then(|| {
            leaf_score(
                self.scorer,
                &node.position,
                node.last_move,
                self.max_color,
                node.ply,
            )
        })
    }

    pub fn static_value(&self, node: &SearchNode) -> i32 {
        leaf_score(
            self.scorer,
            &node.position,
            node.last_move,
            self.max_color,
            node.ply,
        )
    }
}

/// Root opening-book probe. A miss or an unusable entry falls through to search.
pub(crate) fn probe_book(position: &Position, config: SearchConfig) -> Option<SearchResult> {
    if !config.use_opening_book {
        return None;
    }
    match book_move(position) {
        Ok(mv) => {
            debug!(%mv, "opening book hit");
            Some(SearchResult {
                best_move: Some(mv),
                best_score: 0,
                reached_depth: 0,
                nodes: 0,
                from_book: true,
            })
        }
        Err(ChessError::OpeningBookMiss) => None,
        Err(err) => {
            debug!(%err, "opening book entry rejected");
            None
        }
    }
}

pub fn minimax_search<S: BoardScorer + ?Sized>(
    position: &Position,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    if let Some(result) = probe_book(position, config) {
        return result;
    }

    let mut ctx = SearchContext::new(scorer, position, config);
    let (best_score, best_move) = minimax(&SearchNode::root(position), &mut ctx);

    info!(
        depth = config.max_depth,
        nodes = ctx.nodes,
        score = best_score,
        best = ?best_move.map(|mv| mv.to_string()),
        "minimax search finished"
    );

    SearchResult {
        best_move,
        best_score,
        reached_depth: config.max_depth,
        nodes: ctx.nodes,
        from_book: false,
    }
}

fn minimax<S: BoardScorer + ?Sized>(
    node: &SearchNode,
    ctx: &mut SearchContext<'_, S>,
) -> (i32, Option<ChessMove>) {
    ctx.nodes += 1;
    if let Some(score) = ctx.leaf_value(node) {
        return (score, None);
    }

    let children = legal_successors(&node.position);
    if children.is_empty() {
        return (ctx.static_value(node), None);
    }

    let maximizing = node.is_max();
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for (mv, next) in children {
        let child = node.child(mv, next, node.alpha, node.beta);
        let (score, _) = minimax(&child, ctx);
        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better {
            best_score = score;
            best_move = Some(mv);
        }
    }

    (best_score, best_move)
}
