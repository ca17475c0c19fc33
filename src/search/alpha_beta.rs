//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Max is the side to move at the root. A Max node stops expanding once a
//! child scores above beta; a Min node once a child scores below alpha.
//! Ties keep the earliest child in move order, which makes the chosen root
//! move identical to the one plain minimax picks.

use tracing::{info, trace};

use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_successors;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::BoardScorer;
use crate::search::minimax::{probe_book, SearchConfig, SearchContext, SearchNode, SearchResult};

pub fn alpha_beta_search<S: BoardScorer + ?Sized>(
    position: &Position,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    if let Some(result) = probe_book(position, config) {
        return result;
    }

    let mut ctx = SearchContext::new(scorer, position, config);
    let (best_score, best_move) = alpha_beta(&SearchNode::root(position), &mut ctx);

    info!(
        depth = config.max_depth,
        nodes = ctx.nodes,
        score = best_score,
        best = ?best_move.map(|mv| mv.to_string()),
        "alpha-beta search finished"
    );

    SearchResult {
        best_move,
        best_score,
        reached_depth: config.max_depth,
        nodes: ctx.nodes,
        from_book: false,
    }
}

fn alpha_beta<S: BoardScorer + ?Sized>(
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
    let mut alpha = node.alpha;
    let mut beta = node.beta;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for (mv, next) in children {
        let child = node.child(mv, next, alpha, beta);
        let (score, _) = alpha_beta(&child, ctx);

        if node.ply == 0 {
            trace!(%mv, score, "root move scored");
        }

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > beta {
                break;
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score < alpha {
                break;
            }
            beta = beta.min(score);
        }
    }

    (best_score, best_move)
}
