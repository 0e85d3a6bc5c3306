//! Fixed-depth search and move ordering.

pub mod negamax;
pub mod ordering;
mod quiescence;

use kestrel_core::{Color, Move, Position};

use crate::eval::score::Score;
use negamax::{SearchContext, negamax};
use ordering::order_moves;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Highest-scoring root move; the earliest in search order on ties.
    pub best_move: Move,
    /// Score of `best_move` from the mover's perspective.
    pub score: Score,
}

/// Negamax value of `position` for `side` searched `depth` plies deep within
/// the window `(alpha, beta)`.
///
/// The position is restored before returning.
pub fn search(
    position: &mut Position,
    depth: u8,
    alpha: Score,
    beta: Score,
    side: Color,
    ctx: &mut SearchContext,
) -> Score {
    negamax(position, depth, alpha, beta, side, ctx)
}

/// Search every legal move of the side to move and pick the best.
///
/// Each root move is scored as the negation of a full-window search of the
/// reply position at `depth - 1`. Returns `None` when there are no legal
/// moves.
pub fn search_root(
    position: &mut Position,
    depth: u8,
    ctx: &mut SearchContext,
) -> Option<SearchResult> {
    let side = position.side_to_move();
    let moves = order_moves(position, position.legal_moves(), side);
    let mut best: Option<SearchResult> = None;

    for mv in moves {
        ctx.nodes += 1;
        let score = {
            let mut child = position.scoped(mv);
            -negamax(
                &mut child,
                depth.saturating_sub(1),
                -Score::INFINITY,
                Score::INFINITY,
                !side,
                ctx,
            )
        };

        if best.is_none_or(|current| score > current.score) {
            best = Some(SearchResult {
                best_move: mv,
                score,
            });
        }
    }

    best
}
