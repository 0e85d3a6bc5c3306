//! Negamax alpha-beta search.

use kestrel_core::{Color, Position};

use crate::eval::evaluate;
use crate::eval::score::Score;
use crate::search::ordering::order_moves;
use crate::search::quiescence::quiescence;

/// Mutable state threaded through one search.
#[derive(Debug, Default)]
pub struct SearchContext {
    /// Moves applied so far.
    pub nodes: u64,
    /// Extend leaves with a capture/check/promotion search.
    pub quiescence: bool,
}

impl SearchContext {
    pub fn new(quiescence: bool) -> Self {
        Self {
            nodes: 0,
            quiescence,
        }
    }
}

/// Fail-hard negamax: returns a score for `side` clamped to `alpha` from
/// below, and returns as soon as a child reaches `beta`.
///
/// `side` must be the side to move in `position`. Positions without legal
/// moves return their terminal value directly.
pub(super) fn negamax(
    position: &mut Position,
    depth: u8,
    mut alpha: Score,
    beta: Score,
    side: Color,
    ctx: &mut SearchContext,
) -> Score {
    debug_assert_eq!(side, position.side_to_move());

    if depth == 0 {
        return if ctx.quiescence {
            quiescence(position, 0, alpha, beta, side, ctx)
        } else {
            evaluate(position, side)
        };
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        return evaluate(position, side);
    }

    for mv in order_moves(position, moves, side) {
        ctx.nodes += 1;
        let score = {
            let mut child = position.scoped(mv);
            -negamax(&mut child, depth - 1, -beta, -alpha, !side, ctx)
        };

        alpha = alpha.max(score);
        if alpha >= beta {
            return alpha;
        }
    }

    alpha
}
