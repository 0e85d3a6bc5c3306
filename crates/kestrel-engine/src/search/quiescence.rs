//! Capture, check and promotion extension at the search horizon.

use kestrel_core::{Color, Move, Position};

use crate::config::MAX_QUIESCENCE_PLY;
use crate::eval::evaluate;
use crate::eval::score::Score;
use crate::search::negamax::SearchContext;
use crate::search::ordering::order_moves;

/// Fail-hard quiescence search with a stand-pat bound.
///
/// Only captures, promotions and checking moves are explored, and never more
/// than [`MAX_QUIESCENCE_PLY`] plies past the horizon.
pub(super) fn quiescence(
    position: &mut Position,
    qply: u8,
    mut alpha: Score,
    beta: Score,
    side: Color,
    ctx: &mut SearchContext,
) -> Score {
    let stand_pat = evaluate(position, side);
    if stand_pat >= beta {
        return beta;
    }
    alpha = alpha.max(stand_pat);

    if qply >= MAX_QUIESCENCE_PLY {
        return alpha;
    }

    let mut moves = position.legal_moves();
    moves.retain(|mv| is_noisy(position, *mv));

    for mv in order_moves(position, moves, side) {
        ctx.nodes += 1;
        let score = {
            let mut child = position.scoped(mv);
            -quiescence(&mut child, qply + 1, -beta, -alpha, !side, ctx)
        };

        if score >= beta {
            return beta;
        }
        alpha = alpha.max(score);
    }

    alpha
}

fn is_noisy(position: &Position, mv: Move) -> bool {
    mv.is_capture() || mv.is_promotion() || position.gives_check(mv)
}
