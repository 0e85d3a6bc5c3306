//! Heuristic move ordering for alpha-beta search.
//!
//! Moves are scored with a cheap static estimate and explored highest first.
//! Ties keep move-generation order.

use std::cmp::Reverse;

use kestrel_core::{Color, Move, MoveList, Position, Square};

use crate::eval::material::material_value;

/// Static estimate of how promising `mv` is for `side`.
///
/// - Captures score `10 * victim - attacker`, so cheap pieces taking
///   expensive ones come first. En passant counts as a pawn capture.
/// - Promotions add the value of the promoted piece.
/// - Landing on a square attacked by an enemy pawn costs the mover's value.
pub fn ordering_score(position: &Position, mv: Move, side: Color) -> i32 {
    let mover = material_value(mv.role());
    let mut estimate = 0;

    if let Some(victim) = mv.capture() {
        estimate = 10 * material_value(victim) - mover;
    }

    if let Some(promoted) = mv.promotion() {
        estimate += material_value(promoted);
    }

    if position.attacked_by_pawn(landing_square(mv, side), !side) {
        estimate -= mover;
    }

    estimate
}

/// Sort `moves` by descending [`ordering_score`].
pub fn order_moves(position: &Position, mut moves: MoveList, side: Color) -> MoveList {
    moves.sort_by_cached_key(|&mv| Reverse(ordering_score(position, mv, side)));
    moves
}

// Castles are encoded king-takes-rook; the king's square is what matters.
fn landing_square(mv: Move, side: Color) -> Square {
    match mv.castling_side() {
        Some(castle) => castle.king_to(side),
        None => mv.to(),
    }
}
