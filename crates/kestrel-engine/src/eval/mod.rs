//! Static position evaluation: material plus piece placement.

pub mod material;
pub mod pst;
pub mod score;

use kestrel_core::{Color, Position};

use crate::eval::material::material_value;
use crate::eval::pst::placement_bonus;
use crate::eval::score::Score;

/// Score `position` from `perspective`'s point of view.
///
/// A position without legal moves is terminal: the side to move is mated
/// ([`Score::MATE`] against it) when in check, otherwise it is stalemate
/// ([`Score::DRAW`]). The terminal value is always computed for the side to
/// move and negated when `perspective` is the other side.
///
/// Any other position is scored as the sum over occupied squares of
/// `material + placement`, positive for `perspective`'s pieces and negative
/// for the opponent's.
pub fn evaluate(position: &Position, perspective: Color) -> Score {
    if position.legal_moves().is_empty() {
        let for_mover = if position.in_check() {
            -Score::MATE
        } else {
            Score::DRAW
        };
        return if perspective == position.side_to_move() {
            for_mover
        } else {
            -for_mover
        };
    }

    let total: i32 = position
        .pieces()
        .map(|(sq, piece)| {
            let value = material_value(piece.role) + placement_bonus(piece.role, piece.color, sq);
            if piece.color == perspective { value } else { -value }
        })
        .sum();

    Score::cp(total)
}
