//! Piece-square tables for all six piece kinds.
//!
//! Tables are written from White's point of view in LERF order:
//! index 0 = A1, index 7 = H1, index 8 = A2, ..., index 63 = H8.
//! Black pieces read the vertically mirrored square, so every table is
//! relative to the owner's own back rank.

use kestrel_core::{Color, Role, Square};

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
    // Rank 1
      0,   0,   0,   0,   0,   0,   0,   0,
    // Rank 2
      5,  10,  10, -20, -20,  10,  10,   5,
    // Rank 3
      5,  -5, -10,   0,   0, -10,  -5,   5,
    // Rank 4
      0,   0,   0,  20,  20,   0,   0,   0,
    // Rank 5
      5,   5,  10,  25,  25,  10,   5,   5,
    // Rank 6
     10,  10,  20,  30,  30,  20,  10,  10,
    // Rank 7
     50,  50,  50,  50,  50,  50,  50,  50,
    // Rank 8
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    // Rank 1
    -50, -40, -30, -30, -30, -30, -40, -50,
    // Rank 2
    -40, -20,   0,   5,   5,   0, -20, -40,
    // Rank 3
    -30,   5,  10,  15,  15,  10,   5, -30,
    // Rank 4
    -30,   0,  15,  20,  20,  15,   0, -30,
    // Rank 5
    -30,   5,  15,  20,  20,  15,   5, -30,
    // Rank 6
    -30,   0,  10,  15,  15,  10,   0, -30,
    // Rank 7
    -40, -20,   0,   0,   0,   0, -20, -40,
    // Rank 8
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    // Rank 1
    -20, -10, -10, -10, -10, -10, -10, -20,
    // Rank 2
    -10,   5,   0,   0,   0,   0,   5, -10,
    // Rank 3
    -10,  10,  10,  10,  10,  10,  10, -10,
    // Rank 4
    -10,   0,  10,  10,  10,  10,   0, -10,
    // Rank 5
    -10,   5,   5,  10,  10,   5,   5, -10,
    // Rank 6
    -10,   0,   5,  10,  10,   5,   0, -10,
    // Rank 7
    -10,   0,   0,   0,   0,   0,   0, -10,
    // Rank 8
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
    // Rank 1
      0,   0,   0,   5,   5,   0,   0,   0,
    // Rank 2
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 3
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 4
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 5
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 6
     -5,   0,   0,   0,   0,   0,   0,  -5,
    // Rank 7
      5,  10,  10,  10,  10,  10,  10,   5,
    // Rank 8
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    // Rank 1
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    // Rank 2
    -10,   0,   5,   0,   0,   0,   0, -10,
    // Rank 3
    -10,   5,   5,   5,   5,   5,   0, -10,
    // Rank 4
      0,   0,   5,   5,   5,   5,   0,  -5,
    // Rank 5
     -5,   0,   5,   5,   5,   5,   0,  -5,
    // Rank 6
    -10,   0,   5,   5,   5,   5,   0, -10,
    // Rank 7
    -10,   0,   0,   0,   0,   0,   0, -10,
    // Rank 8
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    // Rank 1
     20,  30,  10,   0,   0,  10,  30,  20,
    // Rank 2
     20,  20,   0,   0,   0,   0,  20,  20,
    // Rank 3
    -10, -20, -20, -20, -20, -20, -20, -10,
    // Rank 4
    -20, -30, -30, -40, -40, -30, -30, -20,
    // Rank 5
    -30, -40, -40, -50, -50, -40, -40, -30,
    // Rank 6
    -30, -40, -40, -50, -50, -40, -40, -30,
    // Rank 7
    -30, -40, -40, -50, -50, -40, -40, -30,
    // Rank 8
    -30, -40, -40, -50, -50, -40, -40, -30,
];

/// Placement bonus for a piece of `role` and `color` standing on `sq`.
pub fn placement_bonus(role: Role, color: Color, sq: Square) -> i32 {
    let table = match role {
        Role::Pawn => &PAWN_PST,
        Role::Knight => &KNIGHT_PST,
        Role::Bishop => &BISHOP_PST,
        Role::Rook => &ROOK_PST,
        Role::Queen => &QUEEN_PST,
        Role::King => &KING_PST,
    };
    let relative = match color {
        Color::White => sq,
        Color::Black => sq.flip_vertical(),
    };
    table[relative.to_usize()]
}
