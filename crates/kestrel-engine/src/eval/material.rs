use kestrel_core::Role;

/// Centipawn value of a piece kind.
///
/// The king carries a large value so that ordering estimates treat it as the
/// most expensive piece to put en prise; it always cancels out in evaluation.
#[inline]
pub const fn material_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 320,
        Role::Bishop => 330,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 20_000,
    }
}
