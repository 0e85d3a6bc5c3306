//! Scoped move application: apply on construction, undo on drop.

use std::ops::{Deref, DerefMut};

use shakmaty::Move;

use crate::position::Position;

/// Guard holding a move applied to a [`Position`].
///
/// The move is undone when the guard is dropped, whichever way the enclosing
/// scope is left. The guard dereferences to the position so it can be passed
/// straight into a recursive search.
pub struct ScopedMove<'a> {
    position: &'a mut Position,
    entry_ply: usize,
}

impl<'a> ScopedMove<'a> {
    pub(crate) fn new(position: &'a mut Position, mv: Move) -> Self {
        let entry_ply = position.ply();
        position.apply(mv);
        Self {
            position,
            entry_ply,
        }
    }
}

impl Deref for ScopedMove<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        // Anything applied through the guard must have been undone already.
        debug_assert_eq!(self.position.ply(), self.entry_ply + 1);
        self.position.undo();
    }
}

#[cfg(test)]
mod tests {
    use crate::Position;

    #[test]
    fn guard_undoes_on_drop() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        let mv = pos.legal_moves()[0];
        {
            let guard = pos.scoped(mv);
            assert_eq!(guard.ply(), 1);
            assert_eq!(guard.last_move(), Some(mv));
        }
        assert_eq!(pos, before);
    }

    #[test]
    fn guard_undoes_on_early_return() {
        fn first_reply_count(pos: &mut Position) -> usize {
            for mv in pos.legal_moves() {
                let child = pos.scoped(mv);
                let replies = child.legal_moves().len();
                if replies > 0 {
                    return replies;
                }
            }
            0
        }

        let mut pos = Position::startpos();
        let before = pos.clone();
        assert_eq!(first_reply_count(&mut pos), 20);
        assert_eq!(pos, before);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        let first = pos.parse_uci("e2e4").unwrap();
        {
            let mut outer = pos.scoped(first);
            let reply = outer.parse_uci("e7e5").unwrap();
            {
                let inner = outer.scoped(reply);
                assert_eq!(inner.ply(), 2);
            }
            assert_eq!(outer.ply(), 1);
        }
        assert_eq!(pos, before);
    }
}
