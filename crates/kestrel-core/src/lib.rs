//! Rules-engine adapter: a chess position with reversible move application.
//!
//! Board representation, move generation and check detection are delegated to
//! [`shakmaty`]. This crate only adds the apply/undo stack the search relies on.

mod error;
mod notation;
mod position;
mod scoped;

pub use error::CoreError;
pub use notation::uci;
pub use position::{Position, STARTING_FEN};
pub use scoped::ScopedMove;

pub use shakmaty::{Color, File, Move, MoveList, Piece, Rank, Role, Square};
