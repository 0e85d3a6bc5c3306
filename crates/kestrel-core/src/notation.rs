//! Canonical move notation.

use shakmaty::{CastlingMode, Move};

/// Format a move in UCI long algebraic notation (`e2e4`, `e7e8q`, castling as `e1g1`).
pub fn uci(mv: Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}
