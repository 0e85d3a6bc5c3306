//! Engine configuration.

use crate::error::EngineError;

/// Search depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 3;

/// Deepest search the UCI front-end advertises.
pub const MAX_DEPTH: u8 = 8;

/// Plies the quiescence extension may run past the search horizon.
pub const MAX_QUIESCENCE_PLY: u8 = 16;

/// Knobs controlling how the engine decides on a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched from the root. Must be at least 1.
    pub depth: u8,
    /// Extend the horizon with a capture/check/promotion search.
    pub quiescence: bool,
    /// Consult the opening book before searching, if one is loaded.
    pub use_book: bool,
    /// Seed for book move selection; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            quiescence: false,
            use_book: true,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Reject configurations the search cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.depth == 0 {
            return Err(EngineError::InvalidDepth { depth: self.depth });
        }
        Ok(())
    }
}
