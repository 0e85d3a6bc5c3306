//! Error types for position setup and move application.

/// Errors raised by [`Position`](crate::Position) construction and checked move application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The FEN string could not be parsed.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },

    /// The FEN parsed but does not describe a playable position.
    #[error("illegal position: {reason}")]
    IllegalPosition {
        /// Reason reported by the rules engine.
        reason: String,
    },

    /// A move string is not valid UCI notation.
    #[error("invalid move notation: {notation}")]
    InvalidNotation {
        /// The offending move string.
        notation: String,
    },

    /// A move is not legal in the current position.
    #[error("illegal move {notation} in {fen}")]
    IllegalMove {
        /// The move in UCI notation.
        notation: String,
        /// FEN of the position the move was played in.
        fen: String,
    },
}
