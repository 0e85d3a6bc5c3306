//! UCI protocol errors.

use kestrel_engine::{BookError, EngineError};

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// Failed to parse a FEN string.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },

    /// A move in the `position` command is not legal where it is played.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The UCI move string that failed to apply.
        uci_move: String,
    },

    /// A `go` parameter was given without a value.
    #[error("missing value for go parameter {param}")]
    MissingGoValue {
        /// The parameter name.
        param: String,
    },

    /// A `go` parameter value could not be parsed.
    #[error("invalid value for go parameter {param}: {value}")]
    InvalidGoValue {
        /// The parameter name.
        param: String,
        /// The offending value.
        value: String,
    },

    /// `setoption` without a `name` clause.
    #[error("malformed setoption command: missing name")]
    MalformedSetOption,

    /// `setoption` for an option this engine does not offer.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name as received.
        name: String,
    },

    /// `setoption` value outside what the option accepts.
    #[error("invalid value for option {name}: {value}")]
    InvalidOptionValue {
        /// The option name.
        name: String,
        /// The offending value.
        value: String,
    },

    /// Loading an opening book failed.
    #[error(transparent)]
    Book(#[from] BookError),

    /// The engine rejected a request.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// An I/O error occurred on the protocol streams.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
