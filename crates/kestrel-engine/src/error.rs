use std::io;
use std::path::PathBuf;

use kestrel_core::CoreError;

/// Errors produced while loading an opening book.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// The book file could not be opened.
    #[error("cannot open opening book {}: {source}", path.display())]
    Open {
        /// Path that was tried.
        path: PathBuf,
        source: io::Error,
    },

    /// Reading book bytes failed.
    #[error("failed to read opening book: {0}")]
    Io(#[from] io::Error),

    /// The book is not a whole number of 16-byte records.
    #[error("opening book is {len} bytes, not a multiple of 16")]
    Truncated {
        /// Total byte length read.
        len: usize,
    },
}

/// Errors surfaced by the engine driver.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Book(#[from] BookError),

    /// Search depth must be at least one ply.
    #[error("invalid search depth {depth}: must be at least 1")]
    InvalidDepth { depth: u8 },
}
