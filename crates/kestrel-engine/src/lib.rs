//! Move selection for kestrel: evaluation, ordering, negamax search and the
//! opening book.

pub mod book;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod search;

pub use book::{BookEntry, OpeningBook};
pub use config::{DEFAULT_DEPTH, EngineConfig, MAX_DEPTH, MAX_QUIESCENCE_PLY};
pub use engine::{Decision, Engine};
pub use error::{BookError, EngineError};
pub use eval::evaluate;
pub use eval::score::{Score, ScoreKind};
pub use search::SearchResult;
pub use search::negamax::SearchContext;
