//! UCI protocol front-end for kestrel.

pub mod command;
pub mod engine;
pub mod error;

pub use command::{Command, GoParams, UciOption};
pub use engine::UciEngine;
pub use error::UciError;
