//! UCI command parsing.

use std::path::PathBuf;

use kestrel_core::Position;
use kestrel_engine::MAX_DEPTH;

use crate::error::UciError;

/// Parameters for the `go` command.
///
/// Only `depth` affects the search. Clock and node limits are skipped so
/// that GUIs sending them are not rejected.
#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Search to this depth only.
    pub depth: Option<u8>,
}

/// An option settable with `setoption`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciOption {
    /// `Depth` spin, 1 to [`MAX_DEPTH`].
    Depth(u8),
    /// `Quiescence` check.
    Quiescence(bool),
    /// `OwnBook` check.
    OwnBook(bool),
    /// `BookFile` string; an empty value unloads the book.
    BookFile(Option<PathBuf>),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- set up a position with optional moves applied.
    Position(Position),
    /// `go` -- decide on a move.
    Go(GoParams),
    /// `setoption` -- change an engine option.
    SetOption(UciOption),
    /// `stop` -- nothing to interrupt; searches run to completion.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command, ignored as the protocol requires.
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "position" => parse_position(&tokens[1..]),
        "go" => parse_go(&tokens[1..]),
        "setoption" => parse_setoption(&tokens[1..]),
        _ => Ok(Command::Unknown(tokens[0].to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let Some((&kind, rest)) = tokens.split_first() else {
        return Err(UciError::MalformedPosition);
    };

    let (mut position, rest) = match kind {
        "startpos" => (Position::startpos(), rest),
        "fen" => {
            let fen_len = rest.iter().position(|&t| t == "moves").unwrap_or(rest.len());
            let fen = rest[..fen_len].join(" ");
            let position = Position::from_fen(&fen).map_err(|_| UciError::InvalidFen { fen })?;
            (position, &rest[fen_len..])
        }
        _ => return Err(UciError::MalformedPosition),
    };

    if let Some((&"moves", moves)) = rest.split_first() {
        for &uci_move in moves {
            position
                .play_uci(uci_move)
                .map_err(|_| UciError::InvalidMove {
                    uci_move: uci_move.to_string(),
                })?;
        }
    }

    Ok(Command::Position(position))
}

/// Parse the `go` command arguments.
///
/// Limits this engine has no use for are skipped along with their values.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                params.depth = Some(parse_int(tokens.get(i + 1), "depth")?);
                i += 2;
            }
            "wtime" | "btime" | "winc" | "binc" | "movestogo" | "movetime" | "nodes" | "mate" => {
                i += 2;
            }
            _ => i += 1,
        }
    }

    Ok(Command::Go(params))
}

/// Parse `setoption name <name> [value <value>]`.
///
/// Names may contain spaces and are matched case-insensitively.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    let Some((&"name", rest)) = tokens.split_first() else {
        return Err(UciError::MalformedSetOption);
    };
    let value_at = rest.iter().position(|&t| t == "value");
    let name = rest[..value_at.unwrap_or(rest.len())].join(" ");
    let value = value_at.map(|at| rest[at + 1..].join(" "));
    if name.is_empty() {
        return Err(UciError::MalformedSetOption);
    }

    let option = match name.to_ascii_lowercase().as_str() {
        "depth" => {
            let depth: u8 = parse_option_value(&name, value.as_deref())?;
            if !(1..=MAX_DEPTH).contains(&depth) {
                return Err(invalid_option(&name, &depth.to_string()));
            }
            UciOption::Depth(depth)
        }
        "quiescence" => UciOption::Quiescence(parse_option_value(&name, value.as_deref())?),
        "ownbook" => UciOption::OwnBook(parse_option_value(&name, value.as_deref())?),
        "bookfile" => {
            let path = value.unwrap_or_default();
            if path.is_empty() || path == "<empty>" {
                UciOption::BookFile(None)
            } else {
                UciOption::BookFile(Some(PathBuf::from(path)))
            }
        }
        _ => return Err(UciError::UnknownOption { name }),
    };

    Ok(Command::SetOption(option))
}

fn parse_option_value<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, UciError> {
    let value = value.unwrap_or_default();
    value.parse().map_err(|_| invalid_option(name, value))
}

fn invalid_option(name: &str, value: &str) -> UciError {
    UciError::InvalidOptionValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Parse an integer value from a token.
fn parse_int<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Result<T, UciError> {
    let value = token.ok_or_else(|| UciError::MissingGoValue {
        param: param.to_string(),
    })?;
    value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
