//! Synchronous UCI engine loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use kestrel_core::{Position, uci};
use kestrel_engine::{Decision, Engine, MAX_DEPTH, OpeningBook, Score, ScoreKind};

use crate::command::{Command, GoParams, UciOption, parse_command};
use crate::error::UciError;

/// The UCI engine: owns the move chooser and answers protocol commands.
///
/// Commands are handled one at a time on the calling thread. A `go` runs
/// its search to completion before the next line is read.
pub struct UciEngine {
    engine: Engine,
}

impl UciEngine {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run on stdin/stdout until `quit` or end of input.
    pub fn run(self) -> Result<(), UciError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run over arbitrary streams until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(mut self, input: R, mut output: W) -> Result<(), UciError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received UCI command");

            let command = match parse_command(trimmed) {
                Ok(command) => command,
                Err(e) => {
                    warn!(error = %e, "UCI parse error");
                    continue;
                }
            };

            match command {
                Command::Uci => self.handle_uci(&mut output)?,
                Command::IsReady => writeln!(output, "readyok")?,
                Command::UciNewGame => self.engine.new_game(),
                Command::Position(position) => self.handle_position(position),
                Command::Go(params) => self.handle_go(params, &mut output)?,
                Command::SetOption(option) => self.handle_setoption(option),
                Command::Stop => debug!("stop ignored: no search in progress"),
                Command::Quit => break,
                Command::Unknown(cmd) => {
                    if !cmd.is_empty() {
                        debug!(cmd = %cmd, "unknown command ignored");
                    }
                }
            }
            output.flush()?;
        }

        info!("kestrel shutting down");
        Ok(())
    }

    fn handle_uci<W: Write>(&self, out: &mut W) -> Result<(), UciError> {
        let config = self.engine.config();
        writeln!(out, "id name kestrel {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author the kestrel developers")?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            config.depth,
            MAX_DEPTH
        )?;
        writeln!(
            out,
            "option name Quiescence type check default {}",
            config.quiescence
        )?;
        writeln!(out, "option name OwnBook type check default {}", config.use_book)?;
        writeln!(out, "option name BookFile type string default <empty>")?;
        writeln!(out, "uciok")?;
        Ok(())
    }

    fn handle_position(&mut self, position: Position) {
        self.engine.set_position(position);
    }

    fn handle_setoption(&mut self, option: UciOption) {
        let mut config = *self.engine.config();
        match option {
            UciOption::Depth(depth) => config.depth = depth,
            UciOption::Quiescence(enabled) => config.quiescence = enabled,
            UciOption::OwnBook(enabled) => config.use_book = enabled,
            UciOption::BookFile(path) => {
                if let Err(e) = self.load_book(path) {
                    warn!(error = %e, "keeping previous opening book");
                }
                return;
            }
        }
        if let Err(e) = self.engine.set_config(config) {
            warn!(error = %e, "option rejected");
        }
    }

    fn load_book(&mut self, path: Option<PathBuf>) -> Result<(), UciError> {
        let Some(path) = path else {
            info!("opening book unloaded");
            self.engine.set_book(None);
            return Ok(());
        };
        let book = OpeningBook::open(&path)?;
        info!(path = %path.display(), entries = book.len(), "opening book loaded");
        self.engine.set_book(Some(Arc::new(book)));
        Ok(())
    }

    fn handle_go<W: Write>(&mut self, params: GoParams, out: &mut W) -> Result<(), UciError> {
        let configured = self.engine.config().depth;
        let depth = match params.depth {
            Some(depth) if (1..=MAX_DEPTH).contains(&depth) => depth,
            Some(depth) => {
                warn!(depth, fallback = configured, "go depth out of range");
                configured
            }
            None => configured,
        };

        let decision = self.engine.decide_at_depth(depth)?;

        match decision {
            Some(Decision::Book(mv)) => {
                writeln!(out, "info string book move")?;
                writeln!(out, "bestmove {}", uci(mv))?;
            }
            Some(Decision::Searched { best_move, score }) => {
                writeln!(
                    out,
                    "info depth {depth} score {} nodes {}",
                    format_score(score, depth),
                    self.engine.nodes()
                )?;
                writeln!(out, "bestmove {}", uci(best_move))?;
            }
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }
}

/// UCI score field. Mate distance is not tracked, so a mate is reported at
/// the longest distance the search depth allows.
fn format_score(score: Score, depth: u8) -> String {
    let moves = depth.div_ceil(2).max(1);
    match score.kind() {
        ScoreKind::Ordinary(cp) => format!("cp {cp}"),
        ScoreKind::Mating => format!("mate {moves}"),
        ScoreKind::Mated => format!("mate -{moves}"),
    }
}
