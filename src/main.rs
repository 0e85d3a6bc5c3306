use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info};

use kestrel_engine::{DEFAULT_DEPTH, Engine, EngineConfig, OpeningBook};
use kestrel_uci::UciEngine;

/// Fixed-depth negamax chess engine speaking UCI on stdin/stdout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth in plies.
    #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u8).range(1..))]
    depth: u8,

    /// Polyglot opening book to consult before searching.
    #[arg(long)]
    book: Option<PathBuf>,

    /// Extend leaf nodes with a capture/check/promotion search.
    #[arg(long)]
    quiescence: bool,

    /// Seed for book move selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Log verbosity (error, warn, info, debug, trace). Logs go to stderr.
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .init();
    info!("kestrel starting");

    let book = args
        .book
        .as_ref()
        .map(|path| {
            OpeningBook::open(path)
                .with_context(|| format!("loading opening book {}", path.display()))
        })
        .transpose()?
        .map(Arc::new);

    let config = EngineConfig {
        depth: args.depth,
        quiescence: args.quiescence,
        seed: args.seed,
        ..EngineConfig::default()
    };
    let engine = Engine::new(config, book)?;

    UciEngine::new(engine).run()?;
    Ok(())
}
