use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_core::{EngineConfig, MAX_SEARCH_DEPTH};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod session;

use session::{Session, shared_out};

/// UCI front end for the mailbox chess engine.
///
/// Protocol lines go to stdout; diagnostics go to stderr (`RUST_LOG`).
#[derive(Parser, Debug)]
#[command(name = "uci_engine", version, about)]
struct Args {
    /// TOML file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth, overrides the config file
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SEARCH_DEPTH as i64))]
    depth: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    info!(?config, "engine configured");

    let mut session = Session::new(config, shared_out(io::stdout()));
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match session.handle(&line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => warn!("{e:#}"),
        }
    }
    session.stop()
}
