//! One protocol session: the current position, the engine and the worker
//! thread running its search.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};
use chess_core::{
    Engine, EngineConfig, MAX_SEARCH_DEPTH, Position, Reporter, SearchResult, StopHandle,
    ZobristKeys, set_position_from_uci_with_keys,
};
use tracing::{debug, info, warn};

pub const ENGINE_NAME: &str = "Mailbox 1.0";
pub const ENGINE_AUTHOR: &str = "chess_core authors";

/// Protocol output shared between the session and the search thread.
pub type SharedOut = Arc<Mutex<Box<dyn Write + Send>>>;

pub fn shared_out(w: impl Write + Send + 'static) -> SharedOut {
    Arc::new(Mutex::new(Box::new(w)))
}

fn send(out: &SharedOut, line: &str) {
    // a poisoned lock still holds a usable writer
    let mut w = out.lock().unwrap_or_else(|e| e.into_inner());
    if writeln!(w, "{line}").and_then(|_| w.flush()).is_err() {
        warn!(line, "failed to write protocol line");
    }
}

/// Writes engine reports straight to the protocol output.
pub struct OutReporter {
    out: SharedOut,
}

impl OutReporter {
    pub fn new(out: SharedOut) -> Self {
        Self { out }
    }
}

impl Reporter for OutReporter {
    fn progress(&mut self, percent: u8) {
        debug!(percent, "progress");
    }

    fn info(&mut self, line: &str) {
        send(&self.out, line);
    }
}

type Search = JoinHandle<(Engine, SearchResult)>;

pub struct Session {
    out: SharedOut,
    config: EngineConfig,
    keys: Arc<ZobristKeys>,
    position: Position,
    depth: u32,
    engine: Option<Engine>,
    worker: Option<Search>,
    stop: Option<StopHandle>,
    infinite: bool,
}

impl Session {
    pub fn new(config: EngineConfig, out: SharedOut) -> Self {
        let depth = config.depth;
        let engine = Engine::with_reporter(config.clone(), Box::new(OutReporter::new(out.clone())));
        let keys = ZobristKeys::shared();
        Self {
            out,
            config,
            position: Position::startpos_with_keys(keys.clone()),
            keys,
            depth,
            engine: Some(engine),
            worker: None,
            stop: None,
            infinite: false,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[cfg(test)]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[cfg(test)]
    pub fn is_searching(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Handle one input line. Returns `Ok(false)` on `quit`.
    pub fn handle(&mut self, line: &str) -> Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Ok(true);
        };
        debug!(cmd, "command");

        match cmd {
            "uci" => {
                send(&self.out, &format!("id name {ENGINE_NAME}"));
                send(&self.out, &format!("id author {ENGINE_AUTHOR}"));
                send(
                    &self.out,
                    &format!(
                        "option name Depth type spin default {} min 1 max {MAX_SEARCH_DEPTH}",
                        self.config.depth
                    ),
                );
                send(&self.out, "uciok");
            }
            "isready" => send(&self.out, "readyok"),
            "debug" | "register" | "ponderhit" => debug!(cmd, "ignored"),
            "setoption" => self.set_option(args),
            "ucinewgame" => {
                self.finish_search()?;
                self.position = Position::startpos_with_keys(self.keys.clone());
            }
            "position" => {
                self.finish_search()?;
                self.position = set_position_from_uci_with_keys(args, self.keys.clone())
                    .context("bad position command")?;
            }
            "go" => self.go(args)?,
            "stop" => self.stop()?,
            "quit" => {
                self.stop()?;
                return Ok(false);
            }
            other => debug!(cmd = other, "unknown command"),
        }
        Ok(true)
    }

    /// `setoption name Depth value N`
    fn set_option(&mut self, args: &[&str]) {
        let name = args.iter().position(|&a| a == "name").and_then(|i| args.get(i + 1));
        let value = args.iter().position(|&a| a == "value").and_then(|i| args.get(i + 1));
        match (name, value) {
            (Some(n), Some(v)) if n.eq_ignore_ascii_case("depth") => match v.parse::<u32>() {
                Ok(d) => self.depth = d.clamp(1, MAX_SEARCH_DEPTH),
                Err(_) => warn!(value = v, "depth is not a number"),
            },
            _ => debug!(?args, "unsupported option"),
        }
    }

    fn go(&mut self, args: &[&str]) -> Result<()> {
        self.finish_search()?;

        let mut depth = self.depth;
        let mut infinite = false;
        let mut i = 0;
        while i < args.len() {
            match args[i] {
                "infinite" => infinite = true,
                "depth" => {
                    if let Some(d) = args.get(i + 1).and_then(|v| v.parse::<u32>().ok()) {
                        depth = d.clamp(1, MAX_SEARCH_DEPTH);
                        i += 1;
                    }
                }
                // clock tokens and their values are ignored
                _ => {}
            }
            i += 1;
        }

        let mut engine = self.take_engine();
        engine.set_depth(depth);
        engine.set_infinite(infinite);
        self.stop = Some(engine.stop_handle());
        self.infinite = infinite;

        let pos = self.position.clone();
        info!(depth, infinite, fen = %pos.to_fen(), "go");
        let handle = thread::Builder::new()
            .name("search".into())
            .spawn(move || {
                let result = engine.calculate(&pos);
                (engine, result)
            })
            .context("failed to start search thread")?;
        self.worker = Some(handle);
        Ok(())
    }

    /// Cancel a running search and wait for it. An infinite search does not
    /// announce its move itself, so it is printed here.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(stop) = &self.stop {
            stop.stop();
        }
        if let Some(result) = self.join()? {
            if self.infinite {
                send(&self.out, &format!("bestmove {}", result.best_move_token()));
            }
        }
        Ok(())
    }

    /// Wait for a finite search. An infinite one is stopped first.
    fn finish_search(&mut self) -> Result<()> {
        if self.infinite {
            return self.stop();
        }
        self.join().map(|_| ())
    }

    fn join(&mut self) -> Result<Option<SearchResult>> {
        let Some(worker) = self.worker.take() else {
            return Ok(None);
        };
        self.stop = None;
        match worker.join() {
            Ok((engine, result)) => {
                self.engine = Some(engine);
                Ok(Some(result))
            }
            Err(_) => Err(anyhow!("search thread panicked")),
        }
    }

    fn take_engine(&mut self) -> Engine {
        self.engine.take().unwrap_or_else(|| {
            warn!("engine lost with its search thread, starting a new one");
            Engine::with_reporter(self.config.clone(), Box::new(OutReporter::new(self.out.clone())))
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("{e:#}");
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
