//! Progress reporting from a running search.
//!
//! The engine calls its [`Reporter`] synchronously on the search thread.
//! Lines follow the UCI `info` vocabulary (`info depth ...`, `info currmove
//! ...`, `info string ...`) plus the final `bestmove ...`.

use std::sync::mpsc::Sender;

use tracing::{debug, info};

pub trait Reporter: Send {
    /// Share of root moves searched at the reporting depth, 0..=100.
    fn progress(&mut self, percent: u8);

    /// One protocol line, without trailing newline.
    fn info(&mut self, line: &str);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn progress(&mut self, _percent: u8) {}

    fn info(&mut self, _line: &str) {}
}

/// Forwards reports to `tracing`: progress at debug level, lines at info.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn progress(&mut self, percent: u8) {
        debug!(percent, "search progress");
    }

    fn info(&mut self, line: &str) {
        info!(target: "chess_core::report", "{line}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Progress(u8),
    Info(String),
}

/// Sends reports to another thread. A dropped receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: Sender<ReportEvent>,
}

impl ChannelReporter {
    pub fn new(tx: Sender<ReportEvent>) -> Self {
        Self { tx }
    }
}

impl Reporter for ChannelReporter {
    fn progress(&mut self, percent: u8) {
        let _ = self.tx.send(ReportEvent::Progress(percent));
    }

    fn info(&mut self, line: &str) {
        let _ = self.tx.send(ReportEvent::Info(line.to_string()));
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
