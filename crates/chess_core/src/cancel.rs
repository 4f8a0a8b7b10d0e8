//! Cancellation of a running search.
//!
//! A [`StopHandle`] is cheaply cloneable and can be handed to any thread. The
//! engine polls it before every child move, so `stop()` takes effect within
//! one node.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag for one search.
///
/// The engine replaces its handle after every search, so a handle obtained
/// for one search never cancels the next.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the search to stop. Idempotent, and harmless when no search runs.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Fast atomic load, suitable for calling at every node.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod cancel_tests;
