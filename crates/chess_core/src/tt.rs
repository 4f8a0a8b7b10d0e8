//! Transposition table.
//!
//! Open addressing over `capacity + slack` slots. A position's home slot is
//! `hash % capacity` and probes only move forward; running off the end of
//! the array means "not cached". Only positions between
//! `min_store_depth..=max_store_depth` plies from the root are stored, since
//! transpositions cannot occur any shallower and deeper entries are not
//! worth the memory.

use std::fmt;

use crate::board::{Position, PositionKey};
use crate::config::TranspositionConfig;
use crate::line::Line;

#[derive(Debug)]
struct Entry {
    key: PositionKey,
    line: Line,
    tdepth: u32,
}

/// Counters for one table generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtStats {
    pub filled: u64,
    pub hits: u64,
    pub misses: u64,
    /// Same hash, different position
    pub collisions: u64,
    pub hash_collisions: u64,
    /// Entry stored closer to the leaves than the probing node
    pub depth_collisions: u64,
}

impl fmt::Display for TtStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "filled {} read {} not_read {} collisions {} hash_collisions {} depth_collisions {}",
            self.filled,
            self.hits,
            self.misses,
            self.collisions,
            self.hash_collisions,
            self.depth_collisions
        )
    }
}

#[derive(Debug)]
pub struct TranspositionTable {
    slots: Vec<Option<Box<Entry>>>,
    config: TranspositionConfig,
    stats: TtStats,
}

impl TranspositionTable {
    pub fn new(config: TranspositionConfig) -> Self {
        let len = if config.enabled {
            config.capacity + config.slack
        } else {
            0
        };
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self {
            slots,
            config,
            stats: TtStats::default(),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.config.capacity > 0
    }

    pub fn stats(&self) -> TtStats {
        self.stats
    }

    /// Empty every slot and zero the counters, returning the old counters.
    pub fn reset(&mut self) -> TtStats {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        std::mem::take(&mut self.stats)
    }

    #[inline]
    fn home(&self, hash: u64) -> usize {
        (hash % self.config.capacity as u64) as usize
    }

    /// Cached line for `pos` searched at tree depth `tdepth`, if any.
    pub fn lookup(&mut self, pos: &Position, tdepth: u32) -> Option<Line> {
        if !self.is_enabled() || tdepth < self.config.min_probe_depth {
            return None;
        }
        let hash = pos.hash();
        let start = self.home(hash);
        for slot in &self.slots[start..] {
            let Some(entry) = slot else {
                break;
            };
            if entry.tdepth > tdepth {
                self.stats.depth_collisions += 1;
                continue;
            }
            if entry.key.hash() != hash {
                self.stats.hash_collisions += 1;
                continue;
            }
            if pos.matches_key(&entry.key) {
                self.stats.hits += 1;
                return Some(entry.line.clone());
            }
            self.stats.collisions += 1;
        }
        self.stats.misses += 1;
        None
    }

    /// Store `line` for `pos` found at tree depth `tdepth`.
    ///
    /// Takes the first free slot from the home slot on. An entry for the same
    /// position stored deeper in the tree is replaced; one stored at the
    /// same depth or shallower is kept and the probe ends.
    pub fn insert(&mut self, pos: &Position, tdepth: u32, line: &Line) {
        if !self.is_enabled()
            || tdepth < self.config.min_store_depth
            || tdepth > self.config.max_store_depth
        {
            return;
        }
        let hash = pos.hash();
        for i in self.home(hash)..self.slots.len() {
            let replace = match &self.slots[i] {
                None => true,
                Some(entry) if entry.key.hash() == hash && pos.matches_key(&entry.key) => {
                    if entry.tdepth <= tdepth {
                        return;
                    }
                    true
                }
                Some(_) => false,
            };
            if replace {
                if self.slots[i].is_none() {
                    self.stats.filled += 1;
                }
                self.slots[i] = Some(Box::new(Entry {
                    key: pos.key(),
                    line: line.clone(),
                    tdepth,
                }));
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
