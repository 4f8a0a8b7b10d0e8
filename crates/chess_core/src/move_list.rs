//! Bounded list of moves kept sorted by a score, highest first.

use crate::types::Move;

pub const MOVE_LIST_CAPACITY: usize = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

#[derive(Clone, Debug, Default)]
pub struct MoveList {
    entries: Vec<ScoredMove>,
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MOVE_LIST_CAPACITY),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert behind every entry with a score >= `score`. When the list is
    /// full the last entry is dropped, unless the new one would itself be
    /// last, in which case nothing changes. Returns whether it was admitted.
    pub fn insert(&mut self, mv: Move, score: i32) -> bool {
        let at = self.entries.partition_point(|e| e.score >= score);
        if self.entries.len() == MOVE_LIST_CAPACITY {
            if at == MOVE_LIST_CAPACITY {
                return false;
            }
            self.entries.pop();
        }
        self.entries.insert(at, ScoredMove { mv, score });
        true
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<ScoredMove> {
        self.entries.get(i).copied()
    }

    pub fn mv(&self, i: usize) -> Option<Move> {
        self.entries.get(i).map(|e| e.mv)
    }

    /// Overwrite the score at `i` without reordering; out of range is ignored.
    pub fn set_score(&mut self, i: usize, score: i32) {
        if let Some(e) = self.entries.get_mut(i) {
            e.score = score;
        }
    }

    /// Stable re-sort by score, highest first.
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.entries.iter().any(|e| e.mv == mv)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredMove> {
        self.entries.iter()
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.entries.iter().map(|e| e.mv)
    }
}

#[cfg(test)]
#[path = "move_list_tests.rs"]
mod move_list_tests;
