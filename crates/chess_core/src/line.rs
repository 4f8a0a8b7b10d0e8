//! Scores and principal variations.

use std::fmt;

use crate::types::Move;

/// Window bound used at the root.
pub const INFINITY: i32 = 100_000;
/// Score for the side delivering mate.
pub const MATE: i32 = 50_000;
/// Base score of a won lone-king ending.
pub const WINNING: i32 = 20_000;

pub const MAX_LINE: usize = 64;

/// A score from the mover's point of view plus the moves that lead to it.
///
/// Moves are stored deepest first so extending a child's line with the
/// parent's move is a push. When full, the deepest move is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    score: i32,
    moves: Vec<Move>,
}

impl Line {
    pub fn new(score: i32) -> Self {
        Self {
            score,
            moves: Vec::new(),
        }
    }

    /// Make `mv` the new first move and take `score`.
    pub fn push(&mut self, mv: Move, score: i32) {
        if self.moves.len() == MAX_LINE {
            self.moves.remove(0);
        }
        self.moves.push(mv);
        self.score = score;
    }

    /// Copy of `self` with `mv` in front, scored `score`.
    pub fn extended(&self, mv: Move, score: i32) -> Line {
        let mut line = self.clone();
        line.push(mv, score);
        line
    }

    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn first(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves in playing order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().rev().copied()
    }
}

/// Space separated move tokens in playing order.
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.moves().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod line_tests;
