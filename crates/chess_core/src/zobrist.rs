//! Zobrist hashing for chess positions.
//!
//! The hash is computed by XOR-ing together random values for:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Black to move (1 value)
//! - Castling rights that have been forfeited (4 values)
//! - En passant file (8 values)
//!
//! Keys are built once and shared through an `Arc`; positions derived from
//! one another share the same key set.

use std::sync::Arc;

use crate::square::{file_of, rank_of};
use crate::types::Piece;

/// Seed for [`ZobristKeys::default`]. Independently built default key sets
/// are identical, so their hashes are comparable.
pub const DEFAULT_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Index of a castling flag in [`ZobristKeys::castling`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    WhiteKingside = 0,
    WhiteQueenside = 1,
    BlackKingside = 2,
    BlackQueenside = 3,
}

/// Pre-computed random values for Zobrist hashing.
#[derive(Debug)]
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square 0..64]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XOR-ed in when Black is to move
    pub side_to_move: u64,
    /// XOR-ed in per forfeited castling right, see [`CastleSide`]
    pub castling: [u64; 4],
    /// XOR-ed in for the file of the en-passant target
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl ZobristKeys {
    /// Generate keys with xorshift64 from `seed`. Zero and duplicate values
    /// are skipped so every feature gets a distinct non-zero key.
    pub fn new(seed: u64) -> Self {
        fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = if seed == 0 { DEFAULT_SEED } else { seed };
        let mut seen = std::collections::HashSet::with_capacity(800);
        let mut next = move || loop {
            state = xorshift64(state);
            if state != 0 && seen.insert(state) {
                return state;
            }
        };

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in pieces.iter_mut() {
            for kind in color.iter_mut() {
                for key in kind.iter_mut() {
                    *key = next();
                }
            }
        }

        let side_to_move = next();

        let mut castling = [0u64; 4];
        for key in castling.iter_mut() {
            *key = next();
        }

        let mut en_passant = [0u64; 8];
        for key in en_passant.iter_mut() {
            *key = next();
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    /// Default key set behind an `Arc`, ready to hand to positions.
    pub fn shared() -> Arc<ZobristKeys> {
        Arc::new(Self::default())
    }

    /// Get the Zobrist key for a piece on a padded-board square.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        let idx = (rank_of(sq) * 8 + file_of(sq)) as usize;
        self.pieces[piece.color.idx()][piece.kind.idx()][idx]
    }

    #[inline(always)]
    pub fn castling_key(&self, side: CastleSide) -> u64 {
        self.castling[side as usize]
    }

    /// Get the Zobrist key for an en-passant target square (keyed by file).
    #[inline(always)]
    pub fn ep_key(&self, sq: u8) -> u64 {
        self.en_passant[file_of(sq) as usize]
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
