//! Error types for the engine core
//!
//! Covers the boundary checks: position descriptions, move tokens and
//! configuration files. Search itself has no error paths.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChessError {
    /// Malformed or impossible FEN
    #[error("Invalid FEN: {reason}")]
    InvalidFen { reason: String },

    /// Coordinate that does not name a square
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    /// Move token absent from the current legal move list
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Failed to parse engine config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChessError {
    pub(crate) fn fen(reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            reason: reason.into(),
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, ChessError>;
