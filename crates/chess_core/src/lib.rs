//! Mailbox chess engine core
//!
//! Board representation on a padded 10x12 array, legal move generation,
//! static evaluation, and an iterative-deepening alpha-beta search with
//! quiescence and a transposition table. Protocol front ends live in other
//! crates and drive [`Engine`] through [`Position`] and [`Reporter`].

pub mod board;
pub mod cancel;
pub mod config;
pub mod error;
pub mod eval;
pub mod line;
pub mod move_list;
pub mod movegen;
pub mod perft;
pub mod report;
pub mod search;
pub mod square;
pub mod tables;
pub mod tt;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export the public surface
pub use board::*;
pub use cancel::StopHandle;
pub use config::{EngineConfig, TranspositionConfig};
pub use error::{ChessError, Result};
pub use eval::{Evaluator, move_order_score, piece_value};
pub use line::{INFINITY, Line, MATE, WINNING};
pub use move_list::{MoveList, ScoredMove};
pub use movegen::legal_moves;
pub use perft::{perft, perft_divide};
pub use report::{ChannelReporter, NullReporter, ReportEvent, Reporter, TracingReporter};
pub use search::{Engine, EngineState, MAX_SEARCH_DEPTH, NULL_MOVE, SearchResult};
pub use square::*;
pub use tt::{TranspositionTable, TtStats};
pub use types::*;
pub use uci::*;
pub use zobrist::{CastleSide, ZobristKeys};
