//! Move tokens and `position` command helpers.

use std::sync::Arc;

use crate::board::Position;
use crate::error::{ChessError, Result};
use crate::types::Move;
use crate::zobrist::ZobristKeys;

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// The legal move of `pos` whose token is `txt` (case-insensitive).
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let token = txt.trim().to_ascii_lowercase();
    if !(4..=5).contains(&token.len()) {
        return None;
    }
    pos.legal_moves().moves().find(|m| m.to_string() == token)
}

/// Play `token` on `pos` if it is one of its legal moves.
pub fn apply_move_token(pos: &Position, token: &str) -> Result<Position> {
    let mv = parse_uci_move(pos, token).ok_or_else(|| ChessError::IllegalMove(token.to_string()))?;
    Ok(pos.play(mv))
}

/// Build a position from the arguments of a `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
///
/// Moves are applied in order; the first illegal one is an error.
pub fn set_position_from_uci(args: &[&str]) -> Result<Position> {
    set_position_from_uci_with_keys(args, ZobristKeys::shared())
}

/// Same as [`set_position_from_uci`], hashing with an existing key set.
pub fn set_position_from_uci_with_keys(args: &[&str], keys: Arc<ZobristKeys>) -> Result<Position> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    let mut pos = match setup.split_first() {
        None | Some((&"startpos", _)) => Position::startpos_with_keys(keys),
        Some((&"fen", fields)) => Position::from_fen_with_keys(&fields.join(" "), keys)?,
        Some((other, _)) => {
            return Err(ChessError::fen(format!("expected startpos or fen, got {other:?}")));
        }
    };

    for token in moves.iter().skip(1) {
        pos = apply_move_token(&pos, token)?;
    }
    Ok(pos)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
