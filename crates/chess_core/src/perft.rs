use crate::board::Position;
use crate::types::Move;

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .moves()
        .map(|mv| perft(&pos.play(mv), depth - 1))
        .sum()
}

/// Node count below each root move, in move-list order.
pub fn perft_divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    pos.legal_moves()
        .moves()
        .map(|mv| (mv, perft(&pos.play(mv), depth - 1)))
        .collect()
}
