//! Piece-square and endgame tables.
//!
//! Every table has 64 entries written the way a board diagram reads from
//! White's side: rank 8 first, a-file first. Index with
//! [`table_index`](crate::square::table_index). Black uses the vertically
//! mirrored table, see [`mirrored`].
//!
//! Piece-square values follow the "simplified evaluation function" tables.

/// Flip a White table top to bottom for Black.
pub const fn mirrored(table: &[i32; 64]) -> [i32; 64] {
    let mut out = [0; 64];
    let mut i = 0;
    while i < 64 {
        let row = i / 8;
        let col = i % 8;
        out[i] = table[(7 - row) * 8 + col];
        i += 1;
    }
    out
}

// =============================================================================
// Piece-square tables (White's view)
// =============================================================================

pub const PAWN_MIDDLEGAME: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  10,  20,  30,  30,  20,  10,  10,
      5,   5,  10,  25,  25,  10,   5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      5,  10,  10, -20, -20,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

/// Pushes pawns forward once the opponent is down to a few pieces.
pub const PAWN_ENDGAME: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     30,  30,  30,  30,  30,  30,  30,  30,
     25,  25,  25,  25,  25,  25,  25,  25,
     20,  20,  20,  20,  20,  20,  20,  20,
      0,   0,   0,   0,   0,   0,   0,   0,
    -20, -20, -20, -20, -20, -20, -20, -20,
      0,   0,   0,   0,   0,   0,   0,   0,
];

pub const KNIGHT: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

pub const BISHOP: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

pub const ROOK: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10,  10,  10,  10,  10,   5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      0,   0,   0,   5,   5,   0,   0,   0,
];

pub const QUEEN: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,   0,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

pub const KING_MIDDLEGAME: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

pub const KING_ENDGAME: [i32; 64] = [
    -50, -40, -30, -20, -20, -30, -40, -50,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -50, -30, -30, -30, -30, -30, -30, -50,
];
// =============================================================================
// Lone-king endings
// =============================================================================

/// Penalty for the lone king when the bishop runs on light squares; a8 and h1 are the mating corners.
pub const LONE_KING_LIGHT_CORNERS: [i32; 64] = [
      0,   1,   2,   3,   4,   5,   6,   7,
      1,   2,   3,   4,   5,   6,   7,   6,
      2,   3,   4,   5,   6,   7,   6,   5,
      3,   4,   5,   6,   7,   6,   5,   4,
      4,   5,   6,   7,   6,   5,   4,   3,
      5,   6,   7,   6,   5,   4,   3,   2,
      6,   7,   6,   5,   4,   3,   2,   1,
      7,   6,   5,   4,   3,   2,   1,   0,
];

/// Same for a dark-squared bishop, mating on a1 and h8.
pub const LONE_KING_DARK_CORNERS: [i32; 64] = [
      7,   6,   5,   4,   3,   2,   1,   0,
      6,   7,   6,   5,   4,   3,   2,   1,
      5,   6,   7,   6,   5,   4,   3,   2,
      4,   5,   6,   7,   6,   5,   4,   3,
      3,   4,   5,   6,   7,   6,   5,   4,
      2,   3,   4,   5,   6,   7,   6,   5,
      1,   2,   3,   4,   5,   6,   7,   6,
      0,   1,   2,   3,   4,   5,   6,   7,
];

pub const KNIGHT_WITH_LIGHT_BISHOP: [i32; 64] = [
      0,   1,   1,   1,   1,   1,   1,   0,
      1,   5,   1,   5,   1,   5,   1,   1,
      1,   1,   1,   5,   1,   1,   5,   1,
      1,   5,   5,   1,   5,   1,   1,   1,
      1,   1,   1,   5,   1,   5,   5,   1,
      1,   5,   1,   1,   5,   1,   1,   1,
      1,   1,   5,   1,   5,   1,   5,   1,
      0,   1,   1,   1,   1,   1,   1,   0,
];

pub const KNIGHT_WITH_DARK_BISHOP: [i32; 64] = [
      0,   1,   1,   1,   1,   1,   1,   0,
      1,   1,   5,   1,   5,   1,   5,   1,
      1,   5,   1,   1,   5,   1,   1,   1,
      1,   1,   1,   5,   1,   5,   5,   1,
      1,   5,   5,   1,   5,   1,   1,   1,
      1,   1,   1,   5,   1,   1,   5,   1,
      1,   5,   1,   5,   1,   5,   1,   1,
      0,   1,   1,   1,   1,   1,   1,   0,
];

/// Keeps the lone king away from the centre.
pub const LONE_KING_CENTRE: [i32; 64] = [
      0,   1,   2,   3,   3,   2,   1,   0,
      1,   2,   3,   4,   4,   3,   2,   1,
      2,   3,   4,   5,   5,   4,   3,   2,
      3,   4,   5,   6,   6,   5,   4,   3,
      3,   4,   5,   6,   6,   5,   4,   3,
      2,   3,   4,   5,   5,   4,   3,   2,
      1,   2,   3,   4,   4,   3,   2,   1,
      0,   1,   2,   3,   3,   2,   1,   0,
];

pub const ATTACKER_KING: [i32; 64] = [
      0,   1,   5,   1,   1,   5,   1,   0,
      1,   1,   5,   5,   5,   5,   1,   1,
      5,   5,   5,   5,   5,   5,   5,   5,
      1,   5,   5,   5,   5,   5,   5,   1,
      1,   5,   5,   5,   5,   5,   5,   1,
      5,   5,   5,   5,   5,   5,   5,   5,
      1,   1,   5,   5,   5,   5,   1,   1,
      0,   1,   5,   1,   1,   5,   1,   0,
];

/// Square values for the centralisation part of move ordering.
pub const CENTRE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      0,  10,  10,  10,  10,  10,  10,   0,
      0,  10,  20,  20,  20,  20,  10,   0,
      0,  10,  20,  30,  30,  20,  10,   0,
      0,  10,  20,  30,  30,  20,  10,   0,
      0,  10,  20,  20,  20,  20,  10,   0,
      0,  10,  10,  10,  10,  10,  10,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
];
