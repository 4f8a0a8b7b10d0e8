//! Padded 10x12 board geometry.
//!
//! The 8x8 grid sits inside a frame of sentinel cells: one column on each
//! side (adjacent rows share them, so horizontal jumps of two still land on a
//! sentinel) and two rows at the top and bottom. Index = `21 + file + 10 * rank`,
//! which puts a1 at 21 and h8 at 98.

pub const BOARD_SIZE: usize = 120;

pub const A1: u8 = 21;
pub const B1: u8 = 22;
pub const C1: u8 = 23;
pub const D1: u8 = 24;
pub const E1: u8 = 25;
pub const F1: u8 = 26;
pub const G1: u8 = 27;
pub const H1: u8 = 28;

pub const A8: u8 = 91;
pub const B8: u8 = 92;
pub const C8: u8 = 93;
pub const D8: u8 = 94;
pub const E8: u8 = 95;
pub const F8: u8 = 96;
pub const G8: u8 = 97;
pub const H8: u8 = 98;

// Direction offsets on the padded board.
pub const NORTH: i8 = 10;
pub const SOUTH: i8 = -10;
pub const EAST: i8 = 1;
pub const WEST: i8 = -1;

pub const KNIGHT_JUMPS: [i8; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
pub const KING_STEPS: [i8; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];
pub const DIAGONALS: [i8; 4] = [-11, -9, 9, 11];
pub const ORTHOGONALS: [i8; 4] = [-10, -1, 1, 10];

#[inline]
pub const fn square(file: u8, rank: u8) -> u8 {
    21 + file + 10 * rank
}

/// File 0..8 of an on-board square.
#[inline]
pub const fn file_of(sq: u8) -> u8 {
    sq % 10 - 1
}

/// Rank 0..8 of an on-board square.
#[inline]
pub const fn rank_of(sq: u8) -> u8 {
    sq / 10 - 2
}

#[inline]
pub const fn is_on_board(sq: u8) -> bool {
    let col = sq % 10;
    sq >= 21 && sq <= 98 && col >= 1 && col <= 8
}

#[inline]
pub fn offset(sq: u8, delta: i8) -> u8 {
    (sq as i16 + delta as i16) as u8
}

/// All 64 playable squares, a1 first.
pub fn all_squares() -> impl Iterator<Item = u8> {
    (0..8u8).flat_map(|rank| (0..8u8).map(move |file| square(file, rank)))
}

/// Index into a 64-entry table written rank 8 first (the way the tables read
/// on paper, from White's side).
#[inline]
pub const fn table_index(sq: u8) -> usize {
    ((7 - rank_of(sq)) * 8 + file_of(sq)) as usize
}

/// Same square seen from the other side of the board.
#[inline]
pub const fn mirror(sq: u8) -> u8 {
    square(file_of(sq), 7 - rank_of(sq))
}

/// a1 is dark; light squares have an odd file + rank sum.
#[inline]
pub const fn is_light(sq: u8) -> bool {
    (file_of(sq) + rank_of(sq)) % 2 == 1
}

/// Number of files plus number of ranks between two squares.
pub fn manhattan_distance(a: u8, b: u8) -> i32 {
    let df = (file_of(a) as i32 - file_of(b) as i32).abs();
    let dr = (rank_of(a) as i32 - rank_of(b) as i32).abs();
    df + dr
}

pub fn sq_to_coord(sq: u8) -> String {
    if !is_on_board(sq) {
        return "--".to_string();
    }
    let f = (b'a' + file_of(sq)) as char;
    let r = (b'1' + rank_of(sq)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    Some(square(f - b'a', r - b'1'))
}

#[cfg(test)]
#[path = "square_tests.rs"]
mod square_tests;
