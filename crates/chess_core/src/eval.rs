//! Static evaluation and move-ordering heuristics
//!
//! Scores are centipawns from the side-to-move's perspective. Material
//! dominates; piece-square bonuses and pawn structure count half. Bare-king
//! endings get their own handling so the search can drive the lone king to
//! an edge.

use crate::board::{Position, kingside, queenside};
use crate::line::WINNING;
use crate::square::*;
use crate::tables::{self, mirrored};
use crate::types::*;

/// Returns the material value of a piece in centipawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

/// Penalty for a king that stepped aside without castling.
const UNCASTLED_KING_PENALTY: i32 = 40;
const PAWN_FAULT: i32 = 10;

#[derive(Clone, Debug)]
struct PieceTables {
    pawn_middlegame: [i32; 64],
    pawn_endgame: [i32; 64],
    knight: [i32; 64],
    bishop: [i32; 64],
    rook: [i32; 64],
    queen: [i32; 64],
    king_middlegame: [i32; 64],
    king_endgame: [i32; 64],
}

impl PieceTables {
    fn white() -> Self {
        PieceTables {
            pawn_middlegame: tables::PAWN_MIDDLEGAME,
            pawn_endgame: tables::PAWN_ENDGAME,
            knight: tables::KNIGHT,
            bishop: tables::BISHOP,
            rook: tables::ROOK,
            queen: tables::QUEEN,
            king_middlegame: tables::KING_MIDDLEGAME,
            king_endgame: tables::KING_ENDGAME,
        }
    }

    fn mirrored(&self) -> Self {
        PieceTables {
            pawn_middlegame: mirrored(&self.pawn_middlegame),
            pawn_endgame: mirrored(&self.pawn_endgame),
            knight: mirrored(&self.knight),
            bishop: mirrored(&self.bishop),
            rook: mirrored(&self.rook),
            queen: mirrored(&self.queen),
            king_middlegame: mirrored(&self.king_middlegame),
            king_endgame: mirrored(&self.king_endgame),
        }
    }

    /// `opponent_endgame` picks the pawn and king tables.
    fn bonus(&self, kind: PieceKind, sq: u8, opponent_endgame: bool) -> i32 {
        let i = table_index(sq);
        match kind {
            PieceKind::Pawn if opponent_endgame => self.pawn_endgame[i],
            PieceKind::Pawn => self.pawn_middlegame[i],
            PieceKind::Knight => self.knight[i],
            PieceKind::Bishop => self.bishop[i],
            PieceKind::Rook => self.rook[i],
            PieceKind::Queen => self.queen[i],
            PieceKind::King if opponent_endgame => self.king_endgame[i],
            PieceKind::King => self.king_middlegame[i],
        }
    }
}

/// Up to ten squares; nobody has more than ten pieces of one kind.
#[derive(Clone, Copy, Debug, Default)]
struct Squares {
    sq: [u8; 10],
    len: usize,
}

impl Squares {
    fn push(&mut self, sq: u8) {
        if self.len < self.sq.len() {
            self.sq[self.len] = sq;
            self.len += 1;
        }
    }

    fn as_slice(&self) -> &[u8] {
        &self.sq[..self.len]
    }
}

/// Material census of one color.
#[derive(Clone, Copy, Debug, Default)]
struct Side {
    king: u8,
    pawns: Squares,
    knights: Squares,
    bishops: Squares,
    rooks: Squares,
    queens: usize,
    pieces: usize,
    material: i32,
}

impl Side {
    fn add(&mut self, kind: PieceKind, sq: u8) {
        match kind {
            PieceKind::Pawn => self.pawns.push(sq),
            PieceKind::Knight => self.knights.push(sq),
            PieceKind::Bishop => self.bishops.push(sq),
            PieceKind::Rook => self.rooks.push(sq),
            PieceKind::Queen => self.queens += 1,
            PieceKind::King => self.king = sq,
        }
        self.material += piece_value(kind);
        self.pieces += 1;
    }

    fn endgame(&self) -> bool {
        3 * self.queens + self.rooks.len + self.bishops.len + self.knights.len <= 4
    }

    fn is_lone_king(&self) -> bool {
        self.pieces == 1
    }

    fn bishop_pair(&self) -> bool {
        let b = self.bishops.as_slice();
        b.iter().any(|&s| is_light(s)) && b.iter().any(|&s| !is_light(s))
    }

    /// Enough force to mate a bare king without pawns.
    fn can_mate_lone_king(&self) -> bool {
        self.queens >= 1
            || self.rooks.len >= 1
            || self.bishop_pair()
            || (self.knights.len >= 1 && self.bishops.len >= 1)
            || self.knights.len >= 3
    }

    /// Doubled plus isolated pawns.
    fn pawn_faults(&self) -> i32 {
        // padded so files -1 and 8 read as empty
        let mut per_file = [0i32; 10];
        for &sq in self.pawns.as_slice() {
            per_file[file_of(sq) as usize + 1] += 1;
        }
        let mut faults = 0;
        for f in 1..=8 {
            if per_file[f] > 1 {
                faults += per_file[f] - 1;
            }
            if per_file[f - 1] == 0 && per_file[f + 1] == 0 {
                faults += per_file[f];
            }
        }
        faults
    }

    /// King off its home square on its first two ranks with both rooks
    /// still in their corners.
    fn king_walked_uncastled(&self, color: Color) -> bool {
        let (home, near_ranks, corners) = match color {
            Color::White => (E1, 0..=1, [A1, H1]),
            Color::Black => (E8, 6..=7, [A8, H8]),
        };
        let rooks = self.rooks.as_slice();
        near_ranks.contains(&rank_of(self.king))
            && self.king != home
            && rooks.len() == 2
            && corners.iter().all(|c| rooks.contains(c))
    }
}

/// Position evaluator. Holds the White tables and their Black mirrors.
#[derive(Clone, Debug)]
pub struct Evaluator {
    white: PieceTables,
    black: PieceTables,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        let white = PieceTables::white();
        let black = white.mirrored();
        Evaluator { white, black }
    }

    fn tables(&self, c: Color) -> &PieceTables {
        match c {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Evaluates the position from the side-to-move's perspective.
    ///
    /// Returns a score in centipawns:
    /// - Positive = good for side to move
    /// - Negative = bad for side to move
    /// - 0 = equal or a known draw
    pub fn evaluate(&self, pos: &Position) -> i32 {
        let mut sides = [Side::default(); 2];
        for sq in all_squares() {
            if let Some(pc) = pos.piece_at(sq) {
                sides[pc.color.idx()].add(pc.kind, sq);
            }
        }
        let [white, black] = sides;
        let material = white.material - black.material;
        let endgame = [white.endgame(), black.endgame()];

        let mut bonus = [0i32; 2];
        for sq in all_squares() {
            if let Some(pc) = pos.piece_at(sq) {
                let opponent_endgame = endgame[pc.color.other().idx()];
                bonus[pc.color.idx()] += self.tables(pc.color).bonus(pc.kind, sq, opponent_endgame);
            }
        }
        for (i, color) in [Color::White, Color::Black].into_iter().enumerate() {
            if sides[i].king_walked_uncastled(color) {
                bonus[i] -= UNCASTLED_KING_PENALTY;
            }
        }

        let white_to_move = pos.side_to_move() == Color::White;

        // Known draws
        if white.is_lone_king() && black.is_lone_king() {
            return 0;
        }
        if insufficient_against_lone_king(&white, &black)
            || insufficient_against_lone_king(&black, &white)
        {
            return 0;
        }

        // Material stays in the score so the winner keeps its pieces
        if black.is_lone_king() && white.can_mate_lone_king() {
            let sc = win_lone_king(&white, black.king);
            return if white_to_move {
                material + sc
            } else {
                -material - sc
            };
        }
        if white.is_lone_king() && black.can_mate_lone_king() {
            let sc = win_lone_king(&black, white.king);
            return if white_to_move {
                material - sc
            } else {
                -material + sc
            };
        }

        let pawns = PAWN_FAULT * (black.pawn_faults() - white.pawn_faults());
        let total = material + (bonus[0] - bonus[1] + pawns) / 2;

        if white_to_move { total } else { -total }
    }
}

/// Bare king against king plus one minor piece or two knights.
fn insufficient_against_lone_king(lone: &Side, other: &Side) -> bool {
    if !lone.is_lone_king() {
        return false;
    }
    match other.pieces {
        2 => other.knights.len == 1 || other.bishops.len == 1,
        3 => other.knights.len == 2,
        _ => false,
    }
}

/// Technical-win score for `me` against a bare king on `lone_king`.
fn win_lone_king(me: &Side, lone_king: u8) -> i32 {
    let mut score = WINNING;
    let i = table_index(lone_king);

    if me.pieces == 3 && me.knights.len == 1 && me.bishops.len == 1 {
        // Mate only happens in a corner of the bishop's color
        let knight = table_index(me.knights.sq[0]);
        if is_light(me.bishops.sq[0]) {
            score -= 20 * tables::LONE_KING_LIGHT_CORNERS[i];
            score = 10 * tables::KNIGHT_WITH_LIGHT_BISHOP[knight];
        } else {
            score -= 20 * tables::LONE_KING_DARK_CORNERS[i];
            score = 10 * tables::KNIGHT_WITH_DARK_BISHOP[knight];
        }
    } else {
        score -= 20 * tables::LONE_KING_CENTRE[i];
    }

    score += 10 * tables::ATTACKER_KING[table_index(me.king)];

    // short-range pieces must come close
    score -= 5 * manhattan_distance(me.king, lone_king);
    for &n in me.knights.as_slice() {
        score -= 2 * manhattan_distance(n, lone_king);
    }

    for &b in me.bishops.as_slice() {
        if matches!(b, A1 | A8 | H1 | H8) {
            score -= 5;
        }
    }

    score
}

/// Cheap guess of how good `mv` is, used to order the move list.
pub fn move_order_score(pos: &Position, mv: Move) -> i32 {
    let mut bonus = 0;

    if let Some(captured) = pos.piece_at(mv.to) {
        bonus += piece_value(captured.kind);
    }

    let Some(moved) = pos.piece_at(mv.from) else {
        return bonus;
    };

    if moved.kind == PieceKind::Pawn && file_of(mv.from) != file_of(mv.to) && pos.cell(mv.to).is_empty()
    {
        bonus += piece_value(PieceKind::Pawn);
    }

    if let Some(promo) = mv.promo {
        bonus += piece_value(promo) - piece_value(PieceKind::Pawn);
    }

    let flags = pos.castling();
    let c = moved.color;
    match moved.kind {
        PieceKind::King => {
            if mv.from.abs_diff(mv.to) == 2 {
                bonus += 50;
            } else if flags.any_available(c) {
                bonus -= 50;
            }
        }
        PieceKind::Rook if gives_up_rook_right(mv.from, c, pos) => bonus -= 30,
        _ => {
            bonus += tables::CENTRE[table_index(mv.to)] - tables::CENTRE[table_index(mv.from)];
        }
    }

    bonus
}

fn gives_up_rook_right(from: u8, c: Color, pos: &Position) -> bool {
    let flags = pos.castling();
    let (qs_corner, ks_corner) = match c {
        Color::White => (A1, H1),
        Color::Black => (A8, H8),
    };
    (from == qs_corner && !flags.forfeited(queenside(c)))
        || (from == ks_corner && !flags.forfeited(kingside(c)))
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
