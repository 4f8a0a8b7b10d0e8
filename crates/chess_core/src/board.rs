use std::sync::Arc;

use crate::error::{ChessError, Result};
use crate::square::*;
use crate::types::*;
use crate::zobrist::{CastleSide, ZobristKeys};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Number of prior positions kept for repetition checks.
pub const HISTORY_LIMIT: usize = 150;

const FIFTY_MOVE_LIMIT: u32 = 100;

/// Castling flags recorded as "this right is gone": set once the king or the
/// rook has moved, or the rook square was captured on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingFlags {
    forfeited: [bool; 4],
}

impl CastlingFlags {
    /// All four rights forfeited.
    pub fn none() -> Self {
        Self {
            forfeited: [true; 4],
        }
    }

    #[inline]
    pub fn forfeited(&self, side: CastleSide) -> bool {
        self.forfeited[side as usize]
    }

    #[inline]
    pub fn kingside_forfeited(&self, color: Color) -> bool {
        self.forfeited(kingside(color))
    }

    #[inline]
    pub fn queenside_forfeited(&self, color: Color) -> bool {
        self.forfeited(queenside(color))
    }

    /// True while at least one of `color`'s rights is still available.
    pub fn any_available(&self, color: Color) -> bool {
        !self.kingside_forfeited(color) || !self.queenside_forfeited(color)
    }

    pub(crate) fn set(&mut self, side: CastleSide, forfeited: bool) {
        self.forfeited[side as usize] = forfeited;
    }
}

pub fn kingside(color: Color) -> CastleSide {
    match color {
        Color::White => CastleSide::WhiteKingside,
        Color::Black => CastleSide::BlackKingside,
    }
}

pub fn queenside(color: Color) -> CastleSide {
    match color {
        Color::White => CastleSide::WhiteQueenside,
        Color::Black => CastleSide::BlackQueenside,
    }
}

/// Squares whose touch (from or to) forfeits a castling right.
const CASTLE_TOUCH: [(CastleSide, u8, u8); 4] = [
    (CastleSide::WhiteQueenside, A1, E1),
    (CastleSide::WhiteKingside, H1, E1),
    (CastleSide::BlackQueenside, A8, E8),
    (CastleSide::BlackKingside, H8, E8),
];

/// Rook hop (from, to) that accompanies a castling king move.
pub(crate) fn castle_rook_squares(king_from: u8, king_to: u8) -> Option<(u8, u8)> {
    match (king_from, king_to) {
        (E1, G1) => Some((H1, F1)),
        (E1, C1) => Some((A1, D1)),
        (E8, G8) => Some((H8, F8)),
        (E8, C8) => Some((A8, D8)),
        _ => None,
    }
}

/// Identity of a position for repetition and transposition checks.
///
/// `hash` is the first field so the derived equality rejects most
/// mismatches before comparing the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionKey {
    pub(crate) hash: u64,
    cells: [Cell; BOARD_SIZE],
    side_to_move: Color,
    en_passant: Option<u8>,
    castling: CastlingFlags,
}

impl PositionKey {
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

#[derive(Debug)]
struct HistoryNode {
    key: PositionKey,
    prev: Option<Arc<HistoryNode>>,
    len: usize,
}

/// Prior positions since the last irreversible move, newest first.
///
/// Nodes are shared between a position and the positions played from it, so
/// carrying the history into a child is a pointer copy.
#[derive(Clone, Debug, Default)]
struct History {
    head: Option<Arc<HistoryNode>>,
}

impl History {
    fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |n| n.len)
    }

    fn push(&mut self, key: PositionKey) {
        let len = self.len() + 1;
        self.head = Some(Arc::new(HistoryNode {
            key,
            prev: self.head.take(),
            len,
        }));
        if len > 2 * HISTORY_LIMIT {
            self.compact();
        }
    }

    /// Rebuild the chain from the newest `HISTORY_LIMIT` entries.
    fn compact(&mut self) {
        let keep: Vec<PositionKey> = self.iter().take(HISTORY_LIMIT).cloned().collect();
        self.head = None;
        for (i, key) in keep.into_iter().rev().enumerate() {
            self.head = Some(Arc::new(HistoryNode {
                key,
                prev: self.head.take(),
                len: i + 1,
            }));
        }
    }

    fn clear(&mut self) {
        self.head = None;
    }

    fn iter(&self) -> HistoryIter<'_> {
        HistoryIter {
            node: self.head.as_deref(),
        }
    }
}

struct HistoryIter<'a> {
    node: Option<&'a HistoryNode>,
}

impl<'a> Iterator for HistoryIter<'a> {
    type Item = &'a PositionKey;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.prev.as_deref();
        Some(&node.key)
    }
}

#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) cells: [Cell; BOARD_SIZE],
    pub(crate) side_to_move: Color,
    pub(crate) en_passant: Option<u8>,
    pub(crate) castling: CastlingFlags,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) king_sq: [u8; 2],
    hash: u64,
    material_changed: bool,
    history: History,
    keys: Arc<ZobristKeys>,
}

impl Position {
    fn empty(keys: Arc<ZobristKeys>) -> Self {
        let mut cells = [Cell::Offboard; BOARD_SIZE];
        for sq in all_squares() {
            cells[sq as usize] = Cell::Empty;
        }
        Position {
            cells,
            side_to_move: Color::White,
            en_passant: None,
            castling: CastlingFlags::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
            king_sq: [E1, E8],
            hash: 0,
            material_changed: false,
            history: History::default(),
            keys,
        }
    }

    pub fn startpos() -> Self {
        Self::startpos_with_keys(ZobristKeys::shared())
    }

    pub fn startpos_with_keys(keys: Arc<ZobristKeys>) -> Self {
        let mut p = Position::empty(keys);

        // Pawns
        for f in 0..8 {
            p.cells[square(f, 1) as usize] =
                Cell::Occupied(Piece::new(Color::White, PieceKind::Pawn));
            p.cells[square(f, 6) as usize] =
                Cell::Occupied(Piece::new(Color::Black, PieceKind::Pawn));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.cells[square(f as u8, 0) as usize] = Cell::Occupied(Piece::new(Color::White, kind));
            p.cells[square(f as u8, 7) as usize] = Cell::Occupied(Piece::new(Color::Black, kind));
        }
        p.hash = p.compute_hash();
        p
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Self::from_fen_with_keys(fen, ZobristKeys::shared())
    }

    /// Forsyth-Edwards Notation parser used by tests and UCI setup.
    /// The half-move clock and full-move number may be omitted.
    pub fn from_fen_with_keys(fen: &str, keys: Arc<ZobristKeys>) -> Result<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(ChessError::fen("expected at least 4 fields"));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut p = Position::empty(keys);
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::fen("board section must have 8 ranks"));
        }

        let mut kings = [0usize; 2];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: u8 = 0;
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as u8;
                } else {
                    let pc = Piece::from_fen_char(ch)
                        .ok_or_else(|| ChessError::fen(format!("invalid piece char {ch:?}")))?;
                    if file >= 8 {
                        return Err(ChessError::fen(format!("too many files in rank {}", rank + 1)));
                    }
                    if pc.kind == PieceKind::Pawn && (rank == 0 || rank == 7) {
                        return Err(ChessError::fen("pawn on first or last rank"));
                    }
                    let sq = square(file, rank);
                    if pc.kind == PieceKind::King {
                        kings[pc.color.idx()] += 1;
                        p.king_sq[pc.color.idx()] = sq;
                    }
                    p.cells[sq as usize] = Cell::Occupied(pc);
                    file += 1;
                }
                if file > 8 {
                    return Err(ChessError::fen(format!("too many files in rank {}", rank + 1)));
                }
            }
            if file != 8 {
                return Err(ChessError::fen(format!("not enough files in rank {}", rank + 1)));
            }
        }
        if kings != [1, 1] {
            return Err(ChessError::fen("each side needs exactly one king"));
        }

        p.side_to_move = match stm_part {
            "w" | "W" => Color::White,
            "b" | "B" => Color::Black,
            _ => return Err(ChessError::fen(format!("invalid side to move {stm_part:?}"))),
        };

        p.castling = CastlingFlags::none();
        if castle_part != "-" {
            for c in castle_part.chars() {
                let side = match c {
                    'K' => CastleSide::WhiteKingside,
                    'Q' => CastleSide::WhiteQueenside,
                    'k' => CastleSide::BlackKingside,
                    'q' => CastleSide::BlackQueenside,
                    _ => return Err(ChessError::fen(format!("invalid castling char {c:?}"))),
                };
                p.castling.set(side, false);
            }
        }
        // A right is only kept while its king and rook stand at home.
        for (side, corner, king_home) in CASTLE_TOUCH {
            let color = if king_home == E1 {
                Color::White
            } else {
                Color::Black
            };
            if !p.cells[king_home as usize].is(color, PieceKind::King)
                || !p.cells[corner as usize].is(color, PieceKind::Rook)
            {
                p.castling.set(side, true);
            }
        }

        p.en_passant = if ep_part == "-" {
            None
        } else {
            let sq = coord_to_sq(ep_part).ok_or_else(|| ChessError::InvalidSquare(ep_part.into()))?;
            // the skipped square sits behind a pawn that just made a double push
            let (rank, passed) = match p.side_to_move {
                Color::White => (5, offset(sq, SOUTH)),
                Color::Black => (2, offset(sq, NORTH)),
            };
            if rank_of(sq) != rank {
                return Err(ChessError::fen(format!("en-passant square {ep_part} on wrong rank")));
            }
            let mover = p.side_to_move.other();
            if !p.cells[sq as usize].is_empty() || !p.cells[passed as usize].is(mover, PieceKind::Pawn) {
                return Err(ChessError::fen(format!("no pawn passed through {ep_part}")));
            }
            Some(sq)
        };

        p.halfmove_clock = halfmove_part
            .parse()
            .map_err(|_| ChessError::fen(format!("invalid halfmove clock {halfmove_part:?}")))?;
        p.fullmove_number = fullmove_part
            .parse()
            .map_err(|_| ChessError::fen(format!("invalid fullmove number {fullmove_part:?}")))?;

        p.hash = p.compute_hash();
        Ok(p)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.cells[square(file, rank) as usize].piece() {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let mut rights = String::new();
        for (side, ch) in [
            (CastleSide::WhiteKingside, 'K'),
            (CastleSide::WhiteQueenside, 'Q'),
            (CastleSide::BlackKingside, 'k'),
            (CastleSide::BlackQueenside, 'q'),
        ] {
            if !self.castling.forfeited(side) {
                rights.push(ch);
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        out.push_str(&rights);

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq_to_coord(sq)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn cell(&self, sq: u8) -> Cell {
        self.cells[sq as usize]
    }

    #[inline]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.cells[sq as usize].piece()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }

    pub fn castling(&self) -> CastlingFlags {
        self.castling
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Whether the move that produced this position captured (including en
    /// passant) or promoted.
    #[inline]
    pub fn material_changed(&self) -> bool {
        self.material_changed
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn king_square(&self, c: Color) -> u8 {
        self.king_sq[c.idx()]
    }

    pub fn keys(&self) -> &Arc<ZobristKeys> {
        &self.keys
    }

    pub fn key(&self) -> PositionKey {
        PositionKey {
            hash: self.hash,
            cells: self.cells,
            side_to_move: self.side_to_move,
            en_passant: self.en_passant,
            castling: self.castling,
        }
    }

    /// Full-state comparison against a stored identity, hash first.
    pub fn matches_key(&self, key: &PositionKey) -> bool {
        self.hash == key.hash
            && self.side_to_move == key.side_to_move
            && self.en_passant == key.en_passant
            && self.castling == key.castling
            && self.cells == key.cells
    }

    /// Hash recomputed from scratch; equals [`Position::hash`] at all times.
    pub fn compute_hash(&self) -> u64 {
        let keys = &self.keys;
        let mut h = 0u64;
        for sq in all_squares() {
            if let Some(pc) = self.piece_at(sq) {
                h ^= keys.piece_key(pc, sq);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= keys.side_to_move;
        }
        if let Some(ep) = self.en_passant {
            h ^= keys.ep_key(ep);
        }
        for (side, _, _) in CASTLE_TOUCH {
            if self.castling.forfeited(side) {
                h ^= keys.castling_key(side);
            }
        }
        h
    }

    // =========================================================================
    // Attacks
    // =========================================================================

    /// Whether the king of the side to move is attacked.
    pub fn in_check(&self) -> bool {
        self.king_in_check(self.side_to_move)
    }

    pub fn king_in_check(&self, c: Color) -> bool {
        self.is_attacked(self.king_sq[c.idx()], c.other())
    }

    pub fn is_attacked(&self, target: u8, by: Color) -> bool {
        let cell = |sq: u8| self.cells[sq as usize];

        for jump in KNIGHT_JUMPS {
            if cell(offset(target, jump)).is(by, PieceKind::Knight) {
                return true;
            }
        }

        if self.ray_hits(target, &DIAGONALS, by, PieceKind::Bishop) {
            return true;
        }
        if self.ray_hits(target, &ORTHOGONALS, by, PieceKind::Rook) {
            return true;
        }

        // a pawn attacking `target` sits one rank behind it from its own side
        let (left, right) = match by {
            Color::White => (-11, -9),
            Color::Black => (9, 11),
        };
        if cell(offset(target, left)).is(by, PieceKind::Pawn)
            || cell(offset(target, right)).is(by, PieceKind::Pawn)
        {
            return true;
        }

        for step in KING_STEPS {
            if cell(offset(target, step)).is(by, PieceKind::King) {
                return true;
            }
        }

        false
    }

    /// Walk each ray until the first non-empty cell; hit if it holds a
    /// `slider` or a queen of color `by`.
    fn ray_hits(&self, from: u8, dirs: &[i8], by: Color, slider: PieceKind) -> bool {
        for &dir in dirs {
            let mut sq = offset(from, dir);
            loop {
                match self.cells[sq as usize] {
                    Cell::Empty => sq = offset(sq, dir),
                    Cell::Occupied(pc) => {
                        if pc.color == by && (pc.kind == slider || pc.kind == PieceKind::Queen) {
                            return true;
                        }
                        break;
                    }
                    Cell::Offboard => break,
                }
            }
        }
        false
    }

    // =========================================================================
    // Draws
    // =========================================================================

    pub fn fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_LIMIT
    }

    /// This position already occurred twice among the retained history.
    pub fn threefold_repetition(&self) -> bool {
        let mut hits = 0;
        for prior in self.history.iter().take(HISTORY_LIMIT) {
            if self.matches_key(prior) {
                hits += 1;
                if hits == 2 {
                    return true;
                }
            }
        }
        false
    }

    pub fn history_len(&self) -> usize {
        self.history.len().min(HISTORY_LIMIT)
    }

    // =========================================================================
    // Playing moves
    // =========================================================================

    /// Copy this position, record it in the copy's history and apply `mv`.
    ///
    /// `mv` must come from this position's legal move list.
    pub fn play(&self, mv: Move) -> Position {
        let mut next = self.clone();
        next.history.push(self.key());
        next.apply(mv);
        next
    }

    #[cfg(test)]
    pub(crate) fn force_hash(&mut self, hash: u64) {
        self.hash = hash;
    }

    #[inline]
    fn xor_piece(&mut self, pc: Piece, sq: u8) {
        self.hash ^= self.keys.piece_key(pc, sq);
    }

    fn apply(&mut self, mv: Move) {
        let from = mv.from;
        let to = mv.to;
        let Some(moved) = self.cells[from as usize].piece() else {
            return;
        };
        let captured = self.cells[to as usize].piece();

        self.material_changed = captured.is_some();
        if let Some(cap) = captured {
            self.xor_piece(cap, to);
        }

        if moved.kind == PieceKind::King {
            self.king_sq[moved.color.idx()] = to;
        }

        // En passant: diagonal pawn move onto an empty square
        if moved.kind == PieceKind::Pawn && file_of(from) != file_of(to) && captured.is_none() {
            let victim_sq = square(file_of(to), rank_of(from));
            if let Some(victim) = self.cells[victim_sq as usize].piece() {
                self.xor_piece(victim, victim_sq);
            }
            self.cells[victim_sq as usize] = Cell::Empty;
            self.material_changed = true;
        }

        // Castling rook hop
        if moved.kind == PieceKind::King {
            if let Some((rf, rt)) = castle_rook_squares(from, to) {
                if let Some(rook) = self.cells[rf as usize].piece() {
                    self.xor_piece(rook, rf);
                    self.cells[rf as usize] = Cell::Empty;
                    self.cells[rt as usize] = Cell::Occupied(rook);
                    self.xor_piece(rook, rt);
                }
            }
        }

        for (side, corner, king_home) in CASTLE_TOUCH {
            if !self.castling.forfeited(side)
                && (from == corner || to == corner || from == king_home || to == king_home)
            {
                self.castling.set(side, true);
                self.hash ^= self.keys.castling_key(side);
            }
        }

        self.halfmove_clock += 1;
        if captured.is_some() || moved.kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
            // nothing before an irreversible move can occur again
            self.history.clear();
        }

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= self.keys.ep_key(ep);
        }
        if moved.kind == PieceKind::Pawn && (to as i16 - from as i16).abs() == 20 {
            let ep = (from + to) / 2;
            self.en_passant = Some(ep);
            self.hash ^= self.keys.ep_key(ep);
        }

        self.xor_piece(moved, from);
        self.cells[from as usize] = Cell::Empty;
        let placed = if moved.kind == PieceKind::Pawn && (rank_of(to) == 0 || rank_of(to) == 7) {
            self.material_changed = true;
            Piece::new(moved.color, mv.promo.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.cells[to as usize] = Cell::Occupied(placed);
        self.xor_piece(placed, to);

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        self.hash ^= self.keys.side_to_move;
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
