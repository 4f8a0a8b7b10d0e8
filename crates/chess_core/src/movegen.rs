use crate::board::{Position, castle_rook_squares, kingside, queenside};
use crate::eval::move_order_score;
use crate::move_list::MoveList;
use crate::square::*;
use crate::types::*;

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, ordered by [`move_order_score`].
pub fn legal_moves(pos: &Position) -> MoveList {
    pos.legal_moves()
}

impl Position {
    /// Legal moves for the side to move, ordered best-guess first.
    pub fn legal_moves(&self) -> MoveList {
        let mut pseudo = Vec::with_capacity(64);
        pseudo_moves(self, &mut pseudo);

        // One scratch copy serves every probe.
        let mut probe = self.clone();
        let mut list = MoveList::new();
        for mv in pseudo {
            if probe.leaves_king_safe(mv) {
                list.insert(mv, move_order_score(self, mv));
            }
        }
        list
    }

    /// Make `mv` on the cells, test the mover's king, then put everything back.
    /// Hash, flags and clocks are never touched.
    pub(crate) fn leaves_king_safe(&mut self, mv: Move) -> bool {
        let mover = self.side_to_move;
        let from = mv.from as usize;
        let to = mv.to as usize;
        let moved = self.cells[from];
        let captured = self.cells[to];
        let Some(piece) = moved.piece() else {
            return false;
        };

        let mut ep_victim = None;
        if piece.kind == PieceKind::Pawn && file_of(mv.from) != file_of(mv.to) && captured.is_empty()
        {
            let v = square(file_of(mv.to), rank_of(mv.from)) as usize;
            ep_victim = Some((v, self.cells[v]));
            self.cells[v] = Cell::Empty;
        }

        let rook_hop = if piece.kind == PieceKind::King {
            castle_rook_squares(mv.from, mv.to)
        } else {
            None
        };
        if let Some((rf, rt)) = rook_hop {
            self.cells[rt as usize] = self.cells[rf as usize];
            self.cells[rf as usize] = Cell::Empty;
        }

        self.cells[to] = moved;
        self.cells[from] = Cell::Empty;
        let king_before = self.king_sq[mover.idx()];
        if piece.kind == PieceKind::King {
            self.king_sq[mover.idx()] = mv.to;
        }

        let safe = !self.king_in_check(mover);

        self.king_sq[mover.idx()] = king_before;
        self.cells[from] = moved;
        self.cells[to] = captured;
        if let Some((rf, rt)) = rook_hop {
            self.cells[rf as usize] = self.cells[rt as usize];
            self.cells[rt as usize] = Cell::Empty;
        }
        if let Some((v, cell)) = ep_victim {
            self.cells[v] = cell;
        }
        safe
    }
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    for sq in all_squares() {
        let pc = match pos.piece_at(sq) {
            Some(p) if p.color == us => p,
            _ => continue,
        };
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, sq, us, out),
            PieceKind::Knight => gen_steps(pos, sq, us, &KNIGHT_JUMPS, out),
            PieceKind::Bishop => gen_rays(pos, sq, us, &DIAGONALS, out),
            PieceKind::Rook => gen_rays(pos, sq, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_rays(pos, sq, us, &DIAGONALS, out);
                gen_rays(pos, sq, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, sq, us, &KING_STEPS, out);
                gen_castle(pos, sq, us, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, c: Color, out: &mut Vec<Move>) {
    let promo_rank = match c {
        Color::White => 7,
        Color::Black => 0,
    };
    if rank_of(to) == promo_rank {
        for pk in PROMOTIONS {
            out.push(Move::with_promo(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (forward, home_rank) = match c {
        Color::White => (NORTH, 1),
        Color::Black => (SOUTH, 6),
    };

    // forward 1, then 2 from the home rank
    let one = offset(from, forward);
    if pos.cell(one).is_empty() {
        push_pawn_move(from, one, c, out);
        if rank_of(from) == home_rank {
            let two = offset(one, forward);
            if pos.cell(two).is_empty() {
                out.push(Move::new(from, two));
            }
        }
    }

    // captures + en-passant
    for side in [WEST, EAST] {
        let to = offset(one, side);
        let cell = pos.cell(to);
        if cell.holds_enemy_of(c) {
            push_pawn_move(from, to, c, out);
        } else if cell.is_empty() && pos.en_passant() == Some(to) {
            out.push(Move::new(from, to));
        }
    }
}

/// Single-step movers: knight jumps and king steps.
fn gen_steps(pos: &Position, from: u8, c: Color, steps: &[i8], out: &mut Vec<Move>) {
    for &step in steps {
        let to = offset(from, step);
        let cell = pos.cell(to);
        if cell.is_empty() || cell.holds_enemy_of(c) {
            out.push(Move::new(from, to));
        }
    }
}

fn gen_rays(pos: &Position, from: u8, c: Color, dirs: &[i8], out: &mut Vec<Move>) {
    for &dir in dirs {
        let mut to = offset(from, dir);
        loop {
            match pos.cell(to) {
                Cell::Empty => out.push(Move::new(from, to)),
                Cell::Occupied(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
                Cell::Offboard => break,
            }
            to = offset(to, dir);
        }
    }
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (home, kingside_rook, queenside_rook) = match c {
        Color::White => (E1, H1, A1),
        Color::Black => (E8, H8, A8),
    };
    if from != home {
        return;
    }
    let flags = pos.castling();
    let can_kingside = !flags.forfeited(kingside(c)) && pos.cell(kingside_rook).is(c, PieceKind::Rook);
    let can_queenside =
        !flags.forfeited(queenside(c)) && pos.cell(queenside_rook).is(c, PieceKind::Rook);
    if !can_kingside && !can_queenside {
        return;
    }

    // Can't castle out of check
    let enemy = c.other();
    if pos.is_attacked(home, enemy) {
        return;
    }

    // King side: f and g empty, f not attacked (g is left to the legality probe)
    if can_kingside {
        let f = offset(home, EAST);
        let g = offset(f, EAST);
        if pos.cell(f).is_empty() && pos.cell(g).is_empty() && !pos.is_attacked(f, enemy) {
            out.push(Move::new(home, g));
        }
    }
    // Queen side: d, c and b empty, d not attacked
    if can_queenside {
        let d = offset(home, WEST);
        let c_sq = offset(d, WEST);
        let b = offset(c_sq, WEST);
        if pos.cell(d).is_empty()
            && pos.cell(c_sq).is_empty()
            && pos.cell(b).is_empty()
            && !pos.is_attacked(d, enemy)
        {
            out.push(Move::new(home, c_sq));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
