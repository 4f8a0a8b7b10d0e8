//! Random playouts with a fixed seed: every generated move must be legal and
//! the incrementally updated hash must match a full recomputation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chess_core::{Position, legal_moves, move_to_uci, parse_uci_move};

const GAMES: usize = 40;
const MAX_PLIES: usize = 200;

const STARTS: [&str; 3] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

#[test]
fn random_playouts_keep_the_mover_safe() {
    let mut rng = StdRng::seed_from_u64(0x5eed_c0ffee);

    for game in 0..GAMES {
        let mut pos = Position::from_fen(STARTS[game % STARTS.len()]).unwrap();
        for ply in 0..MAX_PLIES {
            let moves = legal_moves(&pos);
            if moves.is_empty() || pos.fifty_move_rule() || pos.threefold_repetition() {
                break;
            }
            let mv = moves.mv(rng.gen_range(0..moves.len())).unwrap();
            let mover = pos.side_to_move();
            let next = pos.play(mv);

            assert!(
                !next.king_in_check(mover),
                "game {game} ply {ply}: {mv} leaves the king attacked in {}",
                pos.to_fen()
            );
            assert_eq!(next.hash(), next.compute_hash(), "game {game} ply {ply}: {mv}");
            assert_eq!(next.side_to_move(), mover.other());
            pos = next;
        }
    }
}

#[test]
fn fen_round_trip_along_playouts() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut pos = Position::startpos();
    for _ in 0..120 {
        let moves = legal_moves(&pos);
        if moves.is_empty() {
            break;
        }
        let mv = moves.mv(rng.gen_range(0..moves.len())).unwrap();
        pos = pos.play(mv);

        let reparsed = Position::from_fen(&pos.to_fen()).unwrap();
        assert_eq!(reparsed.to_fen(), pos.to_fen());
        assert_eq!(reparsed.hash(), pos.hash());
    }
}

#[test]
fn every_generated_move_parses_back() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut pos = Position::from_fen(STARTS[1]).unwrap();
    for _ in 0..60 {
        let moves = legal_moves(&pos);
        if moves.is_empty() {
            break;
        }
        for mv in moves.moves() {
            assert_eq!(parse_uci_move(&pos, &move_to_uci(mv)), Some(mv));
        }
        pos = pos.play(moves.mv(rng.gen_range(0..moves.len())).unwrap());
    }
}
