use std::sync::mpsc;
use std::thread;

use chess_core::{
    ChannelReporter, Engine, EngineConfig, EngineState, NullReporter, Position, ReportEvent,
    Reporter, StopHandle, legal_moves,
};

const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn engine(depth: u32) -> Engine {
    let mut config = EngineConfig::default();
    config.depth = depth;
    config.transposition.capacity = 1 << 14;
    Engine::with_reporter(config, Box::new(NullReporter))
}

#[test]
fn depth_one_returns_a_legal_move() {
    for fen in [
        MIDDLEGAME,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        let result = engine(1).calculate(&pos);
        let best = result.best_move.expect("a move");
        assert!(legal_moves(&pos).contains(best), "{fen}: {best}");
        assert_eq!(result.depth, 1);
    }
}

#[test]
fn node_counts_do_not_decrease_with_depth() {
    let pos = Position::from_fen(MIDDLEGAME).unwrap();
    let mut last = 0;
    for depth in 1..=3 {
        let result = engine(depth).calculate(&pos);
        assert_eq!(result.depth, depth);
        assert!(result.nodes >= last, "depth {depth}: {} < {last}", result.nodes);
        last = result.nodes;
    }
}

struct StopOnDepth {
    prefix: &'static str,
    handle: StopHandle,
}

impl Reporter for StopOnDepth {
    fn progress(&mut self, _percent: u8) {}

    fn info(&mut self, line: &str) {
        if line.starts_with(self.prefix) {
            self.handle.stop();
        }
    }
}

#[test]
fn cancellation_keeps_last_completed_iteration() {
    let pos = Position::from_fen(MIDDLEGAME).unwrap();
    let expected = engine(2).calculate(&pos).best_move;

    let mut eng = engine(4);
    let handle = eng.stop_handle();
    eng.set_reporter(Box::new(StopOnDepth {
        prefix: "info depth 3 ",
        handle,
    }));
    let result = eng.calculate(&pos);

    assert!(result.stopped);
    assert_eq!(result.depth, 2);
    assert_eq!(result.best_move, expected);
    assert_eq!(eng.best_move(), expected);
    assert_eq!(eng.state(), EngineState::Idle);
}

#[test]
fn infinite_search_on_worker_thread_stops_on_request() {
    let (tx, rx) = mpsc::channel();
    let mut eng = Engine::with_reporter(EngineConfig::default(), Box::new(ChannelReporter::new(tx)));
    eng.set_infinite(true);
    let handle = eng.stop_handle();

    let worker = thread::spawn(move || {
        let result = eng.calculate(&Position::startpos());
        (eng, result)
    });

    // the reporter keeps the sender alive, so stop reading once stopped
    for event in rx.iter() {
        if let ReportEvent::Info(line) = event {
            assert!(!line.starts_with("bestmove"), "infinite search printed {line}");
            if line.starts_with("info depth 2 ") {
                handle.stop();
                break;
            }
        }
    }

    let (eng, result) = worker.join().unwrap();
    assert!(
        !rx.try_iter()
            .any(|e| matches!(e, ReportEvent::Info(ref l) if l.starts_with("bestmove")))
    );
    assert!(result.stopped);
    assert!(result.depth >= 1);
    let best = result.best_move.expect("a move");
    assert!(legal_moves(&Position::startpos()).contains(best));
    assert_eq!(eng.best_move(), Some(best));
}
