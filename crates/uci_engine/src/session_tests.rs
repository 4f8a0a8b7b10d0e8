use super::*;
use std::io;

#[derive(Clone, Default)]
struct Buf(Arc<Mutex<Vec<u8>>>);

impl Write for Buf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Buf {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn session() -> (Session, Buf) {
    let buf = Buf::default();
    let mut config = EngineConfig::default();
    config.transposition.capacity = 1 << 12;
    (Session::new(config, shared_out(buf.clone())), buf)
}

fn bestmoves(buf: &Buf) -> Vec<String> {
    buf.lines().into_iter().filter(|l| l.starts_with("bestmove")).collect()
}

#[test]
fn test_handshake() {
    let (mut s, buf) = session();
    assert!(s.handle("uci").unwrap());
    assert!(s.handle("isready").unwrap());
    let lines = buf.lines();
    assert_eq!(lines[0], format!("id name {ENGINE_NAME}"));
    assert!(lines.iter().any(|l| l.starts_with("option name Depth type spin default 4")));
    assert_eq!(lines[lines.len() - 2], "uciok");
    assert_eq!(lines[lines.len() - 1], "readyok");
}

#[test]
fn test_blank_and_unknown_lines_are_ignored() {
    let (mut s, buf) = session();
    assert!(s.handle("   ").unwrap());
    assert!(s.handle("xyzzy 1 2 3").unwrap());
    assert!(s.handle("debug on").unwrap());
    assert!(buf.lines().is_empty());
}

#[test]
fn test_setoption_depth() {
    let (mut s, _) = session();
    s.handle("setoption name Depth value 2").unwrap();
    assert_eq!(s.depth(), 2);
    s.handle("setoption name Depth value 999").unwrap();
    assert_eq!(s.depth(), MAX_SEARCH_DEPTH);
    s.handle("setoption name Depth value lots").unwrap();
    assert_eq!(s.depth(), MAX_SEARCH_DEPTH);
    s.handle("setoption name Hash value 16").unwrap();
    assert_eq!(s.depth(), MAX_SEARCH_DEPTH);
}

#[test]
fn test_position_command() {
    let (mut s, _) = session();
    s.handle("position startpos moves e2e4 e7e5").unwrap();
    assert_eq!(
        s.position().to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
    );

    // a bad command leaves the previous position in place
    assert!(s.handle("position startpos moves e2e5").is_err());
    assert_eq!(s.position().fullmove_number(), 2);

    s.handle("ucinewgame").unwrap();
    assert_eq!(s.position().to_fen(), chess_core::START_FEN);
}

#[test]
fn test_positions_share_one_key_set() {
    let (mut s, _) = session();
    let keys = s.position().keys().clone();
    s.handle("position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1 moves e2e4").unwrap();
    assert!(Arc::ptr_eq(s.position().keys(), &keys));
    s.handle("ucinewgame").unwrap();
    assert!(Arc::ptr_eq(s.position().keys(), &keys));
}

#[test]
fn test_go_depth_prints_bestmove() {
    let (mut s, buf) = session();
    s.handle("position fen 6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    s.handle("go depth 2 wtime 1000 btime 1000").unwrap();
    let result = s.join().unwrap().expect("a finished search");
    assert_eq!(result.best_move_token(), "e1e8");
    assert_eq!(bestmoves(&buf), vec!["bestmove e1e8".to_string()]);
    assert!(buf.lines().iter().any(|l| l.starts_with("info depth 1 ")));
}

#[test]
fn test_go_infinite_then_stop() {
    let (mut s, buf) = session();
    s.handle("position startpos").unwrap();
    s.handle("go infinite").unwrap();
    assert!(bestmoves(&buf).is_empty());
    s.handle("stop").unwrap();
    assert!(!s.is_searching());

    let moves = bestmoves(&buf);
    assert_eq!(moves.len(), 1);
    let token = moves[0].trim_start_matches("bestmove ");
    assert!(chess_core::parse_uci_move(&Position::startpos(), token).is_some());

    // a second stop has nothing left to report
    s.handle("stop").unwrap();
    assert_eq!(bestmoves(&buf).len(), 1);
}

#[test]
fn test_new_go_waits_for_previous_search() {
    let (mut s, buf) = session();
    s.handle("go depth 1").unwrap();
    s.handle("go depth 1").unwrap();
    s.join().unwrap();
    assert_eq!(bestmoves(&buf).len(), 2);
}

#[test]
fn test_quit_stops_search() {
    let (mut s, buf) = session();
    s.handle("go infinite").unwrap();
    assert!(!s.handle("quit").unwrap());
    assert!(!s.is_searching());
    assert_eq!(bestmoves(&buf).len(), 1);
}
