//! Negamax search with alpha-beta pruning, quiescence and iterative deepening
//!
//! Scores are fail-hard: a node never returns more than beta or less than
//! alpha. Results of nodes between the configured tree depths are cached in
//! the transposition table, which is rebuilt for every iteration.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::board::Position;
use crate::cancel::StopHandle;
use crate::config::EngineConfig;
use crate::eval::Evaluator;
use crate::line::{INFINITY, Line, MATE};
use crate::report::{Reporter, TracingReporter};
use crate::tt::TranspositionTable;
use crate::types::Move;

/// Token sent when there is nothing to play.
pub const NULL_MOVE: &str = "0000";

/// Upper bound for infinite searches.
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Tree depth of the root node.
const ROOT_TDEPTH: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    /// Searching the given iteration depth
    Iterating(u32),
    /// Emitting the closing report lines
    Reporting,
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves or the position is drawn)
    pub best_move: Option<Move>,
    /// Principal variation of the last completed iteration
    pub line: Line,
    /// Evaluation score in centipawns from the side to move's perspective
    pub score: i32,
    /// Last completed iteration depth
    pub depth: u32,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the search was cancelled
    pub stopped: bool,
}

impl SearchResult {
    /// Best move as a protocol token, `0000` when there is none.
    pub fn best_move_token(&self) -> String {
        self.best_move
            .map(|m| m.to_string())
            .unwrap_or_else(|| NULL_MOVE.to_string())
    }
}

/// Alpha-beta engine. One search at a time; cancel it from another thread
/// through [`Engine::stop_handle`].
pub struct Engine {
    config: EngineConfig,
    depth: u32,
    infinite: bool,
    evaluator: Evaluator,
    tt: TranspositionTable,
    reporter: Box<dyn Reporter>,
    stop: StopHandle,
    state: EngineState,
    best_move: Option<Move>,
    nodes: u64,
    start: Instant,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_reporter(config, Box::new(TracingReporter))
    }

    pub fn with_reporter(config: EngineConfig, reporter: Box<dyn Reporter>) -> Self {
        Self {
            depth: config.depth,
            infinite: false,
            evaluator: Evaluator::new(),
            tt: TranspositionTable::new(config.transposition.clone()),
            reporter,
            stop: StopHandle::new(),
            state: EngineState::Idle,
            best_move: None,
            nodes: 0,
            start: Instant::now(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.reporter = reporter;
    }

    /// Search depth in plies.
    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Keep deepening until stopped; the final `bestmove` line is left to
    /// the caller.
    pub fn set_infinite(&mut self, infinite: bool) {
        self.infinite = infinite;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Handle that cancels the next (or currently running) search.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Cancel the running search. Does nothing while idle, so it cannot
    /// cancel a later search; other threads use [`Engine::stop_handle`].
    pub fn stop(&self) {
        if self.state != EngineState::Idle {
            self.stop.stop();
        }
    }

    /// Best move of the last search, also after cancellation.
    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    /// Search `pos` until the configured depth, a mate score or cancellation.
    pub fn calculate(&mut self, pos: &Position) -> SearchResult {
        self.nodes = 0;
        self.start = Instant::now();
        self.best_move = None;
        info!(depth = self.depth, infinite = self.infinite, "search started");

        let result = self.iterate(pos);
        self.best_move = result.best_move;

        info!(
            best = %result.best_move_token(),
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            stopped = result.stopped,
            "search finished"
        );
        // a stop aimed at this search must not leak into the next one
        self.stop = StopHandle::new();
        self.state = EngineState::Idle;
        result
    }

    fn iterate(&mut self, pos: &Position) -> SearchResult {
        let mut result = SearchResult {
            best_move: None,
            line: Line::new(0),
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        };

        if pos.threefold_repetition() || pos.fifty_move_rule() {
            self.play_best_move(None);
            return result;
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            self.play_best_move(None);
            return result;
        }
        if moves.len() == 1 {
            result.best_move = moves.mv(0);
            self.play_best_move(result.best_move);
            return result;
        }

        let first_move = moves.mv(0);
        let max_depth = self.depth.max(1);
        let mut best_line = Line::new(-INFINITY);
        let mut best_move = None;
        let mut completed = 0;
        let mut depth = 1;

        while (depth <= max_depth || self.infinite)
            && depth <= MAX_SEARCH_DEPTH
            && !self.stop.is_stopped()
        {
            self.state = EngineState::Iterating(depth);
            debug!(depth, "iteration started");
            self.reset_table();

            let mut alpha = -INFINITY;
            let beta = INFINITY;
            let mut line = Line::new(alpha);
            let mut iteration_best = None;
            let reporting = depth >= max_depth || self.infinite;

            for i in 0..moves.len() {
                if self.stop.is_stopped() {
                    break;
                }
                let Some(mv) = moves.mv(i) else {
                    break;
                };
                let child = pos.play(mv);

                if reporting {
                    self.reporter.progress(((i + 1) * 100 / moves.len()) as u8);
                    self.reporter.info(&format!("info currmove {mv}"));
                }

                let reply = self.search(&child, -beta, -alpha, depth - 1, ROOT_TDEPTH + 1);
                self.count_node();
                // an interrupted subtree has no usable score
                if self.stop.is_stopped() {
                    break;
                }
                let score = -reply.score();
                moves.set_score(i, score);

                if score > alpha {
                    alpha = score;
                    line = reply.extended(mv, alpha);
                    iteration_best = Some(mv);
                    self.report_line(depth, &line);
                    if alpha >= MATE {
                        break;
                    }
                }
            }

            if self.stop.is_stopped() {
                debug!(depth, "iteration cancelled");
                break;
            }
            best_move = iteration_best;
            best_line = line;
            completed = depth;
            self.best_move = best_move;
            trace!(depth, alpha, nodes = self.nodes, "iteration finished");

            if alpha >= MATE {
                break;
            }
            moves.sort();
            depth += 1;
        }

        self.state = EngineState::Reporting;
        // Nothing completed before a stop: fall back to the generator's first move
        let best_move = best_move.or(first_move);
        let token = best_move.map_or_else(|| NULL_MOVE.to_string(), |m| m.to_string());
        self.reporter.info(&format!("info currmove {token}"));
        if completed > 0 {
            self.report_line(completed, &best_line);
        }
        self.reset_table();
        self.play_best_move(best_move);

        result.best_move = best_move;
        result.score = if completed > 0 { best_line.score() } else { 0 };
        result.line = best_line;
        result.depth = completed;
        result.nodes = self.nodes;
        result.stopped = self.stop.is_stopped();
        result
    }

    /// Full-width node.
    fn search(&mut self, pos: &Position, mut alpha: i32, beta: i32, depth: u32, tdepth: u32) -> Line {
        if pos.threefold_repetition() || pos.fifty_move_rule() {
            return Line::new(0);
        }

        if let Some(line) = self.tt.lookup(pos, tdepth) {
            return line;
        }

        if depth == 0 {
            let line = self.quiescence(pos, alpha, beta, self.config.quiescence_depth, tdepth);
            self.tt.insert(pos, tdepth, &line);
            return line;
        }

        let moves = pos.legal_moves();
        if moves.is_empty() {
            let line = Line::new(if pos.in_check() { -MATE } else { 0 });
            self.tt.insert(pos, tdepth, &line);
            return line;
        }

        // a forced reply does not use up depth
        let child_depth = if moves.len() > 1 { depth - 1 } else { depth };
        let mut best = Line::new(alpha);

        for mv in moves.moves() {
            if self.stop.is_stopped() {
                break;
            }
            let child = pos.play(mv);
            let reply = self.search(&child, -beta, -alpha, child_depth, tdepth + 1);
            let score = -reply.score();
            self.count_node();

            if score >= beta {
                let cut = Line::new(beta);
                self.tt.insert(pos, tdepth, &cut);
                return cut;
            }
            if score > alpha {
                alpha = score;
                best = reply.extended(mv, alpha);
            }
        }

        self.tt.insert(pos, tdepth, &best);
        best
    }

    /// Follow captures, promotions, checks and check evasions until the
    /// position is quiet or the budget runs out.
    fn quiescence(&mut self, pos: &Position, mut alpha: i32, beta: i32, depth: u32, tdepth: u32) -> Line {
        if pos.threefold_repetition() || pos.fifty_move_rule() {
            return Line::new(0);
        }

        if let Some(line) = self.tt.lookup(pos, tdepth) {
            return line;
        }

        let moves = pos.legal_moves();
        if moves.is_empty() {
            return Line::new(if pos.in_check() { -MATE } else { 0 });
        }

        let stand_pat = self.evaluator.evaluate(pos);
        if depth == 0 {
            return Line::new(stand_pat);
        }
        if stand_pat >= beta {
            return Line::new(beta);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let in_check = pos.in_check();
        let mut best = Line::new(alpha);

        for mv in moves.moves() {
            if self.stop.is_stopped() {
                break;
            }
            let child = pos.play(mv);
            if !(in_check || child.material_changed() || child.in_check()) {
                continue;
            }

            let child_depth = if child.material_changed() {
                self.config.quiescence_depth
            } else if moves.len() > 1 {
                depth - 1
            } else {
                depth
            };

            let reply = self.quiescence(&child, -beta, -alpha, child_depth, tdepth + 1);
            let score = -reply.score();
            self.count_node();

            if score >= beta {
                return Line::new(beta);
            }
            if score > alpha {
                alpha = score;
                best = reply.extended(mv, alpha);
            }
        }

        best
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn nps(&self, ms: u64) -> u64 {
        if ms > 0 { 1000 * self.nodes / ms } else { 0 }
    }

    fn count_node(&mut self) {
        self.nodes += 1;
        let interval = self.config.info_interval_nodes;
        if interval > 0 && self.nodes % interval == 0 {
            let ms = self.elapsed_ms();
            let line = format!("info nodes {} nps {}", self.nodes, self.nps(ms));
            self.reporter.info(&line);
        }
    }

    fn report_line(&mut self, depth: u32, line: &Line) {
        let ms = self.elapsed_ms();
        let text = format!(
            "info depth {depth} time {ms} nodes {} nps {} score cp {} pv {line}",
            self.nodes,
            self.nps(ms),
            line.score()
        );
        self.reporter.info(&text);
    }

    /// Empty the table, reporting what the finished generation did.
    fn reset_table(&mut self) {
        if !self.tt.is_enabled() {
            return;
        }
        let stats = self.tt.reset();
        trace!(%stats, "transposition table reset");
        self.reporter.info(&format!("info string {stats}"));
    }

    fn play_best_move(&mut self, mv: Option<Move>) {
        if self.infinite {
            return;
        }
        let token = mv.map_or_else(|| NULL_MOVE.to_string(), |m| m.to_string());
        self.reporter.info(&format!("bestmove {token}"));
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
