//! Iterative deepening driver.

use rand::seq::SliceRandom;

use crate::board::{Board, Move, Square, STARTPOS_FEN};
use crate::sync::StopFlag;
use crate::timer::TimeManager;

use super::negamax::SearchContext;
use super::{IterationInfo, SearchInfoCallback, SearchLimits, SearchReport, SearchState};

/// The four root moves the engine will play from the exact starting
/// position: e2e4, d2d4, g1f3, c2c4.
const OPENING_MOVES: [(Square, Square); 4] = [
    (Square::new(1, 4), Square::new(3, 4)), // e2e4
    (Square::new(1, 3), Square::new(3, 3)), // d2d4
    (Square::new(0, 6), Square::new(2, 5)), // g1f3
    (Square::new(1, 2), Square::new(3, 2)), // c2c4
];

/// One-position opening shortcut: from the exact initial position, pick
/// uniformly among the legal subset of the four standard first moves.
fn opening_shortcut(board: &mut Board) -> Option<Move> {
    if board.to_fen() != STARTPOS_FEN {
        return None;
    }

    let legal_moves = board.generate_moves();
    let candidates: Vec<Move> = legal_moves
        .iter()
        .filter(|m| {
            OPENING_MOVES
                .iter()
                .any(|&(from, to)| m.from() == from && m.to() == to)
        })
        .copied()
        .collect();

    candidates.choose(&mut rand::thread_rng()).copied()
}

fn report_iteration(
    callback: &Option<SearchInfoCallback>,
    time: &TimeManager,
    depth: u32,
    score: i32,
    nodes: u64,
    best_move: Option<Move>,
) {
    if let Some(cb) = callback {
        let time_ms = time.elapsed_ms();
        let nps = if time_ms > 0 {
            Some(nodes * 1000 / time_ms)
        } else {
            None
        };
        let info = IterationInfo {
            depth,
            score,
            nodes,
            time_ms,
            nps,
            pv: best_move.map(|m| m.to_string()).unwrap_or_default(),
        };
        cb(&info);
    }
}

/// Deepen from 1 to the cap, keeping the result of each iteration that
/// finishes before the stop flag is raised.
pub(crate) fn iterative_search(
    board: &mut Board,
    state: &mut SearchState,
    limits: SearchLimits,
    stop: &StopFlag,
    time: &TimeManager,
    info_callback: Option<SearchInfoCallback>,
) -> SearchReport {
    if let Some(book_move) = opening_shortcut(board) {
        report_iteration(&info_callback, time, 1, 0, 1, Some(book_move));
        state.stats.nodes = 1;
        state.stats.depth_reached = 1;
        state.stats.score = 0;
        return SearchReport {
            best_move: Some(book_move),
            score: 0,
            depth: 1,
            nodes: 1,
        };
    }

    let mut report = SearchReport {
        best_move: None,
        score: 0,
        depth: 0,
        nodes: 0,
    };

    let mut ctx = SearchContext::new(board, state, stop, time);

    for depth in 1..=limits.max_depth {
        if ctx.stopped() {
            break;
        }

        ctx.state.tt.new_search();
        ctx.state.killers.reset();

        let (score, best_move) = ctx.negamax_root(depth);

        // Keep the iteration only if it ran to completion
        if ctx.stopped() {
            // A first iteration that found a move before the flag tripped is
            // still better than nothing at all
            if report.best_move.is_none() {
                if let Some(m) = best_move {
                    report.best_move = Some(m);
                    report.score = score;
                    report.depth = depth;
                }
            }
            break;
        }

        report.depth = depth;
        report.score = score;
        if let Some(m) = best_move {
            report.best_move = Some(m);
        }
        report.nodes = ctx.nodes;

        report_iteration(&info_callback, time, depth, score, ctx.nodes, report.best_move);

        if best_move.is_none() {
            // Mate or stalemate at the root; deeper iterations cannot change it
            break;
        }
    }

    report.nodes = ctx.nodes;
    state.stats.nodes = report.nodes;
    state.stats.depth_reached = report.depth;
    state.stats.score = report.score;

    report
}
