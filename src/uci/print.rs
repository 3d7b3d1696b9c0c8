//! UCI output lines.

use std::time::Duration;

use crate::board::search::IterationInfo;
use crate::board::Move;

use super::format_uci_move;

pub fn print_ready() {
    println!("readyok");
}

/// Emit the one `bestmove` line a `go` must produce. `0000` is the
/// conventional null move for positions with no legal move.
pub fn print_bestmove(best_move: Option<Move>) {
    match best_move {
        Some(mv) => println!("bestmove {}", format_uci_move(&mv)),
        None => println!("bestmove 0000"),
    }
}

/// Per-iteration `info` line: depth, score, nodes, time, nps and the best
/// root move as the (single-move) pv.
pub fn print_search_info(info: &IterationInfo) {
    let mut line = format!(
        "info depth {} score cp {} nodes {} time {}",
        info.depth, info.score, info.nodes, info.time_ms
    );
    if let Some(nps) = info.nps {
        line.push_str(&format!(" nps {nps}"));
    }
    if !info.pv.is_empty() {
        line.push_str(&format!(" pv {}", info.pv));
    }
    println!("{line}");
}

pub fn print_info_string(message: &str) {
    println!("info string {message}");
}

pub fn print_perft_info(depth: usize, nodes: u64, elapsed: Duration) {
    println!(
        "info string perft depth {} nodes {} time_ms {}",
        depth,
        nodes,
        elapsed.as_millis()
    );
}
