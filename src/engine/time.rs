//! Search time allocation from `go` parameters.

use crate::uci::command::GoParams;

/// Fraction of the remaining clock to spend on one move
const TIME_FRACTION: u64 = 20;

/// Never spend more than this on a clock-allocated move (ms)
const MAX_CLOCK_ALLOCATION_MS: u64 = 5000;

/// Budget used when nothing constrains the search (ms)
const DEFAULT_SEARCH_TIME_MS: u64 = 5000;

/// Guard budget for depth-limited searches with no clock (ms)
const DEPTH_GUARD_TIME_MS: u64 = 60_000;

/// Compute the wall-clock budget for a search from `go` parameters.
///
/// `movetime` is used exactly; otherwise the side-to-move's remaining time
/// divided by `TIME_FRACTION` and capped. A depth-limited search without a
/// clock gets a generous guard budget, `infinite` gets none at all, and a
/// bare `go` falls back to the default.
#[must_use]
pub fn allocate_time(params: &GoParams, white_to_move: bool) -> Option<u64> {
    if params.infinite {
        return None;
    }

    if let Some(movetime) = params.movetime {
        return Some(movetime.max(1));
    }

    let time_left = if white_to_move {
        params.wtime
    } else {
        params.btime
    };
    if let Some(time_left) = time_left {
        let allocation = (time_left / TIME_FRACTION).min(MAX_CLOCK_ALLOCATION_MS);
        return Some(allocation.max(1));
    }

    if params.depth.is_some() {
        return Some(DEPTH_GUARD_TIME_MS);
    }

    Some(DEFAULT_SEARCH_TIME_MS)
}
