//! Engine controller: owns the command loop's board and drives searches on a
//! background thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::board::search::{
    find_best_move, SearchInfoCallback, SearchLimits, SearchReport, SearchState,
};
use crate::board::Board;
use crate::sync::StopFlag;
use crate::variant::Variant;

/// Search thread stack size (32 MB); the legality filter recurses through
/// make/undo and deep quiescence lines add up.
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Active search job state
struct SearchJob {
    stop: StopFlag,
    searching: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl SearchJob {
    fn signal_stop(&self) {
        self.stop.stop();
    }

    fn stop_and_wait(self) {
        self.stop.stop();
        let _ = self.handle.join();
    }

    fn wait(self) {
        let _ = self.handle.join();
    }
}

/// Engine controller managing the game position and search lifecycle.
///
/// The command loop owns the board; `go` hands a clone to a spawned search
/// thread. Loop and search communicate only through the stop flag, the
/// searching flag, and the completion callback.
pub struct EngineController {
    board: Board,
    search_state: Arc<Mutex<SearchState>>,
    current_job: Option<SearchJob>,
    info_callback: Option<SearchInfoCallback>,
    variant: Variant,
}

impl EngineController {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        EngineController {
            board: Board::new(),
            search_state: Arc::new(Mutex::new(SearchState::new(tt_mb))),
            current_job: None,
            info_callback: None,
            variant: Variant::Standard,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the current position. Any running search is stopped first and
    /// the active variant is re-applied to the new board.
    pub fn set_board(&mut self, mut board: Board) {
        self.stop_search();
        board.set_variant(self.variant);
        self.board = board;
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: Variant) {
        self.stop_search();
        self.variant = variant;
        self.board.set_variant(variant);
    }

    /// `ucinewgame`: reset search state (table age, killers). The position
    /// itself is left alone; a `position` command follows.
    pub fn new_game(&mut self) {
        self.stop_search();
        self.search_state.lock().new_game();
    }

    /// Stop any active search and wait for its thread to finish.
    pub fn stop_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.stop_and_wait();
        }
    }

    /// Signal stop without waiting. The search thread still emits its
    /// best move on the way out.
    pub fn signal_stop(&mut self) {
        if let Some(job) = &self.current_job {
            job.signal_stop();
        }
    }

    /// Wait for any in-flight search to run to completion (for `isready`).
    pub fn wait_for_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.wait();
        }
    }

    /// Whether a search thread is currently running.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_job
            .as_ref()
            .is_some_and(|job| job.searching.load(Ordering::Relaxed))
    }

    /// Resize the transposition table. Only valid while idle; stops any
    /// running search first.
    pub fn resize_hash(&mut self, mb: usize) {
        self.stop_search();
        self.search_state.lock().resize_tt(mb);
    }

    /// Wipe the transposition table.
    pub fn clear_hash(&mut self) {
        self.stop_search();
        self.search_state.lock().tt.clear();
    }

    /// Set the per-iteration info callback.
    pub fn set_info_callback(&mut self, cb: Option<SearchInfoCallback>) {
        self.info_callback = cb;
    }

    /// Start a search on a background thread. `on_complete` runs on the
    /// search thread once the search finishes or is stopped, after the
    /// pathological no-move fallback has been applied.
    pub fn start_search<F>(&mut self, limits: SearchLimits, on_complete: F)
    where
        F: FnOnce(SearchReport) + Send + 'static,
    {
        self.stop_search();

        let stop = StopFlag::new();
        let searching = Arc::new(AtomicBool::new(true));

        let mut search_board = self.board.clone();
        let search_state = Arc::clone(&self.search_state);
        let stop_clone = stop.clone();
        let searching_clone = Arc::clone(&searching);
        let info_callback = self.info_callback.clone();

        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let mut report = {
                    let mut guard = search_state.lock();
                    find_best_move(
                        &mut search_board,
                        &mut guard,
                        limits,
                        &stop_clone,
                        info_callback,
                    )
                };

                if report.best_move.is_none() {
                    // Search produced nothing at all; any legal move beats
                    // forfeiting on time
                    let legal_moves = search_board.generate_moves();
                    if let Some(first) = legal_moves.first() {
                        println!(
                            "info string warning: search found no move, playing first legal move"
                        );
                        report.best_move = Some(first);
                    }
                }

                searching_clone.store(false, Ordering::Relaxed);
                on_complete(report);
            })
            .expect("failed to spawn search thread");

        self.current_job = Some(SearchJob {
            stop,
            searching,
            handle,
        });
    }
}
