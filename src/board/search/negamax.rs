//! Root and interior negamax with alpha-beta pruning.

use crate::board::{Board, Move, EMPTY_MOVE};
use crate::sync::StopFlag;
use crate::timer::TimeManager;
use crate::tt::BoundType;

use super::constants::{CHECK_FREQUENCY, INFINITY_SCORE, MATE_SCORE};
use super::SearchState;

/// State for one search: the position being searched, the persistent search
/// tables, the stop flag, and the sampled deadline.
pub(crate) struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub state: &'a mut SearchState,
    pub stop: &'a StopFlag,
    pub time: &'a TimeManager,
    pub nodes: u64,
    nodes_since_time_check: u32,
}

impl<'a> SearchContext<'a> {
    pub(crate) fn new(
        board: &'a mut Board,
        state: &'a mut SearchState,
        stop: &'a StopFlag,
        time: &'a TimeManager,
    ) -> Self {
        SearchContext {
            board,
            state,
            stop,
            time,
            nodes: 0,
            nodes_since_time_check: 0,
        }
    }

    #[inline]
    pub(crate) fn stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Poll the clock once per `CHECK_FREQUENCY` visited nodes; a missed
    /// deadline latches the stop flag so the whole tree unwinds.
    pub(crate) fn should_check_time(&mut self) -> bool {
        if self.stopped() {
            return true;
        }
        self.nodes_since_time_check += 1;
        if self.nodes_since_time_check >= CHECK_FREQUENCY {
            self.nodes_since_time_check = 0;
            if self.time.should_stop() {
                self.stop.stop();
                return true;
            }
        }
        false
    }

    /// Root-level negamax: same recursion as `negamax` but tracks the best
    /// move for iterative deepening. The window is `(-inf, +inf)`.
    pub(crate) fn negamax_root(&mut self, depth: u32) -> (i32, Option<Move>) {
        let mut alpha = -INFINITY_SCORE;
        let beta = INFINITY_SCORE;

        self.nodes += 1;

        let legal_moves = self.board.generate_moves();
        if legal_moves.is_empty() {
            let score = if self.board.is_in_check(self.board.side_to_move()) {
                -MATE_SCORE
            } else {
                0
            };
            return (score, None);
        }

        let ordered = self.order_moves(&legal_moves, EMPTY_MOVE, 0);

        let mut best_score = -INFINITY_SCORE;
        let mut best_move = None;

        for scored in ordered.iter() {
            if self.stopped() {
                break;
            }

            self.board.make_move(scored.mv);
            let score = -self.negamax(depth - 1, -beta, -alpha, 1);
            self.board.undo_move();

            if self.stopped() {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(scored.mv);
                if score > alpha {
                    alpha = score;
                }
            }
        }

        (best_score, best_move)
    }

    /// Interior negamax over the window `[alpha, beta)` at `ply` moves from
    /// the root. Returns 0 straight up the unwind once the stop flag is set;
    /// nothing is written to the transposition table on that path.
    fn negamax(&mut self, depth: u32, mut alpha: i32, mut beta: i32, ply: usize) -> i32 {
        if self.should_check_time() {
            return 0;
        }

        self.nodes += 1;

        // Variant terminal check: a king already on the hill ends the game
        if let Some(winner) = self.board.variant_winner() {
            return if winner == self.board.side_to_move() {
                MATE_SCORE - ply as i32
            } else {
                -MATE_SCORE + ply as i32
            };
        }

        let original_alpha = alpha;

        let legal_moves = self.board.generate_moves();
        if legal_moves.is_empty() {
            return if self.board.is_in_check(self.board.side_to_move()) {
                -MATE_SCORE + ply as i32
            } else {
                0
            };
        }

        if depth == 0 {
            return self.quiescence(alpha, beta, ply);
        }

        // Probe the transposition table; a deep-enough entry can cut off
        // outright or tighten the window
        let hash_key = self.board.hash();
        let mut tt_move = EMPTY_MOVE;
        if let Some(entry) = self.state.tt.probe(hash_key, ply) {
            tt_move = entry.best_move;
            if entry.depth >= depth as i32 {
                match entry.bound {
                    BoundType::Exact => return entry.score,
                    BoundType::LowerBound => {
                        if entry.score >= beta {
                            return entry.score;
                        }
                        alpha = alpha.max(entry.score);
                    }
                    BoundType::UpperBound => {
                        if entry.score <= alpha {
                            return entry.score;
                        }
                        beta = beta.min(entry.score);
                    }
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        let ordered = self.order_moves(&legal_moves, tt_move, ply);

        let mut best_score = -INFINITY_SCORE;
        let mut best_move = EMPTY_MOVE;

        for scored in ordered.iter() {
            if self.stopped() {
                break;
            }

            let m = scored.mv;
            self.board.make_move(m);
            let score = -self.negamax(depth - 1, -beta, -alpha, ply + 1);
            self.board.undo_move();

            if self.stopped() {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = m;
                if score > alpha {
                    alpha = score;
                }
            }

            if score >= beta {
                if !m.is_capture() {
                    self.state.killers.update(ply, m);
                }
                best_score = beta;
                best_move = m;
                break;
            }
        }

        // Abandoned iteration: unwind without storing partial results
        if self.stopped() {
            return 0;
        }

        let bound = if best_score <= original_alpha {
            BoundType::UpperBound
        } else if best_score >= beta {
            BoundType::LowerBound
        } else {
            BoundType::Exact
        };
        self.state
            .tt
            .store(hash_key, best_score, depth as i32, bound, best_move, ply);

        best_score
    }
}
