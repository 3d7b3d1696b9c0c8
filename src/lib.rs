//! UCI chess engine with a King-of-the-Hill variant over the UCI+ extension.
//!
//! Provides:
//! - Bitboard-based board representation with classical ray slider attacks
//! - Alpha-beta negamax with iterative deepening, quiescence, killer moves,
//!   MVV-LVA ordering and transposition cutoffs
//! - Fixed-size transposition table with aged replacement and Zobrist hashing
//! - A UCI command loop plus the UCI+ variant handshake
//!
//! # Quick Start
//!
//! ```
//! use cobalt_chess::board::search::{find_best_move, SearchLimits, SearchState};
//! use cobalt_chess::board::Board;
//! use cobalt_chess::sync::StopFlag;
//!
//! let mut board = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1");
//! let moves = board.generate_moves();
//! assert!(!moves.is_empty());
//!
//! let mut state = SearchState::new(16);
//! let stop = StopFlag::new();
//! let report = find_best_move(&mut board, &mut state, SearchLimits::depth(3), &stop, None);
//! assert!(report.best_move.is_some());
//! ```
//!
//! # Making Moves
//!
//! ```
//! use cobalt_chess::board::Board;
//!
//! let mut board = Board::new();
//! board.make_move_uci("e2e4").unwrap();
//! board.make_move_uci("e7e5").unwrap();
//! assert!(!board.is_checkmate());
//! ```

// Bitboard hex literals are clearer without separators (bit patterns visible)
#![allow(clippy::unreadable_literal)]
// Index casts are ubiquitous and safe here (board and square indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod board;
pub mod engine;
pub mod sync;
pub mod timer;
pub mod tt;
pub mod uci;
pub mod variant;
mod zobrist;
