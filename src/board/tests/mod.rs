//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generation node counts against reference values
//! - `make_unmake.rs` - Make/unmake round trips and hash consistency
//! - `movegen.rs` - Scenario positions (castling, en passant, promotion, mates)
//! - `search.rs` - Search behavior on known positions
//! - `proptest.rs` - Property-based tests

mod movegen;
mod perft;
