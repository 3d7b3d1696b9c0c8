mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use fen::STARTPOS_FEN;
pub use state::{Board, UnmakeInfo};
pub use types::{Bitboard, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece, Square};

pub(crate) use types::{
    bit_for_square, castle_bit, colored_piece_index, ScoredMoveList, ALL_CASTLING_RIGHTS,
    CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q, EMPTY_MOVE, MAX_PLY,
    PROMOTION_PIECES,
};

pub(crate) use types::{file_to_index, rank_to_index};
