//! Zobrist hashing keys and whole-position hashing.
//!
//! Keys are generated once per process from a fixed-seed RNG so that
//! positions hash identically across runs, which the transposition table
//! relies on. The key layout is:
//! - `piece_keys[square][colored_piece]` with White pieces 0..5 and Black 6..11
//! - `castling_keys[rights_mask]`, one key per 4-bit rights mask
//! - `en_passant_keys[file]`, only the file of the ep square matters
//! - `side_to_move_key`, XORed in iff it is Black to move

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{colored_piece_index, Board, Color, Square};

const ZOBRIST_SEED: u64 = 0x1234_5678_90AB_CDEF;

pub(crate) struct ZobristKeys {
    pub piece_keys: [[u64; 12]; 64],
    pub castling_keys: [u64; 16],
    pub en_passant_keys: [u64; 8],
    pub side_to_move_key: u64,
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_keys = [[0u64; 12]; 64];
    for square_keys in piece_keys.iter_mut() {
        for key in square_keys.iter_mut() {
            *key = rng.gen();
        }
    }

    let mut castling_keys = [0u64; 16];
    for key in castling_keys.iter_mut() {
        *key = rng.gen();
    }

    let mut en_passant_keys = [0u64; 8];
    for key in en_passant_keys.iter_mut() {
        *key = rng.gen();
    }

    ZobristKeys {
        piece_keys,
        castling_keys,
        en_passant_keys,
        side_to_move_key: rng.gen(),
    }
});

/// Compute the hash of a position from scratch.
///
/// The incremental updates in make/unmake must never diverge from this.
pub(crate) fn hash_position(board: &Board) -> u64 {
    let mut hash: u64 = 0;

    for idx in 0..64 {
        let sq = Square::from_index(idx);
        if let Some((color, piece)) = board.piece_at(sq) {
            hash ^= ZOBRIST.piece_keys[idx][colored_piece_index(color, piece)];
        }
    }

    hash ^= ZOBRIST.castling_keys[board.castling_rights_mask() as usize];

    if let Some(ep_sq) = board.en_passant_target() {
        hash ^= ZOBRIST.en_passant_keys[ep_sq.file()];
    }

    if board.side_to_move() == Color::Black {
        hash ^= ZOBRIST.side_to_move_key;
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_deterministic() {
        // Two independent generations from the same seed agree.
        let mut rng_a = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut rng_b = StdRng::seed_from_u64(ZOBRIST_SEED);
        for _ in 0..100 {
            assert_eq!(rng_a.gen::<u64>(), rng_b.gen::<u64>());
        }
    }

    #[test]
    fn test_keys_are_distinct() {
        // Spot check: no accidental duplicates among piece keys for a square.
        let keys = &ZOBRIST.piece_keys[0];
        for i in 0..12 {
            for j in (i + 1)..12 {
                assert_ne!(keys[i], keys[j]);
            }
        }
    }

    #[test]
    fn test_hash_differs_by_side_to_move() {
        let white = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let black = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_ne!(hash_position(&white), hash_position(&black));
        assert_eq!(
            hash_position(&white) ^ ZOBRIST.side_to_move_key,
            hash_position(&black)
        );
    }

    #[test]
    fn test_hash_depends_only_on_ep_file() {
        // The en passant component is keyed by file alone.
        assert_eq!(ZOBRIST.en_passant_keys.len(), 8);
        let a = Board::try_from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
        let b = Board::try_from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(
            hash_position(&a),
            hash_position(&b) ^ ZOBRIST.en_passant_keys[4]
        );
    }
}
