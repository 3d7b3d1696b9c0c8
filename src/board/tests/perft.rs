//! Perft: leaf counts of the full-width legal move tree against published
//! reference values. These six positions are load-bearing for generator
//! correctness; a single wrong count means a movegen bug.

use crate::board::Board;

/// Walk one position through increasing depths and compare each count.
/// Depths are capped per position to keep the suite's runtime sane; the
/// deeper published values for the heavy positions are not exercised here.
fn assert_perft(fen: &str, expected: &[(usize, u64)]) {
    let mut board = Board::from_fen(fen);
    for &(depth, nodes) in expected {
        assert_eq!(
            board.perft(depth),
            nodes,
            "perft({depth}) mismatch for {fen}"
        );
    }
}

#[test]
fn perft_initial_position() {
    assert_perft(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8902), (4, 197_281), (5, 4_865_609)],
    );
}

#[test]
fn perft_kiwipete() {
    assert_perft(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[(1, 48), (2, 2039), (3, 97_862), (4, 4_085_603)],
    );
}

#[test]
fn perft_rook_endgame() {
    assert_perft(
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[(1, 14), (2, 191), (3, 2812), (4, 43_238), (5, 674_624)],
    );
}

#[test]
fn perft_promotion_tangle() {
    assert_perft(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[(1, 6), (2, 264), (3, 9467), (4, 422_333)],
    );
}

#[test]
fn perft_buggy_engine_catcher() {
    assert_perft(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[(1, 44), (2, 1486), (3, 62_379), (4, 2_103_487)],
    );
}

#[test]
fn perft_symmetric_middlegame() {
    assert_perft(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        &[(1, 46), (2, 2079), (3, 89_890)],
    );
}
