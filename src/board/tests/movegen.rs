//! Scenario tests for move generation.

use crate::board::{Board, Color, Piece, Square};

#[test]
fn test_startpos_has_twenty_moves() {
    let mut board = Board::new();
    let moves = board.generate_moves();
    assert_eq!(moves.len(), 20);

    let pawn_moves = moves
        .iter()
        .filter(|m| board.piece_on(m.from()) == Some(Piece::Pawn))
        .count();
    let knight_moves = moves
        .iter()
        .filter(|m| board.piece_on(m.from()) == Some(Piece::Knight))
        .count();
    assert_eq!(pawn_moves, 16);
    assert_eq!(knight_moves, 4);
}

#[test]
fn test_queen_moves_with_blockers() {
    // Queen on e5, friendly pawn d4, enemy pawn d6
    let mut board = Board::from_fen("8/8/3p4/4Q3/3P4/8/8/8 w - - 0 1");
    let moves = board.generate_moves();
    let queen_moves: Vec<_> = moves
        .iter()
        .filter(|m| m.from() == Square::new(4, 4))
        .collect();

    assert!(queen_moves.len() >= 16);
    // The d6 pawn is capturable; the friendly d4 pawn blocks that diagonal
    assert!(queen_moves
        .iter()
        .any(|m| m.to() == Square::new(5, 3) && m.is_capture()));
    assert!(!queen_moves.iter().any(|m| m.to() == Square::new(3, 3)));
}

#[test]
fn test_both_castling_moves_available() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let moves = board.generate_moves();
    let castles: Vec<_> = moves.iter().filter(|m| m.is_castling()).collect();
    assert_eq!(castles.len(), 2);
    assert!(castles.iter().any(|m| m.to() == Square::new(0, 6)));
    assert!(castles.iter().any(|m| m.to() == Square::new(0, 2)));
}

#[test]
fn test_castling_blocked_by_attacks() {
    // Black rook d2 covers d1 (queenside path), black rook g8 covers g1
    // (kingside destination): both castles vanish
    let mut board = Board::from_fen("r3k1r1/8/8/8/8/8/3r4/R3K2R w KQ - 1 1");
    let moves = board.generate_moves();
    assert!(!moves.iter().any(|m| m.is_castling()));
}

#[test]
fn test_castling_requires_empty_path() {
    // Bishop on b1 blocks queenside castling only
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/RB2K2R w KQkq - 0 1");
    let moves = board.generate_moves();
    let castles: Vec<_> = moves.iter().filter(|m| m.is_castling()).collect();
    assert_eq!(castles.len(), 1);
    assert_eq!(castles[0].to(), Square::new(0, 6));
}

#[test]
fn test_en_passant_generated_and_clears_victim() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let moves = board.generate_moves();
    let ep_moves: Vec<_> = moves.iter().filter(|m| m.is_en_passant()).collect();
    assert_eq!(ep_moves.len(), 1);

    let ep = *ep_moves[0];
    assert_eq!(ep.from(), Square::new(4, 4)); // e5
    assert_eq!(ep.to(), Square::new(5, 5)); // f6

    board.make_move(ep);
    assert_eq!(board.piece_at(Square::new(4, 5)), None, "f5 must be empty");
}

#[test]
fn test_promotion_generates_four_variants() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/8 w - - 0 1");
    let moves = board.generate_moves();
    let promotions: Vec<_> = moves.iter().filter(|m| m.is_promotion()).collect();

    assert_eq!(promotions.len(), 4);
    for m in &promotions {
        assert_eq!(m.from(), Square::new(6, 0));
        assert_eq!(m.to(), Square::new(7, 0));
    }
    let mut pieces: Vec<Piece> = promotions.iter().filter_map(|m| m.promotion()).collect();
    pieces.sort_by_key(|p| p.value());
    assert_eq!(
        pieces,
        vec![Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
    );
}

#[test]
fn test_no_legal_move_leaves_king_in_check() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let moves = board.generate_moves();
    for m in &moves {
        board.make_move(*m);
        assert!(
            !board.is_in_check(Color::White),
            "move {m} leaves own king attacked"
        );
        board.undo_move();
    }
}

#[test]
fn test_back_rank_mate_has_no_moves() {
    let mut board = Board::from_fen("R6k/8/7K/8/8/8/8/8 b - - 0 1");
    assert!(board.is_in_check(Color::Black));
    assert!(board.generate_moves().is_empty());
    assert!(board.is_checkmate());
    assert!(!board.is_stalemate());
}

#[test]
fn test_two_kings_is_drawn_by_fiat() {
    let mut board = Board::from_fen("k7/8/1K6/8/8/8/8/8 b - - 0 1");
    assert!(!board.is_in_check(Color::Black));
    assert!(board.generate_moves().is_empty());
    assert!(board.is_stalemate());
    assert_eq!(board.evaluate(), 0);
}

#[test]
fn test_pinned_piece_cannot_move() {
    // The e-file knight is pinned against the king by the rook
    let mut board = Board::from_fen("4r3/8/8/8/8/4N3/8/4K3 w - - 0 1");
    let moves = board.generate_moves();
    assert!(!moves.iter().any(|m| m.from() == Square::new(2, 4)));
}

#[test]
fn test_tactical_moves_are_captures_promotions_only() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let tactical = board.generate_tactical_moves();
    assert!(!tactical.is_empty());
    for m in &tactical {
        assert!(m.is_tactical(), "{m} is not a capture or promotion");
    }
}

#[test]
fn test_is_square_attacked_pawn_geometry() {
    let board = Board::from_fen("8/8/8/8/4p3/8/2P5/8 w - - 0 1");
    // White pawn on c2 attacks b3 and d3
    assert!(board.is_square_attacked(Square::new(2, 1), Color::White));
    assert!(board.is_square_attacked(Square::new(2, 3), Color::White));
    assert!(!board.is_square_attacked(Square::new(2, 2), Color::White));
    // Black pawn on e4 attacks d3 and f3
    assert!(board.is_square_attacked(Square::new(2, 3), Color::Black));
    assert!(board.is_square_attacked(Square::new(2, 5), Color::Black));
}
