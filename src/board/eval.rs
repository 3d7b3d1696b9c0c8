//! Static evaluation.
//!
//! Sums material, piece-square terms, pawn structure, king safety, mobility
//! and a few piece bonuses, all computed from White's perspective and negated
//! for Black at the end. Makes no moves and allocates nothing.

use super::attack_tables::{slider_attacks, KNIGHT_ATTACKS};
use super::{Bitboard, Board, Color, Piece, Square};

const DOUBLED_PAWN_PENALTY: i32 = 15;
const ISOLATED_PAWN_PENALTY: i32 = 25;
const PASSED_PAWN_BONUS: i32 = 30;
const BISHOP_PAIR_BONUS: i32 = 50;
const ROOK_ON_SEVENTH_BONUS: i32 = 30;
const ROOK_ON_OPEN_FILE_BONUS: i32 = 15;
const KING_PAWN_SHIELD_BONUS: i32 = 15;
const CASTLING_RIGHTS_BONUS: i32 = 30;
const MOBILITY_SCORE_MULTIPLIER: i32 = 3;
const CENTER_CONTROL_BONUS: i32 = 8;

/// Non-pawn, non-king material below this is treated as endgame
const ENDGAME_MATERIAL_THRESHOLD: i32 = 1800;

// Piece-square tables from White's perspective; the index for Black pieces
// is mirrored vertically.
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

const KING_MIDDLEGAME_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

const KING_ENDGAME_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

/// The four central squares.
const CENTER_SQUARES: [Square; 4] = [
    Square::new(3, 3), // d4
    Square::new(3, 4), // e4
    Square::new(4, 3), // d5
    Square::new(4, 4), // e5
];

impl Board {
    /// Evaluate the position in centipawns from the side-to-move's
    /// perspective.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        // Only the two kings left: dead draw
        if self.only_kings_remain() {
            return 0;
        }

        let mut score = 0;
        score += self.evaluate_material();
        score += self.evaluate_piece_squares();
        score += self.evaluate_pawn_structure();
        score += self.evaluate_king_safety();
        score += self.evaluate_mobility();
        score += self.evaluate_piece_bonuses();

        if self.side_to_move() == Color::White {
            score
        } else {
            -score
        }
    }

    fn material_for(&self, color: Color) -> i32 {
        let c = color.index();
        let mut material = 0;
        for piece in [
            Piece::Pawn,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
        ] {
            material += self.pieces[c][piece.index()].popcount() as i32 * piece.value();
        }
        material
    }

    fn evaluate_material(&self) -> i32 {
        self.material_for(Color::White) - self.material_for(Color::Black)
    }

    fn evaluate_piece_squares(&self) -> i32 {
        // Phase by remaining non-pawn, non-king material of both sides
        let mut total_material = 0;
        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            let count = self.pieces[0][piece.index()].popcount()
                + self.pieces[1][piece.index()].popcount();
            total_material += count as i32 * piece.value();
        }
        let is_endgame = total_material < ENDGAME_MATERIAL_THRESHOLD;

        let king_table = if is_endgame {
            &KING_ENDGAME_TABLE
        } else {
            &KING_MIDDLEGAME_TABLE
        };

        let mut white_score = 0;
        let mut black_score = 0;
        for (piece, table) in [
            (Piece::Pawn, &PAWN_TABLE),
            (Piece::Knight, &KNIGHT_TABLE),
            (Piece::Bishop, &BISHOP_TABLE),
            (Piece::Rook, &ROOK_TABLE),
            (Piece::Queen, &QUEEN_TABLE),
            (Piece::King, king_table),
        ] {
            for sq in self.pieces[0][piece.index()].iter() {
                white_score += table[sq.index()];
            }
            for sq in self.pieces[1][piece.index()].iter() {
                black_score += table[sq.flip_vertical().index()];
            }
        }

        white_score - black_score
    }

    fn pawn_structure_for(&self, color: Color) -> i32 {
        let us = color.index();
        let them = color.opponent().index();
        let own_pawns = self.pieces[us][Piece::Pawn.index()];
        let enemy_pawns = self.pieces[them][Piece::Pawn.index()];
        let mut score = 0;

        for sq in own_pawns.iter() {
            let file = sq.file();
            let rank = sq.rank();
            let file_bb = Bitboard::file_mask(file);

            if own_pawns.and(file_bb).popcount() > 1 {
                score -= DOUBLED_PAWN_PENALTY;
            }

            let mut has_neighbor = false;
            if file > 0 && own_pawns.intersects(Bitboard::file_mask(file - 1)) {
                has_neighbor = true;
            }
            if file < 7 && own_pawns.intersects(Bitboard::file_mask(file + 1)) {
                has_neighbor = true;
            }
            if !has_neighbor {
                score -= ISOLATED_PAWN_PENALTY;
            }

            // Passed: no enemy pawn on any square of the same file ahead
            let ahead = match color {
                Color::White => {
                    if rank < 7 {
                        file_bb.0 & (!0u64 << ((rank + 1) * 8))
                    } else {
                        0
                    }
                }
                Color::Black => {
                    if rank > 0 {
                        file_bb.0 & ((1u64 << (rank * 8)) - 1)
                    } else {
                        0
                    }
                }
            };
            if enemy_pawns.0 & ahead == 0 {
                let advance = match color {
                    Color::White => rank as i32,
                    Color::Black => 7 - rank as i32,
                };
                score += PASSED_PAWN_BONUS * advance;
            }
        }

        score
    }

    fn evaluate_pawn_structure(&self) -> i32 {
        self.pawn_structure_for(Color::White) - self.pawn_structure_for(Color::Black)
    }

    fn king_safety_for(&self, color: Color) -> i32 {
        let mut score = 0;

        if self.castling_rights().has_any(color) {
            score += CASTLING_RIGHTS_BONUS;
        }

        if let Some(king_sq) = self.king_square(color) {
            let back = color.back_rank();
            if king_sq.rank() == back {
                let shield_rank = match color {
                    Color::White => 1,
                    Color::Black => 6,
                };
                let kf = king_sq.file();
                for f in kf.saturating_sub(1)..=(kf + 1).min(7) {
                    if self.piece_at(Square::new(shield_rank, f))
                        == Some((color, Piece::Pawn))
                    {
                        score += KING_PAWN_SHIELD_BONUS;
                    }
                }
            }
        }

        score
    }

    fn evaluate_king_safety(&self) -> i32 {
        self.king_safety_for(Color::White) - self.king_safety_for(Color::Black)
    }

    /// Approximate mobility: pseudo-attacks not blocked by own pieces for
    /// knights, bishops and rooks.
    fn mobility_for(&self, color: Color) -> i32 {
        let c = color.index();
        let own_occ = self.occupied[c].0;
        let mut mobility = 0;

        for sq in self.pieces[c][Piece::Knight.index()].iter() {
            mobility += (KNIGHT_ATTACKS[sq.index()] & !own_occ).count_ones() as i32;
        }
        for sq in self.pieces[c][Piece::Bishop.index()].iter() {
            mobility +=
                (slider_attacks(sq.index(), self.all_occupied.0, true) & !own_occ).count_ones()
                    as i32;
        }
        for sq in self.pieces[c][Piece::Rook.index()].iter() {
            mobility +=
                (slider_attacks(sq.index(), self.all_occupied.0, false) & !own_occ).count_ones()
                    as i32;
        }

        mobility
    }

    fn evaluate_mobility(&self) -> i32 {
        let mut score = (self.mobility_for(Color::White) - self.mobility_for(Color::Black))
            * MOBILITY_SCORE_MULTIPLIER;

        for sq in CENTER_SQUARES {
            match self.color_on(sq) {
                Some(Color::White) => score += CENTER_CONTROL_BONUS,
                Some(Color::Black) => score -= CENTER_CONTROL_BONUS,
                None => {}
            }
        }

        score
    }

    fn piece_bonuses_for(&self, color: Color) -> i32 {
        let c = color.index();
        let mut score = 0;

        if self.pieces[c][Piece::Bishop.index()].popcount() >= 2 {
            score += BISHOP_PAIR_BONUS;
        }

        let seventh_rank = match color {
            Color::White => 6,
            Color::Black => 1,
        };
        let all_pawns = self.pieces[0][Piece::Pawn.index()].0 | self.pieces[1][Piece::Pawn.index()].0;
        for sq in self.pieces[c][Piece::Rook.index()].iter() {
            if sq.rank() == seventh_rank {
                score += ROOK_ON_SEVENTH_BONUS;
            }
            if all_pawns & Bitboard::file_mask(sq.file()).0 == 0 {
                score += ROOK_ON_OPEN_FILE_BONUS;
            }
        }

        score
    }

    fn evaluate_piece_bonuses(&self) -> i32 {
        self.piece_bonuses_for(Color::White) - self.piece_bonuses_for(Color::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_kings_is_draw_for_both_sides() {
        let board = Board::try_from_fen("k7/8/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(board.evaluate(), 0);
        let board = Board::try_from_fen("k7/8/1K6/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(board.evaluate(), 0);
    }

    #[test]
    fn test_startpos_is_symmetric() {
        let white = Board::new();
        let black =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1")
                .unwrap();
        assert_eq!(white.evaluate(), black.evaluate());
    }

    #[test]
    fn test_extra_queen_dominates() {
        let board = Board::try_from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        assert!(board.evaluate() > 800);
        let board = Board::try_from_fen("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1").unwrap();
        assert!(board.evaluate() < -800);
    }

    #[test]
    fn test_evaluation_negates_with_side_to_move() {
        let fen_w = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let fen_b = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 2 3";
        let w = Board::try_from_fen(fen_w).unwrap().evaluate();
        let b = Board::try_from_fen(fen_b).unwrap().evaluate();
        assert_eq!(w, -b);
    }

    #[test]
    fn test_bishop_pair_counts() {
        let pair = Board::try_from_fen("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1").unwrap();
        let single = Board::try_from_fen("4k3/8/8/8/8/8/8/4KB2 w - - 0 1").unwrap();
        // Pair position has an extra bishop of material plus the pair bonus
        let diff = pair.evaluate() - single.evaluate();
        assert!(diff > Piece::Bishop.value());
    }

    #[test]
    fn test_passed_pawn_scales_with_advance() {
        let far = Board::try_from_fen("4k3/8/P7/8/8/8/8/4K3 w - - 0 1").unwrap();
        let near = Board::try_from_fen("4k3/8/8/8/8/P7/8/4K3 w - - 0 1").unwrap();
        assert!(far.evaluate() > near.evaluate());
    }

    #[test]
    fn test_doubled_and_isolated_pawns_penalized() {
        // Both sides one pawn; White's a-pawns are doubled and isolated
        let doubled =
            Board::try_from_fen("4k3/4p3/8/8/8/P7/P7/4K3 w - - 0 1").unwrap();
        let healthy =
            Board::try_from_fen("4k3/4p3/8/8/8/8/PP6/4K3 w - - 0 1").unwrap();
        assert!(healthy.evaluate() > doubled.evaluate());
    }

    #[test]
    fn test_center_occupancy_bonus() {
        let center = Board::try_from_fen("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1").unwrap();
        let edge = Board::try_from_fen("4k3/8/8/8/P7/8/8/4K3 w - - 0 1").unwrap();
        assert!(center.evaluate() > edge.evaluate());
    }

    #[test]
    fn test_eval_makes_no_moves() {
        let mut board = Board::new();
        let before = board.to_fen();
        let _ = board.evaluate();
        assert_eq!(board.to_fen(), before);
        assert_eq!(board.move_count(), 0);
    }
}
