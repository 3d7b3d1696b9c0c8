use super::super::{Board, MoveList, Square, PROMOTION_PIECES};

impl Board {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move();
        let dir = color.pawn_direction();
        let start_rank = color.pawn_start_rank();
        let promotion_rank = color.pawn_promotion_rank();

        let r = from.rank() as isize;
        let f = from.file() as isize;

        let forward_r = r + dir;
        if (0..8).contains(&forward_r) {
            let forward_sq = Square::new(forward_r as usize, f as usize);
            if self.is_empty_square(forward_sq) {
                if forward_sq.rank() == promotion_rank {
                    for promo in PROMOTION_PIECES {
                        moves.push(self.create_move(
                            from,
                            forward_sq,
                            Some(promo),
                            false,
                            false,
                            false,
                        ));
                    }
                } else {
                    moves.push(self.create_move(from, forward_sq, None, false, false, false));
                    if from.rank() == start_rank {
                        let double_sq = Square::new((r + 2 * dir) as usize, f as usize);
                        if self.is_empty_square(double_sq) {
                            moves.push(self.create_move(from, double_sq, None, false, false, true));
                        }
                    }
                }
            }
        }

        if (0..8).contains(&forward_r) {
            for df in [-1, 1] {
                let capture_f = f + df;
                if !(0..8).contains(&capture_f) {
                    continue;
                }
                let target_sq = Square::new(forward_r as usize, capture_f as usize);
                if let Some((target_color, _)) = self.piece_at(target_sq) {
                    if target_color != color {
                        if target_sq.rank() == promotion_rank {
                            for promo in PROMOTION_PIECES {
                                moves.push(self.create_move(
                                    from,
                                    target_sq,
                                    Some(promo),
                                    false,
                                    false,
                                    false,
                                ));
                            }
                        } else {
                            moves.push(self.create_move(from, target_sq, None, false, false, false));
                        }
                    }
                } else if Some(target_sq) == self.en_passant_target {
                    moves.push(self.create_move(from, target_sq, None, false, true, false));
                }
            }
        }
    }
}
