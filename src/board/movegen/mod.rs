//! Move generation: pseudo-legal per piece, then a legality filter.

mod kings;
mod knights;
mod pawns;
mod sliders;

use self::sliders::SliderType;
use super::{Board, Move, MoveList, Piece, Square};

impl Board {
    fn generate_pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let c_idx = self.side_to_move().index();

        for from in self.pieces[c_idx][Piece::Pawn.index()].iter() {
            self.generate_pawn_moves(from, &mut moves);
        }

        for from in self.pieces[c_idx][Piece::Knight.index()].iter() {
            self.generate_knight_moves(from, &mut moves);
        }

        for from in self.pieces[c_idx][Piece::Bishop.index()].iter() {
            self.generate_slider_moves(from, SliderType::Bishop, &mut moves);
        }

        for from in self.pieces[c_idx][Piece::Rook.index()].iter() {
            self.generate_slider_moves(from, SliderType::Rook, &mut moves);
        }

        for from in self.pieces[c_idx][Piece::Queen.index()].iter() {
            self.generate_slider_moves(from, SliderType::Queen, &mut moves);
        }

        for from in self.pieces[c_idx][Piece::King.index()].iter() {
            self.generate_king_moves(from, &mut moves);
        }
        moves
    }

    /// Create a move, determining the correct kind from context
    pub(crate) fn create_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        is_castling: bool,
        is_en_passant: bool,
        is_double_pawn_push: bool,
    ) -> Move {
        if is_en_passant {
            return Move::en_passant(from, to);
        }

        if is_castling {
            return if to.file() == 6 {
                Move::castle_kingside(from, to)
            } else {
                Move::castle_queenside(from, to)
            };
        }

        if is_double_pawn_push {
            return Move::double_pawn_push(from, to);
        }

        if let Some(promo_piece) = promotion {
            return if self.piece_at(to).is_some() {
                Move::new_promotion_capture(from, to, promo_piece)
            } else {
                Move::new_promotion(from, to, promo_piece)
            };
        }

        if self.piece_at(to).is_some() {
            Move::capture(from, to)
        } else {
            Move::quiet(from, to)
        }
    }

    /// Generate all legal moves for the side to move.
    ///
    /// With only the two kings on the board the list is empty: neither side
    /// can mate, and the game reads as drawn everywhere downstream.
    #[must_use]
    pub fn generate_moves(&mut self) -> MoveList {
        if self.only_kings_remain() {
            return MoveList::new();
        }

        let us = self.side_to_move();
        let them = us.opponent();
        let pseudo_moves = self.generate_pseudo_moves();
        let mut legal_moves = MoveList::new();

        for m in &pseudo_moves {
            if m.is_castling() {
                // The king may not castle out of, through, or into check
                let from = m.from();
                let to = m.to();
                let mid = Square::new(from.rank(), (from.file() + to.file()) / 2);

                if self.is_square_attacked(from, them)
                    || self.is_square_attacked(mid, them)
                    || self.is_square_attacked(to, them)
                {
                    continue;
                }
            }

            self.make_move(*m);
            if !self.is_in_check(us) {
                legal_moves.push(*m);
            }
            self.undo_move();
        }
        legal_moves
    }

    #[must_use]
    pub fn is_checkmate(&mut self) -> bool {
        let color = self.side_to_move();
        self.is_in_check(color) && self.generate_moves().is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&mut self) -> bool {
        let color = self.side_to_move();
        !self.is_in_check(color) && self.generate_moves().is_empty()
    }

    /// Legal captures, en passants, and promotions only, for quiescence.
    pub(crate) fn generate_tactical_moves(&mut self) -> MoveList {
        if self.only_kings_remain() {
            return MoveList::new();
        }

        let us = self.side_to_move();
        let pseudo_moves = self.generate_pseudo_moves();
        let mut tactical = MoveList::new();

        for m in &pseudo_moves {
            if !m.is_tactical() {
                continue;
            }
            self.make_move(*m);
            if !self.is_in_check(us) {
                tactical.push(*m);
            }
            self.undo_move();
        }

        tactical
    }

    /// Count leaves of the full-width legal move tree to the given depth.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for m in &moves {
            self.make_move(*m);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }

        nodes
    }
}
