//! Making and unmaking moves with incremental Zobrist updates.

use crate::zobrist::{hash_position, ZOBRIST};

use super::{castle_bit, colored_piece_index, Board, Color, Move, Piece, Square, UnmakeInfo};

impl Board {
    /// Apply a move to the board, pushing an undo record onto the history
    /// stack. The move must be legal (or at least pseudo-legal) in the
    /// current position.
    pub fn make_move(&mut self, m: Move) {
        let color = self.side_to_move();
        let them = color.opponent();

        let mut info = UnmakeInfo {
            captured_piece: None,
            prev_en_passant_target: self.en_passant_target,
            prev_castling_rights: self.castling_rights,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_hash: self.hash,
        };

        let mut hash = self.hash;
        hash ^= ZOBRIST.side_to_move_key;
        if let Some(old_ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant_keys[old_ep.file()];
        }

        // Remove the captured piece, if any
        if m.is_en_passant() {
            let victim_rank = if color == Color::White {
                m.to().rank() - 1
            } else {
                m.to().rank() + 1
            };
            let victim_sq = Square::new(victim_rank, m.to().file());
            info.captured_piece = Some((them, Piece::Pawn));
            self.remove_piece(victim_sq, them, Piece::Pawn);
            hash ^= ZOBRIST.piece_keys[victim_sq.index()][colored_piece_index(them, Piece::Pawn)];
        } else if !m.is_castling() {
            if let Some((cap_color, cap_piece)) = self.piece_at(m.to()) {
                info.captured_piece = Some((cap_color, cap_piece));
                self.remove_piece(m.to(), cap_color, cap_piece);
                hash ^= ZOBRIST.piece_keys[m.to().index()]
                    [colored_piece_index(cap_color, cap_piece)];
            }
        }

        let (_, moving_piece) = self.piece_at(m.from()).expect("make_move: 'from' empty");
        self.remove_piece(m.from(), color, moving_piece);
        hash ^= ZOBRIST.piece_keys[m.from().index()][colored_piece_index(color, moving_piece)];

        if m.is_castling() {
            self.set_piece(m.to(), color, Piece::King);
            hash ^= ZOBRIST.piece_keys[m.to().index()][colored_piece_index(color, Piece::King)];

            let rank = m.to().rank();
            let (rook_from_f, rook_to_f) = if m.to().file() == 6 { (7, 5) } else { (0, 3) };
            let rook_from = Square::new(rank, rook_from_f);
            let rook_to = Square::new(rank, rook_to_f);
            self.remove_piece(rook_from, color, Piece::Rook);
            self.set_piece(rook_to, color, Piece::Rook);
            hash ^= ZOBRIST.piece_keys[rook_from.index()][colored_piece_index(color, Piece::Rook)];
            hash ^= ZOBRIST.piece_keys[rook_to.index()][colored_piece_index(color, Piece::Rook)];
        } else {
            let placed = m.promotion().unwrap_or(moving_piece);
            self.set_piece(m.to(), color, placed);
            hash ^= ZOBRIST.piece_keys[m.to().index()][colored_piece_index(color, placed)];
        }

        // En passant square: set only on a double pawn push, to the square crossed
        self.en_passant_target = None;
        if m.is_double_pawn_push() {
            let ep_rank = (m.from().rank() + m.to().rank()) / 2;
            let ep_sq = Square::new(ep_rank, m.from().file());
            self.en_passant_target = Some(ep_sq);
            hash ^= ZOBRIST.en_passant_keys[ep_sq.file()];
        }

        if moving_piece == Piece::Pawn || m.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        // Castling rights: king moves clear both, rook moves and rook captures
        // on home squares clear the matching right
        let old_rights = self.castling_rights;
        if moving_piece == Piece::King {
            self.castling_rights &= !(castle_bit(color, 'K') | castle_bit(color, 'Q'));
        } else if moving_piece == Piece::Rook {
            let back = color.back_rank();
            if m.from() == Square::new(back, 0) {
                self.castling_rights &= !castle_bit(color, 'Q');
            } else if m.from() == Square::new(back, 7) {
                self.castling_rights &= !castle_bit(color, 'K');
            }
        }
        if let Some((cap_color, Piece::Rook)) = info.captured_piece {
            if !m.is_en_passant() {
                let back = cap_color.back_rank();
                if m.to() == Square::new(back, 0) {
                    self.castling_rights &= !castle_bit(cap_color, 'Q');
                } else if m.to() == Square::new(back, 7) {
                    self.castling_rights &= !castle_bit(cap_color, 'K');
                }
            }
        }
        hash ^= ZOBRIST.castling_keys[old_rights as usize]
            ^ ZOBRIST.castling_keys[self.castling_rights as usize];

        self.white_to_move = !self.white_to_move;
        if self.white_to_move {
            self.fullmove_number += 1;
        }
        self.hash = hash;

        debug_assert_eq!(self.hash, hash_position(self));
        self.history.push((m, info));
    }

    /// Reverse the most recent move. Exact inverse of `make_move`, including
    /// the hash. Does nothing on an empty history.
    pub fn undo_move(&mut self) {
        let Some((m, info)) = self.history.pop() else {
            return;
        };

        self.white_to_move = !self.white_to_move;
        self.en_passant_target = info.prev_en_passant_target;
        self.castling_rights = info.prev_castling_rights;
        self.halfmove_clock = info.prev_halfmove_clock;
        self.fullmove_number = info.prev_fullmove_number;
        self.hash = info.prev_hash;

        let color = self.side_to_move();

        if m.is_castling() {
            self.remove_piece(m.to(), color, Piece::King);
            self.set_piece(m.from(), color, Piece::King);

            let rank = m.to().rank();
            let (rook_home_f, rook_moved_f) = if m.to().file() == 6 { (7, 5) } else { (0, 3) };
            self.remove_piece(Square::new(rank, rook_moved_f), color, Piece::Rook);
            self.set_piece(Square::new(rank, rook_home_f), color, Piece::Rook);
            return;
        }

        let (_, piece_at_to) = self.piece_at(m.to()).expect("undo_move: 'to' empty");
        self.remove_piece(m.to(), color, piece_at_to);
        let piece_moved = if m.is_promotion() {
            Piece::Pawn
        } else {
            piece_at_to
        };
        self.set_piece(m.from(), color, piece_moved);

        if m.is_en_passant() {
            let victim_rank = if color == Color::White {
                m.to().rank() - 1
            } else {
                m.to().rank() + 1
            };
            if let Some((cap_color, cap_piece)) = info.captured_piece {
                self.set_piece(Square::new(victim_rank, m.to().file()), cap_color, cap_piece);
            }
        } else if let Some((cap_color, cap_piece)) = info.captured_piece {
            self.set_piece(m.to(), cap_color, cap_piece);
        }
    }
}
