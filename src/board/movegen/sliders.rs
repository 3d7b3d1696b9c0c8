use super::super::attack_tables::{queen_attacks, slider_attacks};
use super::super::{Bitboard, Board, MoveList, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl Board {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        slider: SliderType,
        moves: &mut MoveList,
    ) {
        let color = self.side_to_move();
        let own_occ = self.occupied[color.index()].0;
        let from_idx = from.index();

        let targets = match slider {
            SliderType::Bishop => slider_attacks(from_idx, self.all_occupied.0, true),
            SliderType::Rook => slider_attacks(from_idx, self.all_occupied.0, false),
            SliderType::Queen => queen_attacks(from_idx, self.all_occupied.0),
        } & !own_occ;

        for to_sq in Bitboard(targets).iter() {
            moves.push(self.create_move(from, to_sq, None, false, false, false));
        }
    }
}
