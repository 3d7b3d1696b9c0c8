//! Rule variants carried over the UCI+ extension.
//!
//! Variants are compose-in terminal predicates: move generation is standard,
//! and the variant only adds a post-move win check.

use crate::board::{Board, Color, Square};

/// The four central squares; a king reaching one of them wins
/// King-of-the-Hill immediately.
pub const HILL_SQUARES: [Square; 4] = [
    Square::new(3, 3), // d4
    Square::new(3, 4), // e4
    Square::new(4, 3), // d5
    Square::new(4, 4), // e5
];

/// Recognized rule variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Standard,
    KingOfTheHill,
}

impl Variant {
    /// All recognized variants, standard first.
    pub const ALL: [Variant; 2] = [Variant::Standard, Variant::KingOfTheHill];

    /// The name used on the wire (`variant <name>`, option combo values).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::KingOfTheHill => "king_of_the_hill",
        }
    }

    /// Look up a variant by wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Variant> {
        Variant::ALL.into_iter().find(|v| v.name() == name)
    }
}

impl Board {
    /// King-of-the-Hill winner, if either king stands on a hill square.
    ///
    /// At most one king can be on the hill: the four squares are mutually
    /// adjacent, and kings may never be.
    #[must_use]
    pub fn hill_winner(&self) -> Option<Color> {
        for color in Color::BOTH {
            if let Some(king_sq) = self.king_square(color) {
                if HILL_SQUARES.contains(&king_sq) {
                    return Some(color);
                }
            }
        }
        None
    }

    /// Variant-aware terminal winner after the last move, if any.
    #[must_use]
    pub fn variant_winner(&self) -> Option<Color> {
        match self.variant() {
            Variant::Standard => None,
            Variant::KingOfTheHill => self.hill_winner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names_round_trip() {
        for v in Variant::ALL {
            assert_eq!(Variant::from_name(v.name()), Some(v));
        }
        assert_eq!(Variant::from_name("atomic"), None);
    }

    #[test]
    fn test_hill_winner_detection() {
        let board = Board::try_from_fen("4k3/8/8/8/3K4/8/8/8 w - - 0 1").unwrap();
        assert_eq!(board.hill_winner(), Some(Color::White));

        let board = Board::try_from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(board.hill_winner(), Some(Color::Black));

        let board = Board::new();
        assert_eq!(board.hill_winner(), None);
    }

    #[test]
    fn test_variant_winner_requires_active_variant() {
        let mut board = Board::try_from_fen("4k3/8/8/8/3K4/8/8/8 w - - 0 1").unwrap();
        assert_eq!(board.variant_winner(), None);
        board.set_variant(Variant::KingOfTheHill);
        assert_eq!(board.variant_winner(), Some(Color::White));
    }

    #[test]
    fn test_hill_squares_are_the_center() {
        let names: Vec<String> = HILL_SQUARES.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["d4", "e4", "d5", "e5"]);
    }
}
