//! Board state: piece bitboards, mailbox, game state fields, history stack.

use crate::variant::Variant;
use crate::zobrist;

use super::{
    bit_for_square, Bitboard, CastlingRights, Color, Move, Piece, Square, ALL_CASTLING_RIGHTS,
};

/// Undo record captured by `make_move` before any mutation and consumed by
/// `undo_move`. Lives on the board's history stack next to the move it
/// belongs to; it is not part of the move's identity.
#[derive(Clone, Copy, Debug)]
pub struct UnmakeInfo {
    pub(crate) captured_piece: Option<(Color, Piece)>,
    pub(crate) prev_en_passant_target: Option<Square>,
    pub(crate) prev_castling_rights: u8,
    pub(crate) prev_halfmove_clock: u32,
    pub(crate) prev_fullmove_number: u32,
    pub(crate) prev_hash: u64,
}

/// The authoritative game state.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    /// Redundant mailbox kept in sync with the piece bitboards for O(1)
    /// "what's on this square".
    pub(crate) mailbox: [Option<(Color, Piece)>; 64],
    pub(crate) white_to_move: bool,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) castling_rights: u8,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    pub(crate) history: Vec<(Move, UnmakeInfo)>,
    variant: Variant,
}

impl Board {
    /// Create a board in the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square::new(0, file), Color::White, *piece);
            board.set_piece(Square::new(7, file), Color::Black, *piece);
            board.set_piece(Square::new(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square::new(6, file), Color::Black, Piece::Pawn);
        }

        board.castling_rights = ALL_CASTLING_RIGHTS;
        board.white_to_move = true;
        board.fullmove_number = 1;
        board.hash = zobrist::hash_position(&board);
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard(0); 6]; 2],
            occupied: [Bitboard(0); 2],
            all_occupied: Bitboard(0),
            mailbox: [None; 64],
            white_to_move: true,
            en_passant_target: None,
            castling_rights: 0,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            history: Vec::new(),
            variant: Variant::Standard,
        }
    }

    /// Zobrist hash of the current position.
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// The color whose turn it is.
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        CastlingRights::from_u8(self.castling_rights)
    }

    pub(crate) fn castling_rights_mask(&self) -> u8 {
        self.castling_rights
    }

    /// Number of moves on the history stack.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// The active rule variant. Standard unless set otherwise.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
    }

    /// Piece and color on a square, if any. O(1) via the mailbox.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq.index()]
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        self.all_occupied.0 & bit_for_square(sq).0 == 0
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq).0;
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()].0 |= bit;
        self.occupied[c_idx].0 |= bit;
        self.all_occupied.0 |= bit;
        self.mailbox[sq.index()] = Some((color, piece));
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq).0;
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()].0 &= !bit;
        self.occupied[c_idx].0 &= !bit;
        self.all_occupied.0 &= !bit;
        self.mailbox[sq.index()] = None;
    }

    /// True if only the two kings remain on the board.
    #[must_use]
    pub fn only_kings_remain(&self) -> bool {
        let kings = self.pieces[0][Piece::King.index()].0 | self.pieces[1][Piece::King.index()].0;
        self.all_occupied.0 == kings
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
