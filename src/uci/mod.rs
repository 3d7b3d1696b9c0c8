//! Universal Chess Interface (UCI) protocol implementation, plus the UCI+
//! extension carrying the King-of-the-Hill variant.

use std::fmt;

use crate::board::{Board, FenError, Move, MoveParseError};

pub mod command;
pub mod options;
pub mod print;

/// Error type for UCI position command parsing
#[derive(Debug, Clone)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Invalid move in the move list
    InvalidMove {
        move_str: String,
        error: MoveParseError,
    },
    /// Missing required parts in the command
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "Missing required parts in position command"),
        }
    }
}

impl std::error::Error for UciError {}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Parse a move in UCI format (e.g., "e2e4", "e7e8q").
///
/// Delegates to `Board::parse_move`. Returns `None` if the move is invalid.
#[must_use]
pub fn parse_uci_move(board: &mut Board, uci_string: &str) -> Option<Move> {
    board.parse_move(uci_string).ok()
}

/// Parse and apply a UCI position command.
///
/// Supports `position startpos` and `position fen <fields>`, optionally
/// followed by `moves <m1> <m2> ...`. A bad FEN leaves the board untouched;
/// a bad move stops consumption at that move, with everything before it
/// already applied. The board's active variant survives the reload.
pub fn try_parse_position_command(board: &mut Board, parts: &[&str]) -> Result<(), UciError> {
    let mut i = 1;

    if i >= parts.len() {
        return Err(UciError::MissingParts);
    }

    let mut new_board = if parts[i] == "startpos" {
        i += 1;
        Board::new()
    } else if parts[i] == "fen" {
        i += 1;
        let fen_start = i;
        while i < parts.len() && parts[i] != "moves" {
            i += 1;
        }
        let fen = parts[fen_start..i].join(" ");
        Board::try_from_fen(&fen)?
    } else {
        return Err(UciError::MissingParts);
    };

    new_board.set_variant(board.variant());
    *board = new_board;

    if i < parts.len() && parts[i] == "moves" {
        i += 1;
        while i < parts.len() {
            match board.parse_move(parts[i]) {
                Ok(mv) => board.make_move(mv),
                Err(error) => {
                    return Err(UciError::InvalidMove {
                        move_str: parts[i].to_string(),
                        error,
                    })
                }
            }
            i += 1;
        }
    }

    Ok(())
}

/// Parse a UCI position command, logging errors to stderr.
///
/// Convenience wrapper around `try_parse_position_command` for callers that
/// do not need the error value.
pub fn parse_position_command(board: &mut Board, parts: &[&str]) {
    if let Err(e) = try_parse_position_command(board, parts) {
        eprintln!("Error: {e}");
    }
}

#[must_use]
pub fn format_uci_move(mv: &Move) -> String {
    mv.to_string()
}
