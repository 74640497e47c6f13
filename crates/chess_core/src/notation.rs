//! UCI move notation.
//!
//! `cozy-chess` encodes castling as the king capturing its own rook
//! (`e1h1`); the text form used everywhere else is standard UCI (`e1g1`).

use cozy_chess::{File, Move, Piece, Square};

use crate::error::NotationError;
use crate::position::Position;

/// Formats a legal move of `pos` in UCI notation.
pub fn move_to_uci(pos: &Position, mv: Move) -> String {
    let board = pos.board();
    let mut shown = mv;
    if board.piece_on(mv.from) == Some(Piece::King) && board.color_on(mv.to) == board.color_on(mv.from)
    {
        let file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
            File::G
        } else {
            File::C
        };
        shown.to = Square::new(file, mv.from.rank());
    }
    shown.to_string()
}

/// Parses UCI text into a move that is legal in `pos`.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move, NotationError> {
    let txt = txt.trim();
    let mut mv: Move = txt
        .parse()
        .map_err(|_| NotationError::Malformed(txt.to_string()))?;

    // King two files sideways onto an empty or enemy square: castling.
    let board = pos.board();
    if board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) != Some(board.side_to_move())
        && mv.from.rank() == mv.to.rank()
        && (mv.from.file() as i8 - mv.to.file() as i8).abs() == 2
    {
        let rights = board.castle_rights(board.side_to_move());
        let rook_file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
            rights.short
        } else {
            rights.long
        };
        if let Some(file) = rook_file {
            mv.to = Square::new(file, mv.from.rank());
        }
    }

    if !pos.is_legal(mv) {
        return Err(NotationError::Illegal(txt.to_string()));
    }
    Ok(mv)
}

impl Position {
    /// Parses and plays a UCI move. On error the position is unchanged.
    pub fn play_uci(&mut self, txt: &str) -> Result<Move, NotationError> {
        let mv = parse_uci_move(self, txt)?;
        self.make_move(mv);
        Ok(mv)
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
