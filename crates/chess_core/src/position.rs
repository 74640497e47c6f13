//! Game position with the history needed for draw rules.

use std::fmt;
use std::fmt::Write as _;

use cozy_chess::{Board, Color, File, Move, Piece, Rank, Square};

use crate::error::PositionError;

/// Halfmoves without capture or pawn move before a draw can be claimed.
const FIFTY_MOVE_PLIES: u16 = 100;
/// Halfmoves without capture or pawn move before the game is drawn outright.
const SEVENTY_FIVE_MOVE_PLIES: u16 = 150;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FivefoldRepetition,
    SeventyFiveMoves,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// None for a draw
    pub winner: Option<Color>,
    pub termination: Termination,
}

impl GameOutcome {
    /// PGN-style result string ("1-0", "0-1", "1/2-1/2").
    pub fn result_str(&self) -> &'static str {
        match self.winner {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

/// A chess position plus the keys of every earlier position in the game.
///
/// `make_move` / `unmake_move` form a strict stack: every make must be
/// paired with exactly one unmake before the caller returns.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    /// Halfmove clock kept here because the board's own clock stops at 100.
    halfmove: u16,
    /// Hashes of the positions preceding the current one, oldest first.
    history: Vec<u64>,
    /// State saved by `make_move` so `unmake_move` can restore it.
    undo: Vec<(Board, u16)>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    /// Parses a FEN string. Halfmove and fullmove fields are required.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let fen = fen.trim();
        let invalid = |reason: String| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        // The board rejects clocks above 100, so parse the real value here.
        let halfmove = match fen.split_whitespace().nth(4) {
            Some(txt) => txt
                .parse::<u16>()
                .map_err(|e| invalid(format!("halfmove clock: {e}")))?,
            None => return Err(invalid("missing move counters".to_string())),
        };
        let capped = halfmove.min(FIFTY_MOVE_PLIES).to_string();
        let board_fen = fen
            .split_whitespace()
            .enumerate()
            .map(|(i, field)| if i == 4 { capped.as_str() } else { field })
            .collect::<Vec<_>>()
            .join(" ");

        let board = Board::from_fen(&board_fen, false).map_err(|e| invalid(format!("{e:?}")))?;
        Ok(Self {
            halfmove,
            ..Self::from_board(board)
        })
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            halfmove: board.halfmove_clock() as u16,
            board,
            history: Vec::new(),
            undo: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Halfmoves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Some((self.board.color_on(sq)?, self.board.piece_on(sq)?))
    }

    /// Iterates over every occupied square.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Color, Piece)> + '_ {
        self.board
            .occupied()
            .into_iter()
            .filter_map(move |sq| self.piece_at(sq).map(|(color, piece)| (sq, color, piece)))
    }

    /// Number of `piece`s of `color` on the board.
    pub fn count(&self, color: Color, piece: Piece) -> u32 {
        (self.board.colors(color) & self.board.pieces(piece)).len()
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Generate all legal moves, returning a freshly allocated vector.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.board.generate_moves(|moves| {
            out.extend(moves);
            false
        });
        out
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut found = false;
        self.board.generate_moves(|moves| {
            found = moves.into_iter().next().is_some();
            found
        });
        found
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.board.is_legal(mv)
    }

    /// True when `mv` removes an enemy piece, including en passant.
    pub fn is_capture(&self, mv: Move) -> bool {
        match self.board.color_on(mv.to) {
            // Castling is encoded as the king moving onto its own rook.
            Some(color) => color != self.board.side_to_move(),
            None => {
                self.board.piece_on(mv.from) == Some(Piece::Pawn) && mv.from.file() != mv.to.file()
            }
        }
    }

    /// Plays a legal move. Pair with [`Position::unmake_move`].
    pub fn make_move(&mut self, mv: Move) {
        debug_assert!(self.board.is_legal(mv), "make_move called with illegal move {mv}");
        let resets_clock = self.is_capture(mv) || self.board.piece_on(mv.from) == Some(Piece::Pawn);
        self.history.push(self.board.hash());
        self.undo.push((self.board.clone(), self.halfmove));
        self.board.play_unchecked(mv);
        self.halfmove = if resets_clock { 0 } else { self.halfmove + 1 };
    }

    /// Reverts the most recent [`Position::make_move`]. No-op at the root.
    pub fn unmake_move(&mut self) {
        if let Some((board, halfmove)) = self.undo.pop() {
            self.board = board;
            self.halfmove = halfmove;
            self.history.pop();
        }
    }

    // -------------------------------------------------------------------------
    // Game state
    // -------------------------------------------------------------------------

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_legal_moves()
    }

    /// Neither side can possibly deliver mate.
    ///
    /// True for bare kings, a single minor piece, or any number of bishops
    /// that all stand on squares of one color.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 {
            return true;
        }
        if !knights.is_empty() {
            return false;
        }
        let mut shades = bishops.into_iter().map(square_shade);
        match shades.next() {
            Some(first) => shades.all(|shade| shade == first),
            None => true,
        }
    }

    /// How many times the current position has occurred, counting itself.
    pub fn repetition_count(&self) -> usize {
        let key = self.board.hash();
        let window = self.halfmove as usize;
        1 + self
            .history
            .iter()
            .rev()
            .take(window)
            .filter(|&&h| h == key)
            .count()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove >= FIFTY_MOVE_PLIES
    }

    /// Draw either side may claim: threefold repetition or the fifty-move rule.
    pub fn can_claim_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.repetition_count() >= 3
    }

    /// Result of the game if it has ended without any claim being made.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.has_legal_moves() {
            return Some(if self.in_check() {
                GameOutcome {
                    winner: Some(!self.side_to_move()),
                    termination: Termination::Checkmate,
                }
            } else {
                draw(Termination::Stalemate)
            });
        }
        if self.is_insufficient_material() {
            return Some(draw(Termination::InsufficientMaterial));
        }
        if self.halfmove >= SEVENTY_FIVE_MOVE_PLIES {
            return Some(draw(Termination::SeventyFiveMoves));
        }
        if self.repetition_count() >= 5 {
            return Some(draw(Termination::FivefoldRepetition));
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    // -------------------------------------------------------------------------
    // Fingerprint
    // -------------------------------------------------------------------------

    /// Canonical FEN of the position.
    ///
    /// The en-passant square is only written when a legal en-passant capture
    /// exists, so transpositions that differ only in a dead en-passant right
    /// share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut fen = String::with_capacity(90);

        for (i, &rank) in Rank::ALL.iter().rev().enumerate() {
            if i > 0 {
                fen.push('/');
            }
            let mut empty = 0u8;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        fen.push(piece_char(color, piece));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let castling_start = fen.len();
        for (color, short, long) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
            let rights = self.board.castle_rights(color);
            if rights.short.is_some() {
                fen.push(short);
            }
            if rights.long.is_some() {
                fen.push(long);
            }
        }
        if fen.len() == castling_start {
            fen.push('-');
        }

        match self.capturable_en_passant() {
            Some(sq) => {
                let _ = write!(fen, " {sq}");
            }
            None => fen.push_str(" -"),
        }

        let _ = write!(
            fen,
            " {} {}",
            self.halfmove,
            self.board.fullmove_number()
        );
        fen
    }

    fn capturable_en_passant(&self) -> Option<Square> {
        let file = self.board.en_passant()?;
        let rank = match self.side_to_move() {
            Color::White => Rank::Sixth,
            Color::Black => Rank::Third,
        };
        let target = Square::new(file, rank);
        self.legal_moves()
            .into_iter()
            .any(|mv| mv.to == target && self.board.piece_on(mv.from) == Some(Piece::Pawn))
            .then_some(target)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

fn draw(termination: Termination) -> GameOutcome {
    GameOutcome {
        winner: None,
        termination,
    }
}

/// 0 for dark squares, 1 for light squares.
fn square_shade(sq: Square) -> usize {
    (sq.file() as usize + sq.rank() as usize) % 2
}

fn piece_char(color: Color, piece: Piece) -> char {
    let ch = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch,
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
