//! Rules-engine adapter for the tuned search engine.
//!
//! Legal move generation and game-state detection come from `cozy-chess`;
//! this crate wraps a board with the game history needed for repetition
//! rules, produces canonical fingerprints, and converts moves to and from
//! UCI notation.

pub mod error;
pub mod notation;
pub mod position;

pub use cozy_chess::{Color, File, Move, Piece, Rank, Square};
pub use error::{NotationError, PositionError};
pub use notation::{move_to_uci, parse_uci_move};
pub use position::{GameOutcome, Position, Termination};

// =============================================================================
// Engine trait
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score, positive favors White
    pub score: i32,
    /// Search depth requested
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// The move was taken from the opening book without searching
    pub from_book: bool,
}

impl SearchResult {
    /// Result for a position with no legal continuation.
    pub fn game_over(depth: u8) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth,
            nodes: 0,
            from_book: false,
        }
    }
}

/// Trait that all move pickers must implement.
///
/// Matches and self-play only talk to engines through this trait, so
/// differently weighted engines can be paired freely.
pub trait Engine {
    /// Search the position to the given depth in plies.
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear caches, counters, etc.)
    fn new_game(&mut self) {}
}
