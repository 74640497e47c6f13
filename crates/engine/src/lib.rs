//! Tuned Chess Engine
//!
//! Minimax search with alpha-beta pruning over a piece-square evaluation
//! whose material values and draw penalty are tunable. Known openings are
//! answered from a small book before any search happens.

pub mod book;
pub mod cache;
pub mod eval;
pub mod pst;
pub mod search;
pub mod weights;

use chess_core::{parse_uci_move, Engine, Move, Position, SearchResult};
use tracing::{debug, trace, warn};

pub use book::OpeningBook;
pub use cache::{Bound, TranspositionCache};
pub use eval::{evaluate, game_phase, MATE_SCORE};
pub use pst::Phase;
pub use search::pick_best_move;
pub use weights::{WeightError, WeightKey, WeightVector};

/// Search engine bound to one weight vector.
///
/// The transposition cache survives between moves of the same game and is
/// dropped whenever the weights change or a new game starts.
#[derive(Debug)]
pub struct TunedEngine {
    name: String,
    weights: WeightVector,
    book: OpeningBook,
    cache: TranspositionCache,
    /// Node counter for statistics
    nodes: u64,
}

impl TunedEngine {
    pub fn new(weights: WeightVector) -> Self {
        Self::named("Tuned", weights)
    }

    pub fn named(name: impl Into<String>, weights: WeightVector) -> Self {
        let mut cache = TranspositionCache::new();
        cache.bind(&weights);
        Self {
            name: name.into(),
            weights,
            book: OpeningBook::standard(),
            cache,
            nodes: 0,
        }
    }

    /// Replace the opening book, e.g. with [`OpeningBook::empty`].
    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn set_weights(&mut self, weights: WeightVector) {
        self.weights = weights;
        self.cache.bind(&weights);
    }

    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    /// The book reply for `pos`, if there is one and it is legal here.
    fn book_move(&self, pos: &Position) -> Option<Move> {
        let txt = self.book.lookup(&pos.fingerprint())?;
        match parse_uci_move(pos, txt) {
            Ok(mv) => {
                debug!(engine = %self.name, book_move = txt, "opening book hit");
                Some(mv)
            }
            Err(err) => {
                warn!(engine = %self.name, %err, "ignoring unusable book entry");
                None
            }
        }
    }
}

impl Default for TunedEngine {
    fn default() -> Self {
        Self::new(WeightVector::default())
    }
}

impl Engine for TunedEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        self.nodes = 0;

        if let Some(mv) = self.book_move(pos) {
            return SearchResult {
                best_move: Some(mv),
                score: evaluate(pos, &self.weights),
                depth,
                nodes: 0,
                from_book: true,
            };
        }

        let result = pick_best_move(pos, depth, &self.weights, &mut self.cache, &mut self.nodes);
        trace!(
            engine = %self.name,
            depth,
            nodes = self.nodes,
            cached = self.cache.len(),
            cache_hits = self.cache.hits(),
            "search finished"
        );

        match result {
            Some((mv, score)) => SearchResult {
                best_move: Some(mv),
                score,
                depth,
                nodes: self.nodes,
                from_book: false,
            },
            None => SearchResult::game_over(depth),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) {
        self.nodes = 0;
        self.cache.clear();
    }
}

/// One-shot search with a fresh cache and the standard book.
///
/// Returns `None` when the side to move has no legal moves.
pub fn search(pos: &Position, depth: u8, weights: &WeightVector) -> Option<Move> {
    TunedEngine::new(*weights).search(pos, depth).best_move
}
