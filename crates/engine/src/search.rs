//! Minimax search with alpha-beta pruning
//!
//! White maximizes and Black minimizes; scores are never negated between
//! plies. Results are memoized in a [`TranspositionCache`] keyed by the
//! position fingerprint.

use chess_core::{Color, Move, Position};

use crate::cache::{Bound, TranspositionCache};
use crate::eval::{evaluate, MATE_SCORE};
use crate::weights::WeightVector;

/// Window bound wider than any reachable score.
pub const INFINITY: i32 = 1_000_000;

/// Searches the position and returns the best move with its score.
///
/// # Arguments
/// * `pos` - The position to search
/// * `depth` - Search depth in plies; the root always expands at least one
/// * `weights` - Evaluation weights
/// * `cache` - Transposition cache, rebound to `weights` before use
/// * `nodes` - Counter for nodes searched (for statistics)
///
/// # Returns
/// `None` when the side to move has no legal moves. Ties keep the first
/// move in search order.
pub fn pick_best_move(
    pos: &Position,
    depth: u8,
    weights: &WeightVector,
    cache: &mut TranspositionCache,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    cache.bind(weights);

    let mut tmp = pos.clone();
    let mut moves = tmp.legal_moves();
    order_moves(&tmp, &mut moves);

    let maximizing = tmp.side_to_move() == Color::White;
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        tmp.make_move(mv);
        *nodes += 1;
        let score = minimax(
            &mut tmp,
            depth.saturating_sub(1),
            alpha,
            beta,
            weights,
            cache,
            nodes,
        );
        tmp.unmake_move();

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((mv, score));
        }

        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }

    best
}

/// Recursive minimax with alpha-beta pruning.
///
/// Returns the White-relative value of `pos` searched `depth` plies deep.
pub fn minimax(
    pos: &mut Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    weights: &WeightVector,
    cache: &mut TranspositionCache,
    nodes: &mut u64,
) -> i32 {
    let key = pos.fingerprint();
    if let Some(score) = cache.probe(&key, depth, alpha, beta) {
        return score;
    }

    let maximizing = pos.side_to_move() == Color::White;
    let mut moves = pos.legal_moves();

    if moves.is_empty() && pos.in_check() {
        return mated_score(maximizing, depth);
    }

    if depth == 0 || pos.is_game_over() {
        let score = evaluate(pos, weights);
        cache.store(key, depth, score, Bound::Exact);
        return score;
    }

    order_moves(pos, &mut moves);

    let (alpha_orig, beta_orig) = (alpha, beta);
    let mut best = if maximizing { -INFINITY } else { INFINITY };

    for mv in moves {
        pos.make_move(mv);
        *nodes += 1;
        let score = minimax(pos, depth - 1, alpha, beta, weights, cache, nodes);
        pos.unmake_move();

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break; // cutoff
        }
    }

    let bound = if best <= alpha_orig {
        Bound::Upper
    } else if best >= beta_orig {
        Bound::Lower
    } else {
        Bound::Exact
    };
    cache.store(key, depth, best, bound);
    best
}

/// Score for the side to move being checkmated with `depth` plies left.
/// Mates found closer to the root carry a larger magnitude.
#[inline]
pub fn mated_score(maximizing: bool, depth: u8) -> i32 {
    let magnitude = MATE_SCORE + depth as i32;
    if maximizing {
        -magnitude
    } else {
        magnitude
    }
}

/// Captures first, otherwise generation order.
fn order_moves(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| !pos.is_capture(mv));
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
