//! Static evaluation.
//!
//! Scores are always from White's point of view: positive favors White.

use chess_core::{Color, Piece, Position};

use crate::pst::{self, Phase};
use crate::weights::WeightVector;

/// Magnitude of a checkmate score. Search adds remaining depth on top.
pub const MATE_SCORE: i32 = 99_999;

/// Evaluate a position under the given weights.
///
/// Checkmate yields `±MATE_SCORE`. Any drawn or draw-claimable position
/// yields the raw draw penalty, regardless of side to move.
pub fn evaluate(pos: &Position, weights: &WeightVector) -> i32 {
    if pos.is_checkmate() {
        return match pos.side_to_move() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        };
    }

    if is_drawn(pos) {
        return weights.draw_penalty();
    }

    material_and_position(pos, weights)
}

/// Forced draws plus threefold and fifty-move claims.
fn is_drawn(pos: &Position) -> bool {
    pos.is_stalemate()
        || pos.is_insufficient_material()
        || pos.repetition_count() >= 5
        || pos.halfmove_clock() >= 150
        || pos.can_claim_draw()
}

/// Sum of piece values and square bonuses, White minus Black.
pub fn material_and_position(pos: &Position, weights: &WeightVector) -> i32 {
    let phase = game_phase(pos);
    pos.pieces()
        .map(|(sq, color, piece)| {
            let v = weights.piece_value(piece) + pst::square_bonus(piece, color, sq, phase);
            match color {
                Color::White => v,
                Color::Black => -v,
            }
        })
        .sum()
}

/// Endgame once queens are off, or when each side keeps at most one queen
/// and at most four minor pieces remain in total.
pub fn game_phase(pos: &Position) -> Phase {
    let wq = pos.count(Color::White, Piece::Queen);
    let bq = pos.count(Color::Black, Piece::Queen);
    let minors: u32 = [Color::White, Color::Black]
        .into_iter()
        .map(|c| pos.count(c, Piece::Knight) + pos.count(c, Piece::Bishop))
        .sum();

    if (wq == 0 && bq == 0) || (wq <= 1 && bq <= 1 && minors <= 4) {
        Phase::Endgame
    } else {
        Phase::Midgame
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
