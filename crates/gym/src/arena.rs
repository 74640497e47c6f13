//! Head-to-head matches between two weight profiles.

use tracing::info;
use tuned_engine::{OpeningBook, TunedEngine, WeightVector};

use crate::error::GymError;
use crate::match_runner::{MatchConfig, MatchRunner};
use crate::results::MatchResult;

/// Play `challenger` against `opponent` and return the challenger's result.
/// Only the challenger consults the opening book.
pub fn run_arena(
    challenger: WeightVector,
    opponent: WeightVector,
    config: MatchConfig,
) -> Result<MatchResult, GymError> {
    let mut challenger = TunedEngine::named("challenger", challenger);
    let mut opponent = opponent_engine(opponent);

    let runner = MatchRunner::new(config);
    let result = runner.run_match(&mut challenger, &mut opponent)?;

    info!(
        wins = result.wins,
        losses = result.losses,
        draws = result.draws,
        score = %format!("{:.1}%", result.score() * 100.0),
        "arena finished"
    );
    Ok(result)
}

fn opponent_engine(weights: WeightVector) -> TunedEngine {
    TunedEngine::named("opponent", weights).with_book(OpeningBook::empty())
}
