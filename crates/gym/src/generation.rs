//! One tuning generation: mutate, play the mutant against the baseline,
//! keep or discard the mutation.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tuned_engine::TunedEngine;

use crate::config::GymConfig;
use crate::error::GymError;
use crate::match_runner::{MatchConfig, MatchRunner};
use crate::model::{Model, ModelStore};
use crate::mutation::{mutate, Mutation};

/// What happened to the mutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Mutant replaces the baseline
    Accepted,
    /// Mutant discarded and the rating penalised
    Rejected,
    /// Mutant discarded, rating unchanged
    Inconclusive,
}

impl Verdict {
    /// Classify a mutant score out of 2.
    pub fn from_score(score: f64, config: &GymConfig) -> Self {
        if score >= config.accept_score {
            Verdict::Accepted
        } else if score <= config.reject_score {
            Verdict::Rejected
        } else {
            Verdict::Inconclusive
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Accepted => "accepted",
            Verdict::Rejected => "rejected",
            Verdict::Inconclusive => "inconclusive",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Generation number after this step
    pub generation: u32,
    pub mutation: Mutation,
    /// Mutant points over both games
    pub mutant_score: f64,
    pub verdict: Verdict,
    pub rating: i32,
}

/// Run one generation and return the next model.
///
/// The mutant plays Black against the baseline, then White. Each side
/// searches with its own engine at `config.tuning_depth`.
pub fn run_generation<R: Rng>(
    model: &Model,
    config: &GymConfig,
    rng: &mut R,
) -> Result<(Model, GenerationReport), GymError> {
    let (mutant_weights, mutation) = mutate(&model.weights, config.mutation_range, rng);

    let mut baseline = TunedEngine::named("baseline", model.weights);
    let mut mutant = TunedEngine::named("mutant", mutant_weights);
    let runner = MatchRunner::new(MatchConfig {
        num_games: 2,
        depth: config.tuning_depth,
        max_plies: None,
        alternate_colors: true,
    });

    let first = runner.play_game(&mut baseline, &mut mutant)?;
    let second = runner.play_game(&mut mutant, &mut baseline)?;
    let mutant_score = first.result.flip().points() + second.result.points();

    let verdict = Verdict::from_score(mutant_score, config);
    let mut next = model.clone();
    match verdict {
        Verdict::Accepted => {
            next.weights = mutant_weights;
            next.rating += config.rating_gain;
        }
        Verdict::Rejected => next.rating -= config.rating_loss,
        Verdict::Inconclusive => {}
    }
    next.generation += 1;

    info!(
        generation = next.generation,
        key = %mutation.key,
        from = mutation.before,
        to = mutation.after,
        mutant_score,
        %verdict,
        rating = next.rating,
        "generation complete"
    );

    let report = GenerationReport {
        generation: next.generation,
        mutation,
        mutant_score,
        verdict,
        rating: next.rating,
    };
    Ok((next, report))
}

/// Runs generations back to back, persisting the model after each one.
pub struct Trainer {
    store: ModelStore,
    config: GymConfig,
    model: Model,
    rng: StdRng,
}

impl Trainer {
    /// Start from whatever the store holds, or defaults.
    pub fn new(store: ModelStore, config: GymConfig) -> Self {
        let model = store.load_or_default();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            config,
            model,
            rng,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Run one generation and save its result. On error the stored model
    /// is left as it was.
    pub fn step(&mut self) -> Result<GenerationReport, GymError> {
        let (next, report) = run_generation(&self.model, &self.config, &mut self.rng)?;
        self.store.save(&next)?;
        self.model = next;
        Ok(report)
    }

    pub fn run(&mut self, generations: u32) -> Result<Vec<GenerationReport>, GymError> {
        (0..generations).map(|_| self.step()).collect()
    }
}

#[cfg(test)]
#[path = "generation_tests.rs"]
mod generation_tests;
