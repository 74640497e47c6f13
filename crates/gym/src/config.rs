//! Gym configuration, read from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GymError;

/// Tuning and play settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GymConfig {
    /// Where the tuned model is persisted
    pub model_path: PathBuf,
    /// Search depth for self-play during tuning
    pub tuning_depth: u8,
    /// Search depth for `bestmove` and `arena`
    pub play_depth: u8,
    /// Mutations add a value in `[-mutation_range, mutation_range]`
    pub mutation_range: i32,
    /// Mutant score (out of 2) at or above which the mutant is kept
    pub accept_score: f64,
    /// Mutant score at or below which the mutant is rejected
    pub reject_score: f64,
    pub rating_gain: i32,
    pub rating_loss: i32,
    /// Generations per `train` run
    pub generations: u32,
    /// Seed for reproducible tuning; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GymConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            tuning_depth: 1,
            play_depth: 3,
            mutation_range: 50,
            accept_score: 1.5,
            reject_score: 0.5,
            rating_gain: 5,
            rating_loss: 2,
            generations: 5,
            seed: None,
        }
    }
}

impl GymConfig {
    pub fn from_toml(text: &str) -> Result<Self, GymError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, GymError> {
        let text = fs::read_to_string(path).map_err(|e| GymError::io(path, e))?;
        Self::from_toml(&text)
    }
}
