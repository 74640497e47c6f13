//! The persisted tuned model and its JSON store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};
use tuned_engine::WeightVector;

use crate::error::GymError;

/// Rating assigned to a fresh model
pub const DEFAULT_RATING: i32 = 1000;

/// Weights plus the bookkeeping the tuner carries between generations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub weights: WeightVector,
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub generation: u32,
}

fn default_rating() -> i32 {
    DEFAULT_RATING
}

impl Default for Model {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            rating: DEFAULT_RATING,
            generation: 0,
        }
    }
}

/// JSON file holding a single [`Model`].
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Model, GymError> {
        let text = fs::read_to_string(&self.path).map_err(|e| GymError::io(&self.path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load the model, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(&self) -> Model {
        match self.load() {
            Ok(model) => {
                info!(
                    path = %self.path.display(),
                    rating = model.rating,
                    generation = model.generation,
                    "loaded model"
                );
                model
            }
            Err(GymError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "model not found, using defaults");
                Model::default()
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not load model, using defaults");
                Model::default()
            }
        }
    }

    /// Write the model as pretty JSON. The file is replaced atomically, so a
    /// crash mid-write leaves the previous model intact.
    pub fn save(&self, model: &Model) -> Result<(), GymError> {
        let json = serde_json::to_string_pretty(model)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| GymError::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| GymError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| GymError::io(&self.path, e.error))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod model_tests;
