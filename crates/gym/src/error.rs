//! Errors raised while tuning or persisting models.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GymError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// An engine returned no move although the game was still running.
    #[error("{engine} produced no move in a live position: {fen}")]
    NoMove { engine: String, fen: String },
}

impl GymError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GymError::Io {
            path: path.into(),
            source,
        }
    }
}
