//! Errors surfaced by the position adapter.

use thiserror::Error;

/// A position could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Move text that cannot be applied to the current position.
///
/// Both variants leave the position untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("malformed move notation '{0}'")]
    Malformed(String),
    #[error("move '{0}' is not legal in this position")]
    Illegal(String),
}
