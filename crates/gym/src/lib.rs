//! Self-play gym for the tuned engine
//!
//! This crate provides infrastructure for:
//! - Hill-climbing the evaluation weights through color-swapped self-play
//! - Persisting the tuned model between runs
//! - Head-to-head matches between weight profiles
//!
//! # Usage
//!
//! ```bash
//! # Run five tuning generations against model.json
//! cargo run -p gym -- train --generations 5
//!
//! # Pit the tuned model against the rival profile
//! cargo run -p gym -- arena --games 4
//! ```

mod arena;
mod config;
mod error;
mod generation;
mod match_runner;
mod model;
mod mutation;
mod results;

pub use arena::*;
pub use config::*;
pub use error::*;
pub use generation::*;
pub use match_runner::*;
pub use model::*;
pub use mutation::*;
pub use results::*;
