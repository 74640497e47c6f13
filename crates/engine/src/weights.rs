//! Tunable evaluation weights.
//!
//! A weight vector holds one material value per piece kind plus the draw
//! penalty. On disk it is a name → integer map (`"PAWN": 100`, ...).

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use chess_core::Piece;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every tunable parameter of the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeightKey {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    DrawPenalty,
}

impl WeightKey {
    pub const ALL: [WeightKey; 7] = [
        WeightKey::Pawn,
        WeightKey::Knight,
        WeightKey::Bishop,
        WeightKey::Rook,
        WeightKey::Queen,
        WeightKey::King,
        WeightKey::DrawPenalty,
    ];

    /// Keys the tuner may perturb. The king only marks presence.
    pub const MUTABLE: [WeightKey; 6] = [
        WeightKey::Pawn,
        WeightKey::Knight,
        WeightKey::Bishop,
        WeightKey::Rook,
        WeightKey::Queen,
        WeightKey::DrawPenalty,
    ];

    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            WeightKey::Pawn => "PAWN",
            WeightKey::Knight => "KNIGHT",
            WeightKey::Bishop => "BISHOP",
            WeightKey::Rook => "ROOK",
            WeightKey::Queen => "QUEEN",
            WeightKey::King => "KING",
            WeightKey::DrawPenalty => "DRAW_PENALTY",
        }
    }

    pub fn for_piece(piece: Piece) -> Self {
        match piece {
            Piece::Pawn => WeightKey::Pawn,
            Piece::Knight => WeightKey::Knight,
            Piece::Bishop => WeightKey::Bishop,
            Piece::Rook => WeightKey::Rook,
            Piece::Queen => WeightKey::Queen,
            Piece::King => WeightKey::King,
        }
    }

    /// Only the draw penalty expresses a preference rather than a magnitude.
    pub fn allows_negative(self) -> bool {
        self == WeightKey::DrawPenalty
    }
}

impl fmt::Display for WeightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    #[error("unknown weight key '{0}'")]
    UnknownKey(String),
}

impl FromStr for WeightKey {
    type Err = WeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeightKey::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| WeightError::UnknownKey(s.to_string()))
    }
}

/// Integer weights indexed by [`WeightKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct WeightVector {
    values: [i32; 7],
}

impl WeightVector {
    /// Classic centipawn values with a neutral draw.
    pub const DEFAULT: WeightVector = WeightVector {
        values: [100, 320, 330, 500, 900, 20000, 0],
    };

    /// Aggressive profile: pieces slightly heavier, draws disliked.
    pub const RIVAL: WeightVector = WeightVector {
        values: [100, 325, 335, 510, 920, 20000, -50],
    };

    #[inline]
    pub fn get(&self, key: WeightKey) -> i32 {
        self.values[key.idx()]
    }

    pub fn set(&mut self, key: WeightKey, value: i32) {
        self.values[key.idx()] = value;
    }

    /// Copy of `self` with one weight replaced.
    pub fn with(mut self, key: WeightKey, value: i32) -> Self {
        self.set(key, value);
        self
    }

    #[inline]
    pub fn piece_value(&self, piece: Piece) -> i32 {
        self.get(WeightKey::for_piece(piece))
    }

    #[inline]
    pub fn draw_penalty(&self) -> i32 {
        self.get(WeightKey::DrawPenalty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeightKey, i32)> + '_ {
        WeightKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Index<WeightKey> for WeightVector {
    type Output = i32;

    fn index(&self, key: WeightKey) -> &i32 {
        &self.values[key.idx()]
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Missing keys keep their default value; unknown keys are rejected.
impl TryFrom<BTreeMap<String, i32>> for WeightVector {
    type Error = WeightError;

    fn try_from(map: BTreeMap<String, i32>) -> Result<Self, Self::Error> {
        let mut weights = WeightVector::DEFAULT;
        for (name, value) in map {
            weights.set(name.parse()?, value);
        }
        Ok(weights)
    }
}

impl From<WeightVector> for BTreeMap<String, i32> {
    fn from(weights: WeightVector) -> Self {
        weights
            .iter()
            .map(|(key, value)| (key.name().to_string(), value))
            .collect()
    }
}

#[cfg(test)]
#[path = "weights_tests.rs"]
mod weights_tests;
