//! Pairwise preference signal and its mapping onto the Saaty ratio scale.
//!
//! A signal is a bounded integer symmetric around zero: `0` means equal
//! importance, positive values favor the first entity of the pair and
//! negative values favor the second. A magnitude of `m` maps to the ratio
//! `m + 1`, so the slider range `[-8, 8]` covers the classic 1..9 scale.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Maps a raw signal onto a Saaty ratio.
///
/// Total over `f64`: non-integers are rounded to the nearest integer (ties
/// away from zero) and non-finite input is treated as equal preference.
pub fn saaty_ratio_for(signal: f64) -> f64 {
    if !signal.is_finite() {
        return 1.0;
    }

    let rounded = signal.round();
    if rounded == 0.0 {
        return 1.0;
    }

    let magnitude = rounded.abs() + 1.0;
    if rounded > 0.0 {
        magnitude
    } else {
        1.0 / magnitude
    }
}

/// Which side of a pair a signal favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredSide {
    First,
    Second,
    Neither,
}

/// Pairwise preference signal on the symmetric integer scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceSignal(i32);

impl PreferenceSignal {
    /// Lowest value offered to users (ratio 1/9).
    pub const MIN: i32 = -8;

    /// Highest value offered to users (ratio 9).
    pub const MAX: i32 = 8;

    /// Equal importance.
    pub const NEUTRAL: Self = Self(0);

    /// Creates a signal from any integer. The scale mapping is total, so
    /// out-of-range values are kept as given.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Creates a signal, returning error if outside `[MIN, MAX]`.
    pub fn try_new(value: i32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "preference signal",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                i64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Creates a signal clamped into `[MIN, MAX]`.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Creates a signal from a fractional slider position, rounding to nearest.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NEUTRAL;
        }
        // `as` saturates at the i32 bounds
        Self(value.round() as i32)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Returns the same preference expressed from the other side of the pair.
    pub fn inverse(&self) -> Self {
        Self(self.0.saturating_neg())
    }

    /// Returns true if this is equal importance.
    pub fn is_neutral(&self) -> bool {
        self.0 == 0
    }

    /// Returns the ratio `matrix[i][j]` for this signal on pair `(i, j)`.
    pub fn saaty_ratio(&self) -> f64 {
        saaty_ratio_for(f64::from(self.0))
    }

    /// Returns the ratio `matrix[j][i]`.
    pub fn reciprocal_ratio(&self) -> f64 {
        1.0 / self.saaty_ratio()
    }

    /// Returns the "Nx" intensity shown next to a comparison slider.
    pub fn intensity(&self) -> u32 {
        if self.0 == 0 {
            1
        } else {
            self.0.unsigned_abs().saturating_add(1)
        }
    }

    /// Returns which entity of the pair is preferred.
    pub fn favors(&self) -> PreferredSide {
        match self.0.signum() {
            1 => PreferredSide::First,
            -1 => PreferredSide::Second,
            _ => PreferredSide::Neither,
        }
    }
}

impl From<i32> for PreferenceSignal {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for PreferenceSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 > 0 { "+" } else { "" };
        write!(f, "{}{}", sign, self.0)
    }
}
