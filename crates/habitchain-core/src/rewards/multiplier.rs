//! Sources for the per-completion reward multiplier.
//!
//! The store never draws randomness itself; it asks an injected
//! [`MultiplierSource`] so tests and replays can pin the values.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Half-open range `[min, max)` a multiplier is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierRange {
    min: f64,
    max: f64,
}

impl MultiplierRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min >= max {
            return Err(ValidationError::InvalidValue {
                field: "multiplier range".into(),
                message: format!("expected 0 < min < max, got [{min}, {max})"),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    /// Pull `value` into `[min, max)`. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() || value < self.min {
            self.min
        } else if value >= self.max {
            // largest f64 strictly below a positive `max`
            f64::from_bits(self.max.to_bits().saturating_sub(1))
        } else {
            value
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

impl Default for MultiplierRange {
    fn default() -> Self {
        Self { min: 1.0, max: 1.5 }
    }
}

/// Supplies the multiplier applied to a habit's base reward on completion.
pub trait MultiplierSource {
    fn next_multiplier(&mut self) -> f64;
}

impl<F: FnMut() -> f64> MultiplierSource for F {
    fn next_multiplier(&mut self) -> f64 {
        self()
    }
}

/// Uniform draw from the thread-local RNG.
#[derive(Debug, Clone, Default)]
pub struct ThreadRngMultiplier {
    range: MultiplierRange,
}

impl ThreadRngMultiplier {
    pub fn new(range: MultiplierRange) -> Self {
        Self { range }
    }
}

impl MultiplierSource for ThreadRngMultiplier {
    fn next_multiplier(&mut self) -> f64 {
        self.range.sample(&mut rand::thread_rng())
    }
}

/// Reproducible draws from a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct SeededMultiplier {
    rng: Pcg64,
    range: MultiplierRange,
}

impl SeededMultiplier {
    pub fn new(seed: u64, range: MultiplierRange) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            range,
        }
    }
}

impl MultiplierSource for SeededMultiplier {
    fn next_multiplier(&mut self) -> f64 {
        self.range.sample(&mut self.rng)
    }
}

/// Always returns the same value. The store still clamps it into its
/// configured range.
#[derive(Debug, Clone, Copy)]
pub struct FixedMultiplier(pub f64);

impl MultiplierSource for FixedMultiplier {
    fn next_multiplier(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of values. An empty list yields 1.0.
#[derive(Debug, Clone)]
pub struct SequenceMultiplier {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceMultiplier {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl MultiplierSource for SequenceMultiplier {
    fn next_multiplier(&mut self) -> f64 {
        if self.values.is_empty() {
            return 1.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
