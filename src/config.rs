//! Settings of the concrete fields

use crate::error::{Error, Result};

/// How a concrete field compares and draws values.
///
/// With the `serde` feature (on by default), it can be deserialized, and
/// missing entries take their default value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    /// Two values closer than this are equal. Ignored by exact fields
    pub tolerance: f64,
    /// Random values are drawn at or above this bound
    pub lower_bound: f64,
    /// Random values are drawn at or below this bound
    pub upper_bound: f64,
    /// Seed of the random generator. Drawn from the OS when `None`
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            lower_bound: -10.0,
            upper_bound: 10.0,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fails with [`Error::InvalidConfig`] if the tolerance isn't positive or
    /// the bounds are not finite and ordered
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !self.lower_bound.is_finite() || !self.upper_bound.is_finite() {
            return Err(Error::InvalidConfig("bounds must be finite".to_owned()));
        }
        if self.lower_bound > self.upper_bound {
            return Err(Error::InvalidConfig(format!(
                "lower bound {} is greater than upper bound {}",
                self.lower_bound, self.upper_bound
            )));
        }
        Ok(())
    }
}
