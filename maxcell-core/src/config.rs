//! Estimator configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the nearest-neighbor max-cell estimator.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EstimatorConfig {
    /// Rotation-window width for grouping, in degrees.
    pub step_size: f64,
    /// Multiplicative safety margin applied to the histogram mode when
    /// computing the max-cell bound.
    pub tolerance: f64,
    /// Minimum relative bin height (vs. the peak) for a bin to be eligible
    /// as the max-cell candidate.
    pub max_height_fraction: f64,
    /// Tail fraction for the robust order-statistic output, in `[0, 1)`.
    pub percentile: f64,
    /// Target average sample count per histogram bin.
    pub samples_per_bin: usize,
    /// Fraction of the longest spacings discarded before histogramming.
    pub outlier_fraction: f64,
    /// Minimum viable spacing sample size.
    pub min_sample_size: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            step_size: 45.0,
            tolerance: 1.5,
            max_height_fraction: 0.25,
            percentile: 0.05,
            samples_per_bin: 5,
            outlier_fraction: 0.01,
            min_sample_size: 10,
        }
    }
}

impl EstimatorConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rotation-window width in degrees.
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Sets the max-cell safety margin.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the minimum relative bin height for candidate bins.
    pub fn with_max_height_fraction(mut self, fraction: f64) -> Self {
        self.max_height_fraction = fraction;
        self
    }

    /// Sets the order-statistic tail fraction.
    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = percentile;
        self
    }

    /// Sets the target average sample count per histogram bin.
    pub fn with_samples_per_bin(mut self, samples: usize) -> Self {
        self.samples_per_bin = samples;
        self
    }

    /// Sets the fraction of longest spacings discarded as outliers.
    pub fn with_outlier_fraction(mut self, fraction: f64) -> Self {
        self.outlier_fraction = fraction;
        self
    }

    /// Sets the minimum viable spacing sample size.
    pub fn with_min_sample_size(mut self, size: usize) -> Self {
        self.min_sample_size = size;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any field is outside its valid range.
    pub fn validate(&self) -> Result<()> {
        if !(self.step_size > 0.0) {
            return Err(Error::Config(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        if !(self.tolerance > 0.0) {
            return Err(Error::Config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(0.0..1.0).contains(&self.percentile) {
            return Err(Error::Config(format!(
                "percentile must lie in [0, 1), got {}",
                self.percentile
            )));
        }
        if !(self.max_height_fraction > 0.0 && self.max_height_fraction <= 1.0) {
            return Err(Error::Config(format!(
                "max_height_fraction must lie in (0, 1], got {}",
                self.max_height_fraction
            )));
        }
        if self.samples_per_bin == 0 {
            return Err(Error::Config(
                "samples_per_bin must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.outlier_fraction) {
            return Err(Error::Config(format!(
                "outlier_fraction must lie in [0, 1), got {}",
                self.outlier_fraction
            )));
        }
        if self.min_sample_size == 0 {
            return Err(Error::Config(
                "min_sample_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
