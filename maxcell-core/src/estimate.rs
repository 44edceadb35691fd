//! Estimator output types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper-bound cell estimate produced by the nearest-neighbor analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellEstimate {
    /// Safety-margined upper bound on the largest real-space cell
    /// dimension, in direct-space length units.
    pub max_cell: f64,
    /// Robust order statistic of the direct-space spacing distribution.
    pub percentile_spacing: f64,
}
