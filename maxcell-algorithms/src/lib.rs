//! maxcell-algorithms: Nearest-neighbor spacing analysis for indexing.
//!
//! Estimates an a-priori upper bound on the largest plausible real-space
//! unit-cell dimension directly from observed spot positions:
//! - **partition** - disjoint spot groups per imageset, rotation window,
//!   and entering flag
//! - **spatial** - exact k-d tree nearest-neighbor queries in 3-D
//! - **histogram** - auto-sized mode extraction over direct-space spacings
//! - **stats** - robust order statistics
//! - **estimator** - aggregation, outlier rejection, and the public entry
//!   points
//!
#![warn(missing_docs)]

mod estimator;
mod histogram;
mod partition;
mod spatial;
mod stats;

pub use estimator::{analyze, estimate_max_cell, NeighborAnalysis};
pub use histogram::Histogram;
pub use partition::{partition, SpotGroup};
pub use spatial::{nearest_neighbor_distances_sq, KdTree3};
pub use stats::{mean_and_std, percentile_spacing};

// Re-export core types so callers need only one algorithms import.
pub use maxcell_core::{CellEstimate, Error, EstimatorConfig, Observation, Result};
