//! Spot observation records supplied by the indexing pipeline.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single observed diffraction spot.
///
/// Positions are reciprocal-lattice-point coordinates in inverse length.
/// Observations are supplied fully materialized by the caller and are never
/// mutated by the analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Identity of the imageset this spot was observed on.
    pub imageset_id: usize,
    /// Rotation angle at observation, in degrees.
    pub phi: f64,
    /// Whether the reflection was entering the diffraction condition.
    /// Defaults to `true` when absent from source data.
    #[cfg_attr(feature = "serde", serde(default = "default_entering"))]
    pub entering: bool,
    /// Reciprocal-space position of the spot.
    pub rlp: [f64; 3],
}

#[cfg(feature = "serde")]
fn default_entering() -> bool {
    true
}

impl Observation {
    /// Creates a new observation.
    #[inline]
    pub fn new(imageset_id: usize, phi: f64, entering: bool, rlp: [f64; 3]) -> Self {
        Self {
            imageset_id,
            phi,
            entering,
            rlp,
        }
    }
}
