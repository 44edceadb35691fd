//! maxcell-core: Core types for max-cell estimation from diffraction spots.
//!
//! This crate provides the foundational types shared by the estimator:
//! spot observations, estimator configuration, and output records.
//!

pub mod config;
pub mod error;
pub mod estimate;
pub mod observation;

pub use config::EstimatorConfig;
pub use error::{Error, Result};
pub use estimate::CellEstimate;
pub use observation::Observation;
