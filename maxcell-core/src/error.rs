//! Error types for maxcell-core.

use thiserror::Error;

/// Result type alias for maxcell operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for maxcell operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration, rejected before any data processing.
    #[error("configuration error: {0}")]
    Config(String),

    /// Too few usable nearest-neighbor spacings to estimate a cell bound.
    #[error("too few spots ({observed}) for nearest neighbour analysis; need more than {required}")]
    InsufficientData {
        /// Number of usable spacings observed.
        observed: usize,
        /// Minimum viable sample size the analysis requires.
        required: usize,
    },
}
