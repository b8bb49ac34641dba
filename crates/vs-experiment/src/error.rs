//! Error types for vs-experiment.

use thiserror::Error;
use vs_venue::VenueError;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("invalid experiment configuration: {0}")]
    Config(String),

    #[error("venue error: {0}")]
    Venue(#[from] VenueError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExperimentError {
    /// `true` for a rejected staffing configuration, which the sweep skips.
    pub fn is_invalid_capacity(&self) -> bool {
        matches!(self, ExperimentError::Venue(e) if e.is_invalid_capacity())
    }
}

/// Alias for `Result<T, ExperimentError>`.
pub type ExperimentResult<T> = Result<T, ExperimentError>;
