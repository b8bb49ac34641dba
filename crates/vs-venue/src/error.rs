use thiserror::Error;
use vs_engine::EngineError;

use crate::Station;

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("{station} capacity {capacity} is invalid; every station needs at least one staff member")]
    InvalidCapacity { station: Station, capacity: u32 },

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

impl VenueError {
    /// `true` if the error is about the configuration rather than a defect
    /// in the simulation itself.
    pub fn is_invalid_capacity(&self) -> bool {
        match self {
            VenueError::InvalidCapacity { .. } => true,
            VenueError::Engine(e) => e.is_invalid_capacity(),
        }
    }
}

pub type VenueResult<T> = Result<T, VenueError>;
