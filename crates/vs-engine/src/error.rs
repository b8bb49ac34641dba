use thiserror::Error;
use vs_core::{ProcessId, StationId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("station {station} ({name}) has invalid capacity {capacity}; capacity must be positive")]
    InvalidCapacity {
        station:  StationId,
        name:     String,
        capacity: u32,
    },

    #[error("invalid delay {delay}; delays must be finite and non-negative")]
    InvalidDelay { delay: f64 },

    #[error("station {0} is not registered with the engine")]
    UnknownStation(StationId),

    #[error("process {0} is not live")]
    UnknownProcess(ProcessId),

    #[error("release on station {0} with no unit held")]
    ReleaseUnheld(StationId),

    #[error("process {process} resumed unexpectedly: {detail}")]
    UnexpectedWake {
        process: ProcessId,
        detail:  String,
    },

    #[error("event queue drained with {waiting} process(es) still waiting on a station")]
    Stalled { waiting: usize },
}

impl EngineError {
    /// `true` for configuration errors a sweep may skip over; every other
    /// variant is an internal defect.
    pub fn is_invalid_capacity(&self) -> bool {
        matches!(self, EngineError::InvalidCapacity { .. })
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
