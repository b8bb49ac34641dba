//! Staffing configuration.

use std::fmt;

use crate::{Station, VenueError, VenueResult};

/// How many staff work each station.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    pub cashiers: u32,
    pub servers:  u32,
    pub ushers:   u32,
}

impl Configuration {
    pub fn new(cashiers: u32, servers: u32, ushers: u32) -> Self {
        Self { cashiers, servers, ushers }
    }

    /// Total staff across all stations.
    #[inline]
    pub fn total(&self) -> u32 {
        self.cashiers + self.servers + self.ushers
    }

    pub fn capacity(&self, station: Station) -> u32 {
        match station {
            Station::Cashier => self.cashiers,
            Station::Server  => self.servers,
            Station::Usher   => self.ushers,
        }
    }

    /// Reject any station without staff.
    pub fn validate(&self) -> VenueResult<()> {
        for station in Station::ALL {
            let capacity = self.capacity(station);
            if capacity == 0 {
                return Err(VenueError::InvalidCapacity { station, capacity });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cashiers={} servers={} ushers={} (total {})",
            self.cashiers,
            self.servers,
            self.ushers,
            self.total()
        )
    }
}
