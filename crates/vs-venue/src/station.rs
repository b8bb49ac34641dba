//! The three service points of the venue.

use std::fmt;

use vs_core::StationId;

/// A named, capacity-bounded service point.
///
/// The discriminant doubles as the engine's pool index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Station {
    Cashier = 0,
    Server  = 1,
    Usher   = 2,
}

impl Station {
    /// Every station, in pool-index order.
    pub const ALL: [Station; 3] = [Station::Cashier, Station::Server, Station::Usher];

    #[inline]
    pub fn id(self) -> StationId {
        StationId(self as u16)
    }

    pub fn name(self) -> &'static str {
        match self {
            Station::Cashier => "cashier",
            Station::Server  => "server",
            Station::Usher   => "usher",
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
