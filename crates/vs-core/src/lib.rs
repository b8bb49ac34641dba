//! `vs-core` — foundational types for the venue staffing simulator.
//!
//! This crate is a dependency of every other `vs-*` crate.  It has no `vs-*`
//! dependencies and few external ones (`rand`, `tracing`,
//! `tracing-subscriber`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `ProcessId`, `StationId`, `CustomerId`                |
//! | [`time`]    | `SimTime`, `SimClock`                                 |
//! | [`rng`]     | `SimRng` (one stream per run)                         |
//! | [`logging`] | `init_logging`, `init_logging_with_level`             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `SimTime`.       |

pub mod ids;
pub mod logging;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{CustomerId, ProcessId, StationId};
pub use logging::{init_logging, init_logging_with_level};
pub use rng::SimRng;
pub use time::{SimClock, SimTime};
