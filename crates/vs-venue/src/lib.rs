//! `vs-venue` — the movie-theatre style venue built on `vs-engine`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`station`]   | `Station` (cashier, server, usher) and their `StationId`s  |
//! | [`config`]    | `Configuration` — staff count per station                  |
//! | [`service`]   | `ServiceTimes` trait, `StandardServiceTimes`, `FixedServiceTimes` |
//! | [`customer`]  | `CustomerJourney` state machine, `Stage`, `WaitSample`     |
//! | [`arrivals`]  | `ArrivalPlan`, `ArrivalGenerator`                          |
//! | [`venue`]     | `Venue`, `Scenario` — one replication end to end           |
//! | [`error`]     | `VenueError`, `VenueResult<T>`                             |
//!
//! # Customer journey (summary)
//!
//! ```text
//! Arrived → AwaitingCashier → PurchasingTicket → AwaitingUsher → CheckingTicket
//!         → [AwaitingServer → BuyingFood] → Departed
//! ```
//!
//! The bracketed leg is taken by about half the customers.  The wait sample
//! is `departure − arrival`.

pub mod arrivals;
pub mod config;
pub mod customer;
pub mod error;
pub mod service;
pub mod station;
pub mod venue;

#[cfg(test)]
mod tests;

pub use arrivals::{ArrivalGenerator, ArrivalPlan};
pub use config::Configuration;
pub use customer::{CustomerJourney, Stage, WaitSample};
pub use error::{VenueError, VenueResult};
pub use service::{FixedServiceTimes, ServiceTimes, StandardServiceTimes};
pub use station::Station;
pub use venue::{Scenario, Venue};
