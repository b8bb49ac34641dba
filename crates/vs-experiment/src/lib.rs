//! `vs-experiment` — the staffing sweep.
//!
//! Runs every admissible staffing configuration for a number of
//! replications, pools the wait samples into a mean per configuration, and
//! picks the configuration with the lowest mean for every staffing total.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`config`]    | `ExperimentConfig`, `Seeding` (serde, JSON-loadable)      |
//! | [`enumerate`] | `staffing_configurations`                                 |
//! | [`aggregate`] | `AggregateResult`, `mean`, `best_by_total`                |
//! | [`driver`]    | `Experiment`, `SweepReport`, `evaluate`, `evaluate_derived` |
//! | [`csv`]       | `ResultsWriter` — one CSV row per configuration           |
//! | [`error`]     | `ExperimentError`, `ExperimentResult<T>`                  |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Evaluates configurations on Rayon's pool (derived seeding). |

pub mod aggregate;
pub mod config;
pub mod csv;
pub mod driver;
pub mod enumerate;
pub mod error;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use aggregate::{AggregateResult, best_by_total, mean};
pub use config::{ExperimentConfig, Seeding};
pub use crate::csv::ResultsWriter;
pub use driver::{Experiment, Skipped, SweepReport, evaluate, evaluate_derived};
pub use enumerate::staffing_configurations;
pub use error::{ExperimentError, ExperimentResult};
