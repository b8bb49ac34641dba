//! Sweep configuration.

use serde::{Deserialize, Serialize};
use vs_venue::ArrivalPlan;

use crate::{ExperimentError, ExperimentResult};

/// How replications get their random numbers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seeding {
    /// One stream, seeded once, feeds every replication of every
    /// configuration in enumeration order.  Sequential only.
    #[default]
    Continuous,
    /// Every (configuration, replication) pair gets its own stream derived
    /// from the master seed, so results do not depend on execution order.
    Derived,
}

/// Everything the sweep needs besides the service-time model.
///
/// Usually loaded from JSON by the application; every field is optional
/// there and falls back to [`ExperimentConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Upper bound on total staff across the three stations.
    pub max_staff:    u32,

    /// Replications per configuration.
    pub replications: u32,

    /// Master RNG seed.
    pub seed:         u64,

    pub seeding:      Seeding,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    /// Ignored without the `parallel` feature.
    pub num_threads:  Option<usize>,

    pub arrivals:     ArrivalPlan,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            max_staff:    10,
            replications: 10,
            seed:         42,
            seeding:      Seeding::Continuous,
            num_threads:  None,
            arrivals:     ArrivalPlan::default(),
        }
    }
}

impl ExperimentConfig {
    /// Reject settings that would leave a configuration without samples.
    pub fn validate(&self) -> ExperimentResult<()> {
        if self.replications == 0 {
            return Err(ExperimentError::Config("replications must be at least 1".into()));
        }
        match self.arrivals.population() {
            None => {
                return Err(ExperimentError::Config(format!(
                    "arrival plan of {} + {} customers is too large",
                    self.arrivals.initial, self.arrivals.additional
                )));
            }
            Some(0) => {
                return Err(ExperimentError::Config("arrival plan produces no customers".into()));
            }
            Some(_) => {}
        }
        let interval = self.arrivals.interval;
        if !interval.is_finite() || interval < 0.0 {
            return Err(ExperimentError::Config(format!(
                "arrival interval must be a non-negative number of minutes, got {interval}"
            )));
        }
        if self.num_threads == Some(0) {
            return Err(ExperimentError::Config("num_threads must be positive".into()));
        }
        Ok(())
    }
}
