//! Per-configuration results and the best configuration per staffing total.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::time::Duration;

use vs_core::time::minutes_to_duration;
use vs_venue::Configuration;

/// Pooled outcome of all replications of one configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AggregateResult {
    pub config:    Configuration,
    /// Mean wait over every sample of every replication, in minutes.
    pub mean_wait: f64,
    /// Number of wait samples pooled into `mean_wait`.
    pub samples:   usize,
}

impl AggregateResult {
    /// `None` if `waits` is empty.
    pub fn from_waits(config: Configuration, waits: &[f64]) -> Option<Self> {
        Some(Self { config, mean_wait: mean(waits)?, samples: waits.len() })
    }

    /// The mean wait as a wall-clock style duration.
    pub fn mean_wait_duration(&self) -> Duration {
        minutes_to_duration(self.mean_wait)
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.config.total()
    }
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// For each staffing total, the result with the lowest mean wait.
///
/// Ties keep whichever result comes first in `results`.
pub fn best_by_total(results: &[AggregateResult]) -> BTreeMap<u32, AggregateResult> {
    let mut best: BTreeMap<u32, AggregateResult> = BTreeMap::new();
    for result in results {
        match best.entry(result.total()) {
            Entry::Vacant(slot) => {
                slot.insert(*result);
            }
            Entry::Occupied(mut slot) => {
                if result.mean_wait < slot.get().mean_wait {
                    slot.insert(*result);
                }
            }
        }
    }
    best
}
