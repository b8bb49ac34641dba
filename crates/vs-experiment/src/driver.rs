//! The sweep driver.
//!
//! # Seeding
//!
//! With [`Seeding::Continuous`] a single [`SimRng`] is created from the
//! master seed and handed to every replication of every configuration, in
//! enumeration order.  Reordering or parallelising would change the numbers,
//! so this mode always runs sequentially.
//!
//! With [`Seeding::Derived`] replication `r` of the `i`-th configuration
//! draws from `SimRng::for_stream(seed, i * replications + r)`.  The result
//! of a configuration then depends only on its position in the list, and
//! configurations may be evaluated in any order (on Rayon's pool with the
//! `parallel` feature).

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use vs_core::SimRng;
use vs_engine::RunReport;
use vs_venue::{Configuration, Scenario, ServiceTimes, Venue, VenueError, VenueResult, WaitSample};

use crate::{
    AggregateResult, ExperimentConfig, ExperimentError, ExperimentResult, Seeding, best_by_total,
    staffing_configurations,
};

// ── Single configuration ──────────────────────────────────────────────────────

/// Run `replications` replications of `config`, all drawing from `rng`, and
/// pool their waits.
pub fn evaluate(
    config:       Configuration,
    scenario:     &Scenario,
    replications: u32,
    rng:          &mut SimRng,
) -> ExperimentResult<AggregateResult> {
    let venue = Venue::new(config)?;
    pooled(config, replications, |_| venue.run_once(scenario, rng))
}

/// Like [`evaluate`], but replication `r` draws from its own stream
/// `first_stream + r` of `seed`.
pub fn evaluate_derived(
    config:       Configuration,
    scenario:     &Scenario,
    replications: u32,
    seed:         u64,
    first_stream: u64,
) -> ExperimentResult<AggregateResult> {
    let venue = Venue::new(config)?;
    pooled(config, replications, |r| {
        let mut rng = SimRng::for_stream(seed, first_stream + u64::from(r));
        venue.run_once(scenario, &mut rng)
    })
}

fn pooled<F>(config: Configuration, replications: u32, mut run: F) -> ExperimentResult<AggregateResult>
where
    F: FnMut(u32) -> VenueResult<RunReport<WaitSample>>,
{
    let mut waits = Vec::new();
    for r in 0..replications {
        let report = run(r)?;
        waits.extend(report.samples.iter().map(WaitSample::wait));
    }
    AggregateResult::from_waits(config, &waits)
        .ok_or_else(|| ExperimentError::Config(format!("{config} produced no wait samples")))
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

/// A configuration the sweep could not evaluate.
#[derive(Debug)]
pub struct Skipped {
    pub config: Configuration,
    pub error:  VenueError,
}

/// Outcome of a whole sweep.
#[derive(Debug)]
pub struct SweepReport {
    /// One entry per evaluated configuration, in input order.
    pub results: Vec<AggregateResult>,
    /// Configurations rejected for their capacities.
    pub skipped: Vec<Skipped>,
    /// Lowest-mean configuration for every staffing total in `results`.
    pub best:    BTreeMap<u32, AggregateResult>,
}

impl SweepReport {
    /// `true` if `result` is the best for its total.
    pub fn is_best(&self, result: &AggregateResult) -> bool {
        self.best.get(&result.total()).is_some_and(|b| b.config == result.config)
    }
}

/// A configured staffing sweep.
///
/// ```rust,ignore
/// let report = Experiment::new(ExperimentConfig::default())?.run()?;
/// for (total, best) in &report.best {
///     println!("{total}: {} waits {:.2} min", best.config, best.mean_wait);
/// }
/// ```
pub struct Experiment {
    config:   ExperimentConfig,
    scenario: Scenario,
}

impl Experiment {
    /// Validate `config` and use the standard service times.
    pub fn new(config: ExperimentConfig) -> ExperimentResult<Self> {
        config.validate()?;
        let scenario = Scenario { arrivals: config.arrivals, ..Scenario::default() };
        Ok(Self { config, scenario })
    }

    /// Replace the service-time model.
    pub fn with_service(mut self, service: Arc<dyn ServiceTimes>) -> Self {
        self.scenario.service = service;
        self
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// The configurations [`run`](Self::run) evaluates.
    pub fn configurations(&self) -> Vec<Configuration> {
        staffing_configurations(self.config.max_staff)
    }

    /// Evaluate every configuration up to `max_staff`.
    pub fn run(&self) -> ExperimentResult<SweepReport> {
        self.run_configurations(&self.configurations())
    }

    /// Evaluate `configs` in order.
    ///
    /// A configuration with an invalid capacity is recorded in
    /// [`SweepReport::skipped`] and the sweep moves on; any other failure
    /// aborts the sweep.
    pub fn run_configurations(&self, configs: &[Configuration]) -> ExperimentResult<SweepReport> {
        info!(
            configurations = configs.len(),
            replications = self.config.replications,
            seed = self.config.seed,
            seeding = ?self.config.seeding,
            "sweep started"
        );

        let outcomes = match self.config.seeding {
            Seeding::Continuous => self.run_continuous(configs),
            Seeding::Derived => self.run_derived(configs)?,
        };

        let mut results = Vec::with_capacity(configs.len());
        let mut skipped = Vec::new();
        for (config, outcome) in configs.iter().copied().zip(outcomes) {
            match outcome {
                Ok(result) => {
                    debug!(%config, mean_wait = result.mean_wait, samples = result.samples, "evaluated");
                    results.push(result);
                }
                Err(ExperimentError::Venue(error)) if error.is_invalid_capacity() => {
                    warn!(%config, %error, "configuration skipped");
                    skipped.push(Skipped { config, error });
                }
                Err(e) => return Err(e),
            }
        }

        let best = best_by_total(&results);
        for (total, b) in &best {
            info!(total, config = %b.config, mean_wait = b.mean_wait, "best for total");
        }
        info!(evaluated = results.len(), skipped = skipped.len(), "sweep finished");
        Ok(SweepReport { results, skipped, best })
    }

    fn run_continuous(&self, configs: &[Configuration]) -> Vec<ExperimentResult<AggregateResult>> {
        let mut rng = SimRng::new(self.config.seed);
        let mut outcomes = Vec::with_capacity(configs.len());
        for &config in configs {
            let outcome = evaluate(config, &self.scenario, self.config.replications, &mut rng);
            let fatal = matches!(&outcome, Err(e) if !e.is_invalid_capacity());
            outcomes.push(outcome);
            if fatal {
                break;
            }
        }
        outcomes
    }

    fn derived_one(&self, index: usize, config: Configuration) -> ExperimentResult<AggregateResult> {
        let replications = self.config.replications;
        let first_stream = index as u64 * u64::from(replications);
        evaluate_derived(config, &self.scenario, replications, self.config.seed, first_stream)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_derived(
        &self,
        configs: &[Configuration],
    ) -> ExperimentResult<Vec<ExperimentResult<AggregateResult>>> {
        Ok(configs
            .iter()
            .enumerate()
            .map(|(i, &config)| self.derived_one(i, config))
            .collect())
    }

    #[cfg(feature = "parallel")]
    fn run_derived(
        &self,
        configs: &[Configuration],
    ) -> ExperimentResult<Vec<ExperimentResult<AggregateResult>>> {
        use rayon::prelude::*;

        let sweep = || -> Vec<ExperimentResult<AggregateResult>> {
            configs
                .par_iter()
                .enumerate()
                .map(|(i, &config)| self.derived_one(i, config))
                .collect()
        };

        match self.config.num_threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ExperimentError::Config(e.to_string()))?;
                Ok(pool.install(sweep))
            }
            None => Ok(sweep()),
        }
    }
}
