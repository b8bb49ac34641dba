//! One replication of the venue, end to end.

use std::sync::Arc;

use tracing::debug;
use vs_core::SimRng;
use vs_engine::{Engine, EngineObserver, NoopObserver, ResourcePool, RunReport};

use crate::{
    ArrivalGenerator, ArrivalPlan, Configuration, ServiceTimes, StandardServiceTimes, Station,
    VenueResult, WaitSample,
};

/// Everything about a run that is not staffing.
#[derive(Clone)]
pub struct Scenario {
    pub arrivals: ArrivalPlan,
    pub service:  Arc<dyn ServiceTimes>,
}

impl Scenario {
    pub fn new(arrivals: ArrivalPlan, service: Arc<dyn ServiceTimes>) -> Self {
        Self { arrivals, service }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(ArrivalPlan::default(), Arc::new(StandardServiceTimes))
    }
}

/// A venue staffed according to a validated [`Configuration`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Venue {
    config: Configuration,
}

impl Venue {
    /// Fails with `VenueError::InvalidCapacity` if any station is unstaffed.
    pub fn new(config: Configuration) -> VenueResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> Configuration {
        self.config
    }

    /// Fresh, empty pools for one run, indexed by `Station::id()`.
    pub fn pools(&self) -> VenueResult<Vec<ResourcePool>> {
        let mut pools = Vec::with_capacity(Station::ALL.len());
        for station in Station::ALL {
            pools.push(ResourcePool::new(station.id(), station.name(), self.config.capacity(station))?);
        }
        Ok(pools)
    }

    /// Run one replication, drawing every random quantity from `rng`.
    pub fn run_once(&self, scenario: &Scenario, rng: &mut SimRng) -> VenueResult<RunReport<WaitSample>> {
        self.run_observed(scenario, rng, &mut NoopObserver)
    }

    /// [`run_once`](Self::run_once) with an observer attached to the engine.
    pub fn run_observed<O: EngineObserver>(
        &self,
        scenario: &Scenario,
        rng: &mut SimRng,
        observer: &mut O,
    ) -> VenueResult<RunReport<WaitSample>> {
        let mut engine = Engine::new(self.pools()?, rng);
        engine.spawn(Box::new(ArrivalGenerator::new(
            scenario.arrivals,
            Arc::clone(&scenario.service),
        )))?;
        let report = engine.run(observer)?;
        debug!(
            config = %self.config,
            customers = report.samples.len(),
            end = %report.end_time,
            "replication finished"
        );
        Ok(report)
    }
}
