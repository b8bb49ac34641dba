//! Unit tests for vs-venue.

use std::sync::{Arc, Mutex};

use vs_core::{CustomerId, SimRng, SimTime};
use vs_engine::{EngineObserver, ResourcePool};

use crate::{
    ArrivalPlan, Configuration, FixedServiceTimes, Scenario, ServiceTimes, StandardServiceTimes,
    Station, Venue, VenueError, WaitSample,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const CHECK: f64 = 3.0 / 60.0;

fn fixed(purchase: f64, food: Option<f64>) -> Arc<dyn ServiceTimes> {
    Arc::new(FixedServiceTimes { purchase, check: CHECK, food })
}

fn plan(initial: u32, additional: u32) -> ArrivalPlan {
    ArrivalPlan { initial, additional, interval: 0.20 }
}

fn run(config: Configuration, scenario: &Scenario, seed: u64) -> Vec<WaitSample> {
    let venue = Venue::new(config).unwrap();
    let mut rng = SimRng::new(seed);
    venue.run_once(scenario, &mut rng).unwrap().samples
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Panics if any station is ever over capacity.
#[derive(Default)]
struct CapacityCheck {
    events: usize,
}

impl EngineObserver for CapacityCheck {
    fn on_event_end(&mut self, now: SimTime, pools: &[ResourcePool]) {
        self.events += 1;
        for p in pools {
            assert!(p.held() <= p.capacity(), "{} over capacity at {now}", p.name());
        }
    }
}

/// Logs every draw so the order can be checked.
struct Recording {
    inner: FixedServiceTimes,
    calls: Mutex<Vec<&'static str>>,
}

impl Recording {
    fn push(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ServiceTimes for Recording {
    fn ticket_purchase(&self, rng: &mut SimRng) -> f64 {
        self.push("purchase");
        self.inner.ticket_purchase(rng)
    }

    fn ticket_check(&self, rng: &mut SimRng) -> f64 {
        self.push("check");
        self.inner.ticket_check(rng)
    }

    fn buys_food(&self, rng: &mut SimRng) -> bool {
        self.push("decide");
        self.inner.buys_food(rng)
    }

    fn food_purchase(&self, rng: &mut SimRng) -> f64 {
        self.push("food");
        self.inner.food_purchase(rng)
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn total_and_capacity() {
        let c = Configuration::new(2, 3, 4);
        assert_eq!(c.total(), 9);
        assert_eq!(c.capacity(Station::Cashier), 2);
        assert_eq!(c.capacity(Station::Server), 3);
        assert_eq!(c.capacity(Station::Usher), 4);
    }

    #[test]
    fn zero_capacity_rejected_before_running() {
        let err = Venue::new(Configuration::new(1, 0, 1)).unwrap_err();
        assert!(err.is_invalid_capacity());
        assert!(matches!(
            err,
            VenueError::InvalidCapacity { station: Station::Server, capacity: 0 }
        ));
    }

    #[test]
    fn pools_follow_station_ids() {
        let venue = Venue::new(Configuration::new(1, 2, 3)).unwrap();
        let pools = venue.pools().unwrap();
        for station in Station::ALL {
            let p = &pools[station.id().index()];
            assert_eq!(p.id(), station.id());
            assert_eq!(p.name(), station.name());
            assert_eq!(p.capacity(), venue.config().capacity(station));
        }
    }

    #[test]
    fn display() {
        assert_eq!(
            Configuration::new(1, 2, 3).to_string(),
            "cashiers=1 servers=2 ushers=3 (total 6)"
        );
    }
}

// ── Service times ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod service_tests {
    use super::*;

    #[test]
    fn standard_draws_stay_in_range() {
        let s = StandardServiceTimes;
        let mut rng = SimRng::new(7);
        let mut bought = 0;
        for _ in 0..1_000 {
            let p = s.ticket_purchase(&mut rng);
            assert!((1.0..=3.0).contains(&p) && p.fract() == 0.0);
            assert_eq!(s.ticket_check(&mut rng), CHECK);
            let f = s.food_purchase(&mut rng);
            assert!((1.0..=5.0).contains(&f) && f.fract() == 0.0);
            if s.buys_food(&mut rng) {
                bought += 1;
            }
        }
        assert!((400..=600).contains(&bought), "food share {bought}/1000");
    }

    #[test]
    fn fixed_never_buys_food_without_a_duration() {
        let s = FixedServiceTimes { purchase: 2.0, check: CHECK, food: None };
        let mut rng = SimRng::new(1);
        assert!(!s.buys_food(&mut rng));
        assert_eq!(s.ticket_purchase(&mut rng), 2.0);
    }
}

// ── Arrivals ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrival_tests {
    use super::*;

    #[test]
    fn default_plan_is_thirty_customers() {
        let p = ArrivalPlan::default();
        assert_eq!((p.initial, p.additional), (3, 27));
        assert_eq!(p.interval, 0.20);
        assert_eq!(p.population(), Some(30));
    }

    #[test]
    fn default_run_records_every_customer() {
        let samples = run(Configuration::new(1, 1, 1), &Scenario::default(), 42);
        assert_eq!(samples.len(), 30);
        let mut ids: Vec<u32> = samples.iter().map(|s| s.customer.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn late_arrivals_are_spaced_by_interval() {
        let scenario = Scenario::new(plan(1, 3), fixed(0.1, None));
        let mut samples = run(Configuration::new(10, 10, 10), &scenario, 0);
        samples.sort_by_key(|s| s.customer);
        let arrivals: Vec<f64> = samples.iter().map(|s| s.arrival.minutes()).collect();
        assert!(close(arrivals[0], 0.0));
        assert!(close(arrivals[1], 0.2));
        assert!(close(arrivals[2], 0.4));
        assert!(close(arrivals[3], 0.6));
    }
}

// ── Customer journeys ─────────────────────────────────────────────────────────

#[cfg(test)]
mod journey_tests {
    use super::*;
    use crate::{CustomerJourney, Stage};

    #[test]
    fn new_journey_starts_arrived() {
        let journey = CustomerJourney::new(CustomerId(4), fixed(1.0, None));
        assert_eq!(journey.id(), CustomerId(4));
        assert_eq!(journey.stage(), Stage::Arrived);
    }

    #[test]
    fn single_staff_serves_in_arrival_order() {
        let scenario = Scenario::new(plan(3, 0), fixed(2.0, None));
        let samples = run(Configuration::new(1, 1, 1), &scenario, 0);

        let ids: Vec<CustomerId> = samples.iter().map(|s| s.customer).collect();
        assert_eq!(ids, vec![CustomerId(0), CustomerId(1), CustomerId(2)]);
        let waits: Vec<f64> = samples.iter().map(WaitSample::wait).collect();
        assert!(close(waits[0], 2.0 + CHECK));
        assert!(close(waits[1], 4.0 + CHECK));
        assert!(close(waits[2], 6.0 + CHECK));
        assert!(samples.iter().all(|s| !s.bought_food));
    }

    #[test]
    fn ample_staff_means_service_time_only() {
        let scenario = Scenario::new(plan(3, 2), fixed(2.0, Some(1.0)));
        let samples = run(Configuration::new(5, 5, 5), &scenario, 0);
        assert_eq!(samples.len(), 5);
        for s in &samples {
            assert!(s.bought_food);
            assert!(close(s.wait(), 2.0 + CHECK + 1.0), "wait {}", s.wait());
        }
    }

    #[test]
    fn waits_are_never_negative() {
        for seed in 0..20 {
            let samples = run(Configuration::new(1, 2, 1), &Scenario::default(), seed);
            assert!(samples.iter().all(|s| s.wait() >= 0.0));
            assert!(samples.iter().all(|s| s.departure >= s.arrival));
        }
    }

    #[test]
    fn stations_never_exceed_capacity() {
        let venue = Venue::new(Configuration::new(1, 2, 1)).unwrap();
        let mut rng = SimRng::new(3);
        let mut check = CapacityCheck::default();
        let report = venue.run_observed(&Scenario::default(), &mut rng, &mut check).unwrap();
        assert_eq!(report.samples.len(), 30);
        assert!(check.events > 0);
    }

    #[test]
    fn draws_happen_in_journey_order() {
        let service = Arc::new(Recording {
            inner: FixedServiceTimes { purchase: 1.0, check: CHECK, food: Some(2.0) },
            calls: Mutex::new(Vec::new()),
        });
        let scenario = Scenario::new(plan(1, 0), service.clone());
        run(Configuration::new(1, 1, 1), &scenario, 0);
        let calls = service.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["purchase", "check", "decide", "food"]);
    }

    #[test]
    fn same_seed_same_samples() {
        let config = Configuration::new(2, 1, 1);
        let a = run(config, &Scenario::default(), 99);
        let b = run(config, &Scenario::default(), 99);
        assert_eq!(a, b);
    }

    #[test]
    fn some_customers_buy_food() {
        let samples = run(Configuration::new(2, 2, 2), &Scenario::default(), 5);
        let bought = samples.iter().filter(|s| s.bought_food).count();
        assert!(bought > 0 && bought < samples.len());
    }

    #[test]
    fn report_counts_grants_per_station() {
        let scenario = Scenario::new(plan(3, 0), fixed(2.0, None));
        let venue = Venue::new(Configuration::new(1, 1, 1)).unwrap();
        let report = venue.run_once(&scenario, &mut SimRng::new(0)).unwrap();
        let cashier = report.pool_stats[Station::Cashier.id().index()];
        assert_eq!(cashier.grants, 3);
        assert_eq!(cashier.queued, 2);
        assert_eq!(report.pool_stats[Station::Server.id().index()].grants, 0);
        assert!(close(report.end_time.minutes(), 6.0 + CHECK));
    }
}
