//! Unit tests for vs-experiment.

use std::sync::Arc;

use vs_core::SimRng;
use vs_venue::{ArrivalPlan, Configuration, FixedServiceTimes, Scenario, ServiceTimes};

use crate::{AggregateResult, Experiment, ExperimentConfig, Seeding};

// ── Helpers ───────────────────────────────────────────────────────────────────

const CHECK: f64 = 3.0 / 60.0;

fn cfg(c: u32, s: u32, u: u32) -> Configuration {
    Configuration::new(c, s, u)
}

fn small(seeding: Seeding) -> ExperimentConfig {
    ExperimentConfig {
        max_staff: 5,
        replications: 3,
        seed: 7,
        seeding,
        num_threads: Some(2),
        arrivals: ArrivalPlan::default(),
    }
}

fn fixed(purchase: f64) -> Arc<dyn ServiceTimes> {
    Arc::new(FixedServiceTimes { purchase, check: CHECK, food: None })
}

fn result(config: Configuration, mean_wait: f64) -> AggregateResult {
    AggregateResult { config, mean_wait, samples: 1 }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Enumeration ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod enumerate_tests {
    use super::*;
    use crate::staffing_configurations;

    #[test]
    fn bound_four() {
        assert_eq!(
            staffing_configurations(4),
            vec![cfg(1, 1, 1), cfg(1, 1, 2), cfg(1, 2, 1), cfg(2, 1, 1)]
        );
    }

    #[test]
    fn below_three_is_empty() {
        assert!(staffing_configurations(0).is_empty());
        assert!(staffing_configurations(2).is_empty());
        assert_eq!(staffing_configurations(3), vec![cfg(1, 1, 1)]);
    }

    #[test]
    fn bound_ten_is_every_positive_triple() {
        let configs = staffing_configurations(10);
        // Positive triples with sum ≤ 10: C(10, 3).
        assert_eq!(configs.len(), 120);
        assert!(configs.iter().all(|c| c.cashiers >= 1 && c.servers >= 1 && c.ushers >= 1));
        assert!(configs.iter().all(|c| c.total() <= 10));
        assert!(configs.windows(2).all(|w| w[0] < w[1]), "lexicographic order");
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregate_tests {
    use std::time::Duration;

    use super::*;
    use crate::{best_by_total, mean};

    #[test]
    fn mean_of_pooled_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn from_waits_counts_samples() {
        let r = AggregateResult::from_waits(cfg(1, 1, 1), &[2.0, 4.0]).unwrap();
        assert_eq!(r.samples, 2);
        assert_eq!(r.mean_wait, 3.0);
        assert!(AggregateResult::from_waits(cfg(1, 1, 1), &[]).is_none());
    }

    #[test]
    fn duration_accessor() {
        let r = result(cfg(1, 1, 1), 1.5);
        assert_eq!(r.mean_wait_duration(), Duration::from_secs(90));
    }

    #[test]
    fn best_picks_minimum_per_total() {
        let results = [
            result(cfg(1, 1, 1), 9.0),
            result(cfg(1, 1, 2), 7.0),
            result(cfg(1, 2, 1), 5.0),
            result(cfg(2, 1, 1), 6.0),
        ];
        let best = best_by_total(&results);
        assert_eq!(best.len(), 2);
        assert_eq!(best[&3].config, cfg(1, 1, 1));
        assert_eq!(best[&4].config, cfg(1, 2, 1));
    }

    #[test]
    fn ties_keep_the_first() {
        let results = [result(cfg(1, 1, 2), 5.0), result(cfg(2, 1, 1), 5.0)];
        assert_eq!(best_by_total(&results)[&4].config, cfg(1, 1, 2));
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ExperimentConfig::default();
        assert_eq!((c.max_staff, c.replications, c.seed), (10, 10, 42));
        assert_eq!(c.seeding, Seeding::Continuous);
        assert_eq!(c.arrivals, ArrivalPlan::default());
    }

    #[test]
    fn json_fills_missing_fields() {
        let c: ExperimentConfig =
            serde_json::from_str(r#"{ "max_staff": 6, "seeding": "derived" }"#).unwrap();
        assert_eq!(c.max_staff, 6);
        assert_eq!(c.seeding, Seeding::Derived);
        assert_eq!(c.replications, 10);
        assert_eq!(c.arrivals.population(), Some(30));
    }

    #[test]
    fn json_partial_arrival_plan() {
        let c: ExperimentConfig =
            serde_json::from_str(r#"{ "arrivals": { "additional": 7 } }"#).unwrap();
        assert_eq!(c.arrivals.initial, 3);
        assert_eq!(c.arrivals.additional, 7);
    }

    #[test]
    fn validation() {
        let mut c = ExperimentConfig::default();
        assert!(c.validate().is_ok());
        c.replications = 0;
        assert!(c.validate().is_err());

        let mut c = ExperimentConfig::default();
        c.arrivals = ArrivalPlan { initial: 0, additional: 0, interval: 0.2 };
        assert!(c.validate().is_err());

        let mut c = ExperimentConfig::default();
        c.arrivals.interval = -1.0;
        assert!(Experiment::new(c).is_err());
    }

    #[test]
    fn oversized_arrival_plan_is_a_config_error() {
        let c: ExperimentConfig = serde_json::from_str(
            r#"{ "arrivals": { "initial": 4294967295, "additional": 1 } }"#,
        )
        .unwrap();
        assert_eq!(c.arrivals.population(), None);
        assert!(matches!(c.validate(), Err(crate::ExperimentError::Config(_))));
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver_tests {
    use super::*;
    use crate::{evaluate, evaluate_derived};

    #[test]
    fn single_staff_example_mean() {
        let scenario = Scenario::new(
            ArrivalPlan { initial: 3, additional: 0, interval: 0.2 },
            fixed(2.0),
        );
        let mut rng = SimRng::new(0);
        let r = evaluate(cfg(1, 1, 1), &scenario, 2, &mut rng).unwrap();
        assert_eq!(r.samples, 6);
        assert!(close(r.mean_wait, 4.0 + CHECK), "mean {}", r.mean_wait);
    }

    #[test]
    fn ample_staff_mean_is_service_time() {
        let scenario = Scenario::new(ArrivalPlan::default(), fixed(1.0));
        let r = evaluate(cfg(30, 30, 30), &scenario, 1, &mut SimRng::new(0)).unwrap();
        assert_eq!(r.samples, 30);
        assert!(close(r.mean_wait, 1.0 + CHECK));
    }

    #[test]
    fn continuous_is_reproducible() {
        let e = Experiment::new(small(Seeding::Continuous)).unwrap();
        let a = e.run().unwrap();
        let b = e.run().unwrap();
        assert_eq!(a.results, b.results);
        assert_eq!(a.results.len(), 10);
    }

    #[test]
    fn continuous_shares_one_stream_in_order() {
        let e = Experiment::new(small(Seeding::Continuous)).unwrap();
        let configs = [cfg(1, 1, 1), cfg(2, 1, 1)];
        let report = e.run_configurations(&configs).unwrap();

        let scenario = Scenario::default();
        let mut rng = SimRng::new(7);
        let first = evaluate(configs[0], &scenario, 3, &mut rng).unwrap();
        let second = evaluate(configs[1], &scenario, 3, &mut rng).unwrap();
        assert_eq!(report.results, vec![first, second]);
    }

    #[test]
    fn derived_is_reproducible_and_positional() {
        let e = Experiment::new(small(Seeding::Derived)).unwrap();
        let a = e.run().unwrap();
        let b = e.run().unwrap();
        assert_eq!(a.results, b.results);

        let configs = e.configurations();
        let i = 4;
        let direct =
            evaluate_derived(configs[i], &Scenario::default(), 3, 7, (i * 3) as u64).unwrap();
        assert_eq!(a.results[i], direct);
    }

    #[test]
    fn best_has_lowest_mean_for_its_total() {
        let report = Experiment::new(small(Seeding::Derived)).unwrap().run().unwrap();
        for r in &report.results {
            let best = report.best[&r.total()];
            assert!(best.mean_wait <= r.mean_wait);
        }
        assert_eq!(report.best.keys().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn waits_are_non_negative() {
        let report = Experiment::new(small(Seeding::Continuous)).unwrap().run().unwrap();
        assert!(report.results.iter().all(|r| r.mean_wait >= 0.0 && r.samples == 90));
    }

    #[test]
    fn invalid_capacity_is_skipped() {
        let e = Experiment::new(small(Seeding::Continuous)).unwrap();
        let report = e
            .run_configurations(&[cfg(1, 1, 1), cfg(0, 1, 1), cfg(1, 1, 2)])
            .unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].config, cfg(0, 1, 1));
        assert!(report.skipped[0].error.is_invalid_capacity());
    }

    #[test]
    fn engine_failure_aborts_the_sweep() {
        let e = Experiment::new(small(Seeding::Continuous)).unwrap().with_service(fixed(-1.0));
        let err = e.run().unwrap_err();
        assert!(!err.is_invalid_capacity());
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::ResultsWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn header_and_rows() {
        let dir = tmp();
        let path = dir.path().join("results.csv");
        let report = Experiment::new(ExperimentConfig { max_staff: 4, ..small(Seeding::Continuous) })
            .unwrap()
            .run()
            .unwrap();

        let mut w = ResultsWriter::new(&path).unwrap();
        w.write_report(&report).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
        assert_eq!(w.rows(), 4);

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["cashiers", "servers", "ushers", "total", "mean_wait_minutes", "samples", "best_for_total"]
        );

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][3], "3");
        assert_eq!(&rows[0][6], "1"); // only config with total 3
        let best_of_four = rows[1..].iter().filter(|r| &r[6] == "1").count();
        assert_eq!(best_of_four, 1);
    }
}
