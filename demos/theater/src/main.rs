//! theater — staffing sweep for a small movie theatre.
//!
//! Thirty moviegoers arrive at the doors (three at once, then one every
//! twelve seconds).  Each buys a ticket from a cashier, has it checked by an
//! usher, and about half of them queue at the concession stand afterwards.
//! For every way of splitting up to `max_staff` employees across the three
//! stations the sweep reports the mean time from arrival to seat, and the
//! best split for every headcount.
//!
//! ```bash
//! cargo run -p theater --release                     # defaults
//! cargo run -p theater --release -- sweep.json       # overrides
//! RUST_LOG=debug cargo run -p theater                # every configuration
//! ```
//!
//! `sweep.json` may set any of `max_staff`, `replications`, `seed`,
//! `seeding` (`"continuous"` or `"derived"`), `num_threads` and `arrivals`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use vs_core::init_logging;
use vs_experiment::{Experiment, ExperimentConfig, ResultsWriter};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:  &str = "output/theater";
const RESULTS_CSV: &str = "results.csv";

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    // 1. Configuration.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ExperimentConfig::default(),
    };
    let experiment = Experiment::new(config)?;
    let config = experiment.config();
    println!("=== theater staffing sweep ===");
    println!(
        "max staff {}, {} replications, seed {} ({:?} seeding), {} customers per run",
        config.max_staff,
        config.replications,
        config.seed,
        config.seeding,
        config.arrivals.population().unwrap_or_default(),
    );

    // 2. Sweep.
    println!("Evaluating {} configurations", experiment.configurations().len());
    let t0 = Instant::now();
    let report = experiment.run()?;
    let elapsed = t0.elapsed();
    println!("Sweep complete in {:.3} s", elapsed.as_secs_f64());
    for skipped in &report.skipped {
        eprintln!("skipped {}: {}", skipped.config, skipped.error);
    }
    println!();

    // 3. Results CSV.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let csv_path = Path::new(OUTPUT_DIR).join(RESULTS_CSV);
    let mut writer = ResultsWriter::new(&csv_path)?;
    writer.write_report(&report)?;
    writer.finish()?;
    println!("  {} : {} rows", csv_path.display(), writer.rows());
    println!();

    // 4. Best configuration per headcount.
    println!(
        "{:<7} {:<9} {:<8} {:<7} {:>11} {:>10}",
        "Total", "Cashiers", "Servers", "Ushers", "Mean wait", "(m:ss)"
    );
    println!("{}", "-".repeat(57));
    for (total, best) in &report.best {
        let secs = best.mean_wait_duration().as_secs();
        println!(
            "{:<7} {:<9} {:<8} {:<7} {:>11.3} {:>7}:{:02}",
            total,
            best.config.cashiers,
            best.config.servers,
            best.config.ushers,
            best.mean_wait,
            secs / 60,
            secs % 60,
        );
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<ExperimentConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}
