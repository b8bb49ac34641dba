//! CSV output of sweep results.
//!
//! One row per evaluated configuration:
//!
//! ```text
//! cashiers,servers,ushers,total,mean_wait_minutes,samples,best_for_total
//! ```

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AggregateResult, ExperimentResult, SweepReport};

const HEADER: [&str; 7] = [
    "cashiers",
    "servers",
    "ushers",
    "total",
    "mean_wait_minutes",
    "samples",
    "best_for_total",
];

/// Writes sweep results to a CSV file.
pub struct ResultsWriter {
    writer:   Writer<File>,
    rows:     usize,
    finished: bool,
}

impl ResultsWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> ExperimentResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0, finished: false })
    }

    pub fn write_result(&mut self, result: &AggregateResult, best_for_total: bool) -> ExperimentResult<()> {
        let c = result.config;
        self.writer.write_record(&[
            c.cashiers.to_string(),
            c.servers.to_string(),
            c.ushers.to_string(),
            c.total().to_string(),
            format!("{:.6}", result.mean_wait),
            result.samples.to_string(),
            (best_for_total as u8).to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    /// Every result of `report`, in sweep order.
    pub fn write_report(&mut self, report: &SweepReport) -> ExperimentResult<()> {
        for result in &report.results {
            self.write_result(result, report.is_best(result))?;
        }
        Ok(())
    }

    /// Data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush the file.  Idempotent.
    pub fn finish(&mut self) -> ExperimentResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
