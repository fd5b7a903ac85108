//! CSV output backend.
//!
//! Creates `trials.csv` in the configured output directory, one row per
//! trial.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, TrialRow};
use crate::writer::OutputWriter;

/// Column names of `trials.csv`, in order.
pub const TRIAL_HEADERS: [&str; 12] = [
    "trial",
    "seed",
    "events",
    "final_time_secs",
    "stop_reason",
    "walk_phases",
    "ped_count",
    "ped_mean",
    "ped_variance",
    "car_count",
    "car_mean",
    "car_variance",
];

/// Writes trial rows to `trials.csv`.
pub struct CsvWriter {
    trials:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `trials.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trials = Writer::from_path(dir.join("trials.csv"))?;
        trials.write_record(TRIAL_HEADERS)?;
        Ok(Self { trials, finished: false })
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_trial(&mut self, row: &TrialRow) -> OutputResult<()> {
        self.trials.write_record(&[
            row.trial.to_string(),
            row.seed.to_string(),
            row.events.to_string(),
            row.final_time_secs.to_string(),
            row.stop_reason.to_owned(),
            row.walk_phases.to_string(),
            row.ped_count.to_string(),
            opt(row.ped_mean),
            opt(row.ped_variance),
            row.car_count.to_string(),
            opt(row.car_mean),
            opt(row.car_variance),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trials.flush()?;
        Ok(())
    }
}
