//! Plain data row types written by output backends.

use cw_sim::RunReport;

/// The results of one trial.
///
/// Statistics that are undefined for the trial (no observations, or only
/// one for a variance) are `None` and written as empty fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialRow {
    pub trial:           u64,
    pub seed:            u64,
    pub events:          u64,
    pub final_time_secs: f64,
    pub stop_reason:     &'static str,
    pub walk_phases:     u64,
    pub ped_count:       u64,
    pub ped_mean:        Option<f64>,
    pub ped_variance:    Option<f64>,
    pub car_count:       u64,
    pub car_mean:        Option<f64>,
    pub car_variance:    Option<f64>,
}

impl TrialRow {
    pub fn from_report(trial: u64, report: &RunReport) -> Self {
        Self {
            trial,
            seed:            report.seed,
            events:          report.events_processed,
            final_time_secs: report.final_time.secs(),
            stop_reason:     report.stop_reason.as_str(),
            walk_phases:     report.walk_phases,
            ped_count:       report.pedestrian.count,
            ped_mean:        report.pedestrian.mean,
            ped_variance:    report.pedestrian.variance,
            car_count:       report.automobile.count,
            car_mean:        report.automobile.mean,
            car_variance:    report.automobile.variance,
        }
    }
}
