//! One-call entry points: a single run, or independent trials.

use cw_core::rng::mix_seed;
use cw_core::{CrosswalkConfig, Summary, Welford};
use tracing::info;

use crate::{NoopObserver, RunReport, SimBuilder, SimObserver, SimResult};

/// Results of [`run_trials`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrialsReport {
    /// One report per trial, in trial order.
    pub runs: Vec<RunReport>,
    /// Spread of the per-trial mean pedestrian wait.  Trials with no
    /// admitted pedestrian contribute nothing.
    pub pedestrian_means: Summary,
    /// Spread of the per-trial mean automobile delay.
    pub automobile_means: Summary,
    /// Every pedestrian wait of every trial, as if from one long run.
    pub pedestrian_pooled: Summary,
    /// Every automobile delay of every trial, as if from one long run.
    pub automobile_pooled: Summary,
}

/// Seed of trial `index` for a base seed.  Trial 0 does not reuse the base
/// seed, so `run_trials(config, 1)` and `run(config)` differ.
#[inline]
pub fn trial_seed(base: u64, index: u64) -> u64 {
    mix_seed(base, index)
}

/// Build and run one simulation with the default admission policy.
pub fn run(config: &CrosswalkConfig) -> SimResult<RunReport> {
    run_observed(config, &mut NoopObserver)
}

/// [`run`] with an observer attached.
pub fn run_observed<O: SimObserver>(
    config:   &CrosswalkConfig,
    observer: &mut O,
) -> SimResult<RunReport> {
    SimBuilder::new(config.clone()).build()?.run(observer)
}

/// Run `n` independent trials of `config`, trial `i` seeded with
/// [`trial_seed`]`(config.seed, i)`.
pub fn run_trials(config: &CrosswalkConfig, n: u64) -> SimResult<TrialsReport> {
    run_trials_observed(config, n, &mut NoopObserver)
}

/// [`run_trials`] with one observer shared by every trial.
pub fn run_trials_observed<O: SimObserver>(
    config:   &CrosswalkConfig,
    n:        u64,
    observer: &mut O,
) -> SimResult<TrialsReport> {
    let mut runs = Vec::with_capacity(n.min(1_024) as usize);
    let mut ped_means = Welford::new();
    let mut car_means = Welford::new();
    let mut ped_pooled = Welford::new();
    let mut car_pooled = Welford::new();

    for i in 0..n {
        let trial = CrosswalkConfig { seed: trial_seed(config.seed, i), ..config.clone() };
        let report = run_observed(&trial, observer)?;

        if let Some(mean) = report.pedestrian.mean {
            ped_means.update(mean);
        }
        if let Some(mean) = report.automobile.mean {
            car_means.update(mean);
        }
        ped_pooled.merge(&report.pedestrian_waits);
        car_pooled.merge(&report.automobile_delays);
        runs.push(report);
    }

    let report = TrialsReport {
        runs,
        pedestrian_means:  ped_means.finalize(),
        automobile_means:  car_means.finalize(),
        pedestrian_pooled: ped_pooled.finalize(),
        automobile_pooled: car_pooled.finalize(),
    };
    info!(
        trials = n,
        ped_mean = ?report.pedestrian_means.mean,
        car_mean = ?report.automobile_means.mean,
        "trials finished"
    );
    Ok(report)
}
