//! crosswalk: run the pedestrian crosswalk simulation from the command line.
//!
//! ```bash
//! # One 8-hour run with the default configuration
//! crosswalk
//!
//! # 20 trials, results per trial in ./out/trials.csv
//! crosswalk -n 20 -o out
//!
//! # Stop after 500 pedestrians and 500 cars instead of at a horizon
//! crosswalk --max-arrivals 500 --button probabilistic
//!
//! # Start from a JSON config; unset fields keep their defaults
//! crosswalk -c crosswalk.json --seed 7
//!
//! # Replay recorded uniforms (one per line) instead of seeded streams
//! crosswalk --max-arrivals 100 --auto-trace auto.txt --ped-trace ped.txt --button-trace button.txt
//! ```
//!
//! Logging goes to stderr through `RUST_LOG` (default `info`); results go to
//! stdout.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cw_core::{
    ButtonPressModel, CrosswalkConfig, RngStreams, SideMode, Summary, TraceSource, VariateRng,
};
use cw_output::{CsvWriter, TrialOutputObserver};
use cw_sim::{NoopObserver, RunReport, SimBuilder, SimObserver, TrialsReport};

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SidesArg {
    Single,
    Dual,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ButtonArg {
    Always,
    Probabilistic,
}

/// Discrete-event simulation of a pedestrian-actuated crosswalk.
#[derive(Parser, Debug)]
#[command(name = "crosswalk")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of independent trials.  More than one derives a seed per trial.
    #[arg(short = 'n', long, default_value_t = 1)]
    trials: u64,

    /// JSON file with a (partial) configuration.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Master RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run.
    #[arg(long)]
    horizon: Option<f64>,

    /// Spawn at most this many pedestrians (and automobiles), then run until
    /// everyone has left.  Without `--horizon` this replaces the horizon.
    #[arg(long)]
    max_arrivals: Option<u64>,

    /// Stop after this many events.
    #[arg(long)]
    max_events: Option<u64>,

    /// One or two pedestrian arrival streams.
    #[arg(long, value_enum)]
    sides: Option<SidesArg>,

    /// When pedestrians press the call button.
    #[arg(long, value_enum)]
    button: Option<ButtonArg>,

    /// Directory for `trials.csv`.  Created if missing.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Automobile uniforms, one per line.  Streams without a trace stay seeded.
    #[arg(long, value_name = "FILE")]
    auto_trace: Option<PathBuf>,

    /// Pedestrian uniforms (arrivals, walking speeds, impatience retries).
    #[arg(long, value_name = "FILE")]
    ped_trace: Option<PathBuf>,

    /// Button-press uniforms for `--button probabilistic`.
    #[arg(long, value_name = "FILE")]
    button_trace: Option<PathBuf>,
}

impl Args {
    fn has_traces(&self) -> bool {
        self.auto_trace.is_some() || self.ped_trace.is_some() || self.button_trace.is_some()
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<CrosswalkConfig> {
    let Some(path) = path else {
        return Ok(CrosswalkConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

fn apply_overrides(config: &mut CrosswalkConfig, args: &Args) {
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(n) = args.max_arrivals {
        config.stop.max_arrivals = Some(n);
        if args.horizon.is_none() {
            config.stop.horizon = None;
        }
    }
    if let Some(h) = args.horizon {
        config.stop.horizon = Some(h);
    }
    if let Some(n) = args.max_events {
        config.stop.max_events = Some(n);
    }
    if let Some(sides) = args.sides {
        config.sides = match sides {
            SidesArg::Single => SideMode::Single,
            SidesArg::Dual => SideMode::Dual,
        };
    }
    if let Some(button) = args.button {
        config.button = match button {
            ButtonArg::Always => ButtonPressModel::Always,
            ButtonArg::Probabilistic => ButtonPressModel::Probabilistic,
        };
    }
}

fn open_trace(path: &Path) -> Result<VariateRng> {
    let source =
        TraceSource::open(path).with_context(|| format!("opening trace {}", path.display()))?;
    Ok(VariateRng::from_source(source))
}

/// Seeded streams with every traced stream swapped in, or `None` without
/// traces.
fn trace_streams(args: &Args, seed: u64) -> Result<Option<RngStreams>> {
    if !args.has_traces() {
        return Ok(None);
    }
    let mut streams = RngStreams::new(seed);
    if let Some(path) = &args.ped_trace {
        streams.pedestrians = open_trace(path)?;
    }
    if let Some(path) = &args.auto_trace {
        streams.automobiles = open_trace(path)?;
    }
    if let Some(path) = &args.button_trace {
        streams.button = open_trace(path)?;
    }
    Ok(Some(streams))
}

// ── Running ───────────────────────────────────────────────────────────────────

enum Outcome {
    Single(RunReport),
    Trials(TrialsReport),
}

fn execute<O: SimObserver>(
    config:  &CrosswalkConfig,
    trials:  u64,
    streams: Option<RngStreams>,
    obs:     &mut O,
) -> Result<Outcome> {
    match streams {
        Some(streams) => {
            let mut sim = SimBuilder::new(config.clone()).streams(streams).build()?;
            Ok(Outcome::Single(sim.run(obs)?))
        }
        None if trials == 1 => Ok(Outcome::Single(cw_sim::run_observed(config, obs)?)),
        None => Ok(Outcome::Trials(cw_sim::run_trials_observed(config, trials, obs)?)),
    }
}

fn execute_to_csv(
    config:  &CrosswalkConfig,
    trials:  u64,
    streams: Option<RngStreams>,
    dir:     &Path,
) -> Result<Outcome> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = CsvWriter::new(dir).context("creating trials.csv")?;
    let mut obs = TrialOutputObserver::new(writer);
    let outcome = execute(config, trials, streams, &mut obs)?;
    obs.finish();
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing trials.csv");
    }
    info!(rows = obs.trials_written(), dir = %dir.display(), "trial output written");
    Ok(outcome)
}

// ── Printing ──────────────────────────────────────────────────────────────────

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_owned(), |v| format!("{v:.3}"))
}

fn print_summary(label: &str, s: &Summary) {
    println!(
        "  {label:<22} n={:<8} mean={:<12} var={:<12} sd={}",
        s.count,
        fmt_opt(s.mean),
        fmt_opt(s.variance),
        fmt_opt(s.std_dev()),
    );
}

fn print_report(report: &RunReport) {
    println!(
        "seed {}  |  {} events  |  ended {} at t={:.3}s  |  {} walk phases",
        report.seed,
        report.events_processed,
        report.stop_reason.as_str(),
        report.final_time.secs(),
        report.walk_phases,
    );
    println!(
        "  pedestrians: {} spawned, {} crossed, {} presses  |  automobiles: {} spawned, {} departed",
        report.pedestrians_spawned,
        report.pedestrians_crossed,
        report.button_presses,
        report.automobiles_spawned,
        report.automobiles_departed,
    );
    print_summary("pedestrian wait (s)", &report.pedestrian);
    print_summary("automobile delay (s)", &report.automobile);
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.trials == 0 {
        bail!("--trials must be at least 1");
    }
    if args.trials > 1 && args.has_traces() {
        bail!("trace files replay a single run; drop --trials or the traces");
    }

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    config.validate().context("invalid configuration")?;

    let streams = trace_streams(&args, config.seed)?;

    let t0 = Instant::now();
    let outcome = match &args.output {
        Some(dir) => execute_to_csv(&config, args.trials, streams, dir)?,
        None => execute(&config, args.trials, streams, &mut NoopObserver)?,
    };
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "done");

    println!("=== crosswalk ===");
    match &outcome {
        Outcome::Single(report) => {
            print_report(report);
            println!();
            println!("OUTPUT {}", fmt_opt(report.automobile.mean));
            println!("OUTPUT {}", fmt_opt(report.automobile.variance));
            println!("OUTPUT {}", fmt_opt(report.pedestrian.mean));
        }
        Outcome::Trials(trials) => {
            for report in &trials.runs {
                print_report(report);
            }
            println!();
            println!("across {} trials:", trials.runs.len());
            print_summary("mean pedestrian wait", &trials.pedestrian_means);
            print_summary("mean automobile delay", &trials.automobile_means);
            print_summary("pooled pedestrian wait", &trials.pedestrian_pooled);
            print_summary("pooled automobile delay", &trials.automobile_pooled);
        }
    }
    Ok(())
}
