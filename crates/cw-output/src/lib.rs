//! `cw-output`: per-trial result output for the crosswalk simulation.
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`row`]      | `TrialRow`: one trial's summary, flat             |
//! | [`writer`]   | `OutputWriter` trait                              |
//! | [`csv`]      | `CsvWriter`: `trials.csv` with a header row       |
//! | [`observer`] | `TrialOutputObserver`: `SimObserver` → writer     |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use cw_output::{CsvWriter, TrialOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TrialOutputObserver::new(writer);
//! cw_sim::run_trials_observed(&config, 10, &mut obs)?;
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrialOutputObserver;
pub use row::TrialRow;
pub use writer::OutputWriter;
