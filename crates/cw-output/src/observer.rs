//! `TrialOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use cw_sim::{RunReport, SimObserver};

use crate::{OutputError, OutputResult, TrialRow};
use crate::writer::OutputWriter;

/// A [`SimObserver`] that writes one [`TrialRow`] per finished run to any
/// [`OutputWriter`] backend.
///
/// Share one observer across all trials (see
/// `cw_sim::run_trials_observed`); runs are numbered from 0 in the order
/// they end.  Errors from the writer are stored internally because
/// `SimObserver` methods have no return value.  After the last run, call
/// [`finish`][Self::finish] and check [`take_error`][Self::take_error].
pub struct TrialOutputObserver<W: OutputWriter> {
    writer:     W,
    next_trial: u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TrialOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, next_trial: 0, last_error: None }
    }

    /// Rows written (or attempted) so far.
    pub fn trials_written(&self) -> u64 {
        self.next_trial
    }

    /// Flush the writer.  Errors are stored like write errors.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the runs).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TrialOutputObserver<W> {
    fn on_run_end(&mut self, report: &RunReport) {
        let row = TrialRow::from_report(self.next_trial, report);
        self.next_trial += 1;
        let result = self.writer.write_trial(&row);
        self.store_err(result);
    }
}
