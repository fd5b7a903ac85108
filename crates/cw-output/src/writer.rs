//! The `OutputWriter` trait implemented by result backends.

use crate::{OutputResult, TrialRow};

/// A sink for per-trial results.
///
/// Driven by [`TrialOutputObserver`][crate::TrialOutputObserver], which
/// stores errors instead of returning them; fetch them with
/// [`take_error`][crate::TrialOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one trial's row.
    fn write_trial(&mut self, row: &TrialRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
