//! Simulation observer trait for progress reporting and data collection.

use cw_core::CrosswalkConfig;
use cw_crosswalk::CrosswalkState;
use cw_schedule::Event;

use crate::RunReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: queue length printer
///
/// ```rust,ignore
/// struct QueuePrinter;
///
/// impl SimObserver for QueuePrinter {
///     fn on_event(&mut self, event: &Event, state: &CrosswalkState) {
///         if event.kind == EventKind::LightChange {
///             println!("{}: {} cars held", event.time, state.automobiles.queued());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first event is popped.
    fn on_run_start(&mut self, _config: &CrosswalkConfig) {}

    /// Called after every dispatched event, with the state it left behind.
    /// Events that end the run without executing are not reported.
    fn on_event(&mut self, _event: &Event, _state: &CrosswalkState) {}

    /// Called once with the final report.
    fn on_run_end(&mut self, _report: &RunReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
