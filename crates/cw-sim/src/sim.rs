//! The `Sim` struct and its event loop.

use cw_core::{CrosswalkConfig, RngStreams, SimClock, SimTime, Summary, Welford};
use cw_crosswalk::{AdmissionPolicy, Agenda, CrosswalkState};
use cw_schedule::{Event, EventKind, EventQueue};
use tracing::{info, trace};

use crate::{SimError, SimObserver, SimResult};

// ── Run lifecycle ─────────────────────────────────────────────────────────────

/// Where a [`Sim`] is in its single run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Finished,
}

/// Why the event loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The next event lay beyond the horizon.
    Horizon,
    /// `max_events` events had been dispatched.
    MaxEvents,
    /// Nothing left to do.
    QueueDrained,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::Horizon => "horizon",
            StopReason::MaxEvents => "max_events",
            StopReason::QueueDrained => "queue_drained",
        }
    }
}

// ── RunReport ─────────────────────────────────────────────────────────────────

/// Everything a finished run measured.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub seed: u64,

    /// Pedestrian waits, arrival to admission.
    pub pedestrian: Summary,
    /// Automobile delays at the stop line.
    pub automobile: Summary,

    /// The raw accumulators behind the two summaries, for pooling across runs.
    pub pedestrian_waits:  Welford,
    pub automobile_delays: Welford,

    pub events_processed: u64,
    /// Clock at the last dispatched event.
    pub final_time:  SimTime,
    pub stop_reason: StopReason,

    pub pedestrians_spawned:  u64,
    pub pedestrians_crossed:  u64,
    pub automobiles_spawned:  u64,
    pub automobiles_departed: u64,
    pub button_presses:       u64,
    pub walk_phases:          u64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation driver.
///
/// `Sim<A>` owns the queue, the clock, and all crosswalk state, and runs a
/// classic next-event loop:
///
/// 1. **Pop** the earliest `(time, seq)` event.
/// 2. **Stop check**: the run ends without executing the event if it lies
///    beyond the horizon or `max_events` events have already run; it ends
///    when the queue is empty.
/// 3. **Advance** the clock to the event time.
/// 4. **Dispatch** to the pedestrian, automobile, or signal handler.  Light
///    changes are fed back through
///    [`CrosswalkState::apply_signal_change`].
/// 5. **Check** `active crossers <= capacity` and notify the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<A: AdmissionPolicy> {
    pub config: CrosswalkConfig,

    /// Simulation clock.  Equal to the time of the last dispatched event.
    pub clock: SimClock,

    /// Future event list.
    pub queue: EventQueue,

    /// Signal, pedestrians, and automobiles.
    pub state: CrosswalkState,

    /// Pedestrian, automobile, and button streams.
    pub streams: RngStreams,

    /// Chooses who crosses when the walk signal allows.
    pub admission: A,

    phase:            RunPhase,
    events_processed: u64,
}

impl<A: AdmissionPolicy> Sim<A> {
    pub(crate) fn new(
        config:    CrosswalkConfig,
        clock:     SimClock,
        queue:     EventQueue,
        state:     CrosswalkState,
        streams:   RngStreams,
        admission: A,
    ) -> Self {
        Self {
            config,
            clock,
            queue,
            state,
            streams,
            admission,
            phase: RunPhase::Idle,
            events_processed: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    #[inline]
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a stop condition is met and return the report.
    ///
    /// Calls observer hooks around every dispatched event.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    ///
    /// # Errors
    /// [`SimError::AlreadyFinished`] on a second call; any invariant
    /// violation raised by a handler aborts the run and is returned as is.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        if self.phase == RunPhase::Finished {
            return Err(SimError::AlreadyFinished);
        }
        self.phase = RunPhase::Running;
        info!(
            seed = self.config.seed,
            horizon = ?self.config.stop.horizon,
            max_events = ?self.config.stop.max_events,
            max_arrivals = ?self.config.stop.max_arrivals,
            "crosswalk run starting"
        );
        observer.on_run_start(&self.config);

        // A failed run cannot be resumed either.
        let outcome = self.event_loop(observer);
        self.phase = RunPhase::Finished;
        let stop_reason = outcome?;

        let report = self.report(stop_reason);
        info!(
            seed = report.seed,
            events = report.events_processed,
            final_time = %report.final_time,
            stop = report.stop_reason.as_str(),
            pedestrians = report.pedestrian.count,
            automobiles = report.automobile.count,
            "crosswalk run finished"
        );
        observer.on_run_end(&report);
        Ok(report)
    }

    // ── Core event processing ─────────────────────────────────────────────

    fn event_loop<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<StopReason> {
        let horizon = self.config.horizon();
        let max_events = self.config.stop.max_events;
        loop {
            let Some(event) = self.queue.pop_min() else {
                return Ok(StopReason::QueueDrained);
            };
            if horizon.is_some_and(|h| event.time > h) {
                return Ok(StopReason::Horizon);
            }
            if max_events.is_some_and(|n| self.events_processed >= n) {
                return Ok(StopReason::MaxEvents);
            }
            self.process_event(event)?;
            observer.on_event(&event, &self.state);
        }
    }

    fn process_event(&mut self, event: Event) -> SimResult<()> {
        let clock = self.clock.now();
        if event.time < clock {
            return Err(SimError::EventInPast { kind: event.kind, at: event.time, clock });
        }
        self.clock.advance_to(event.time)?;
        trace!(now = %event.time, seq = event.seq, event = %event.kind, "dispatch");

        // Explicit field borrows so the borrow checker sees disjoint access.
        let max_arrivals = self.config.stop.max_arrivals;
        let state = &mut self.state;
        let streams = &mut self.streams;
        let admission = &self.admission;
        let mut agenda = Agenda::new(event.time, &mut self.queue);

        match event.kind {
            EventKind::PedSpawn { side } => {
                if !cap_reached(max_arrivals, state.pedestrians.spawned()) {
                    state.pedestrians.on_spawn(side, &state.signal, admission, &mut agenda, streams)?;
                }
            }
            EventKind::PedButtonPress(id) => {
                let change =
                    state.pedestrians.on_button_press(id, &mut state.signal, &mut agenda)?;
                state.apply_signal_change(change, admission, &mut agenda)?;
            }
            EventKind::PedImpatience(id) => {
                state.pedestrians.on_impatience(id, &state.signal, admission, &mut agenda, streams)?;
            }
            EventKind::PedCrossStart(id) => {
                state.pedestrians.on_cross_start(id, &mut agenda)?;
            }
            EventKind::PedCrossEnd(id) => {
                state.pedestrians.on_cross_end(id, event.time)?;
            }
            EventKind::CarSpawn => {
                if !cap_reached(max_arrivals, state.automobiles.spawned()) {
                    state.automobiles.on_spawn(&state.signal, &mut agenda, &mut streams.automobiles)?;
                }
            }
            EventKind::CarDepart(id) => {
                state.automobiles.on_depart(id)?;
            }
            EventKind::LightChange => {
                let change = state.signal.on_timer(&mut agenda)?;
                state.apply_signal_change(change, admission, &mut agenda)?;
            }
        }

        state.check_invariants()?;
        self.events_processed += 1;
        Ok(())
    }

    fn report(&self, stop_reason: StopReason) -> RunReport {
        let peds = &self.state.pedestrians;
        let cars = &self.state.automobiles;
        RunReport {
            seed:                 self.config.seed,
            pedestrian:           peds.wait_summary(),
            automobile:           cars.delay_summary(),
            pedestrian_waits:     peds.waits().clone(),
            automobile_delays:    cars.delays().clone(),
            events_processed:     self.events_processed,
            final_time:           self.clock.now(),
            stop_reason,
            pedestrians_spawned:  peds.spawned(),
            pedestrians_crossed:  peds.crossed(),
            automobiles_spawned:  cars.spawned(),
            automobiles_departed: cars.departed(),
            button_presses:       peds.presses(),
            walk_phases:          self.state.signal.walk_phases(),
        }
    }
}

/// `true` once a stream has produced its last allowed arrival.
#[inline]
fn cap_reached(max_arrivals: Option<u64>, spawned: u64) -> bool {
    max_arrivals.is_some_and(|n| spawned >= n)
}
