//! Fluent builder for constructing a [`Sim`].

use cw_core::{CrosswalkConfig, RngStreams, SimClock, SimTime};
use cw_crosswalk::{AdmissionPolicy, CrosswalkState, FifoAdmission};
use cw_schedule::{EventKind, EventQueue};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<A>`].
///
/// # Required inputs
///
/// - [`CrosswalkConfig`]: rates, signal timings, capacity, stop rule, seed.
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                              |
/// |-------------------|--------------------------------------|
/// | `.admission(p)`   | [`FifoAdmission`]                    |
/// | `.streams(s)`     | [`RngStreams::new`]`(config.seed)`   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config).build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<A: AdmissionPolicy> {
    config:    CrosswalkConfig,
    admission: A,
    streams:   Option<RngStreams>,
}

impl SimBuilder<FifoAdmission> {
    pub fn new(config: CrosswalkConfig) -> Self {
        Self { config, admission: FifoAdmission, streams: None }
    }
}

impl<A: AdmissionPolicy> SimBuilder<A> {
    /// Replace the admission policy.
    pub fn admission<P: AdmissionPolicy>(self, admission: P) -> SimBuilder<P> {
        SimBuilder { config: self.config, admission, streams: self.streams }
    }

    /// Draw from `streams` instead of seeding from `config.seed`, e.g. to
    /// replay recorded traces.
    pub fn streams(mut self, streams: RngStreams) -> Self {
        self.streams = Some(streams);
        self
    }

    /// Validate the configuration, seed the RNG streams, and schedule the
    /// first arrival of every stream.
    ///
    /// One `PedSpawn` is scheduled per side the [`SideMode`] enables and one
    /// `CarSpawn`, each at an exponential offset from t = 0.
    ///
    /// [`SideMode`]: cw_core::SideMode
    pub fn build(self) -> SimResult<Sim<A>> {
        self.config.validate()?;

        let mut streams = self.streams.unwrap_or_else(|| RngStreams::new(self.config.seed));
        let mut queue = EventQueue::with_capacity(64);

        for &side in self.config.sides.sides() {
            let first = streams.pedestrians.exponential(self.config.ped_rate)?;
            queue.push(SimTime(first), EventKind::PedSpawn { side })?;
        }
        let first_car = streams.automobiles.exponential(self.config.car_rate)?;
        queue.push(SimTime(first_car), EventKind::CarSpawn)?;

        Ok(Sim::new(
            self.config.clone(),
            SimClock::new(),
            queue,
            CrosswalkState::new(&self.config),
            streams,
            self.admission,
        ))
    }
}
