//! Pedestrians: arrival, the waiting line, impatience, admission, crossing.
//!
//! # Life cycle
//!
//! ```text
//! PedSpawn ──▶ Waiting ──admission──▶ Crossing ──PedCrossEnd──▶ (dropped)
//!                 │  ▲
//!                 ▼  │ PedImpatience: retry admission, re-arm, maybe press
//! ```
//!
//! Admission only happens while the signal shows Green.  It is attempted when
//! the walk phase begins, when a pedestrian arrives during a walk, and when a
//! waiting pedestrian grows impatient.  With `require_time_to_cross`, only
//! the last two check that the crossing fits in the walk time left.  Every waiting pedestrian holds exactly
//! one armed impatience deadline; stale `PedImpatience` events (admitted or
//! re-armed pedestrians) are ignored.

use std::collections::{HashMap, VecDeque};

use cw_core::{
    ButtonPressModel, CrossingTime, CrosswalkConfig, DrawResult, ImpatienceRetry, PedId,
    RngStreams, Side, SimTime, Summary, VariateRng, Welford,
};
use cw_schedule::EventKind;
use tracing::{debug, trace};

use crate::{
    AdmissionPolicy, Agenda, CrosswalkError, CrosswalkResult, Light, SignalChange, SignalController,
};

/// Probability that a pedestrian presses when nobody else is waiting, or
/// when impatient.
const LONE_PRESS_PROBABILITY: f64 = 15.0 / 16.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PedState {
    Waiting,
    Crossing,
    /// Finished crossing.  Pedestrians are dropped from tracking on the
    /// same event, so this is only ever seen in the value returned by
    /// [`PedestrianManager::on_cross_end`].
    Done,
}

/// A tracked pedestrian.
#[derive(Clone, Debug, PartialEq)]
pub struct Pedestrian {
    pub id:                  PedId,
    pub side:                Side,
    pub arrival:             SimTime,
    pub state:               PedState,
    /// Time at which the armed `PedImpatience` event fires, if any.
    pub impatience_deadline: Option<SimTime>,
    pub crossing_secs:       f64,
}

/// The parts of [`CrosswalkConfig`] that drive pedestrian behaviour.
#[derive(Copy, Clone, Debug)]
struct PedestrianModel {
    ped_rate:              f64,
    impatience_secs:       f64,
    retry:                 ImpatienceRetry,
    crossing:              CrossingTime,
    button:                ButtonPressModel,
    require_time_to_cross: bool,
}

/// Owns every live pedestrian, the waiting line, and the crosser count.
pub struct PedestrianManager {
    /// Maximum concurrent crossers.  Public so tests can force degenerate
    /// capacities the config validator rejects.
    pub capacity: u32,

    model:   PedestrianModel,
    peds:    HashMap<PedId, Pedestrian>,
    waiting: VecDeque<PedId>,
    active:  u32,
    next_id: PedId,

    spawned: u64,
    crossed: u64,
    presses: u64,
    waits:   Welford,
}

impl PedestrianManager {
    pub fn new(config: &CrosswalkConfig) -> Self {
        Self {
            capacity: config.capacity,
            model: PedestrianModel {
                ped_rate:              config.ped_rate,
                impatience_secs:       config.impatience_secs,
                retry:                 config.impatience_retry,
                crossing:              config.crossing,
                button:                config.button,
                require_time_to_cross: config.require_time_to_cross,
            },
            peds:    HashMap::new(),
            waiting: VecDeque::new(),
            active:  0,
            next_id: PedId(0),
            spawned: 0,
            crossed: 0,
            presses: 0,
            waits:   Welford::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn active_crossers(&self) -> u32 {
        self.active
    }

    #[inline]
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Waiting pedestrians in arrival order.
    pub fn waiting(&self) -> impl Iterator<Item = PedId> + '_ {
        self.waiting.iter().copied()
    }

    pub fn get(&self, id: PedId) -> Option<&Pedestrian> {
        self.peds.get(&id)
    }

    /// Pedestrians still tracked (waiting or crossing).
    #[inline]
    pub fn live_count(&self) -> usize {
        self.peds.len()
    }

    #[inline]
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    #[inline]
    pub fn crossed(&self) -> u64 {
        self.crossed
    }

    /// Button presses actually delivered to the signal.
    #[inline]
    pub fn presses(&self) -> u64 {
        self.presses
    }

    /// Waits (`admission - arrival`) of every admitted pedestrian.
    pub fn wait_summary(&self) -> Summary {
        self.waits.finalize()
    }

    #[inline]
    pub fn waits(&self) -> &Welford {
        &self.waits
    }

    // ── Event handlers ────────────────────────────────────────────────────

    /// `PedSpawn` on `side`.
    ///
    /// Creates a waiting pedestrian, schedules the next arrival on the same
    /// side, and tries to admit it if the walk phase is running.  A
    /// pedestrian left waiting gets an impatience timer and may schedule a
    /// `PedButtonPress` for the current instant.
    pub fn on_spawn<P: AdmissionPolicy + ?Sized>(
        &mut self,
        side:    Side,
        signal:  &SignalController,
        policy:  &P,
        agenda:  &mut Agenda<'_>,
        streams: &mut RngStreams,
    ) -> CrosswalkResult<PedId> {
        let now = agenda.now();
        let id = self.next_id;
        self.next_id = id.next();
        let crossing_secs = draw_crossing_secs(self.model.crossing, &mut streams.pedestrians)?;
        let already_waiting = self.waiting.len();

        self.peds.insert(
            id,
            Pedestrian {
                id,
                side,
                arrival: now,
                state: PedState::Waiting,
                impatience_deadline: None,
                crossing_secs,
            },
        );
        self.waiting.push_back(id);
        self.spawned += 1;
        trace!(%now, %id, %side, crossing_secs, "pedestrian arrives");

        let gap = streams.pedestrians.exponential(self.model.ped_rate)?;
        agenda.after(gap, EventKind::PedSpawn { side })?;

        self.admit(policy, signal, agenda, false)?;
        if !self.is_waiting(id) {
            return Ok(id);
        }

        self.arm_impatience(id, self.model.impatience_secs, agenda)?;
        let press = match self.model.button {
            ButtonPressModel::Always => !signal.button_pressed(),
            ButtonPressModel::Probabilistic => {
                let p = if already_waiting == 0 {
                    LONE_PRESS_PROBABILITY
                } else {
                    1.0 / (already_waiting as f64 + 1.0)
                };
                streams.button.bernoulli(p)?
            }
        };
        if press {
            agenda.immediately(EventKind::PedButtonPress(id))?;
        }
        Ok(id)
    }

    /// `PedButtonPress`: forward the press to the signal if `id` is still
    /// waiting.  Presses from pedestrians who have since been admitted are
    /// dropped.
    pub fn on_button_press(
        &mut self,
        id:     PedId,
        signal: &mut SignalController,
        agenda: &mut Agenda<'_>,
    ) -> CrosswalkResult<SignalChange> {
        let Some(ped) = self.peds.get(&id) else {
            return Ok(SignalChange::Unchanged);
        };
        if ped.state != PedState::Waiting {
            return Ok(SignalChange::Unchanged);
        }
        if ped.impatience_deadline.is_none() {
            self.arm_impatience(id, self.model.impatience_secs, agenda)?;
        }
        self.presses += 1;
        trace!(now = %agenda.now(), %id, "button pressed");
        signal.press(agenda)
    }

    /// `PedImpatience`: retry admission; if still waiting, re-arm the timer
    /// and maybe press again.  Waiting never ends in abandonment.
    pub fn on_impatience<P: AdmissionPolicy + ?Sized>(
        &mut self,
        id:      PedId,
        signal:  &SignalController,
        policy:  &P,
        agenda:  &mut Agenda<'_>,
        streams: &mut RngStreams,
    ) -> CrosswalkResult<()> {
        let now = agenda.now();
        match self.peds.get_mut(&id) {
            Some(ped)
                if ped.state == PedState::Waiting && ped.impatience_deadline == Some(now) =>
            {
                ped.impatience_deadline = None;
            }
            _ => {
                trace!(%now, %id, "stale impatience timer ignored");
                return Ok(());
            }
        }

        self.admit(policy, signal, agenda, false)?;
        if !self.is_waiting(id) {
            return Ok(());
        }

        let delay = match self.model.retry {
            ImpatienceRetry::Fixed => self.model.impatience_secs,
            ImpatienceRetry::Exponential => {
                streams.pedestrians.exponential(1.0 / self.model.impatience_secs)?
            }
        };
        self.arm_impatience(id, delay, agenda)?;

        let press = match self.model.button {
            ButtonPressModel::Always => !signal.button_pressed(),
            ButtonPressModel::Probabilistic => streams.button.bernoulli(LONE_PRESS_PROBABILITY)?,
        };
        debug!(%now, %id, retry_in = delay, press, "pedestrian impatient");
        if press {
            agenda.immediately(EventKind::PedButtonPress(id))?;
        }
        Ok(())
    }

    /// `PedCrossStart`: schedule the matching `PedCrossEnd`.
    pub fn on_cross_start(&mut self, id: PedId, agenda: &mut Agenda<'_>) -> CrosswalkResult<()> {
        let ped = self
            .peds
            .get(&id)
            .filter(|p| p.state == PedState::Crossing)
            .ok_or(CrosswalkError::UnknownPedestrian(id))?;
        agenda.after(ped.crossing_secs, EventKind::PedCrossEnd(id))
    }

    /// `PedCrossEnd`: free the crosser's slot and stop tracking it.
    ///
    /// # Errors
    /// [`CrosswalkError::CrosserUnderflow`] if nobody was crossing, and
    /// [`CrosswalkError::UnknownPedestrian`] if `id` was not crossing.
    pub fn on_cross_end(&mut self, id: PedId, now: SimTime) -> CrosswalkResult<Pedestrian> {
        if self.active == 0 {
            return Err(CrosswalkError::CrosserUnderflow(id));
        }
        match self.peds.get(&id) {
            Some(p) if p.state == PedState::Crossing => {}
            _ => return Err(CrosswalkError::UnknownPedestrian(id)),
        }
        let mut ped = self.peds.remove(&id).ok_or(CrosswalkError::UnknownPedestrian(id))?;
        ped.state = PedState::Done;
        self.active -= 1;
        self.crossed += 1;
        trace!(%now, %id, active = self.active, "pedestrian across");
        Ok(ped)
    }

    // ── Admission ─────────────────────────────────────────────────────────

    /// Admit waiting pedestrians through `policy` while the walk phase runs
    /// and slots are free.  Returns how many were admitted.
    ///
    /// Each admission records its wait, moves the pedestrian to Crossing and
    /// schedules `PedCrossStart` at the current instant.
    ///
    /// `walk_start` is set for the admission made as the walk phase begins.
    /// `require_time_to_cross` only holds back later arrivals, so the line
    /// waiting at the start of a walk always steps off together.
    pub fn admit<P: AdmissionPolicy + ?Sized>(
        &mut self,
        policy:     &P,
        signal:     &SignalController,
        agenda:     &mut Agenda<'_>,
        walk_start: bool,
    ) -> CrosswalkResult<usize> {
        if signal.light() != Light::Green || self.waiting.is_empty() {
            return Ok(0);
        }
        let free = self.capacity.saturating_sub(self.active) as usize;
        if free == 0 {
            return Ok(0);
        }

        let now = agenda.now();
        let remaining = signal.walk_remaining(now);
        let require_time = self.model.require_time_to_cross && !walk_start;
        let peds = &self.peds;
        let eligible = |id: PedId| {
            peds.get(&id).is_some_and(|p| {
                p.state == PedState::Waiting && (!require_time || p.crossing_secs <= remaining)
            })
        };
        let selected = policy.select(&mut self.waiting, free, &eligible);

        if selected.len() > free {
            return Err(CrosswalkError::CapacityExceeded {
                active:   self.active + selected.len() as u32,
                capacity: self.capacity,
            });
        }

        for &id in &selected {
            let ped = self
                .peds
                .get_mut(&id)
                .filter(|p| p.state == PedState::Waiting)
                .ok_or(CrosswalkError::UnknownPedestrian(id))?;
            ped.state = PedState::Crossing;
            ped.impatience_deadline = None;
            self.waits.update(now.since(ped.arrival));
            self.active += 1;
            agenda.immediately(EventKind::PedCrossStart(id))?;
        }
        if !selected.is_empty() {
            debug!(
                %now,
                admitted = selected.len(),
                active = self.active,
                still_waiting = self.waiting.len(),
                "pedestrians admitted"
            );
        }
        Ok(selected.len())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn is_waiting(&self, id: PedId) -> bool {
        self.peds.get(&id).is_some_and(|p| p.state == PedState::Waiting)
    }

    fn arm_impatience(
        &mut self,
        id:     PedId,
        delay:  f64,
        agenda: &mut Agenda<'_>,
    ) -> CrosswalkResult<()> {
        let at = agenda.now() + delay;
        let ped = self.peds.get_mut(&id).ok_or(CrosswalkError::UnknownPedestrian(id))?;
        ped.impatience_deadline = Some(at);
        agenda.at(at, EventKind::PedImpatience(id))
    }
}

/// Seconds a new pedestrian needs to cross.
fn draw_crossing_secs(crossing: CrossingTime, rng: &mut VariateRng) -> DrawResult<f64> {
    match crossing {
        CrossingTime::Fixed { secs } => Ok(secs),
        CrossingTime::Walking { street_width_ft, min_speed, max_speed } => {
            Ok(street_width_ft / rng.uniform(min_speed, max_speed)?)
        }
    }
}
