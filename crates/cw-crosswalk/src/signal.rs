//! The crosswalk signal.
//!
//! # Phases (crosswalk perspective)
//!
//! ```text
//!            press, no lock                 clearance elapsed
//!   Red ─────────────────────▶ Clearing ─────────────────────▶ Green
//!    ▲                                                           │
//!    └────────────────────── walk elapsed ───────────────────────┘
//!        (button resets, queued cars released, min-red lock armed)
//! ```
//!
//! - **Red**: don't walk; traffic flows.
//! - **Clearing**: a press has been accepted; traffic is being stopped and
//!   pedestrians are not walking yet.  Skipped when `clearance_secs` is 0.
//! - **Green**: walk; traffic is held.
//!
//! After each walk the light stays Red for at least `min_red_secs`.  A press
//! during that lock is latched in `button_pressed` and starts the next cycle
//! when the lock expires.
//!
//! At most one `LightChange` event is outstanding at any time; the controller
//! remembers its timestamp and rejects any other.

use cw_core::{CrosswalkConfig, SimTime};
use cw_schedule::EventKind;
use tracing::debug;

use crate::{Agenda, CrosswalkError, CrosswalkResult};

/// Crosswalk light.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Light {
    #[default]
    Red,
    Clearing,
    Green,
}

/// What a press or timer did to the light.  The driver reacts to
/// `WalkBegins` (admit pedestrians) and `WalkEnds` (release automobiles).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SignalChange {
    Unchanged,
    ClearingBegins,
    WalkBegins,
    WalkEnds,
}

/// Phase lengths, in seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SignalTimings {
    pub walk_secs:      f64,
    pub clearance_secs: f64,
    pub min_red_secs:   f64,
}

impl SignalTimings {
    pub fn from_config(config: &CrosswalkConfig) -> Self {
        Self {
            walk_secs:      config.walk_secs,
            clearance_secs: config.clearance_secs,
            min_red_secs:   config.min_red_secs,
        }
    }
}

/// The signal state machine.
#[derive(Clone, Debug)]
pub struct SignalController {
    timings:        SignalTimings,
    light:          Light,
    button_pressed: bool,
    /// Timestamp of the one outstanding `LightChange`, if any.  While the
    /// light is Red this is the min-red lock.
    timer:          Option<SimTime>,
    walk_ends:      Option<SimTime>,
    walk_phases:    u64,
}

impl SignalController {
    /// A Red light with no lock: the first press starts a cycle at once.
    pub fn new(timings: SignalTimings) -> Self {
        Self {
            timings,
            light:          Light::Red,
            button_pressed: false,
            timer:          None,
            walk_ends:      None,
            walk_phases:    0,
        }
    }

    #[inline]
    pub fn light(&self) -> Light {
        self.light
    }

    #[inline]
    pub fn button_pressed(&self) -> bool {
        self.button_pressed
    }

    /// `true` while automobiles may pass.
    #[inline]
    pub fn traffic_flows(&self) -> bool {
        self.light == Light::Red
    }

    /// Seconds of walk time left at `now`; zero unless the light is Green.
    pub fn walk_remaining(&self, now: SimTime) -> f64 {
        match (self.light, self.walk_ends) {
            (Light::Green, Some(end)) => end.since(now).max(0.0),
            _ => 0.0,
        }
    }

    /// Completed and in-progress walk phases.
    #[inline]
    pub fn walk_phases(&self) -> u64 {
        self.walk_phases
    }

    /// The call button was pressed.
    pub fn press(&mut self, agenda: &mut Agenda<'_>) -> CrosswalkResult<SignalChange> {
        if self.light != Light::Red {
            return Ok(SignalChange::Unchanged);
        }
        self.button_pressed = true;
        if self.timer.is_some() {
            debug!(now = %agenda.now(), "press latched during min-red lock");
            return Ok(SignalChange::Unchanged);
        }
        self.begin_cycle(agenda)
    }

    /// The outstanding `LightChange` fired.
    ///
    /// # Errors
    /// [`CrosswalkError::UnexpectedSignalTimer`] if no timer was armed for
    /// this instant.
    pub fn on_timer(&mut self, agenda: &mut Agenda<'_>) -> CrosswalkResult<SignalChange> {
        let now = agenda.now();
        if self.timer != Some(now) {
            return Err(CrosswalkError::UnexpectedSignalTimer { at: now });
        }
        self.timer = None;

        match self.light {
            Light::Clearing => self.begin_walk(agenda),
            Light::Green => {
                self.light = Light::Red;
                self.button_pressed = false;
                self.walk_ends = None;
                debug!(%now, "walk ends");
                if self.timings.min_red_secs > 0.0 {
                    self.arm(agenda, now + self.timings.min_red_secs)?;
                }
                Ok(SignalChange::WalkEnds)
            }
            Light::Red if self.button_pressed => {
                debug!(%now, "min-red lock expired with a latched press");
                self.begin_cycle(agenda)
            }
            Light::Red => Ok(SignalChange::Unchanged),
        }
    }

    fn begin_cycle(&mut self, agenda: &mut Agenda<'_>) -> CrosswalkResult<SignalChange> {
        if self.timings.clearance_secs > 0.0 {
            let ready = agenda.now() + self.timings.clearance_secs;
            self.light = Light::Clearing;
            self.arm(agenda, ready)?;
            debug!(now = %agenda.now(), until = %ready, "clearing traffic");
            Ok(SignalChange::ClearingBegins)
        } else {
            self.begin_walk(agenda)
        }
    }

    fn begin_walk(&mut self, agenda: &mut Agenda<'_>) -> CrosswalkResult<SignalChange> {
        let end = agenda.now() + self.timings.walk_secs;
        self.light = Light::Green;
        self.walk_ends = Some(end);
        self.walk_phases += 1;
        self.arm(agenda, end)?;
        debug!(now = %agenda.now(), until = %end, phase = self.walk_phases, "walk begins");
        Ok(SignalChange::WalkBegins)
    }

    fn arm(&mut self, agenda: &mut Agenda<'_>, at: SimTime) -> CrosswalkResult<()> {
        agenda.at(at, EventKind::LightChange)?;
        self.timer = Some(at);
        Ok(())
    }
}
