//! The scheduling handle passed to every event handler.

use cw_core::SimTime;
use cw_schedule::{EventKind, EventQueue, ScheduleError};

use crate::CrosswalkResult;

/// The current instant plus write access to the event queue.
///
/// `Agenda` is built by the driver for a single dispatch.  Handlers use it to
/// read the clock and to schedule follow-up events; it refuses anything
/// earlier than `now`.
pub struct Agenda<'a> {
    now:   SimTime,
    queue: &'a mut EventQueue,
}

impl<'a> Agenda<'a> {
    #[inline]
    pub fn new(now: SimTime, queue: &'a mut EventQueue) -> Self {
        Self { now, queue }
    }

    /// The timestamp of the event being handled.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule `kind` at the absolute time `at`.
    pub fn at(&mut self, at: SimTime, kind: EventKind) -> CrosswalkResult<()> {
        if at < self.now {
            return Err(ScheduleError::EventInPast { at, floor: self.now }.into());
        }
        self.queue.push(at, kind)?;
        Ok(())
    }

    /// Schedule `kind` `delay` seconds from now.
    #[inline]
    pub fn after(&mut self, delay: f64, kind: EventKind) -> CrosswalkResult<()> {
        self.at(self.now + delay, kind)
    }

    /// Schedule `kind` at the current instant, after everything already
    /// queued for it.
    #[inline]
    pub fn immediately(&mut self, kind: EventKind) -> CrosswalkResult<()> {
        self.at(self.now, kind)
    }
}
