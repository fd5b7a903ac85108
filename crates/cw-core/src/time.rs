//! Simulated time model.
//!
//! # Design
//!
//! Time is continuous: a [`SimTime`] is a count of simulated seconds since
//! the start of a run, stored as `f64`.  It never relates to wall-clock time;
//! the clock jumps from one event timestamp to the next.
//!
//! `SimTime` is totally ordered through [`f64::total_cmp`], so it can key a
//! binary heap directly.  Configuration validation keeps every duration
//! finite, which means NaN never reaches the clock.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated timestamp, in seconds.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Seconds since the start of the run.
    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// `true` unless the timestamp is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Seconds elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation clock.  Only moves forward.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Jump to `to`.
    ///
    /// # Errors
    /// [`CoreError::ClockRegression`] if `to` lies before the current time.
    /// Equal timestamps are fine: several events may share one instant.
    pub fn advance_to(&mut self, to: SimTime) -> CoreResult<()> {
        if to < self.now {
            return Err(CoreError::ClockRegression { now: self.now, requested: to });
        }
        self.now = to;
        Ok(())
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.now.0.max(0.0);
        let hours = (secs / 3_600.0).floor();
        let minutes = ((secs % 3_600.0) / 60.0).floor();
        write!(f, "{} ({:02}h{:02}m)", self.now, hours, minutes)
    }
}
