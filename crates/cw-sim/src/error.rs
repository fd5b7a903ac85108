use cw_core::{ConfigError, CoreError, SimTime, TraceError};
use cw_crosswalk::CrosswalkError;
use cw_schedule::{EventKind, ScheduleError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("event {kind} at {at} popped with the clock already at {clock}")]
    EventInPast {
        kind:  EventKind,
        at:    SimTime,
        clock: SimTime,
    },

    #[error("run already finished; build a new Sim to run again")]
    AlreadyFinished,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("crosswalk invariant violated: {0}")]
    Crosswalk(CrosswalkError),

    #[error("random source failed: {0}")]
    Trace(#[from] TraceError),
}

// Draw failures surface as `Trace`, not as broken invariants.
impl From<CrosswalkError> for SimError {
    fn from(e: CrosswalkError) -> Self {
        match e {
            CrosswalkError::Trace(e) => SimError::Trace(e),
            e => SimError::Crosswalk(e),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
