use cw_core::{CarId, PedId, SimTime, TraceError};
use cw_schedule::ScheduleError;
use thiserror::Error;

/// A broken crosswalk invariant.  Any of these aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CrosswalkError {
    #[error("{active} active crossers exceed capacity {capacity}")]
    CapacityExceeded { active: u32, capacity: u32 },

    #[error("pedestrian {0} finished crossing while nobody was crossing")]
    CrosserUnderflow(PedId),

    #[error("pedestrian {0} is not in the expected state")]
    UnknownPedestrian(PedId),

    #[error("automobile {0} is not in the expected state")]
    UnknownAutomobile(CarId),

    #[error("signal timer fired at {at} with no matching timer armed")]
    UnexpectedSignalTimer { at: SimTime },

    #[error("scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("random source failed: {0}")]
    Trace(#[from] TraceError),
}

pub type CrosswalkResult<T> = Result<T, CrosswalkError>;
