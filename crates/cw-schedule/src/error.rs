use cw_core::SimTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("event at {at} would run before the last dispatched event at {floor}")]
    EventInPast { at: SimTime, floor: SimTime },

    #[error("event time {0} is not finite")]
    NonFinite(SimTime),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
