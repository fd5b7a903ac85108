//! Configuration and core error types.
//!
//! Sub-crates define their own error enums and wrap [`ConfigError`] via
//! `From` where a run can be rejected before it starts.

use thiserror::Error;

use crate::SimTime;

/// A run configuration that cannot be simulated.
///
/// Returned by [`CrosswalkConfig::validate`][crate::CrosswalkConfig::validate]
/// before any event is scheduled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("crossing capacity must be at least 1")]
    ZeroCapacity,

    #[error("walking speed range [{min}, {max}] is empty")]
    EmptySpeedRange { min: f64, max: f64 },

    #[error("no stop condition: set a horizon, an event budget, or an arrival cap")]
    NoStopCondition,
}

/// A uniform source that could not deliver a value.
///
/// Seeded generators never fail; trace files run out or contain garbage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("{trace}: cannot read: {message}")]
    Io { trace: String, message: String },

    #[error("{trace}:{line}: expected a uniform value in [0, 1], got {text:?}")]
    Malformed { trace: String, line: u64, text: String },

    #[error("{trace}: exhausted after {drawn} values")]
    Exhausted { trace: String, drawn: u64 },
}

/// The top-level error type for `cw-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("clock cannot move backwards from {now} to {requested}")]
    ClockRegression { now: SimTime, requested: SimTime },
}

/// Shorthand result type for `cw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
