//! `cw-core`: foundational types for the crosswalk discrete-event simulation.
//!
//! This crate is a dependency of every other `cw-*` crate.  It has no `cw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `PedId`, `CarId`                                         |
//! | [`side`]   | `Side`, `SideMode`                                       |
//! | [`time`]   | `SimTime`, `SimClock`                                    |
//! | [`rng`]    | `UniformSource`, variates, `VariateRng`, `RngStreams`    |
//! | [`trace`]  | `TraceSource`: uniforms replayed from a file             |
//! | [`stats`]  | `Welford`, `Summary`                                     |
//! | [`config`] | `CrosswalkConfig` and its option enums                   |
//! | [`error`]  | `ConfigError`, `CoreError`, `TraceError`, `CoreResult`   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, config and summaries. |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod side;
pub mod stats;
pub mod time;
pub mod trace;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ButtonPressModel, CrossingTime, CrosswalkConfig, ImpatienceRetry, StopCondition};
pub use error::{ConfigError, CoreError, CoreResult, TraceError};
pub use ids::{CarId, PedId};
pub use rng::{DrawResult, RngStreams, UniformSource, VariateRng};
pub use side::{Side, SideMode};
pub use stats::{Summary, Welford};
pub use time::{SimClock, SimTime};
pub use trace::TraceSource;
