//! `cw-sim`: event loop driver for the crosswalk simulation.
//!
//! # Next-event loop
//!
//! ```text
//! loop:
//!   ① Pop     : earliest (time, seq) event; empty queue ends the run.
//!   ② Stop    : time > horizon, or max_events already dispatched: end the
//!                run without executing the event.
//!   ③ Advance : clock = event.time (never backwards).
//!   ④ Dispatch: PedSpawn / PedButtonPress / PedImpatience /
//!                PedCrossStart / PedCrossEnd   → PedestrianManager
//!                CarSpawn / CarDepart          → AutomobileManager
//!                LightChange                   → SignalController
//!                light changes                 → admit or release
//!   ⑤ Check   : active crossers <= capacity; observer.on_event
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cw_core::CrosswalkConfig;
//! use cw_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(CrosswalkConfig::default()).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! println!("mean pedestrian wait: {:?}", report.pedestrian.mean);
//!
//! // Or, in one call:
//! let trials = cw_sim::run_trials(&CrosswalkConfig::default(), 10)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod trials;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunPhase, RunReport, Sim, StopReason};
pub use trials::{TrialsReport, run, run_observed, run_trials, run_trials_observed, trial_seed};
