//! `cw-crosswalk`: the signal, pedestrian, and automobile state machines.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`agenda`]     | `Agenda<'a>`: current instant + scheduling handle             |
//! | [`admission`]  | `AdmissionPolicy` trait, `FifoAdmission`                      |
//! | [`signal`]     | `Light`, `SignalController`, `SignalChange`                   |
//! | [`pedestrian`] | `Pedestrian`, `PedestrianManager` (waiting line, crossers)    |
//! | [`automobile`] | `Automobile`, `AutomobileManager` (stop-line queue)           |
//! | [`state`]      | `CrosswalkState`: everything above, owned by the driver       |
//! | [`error`]      | `CrosswalkError`, `CrosswalkResult<T>`                        |
//!
//! # Dispatch model
//!
//! Every handler receives an [`Agenda`] for the event being processed.  It
//! mutates its own manager and schedules follow-up events; nothing here pops
//! the queue or advances the clock.  Handlers that touch the signal return a
//! [`SignalChange`], and the driver passes it to
//! [`CrosswalkState::apply_signal_change`] so admission and release happen on
//! the same event as the light change.

pub mod admission;
pub mod agenda;
pub mod automobile;
pub mod error;
pub mod pedestrian;
pub mod signal;
pub mod state;


pub use admission::{AdmissionPolicy, FifoAdmission};
pub use agenda::Agenda;
pub use automobile::{Automobile, AutomobileManager, CarState};
pub use error::{CrosswalkError, CrosswalkResult};
pub use pedestrian::{PedState, Pedestrian, PedestrianManager};
pub use signal::{Light, SignalChange, SignalController, SignalTimings};
pub use state::CrosswalkState;
