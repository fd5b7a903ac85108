//! `cw-schedule`: events and the future event list.
//!
//! # Crate layout
//!
//! | Module          | Contents                                           |
//! |-----------------|----------------------------------------------------|
//! | [`event`]       | `EventKind`, `Event`                               |
//! | [`event_queue`] | `EventQueue` (`BinaryHeap<Reverse<Event>>`)         |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`               |
//!
//! # Ordering model (summary)
//!
//! ```text
//! key(event)  = (time, seq)
//! pop_min()   = event with the smallest key
//! push(t, k)  = Err if t < time of the last popped event
//! ```

pub mod error;
pub mod event;
pub mod event_queue;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventKind};
pub use event_queue::EventQueue;
