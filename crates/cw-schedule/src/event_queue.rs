//! `EventQueue`: the future event list.
//!
//! # Ordering
//!
//! Events leave the queue in ascending `(time, seq)` order.  `seq` is a
//! per-queue counter stamped at insertion, so events sharing a timestamp come
//! out first-in, first-out and a run replays identically from the same seed.
//!
//! # Complexity
//!
//! Backed by `std::collections::BinaryHeap`, a binary heap laid out in a
//! growable `Vec`: O(log n) `push` and `pop_min`, O(1) `peek_min_time`.
//! The heap is a max-heap, so entries are wrapped in `Reverse`.
//!
//! # The floor
//!
//! The queue remembers the timestamp of the last event it handed out.  Any
//! attempt to schedule before that floor is rejected: it would mean an event
//! handler tried to act in the simulated past.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use cw_core::SimTime;

use crate::{Event, EventKind, ScheduleError, ScheduleResult};

/// A min-priority queue of [`Event`]s keyed by `(time, seq)`.
#[derive(Default)]
pub struct EventQueue {
    heap:     BinaryHeap<Reverse<Event>>,
    next_seq: u64,
    floor:    SimTime,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `capacity` pending events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity), ..Self::default() }
    }

    /// Schedule `kind` to fire at `time`.  Returns the assigned sequence
    /// number.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::NonFinite`] if `time` is NaN or infinite.
    /// - [`ScheduleError::EventInPast`] if `time` precedes the timestamp of
    ///   the last popped event.
    pub fn push(&mut self, time: SimTime, kind: EventKind) -> ScheduleResult<u64> {
        if !time.is_finite() {
            return Err(ScheduleError::NonFinite(time));
        }
        if time < self.floor {
            return Err(ScheduleError::EventInPast { at: time, floor: self.floor });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Event { time, seq, kind }));
        Ok(seq)
    }

    /// Remove and return the event with the smallest `(time, seq)`.
    pub fn pop_min(&mut self) -> Option<Event> {
        let Reverse(event) = self.heap.pop()?;
        self.floor = event.time;
        Some(event)
    }

    /// Timestamp of the next event, or `None` if the queue is empty.
    pub fn peek_min_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(e)| e.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Events ever accepted by [`push`][Self::push].
    pub fn total_pushed(&self) -> u64 {
        self.next_seq
    }

    /// Timestamp of the last popped event (zero before the first pop).
    pub fn floor(&self) -> SimTime {
        self.floor
    }
}
