//! `AdmissionPolicy`: who steps off the curb when the walk signal allows.
//!
//! The pedestrian manager owns the waiting line and the capacity count; the
//! policy only decides which waiting pedestrians to take, given how many
//! slots are free.  Swapping the policy never touches the state machine.

use std::collections::VecDeque;

use cw_core::PedId;

/// Chooses pedestrians to admit from the waiting line.
///
/// # Contract
///
/// - Remove every selected id from `waiting` and return them in admission
///   order.
/// - Return at most `free_slots` ids.  The manager re-checks capacity and
///   aborts the run if a policy overshoots.
/// - Only select ids for which `eligible` is `true`.
/// - Must be deterministic: no randomness, no I/O.
pub trait AdmissionPolicy {
    fn select(
        &self,
        waiting:    &mut VecDeque<PedId>,
        free_slots: usize,
        eligible:   &dyn Fn(PedId) -> bool,
    ) -> Vec<PedId>;
}

/// First come, first served.
///
/// Walks the line from the front and stops at the first pedestrian who
/// cannot be admitted; nobody behind them is skipped ahead.
#[derive(Copy, Clone, Debug, Default)]
pub struct FifoAdmission;

impl AdmissionPolicy for FifoAdmission {
    fn select(
        &self,
        waiting:    &mut VecDeque<PedId>,
        free_slots: usize,
        eligible:   &dyn Fn(PedId) -> bool,
    ) -> Vec<PedId> {
        let mut admitted = Vec::with_capacity(free_slots.min(waiting.len()));
        while admitted.len() < free_slots {
            match waiting.front() {
                Some(&id) if eligible(id) => {
                    waiting.pop_front();
                    admitted.push(id);
                }
                _ => break,
            }
        }
        admitted
    }
}
