//! `CrosswalkState`: the signal plus both managers, owned by the driver.

use cw_core::CrosswalkConfig;

use crate::{
    AdmissionPolicy, Agenda, AutomobileManager, CrosswalkError, CrosswalkResult,
    PedestrianManager, SignalChange, SignalController, SignalTimings,
};

/// All mutable crosswalk state of one run.
///
/// The fields are public so the driver can split-borrow them (the pedestrian
/// manager mutably, the signal immutably) within one dispatch.
pub struct CrosswalkState {
    pub signal:      SignalController,
    pub pedestrians: PedestrianManager,
    pub automobiles: AutomobileManager,
}

impl CrosswalkState {
    pub fn new(config: &CrosswalkConfig) -> Self {
        Self {
            signal:      SignalController::new(SignalTimings::from_config(config)),
            pedestrians: PedestrianManager::new(config),
            automobiles: AutomobileManager::new(config),
        }
    }

    /// React to a light change: admit pedestrians when the walk begins,
    /// release held automobiles when it ends.
    pub fn apply_signal_change<P: AdmissionPolicy + ?Sized>(
        &mut self,
        change: SignalChange,
        policy: &P,
        agenda: &mut Agenda<'_>,
    ) -> CrosswalkResult<()> {
        match change {
            SignalChange::WalkBegins => {
                self.pedestrians.admit(policy, &self.signal, agenda, true)?;
            }
            SignalChange::WalkEnds => {
                self.automobiles.release(agenda)?;
            }
            SignalChange::Unchanged | SignalChange::ClearingBegins => {}
        }
        Ok(())
    }

    /// `0 <= active crossers <= capacity`.
    pub fn check_invariants(&self) -> CrosswalkResult<()> {
        let active = self.pedestrians.active_crossers();
        let capacity = self.pedestrians.capacity;
        if active > capacity {
            return Err(CrosswalkError::CapacityExceeded { active, capacity });
        }
        Ok(())
    }
}
