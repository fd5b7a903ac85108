//! Automobiles: arrival, the stop line queue, and departure.
//!
//! A car arriving while traffic flows passes with zero delay.  A car arriving
//! while the crosswalk is clearing or walking joins the queue and is released
//! in arrival order when the walk phase ends.

use std::collections::{HashMap, VecDeque};

use cw_core::{CarId, CrosswalkConfig, SimTime, Summary, VariateRng, Welford};
use cw_schedule::EventKind;
use tracing::{debug, trace};

use crate::{Agenda, CrosswalkError, CrosswalkResult, SignalController};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CarState {
    Queued,
    Departed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Automobile {
    pub id:      CarId,
    pub arrival: SimTime,
    pub state:   CarState,
}

/// Owns every tracked automobile and the stop-line queue.
pub struct AutomobileManager {
    car_rate: f64,
    cars:     HashMap<CarId, Automobile>,
    queue:    VecDeque<CarId>,
    next_id:  CarId,
    spawned:  u64,
    departed: u64,
    delays:   Welford,
}

impl AutomobileManager {
    pub fn new(config: &CrosswalkConfig) -> Self {
        Self {
            car_rate: config.car_rate,
            cars:     HashMap::new(),
            queue:    VecDeque::new(),
            next_id:  CarId(0),
            spawned:  0,
            departed: 0,
            delays:   Welford::new(),
        }
    }

    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn get(&self, id: CarId) -> Option<&Automobile> {
        self.cars.get(&id)
    }

    #[inline]
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    #[inline]
    pub fn departed(&self) -> u64 {
        self.departed
    }

    pub fn delay_summary(&self) -> Summary {
        self.delays.finalize()
    }

    #[inline]
    pub fn delays(&self) -> &Welford {
        &self.delays
    }

    /// `CarSpawn`: schedule the next arrival, then pass or queue.
    pub fn on_spawn(
        &mut self,
        signal: &SignalController,
        agenda: &mut Agenda<'_>,
        rng:    &mut VariateRng,
    ) -> CrosswalkResult<CarId> {
        let now = agenda.now();
        let id = self.next_id;
        self.next_id = id.next();
        self.spawned += 1;

        let gap = rng.exponential(self.car_rate)?;
        agenda.after(gap, EventKind::CarSpawn)?;

        if signal.traffic_flows() {
            self.cars.insert(id, Automobile { id, arrival: now, state: CarState::Departed });
            self.delays.update(0.0);
            agenda.immediately(EventKind::CarDepart(id))?;
            trace!(%now, %id, "automobile passes");
        } else {
            self.cars.insert(id, Automobile { id, arrival: now, state: CarState::Queued });
            self.queue.push_back(id);
            trace!(%now, %id, queued = self.queue.len(), "automobile stops");
        }
        Ok(id)
    }

    /// Let every queued car go, oldest first.  Called when the walk phase
    /// ends.  Returns how many were released.
    pub fn release(&mut self, agenda: &mut Agenda<'_>) -> CrosswalkResult<usize> {
        let now = agenda.now();
        let mut released = 0;
        while let Some(id) = self.queue.pop_front() {
            let car = self
                .cars
                .get_mut(&id)
                .filter(|c| c.state == CarState::Queued)
                .ok_or(CrosswalkError::UnknownAutomobile(id))?;
            car.state = CarState::Departed;
            self.delays.update(now.since(car.arrival));
            agenda.immediately(EventKind::CarDepart(id))?;
            released += 1;
        }
        if released > 0 {
            debug!(%now, released, "queued automobiles released");
        }
        Ok(released)
    }

    /// `CarDepart`: stop tracking the car.
    pub fn on_depart(&mut self, id: CarId) -> CrosswalkResult<Automobile> {
        match self.cars.remove(&id) {
            Some(car) if car.state == CarState::Departed => {
                self.departed += 1;
                Ok(car)
            }
            Some(car) => {
                self.cars.insert(id, car);
                Err(CrosswalkError::UnknownAutomobile(id))
            }
            None => Err(CrosswalkError::UnknownAutomobile(id)),
        }
    }
}
