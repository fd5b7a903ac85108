//! Event types.

use std::cmp::Ordering;
use std::fmt;

use cw_core::{CarId, PedId, Side, SimTime};

/// What happens when an event fires, and to whom.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A pedestrian arrives at the crosswalk on `side`.
    PedSpawn { side: Side },
    /// A waiting pedestrian presses the call button.
    PedButtonPress(PedId),
    /// A waiting pedestrian's impatience timer expires.
    PedImpatience(PedId),
    /// An admitted pedestrian steps off the curb.
    PedCrossStart(PedId),
    /// A crossing pedestrian reaches the far curb.
    PedCrossEnd(PedId),
    /// An automobile arrives at the signal.
    CarSpawn,
    /// An automobile clears the crosswalk.
    CarDepart(CarId),
    /// The signal controller's timer expires.
    LightChange,
}

impl EventKind {
    /// Short, stable label for logs and counters.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::PedSpawn { .. }    => "ped_spawn",
            EventKind::PedButtonPress(_)  => "ped_button_press",
            EventKind::PedImpatience(_)   => "ped_impatience",
            EventKind::PedCrossStart(_)   => "ped_cross_start",
            EventKind::PedCrossEnd(_)     => "ped_cross_end",
            EventKind::CarSpawn           => "car_spawn",
            EventKind::CarDepart(_)       => "car_depart",
            EventKind::LightChange        => "light_change",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::PedSpawn { side } => write!(f, "ped_spawn[{side}]"),
            EventKind::PedButtonPress(id)
            | EventKind::PedImpatience(id)
            | EventKind::PedCrossStart(id)
            | EventKind::PedCrossEnd(id) => write!(f, "{}[{id}]", self.label()),
            EventKind::CarDepart(id) => write!(f, "car_depart[{id}]"),
            EventKind::CarSpawn | EventKind::LightChange => f.write_str(self.label()),
        }
    }
}

/// A scheduled event.
///
/// `seq` is assigned by the queue at insertion and breaks ties between equal
/// timestamps in insertion order, so replay is deterministic.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time: SimTime,
    pub seq:  u64,
    pub kind: EventKind,
}

impl Event {
    /// The `(time, seq)` ordering key.
    #[inline]
    pub fn key(&self) -> (SimTime, u64) {
        (self.time, self.seq)
    }
}

// Events compare by key only; `seq` is unique within a queue, so two
// distinct events never compare equal there.
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.seq, self.time, self.kind)
    }
}
