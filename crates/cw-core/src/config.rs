//! Run configuration.
//!
//! Defaults reproduce the reference crosswalk: pedestrians every 20 s and
//! cars every 15 s on average, a 60 s impatience threshold, an 8 s clearance
//! interval, an 18 s walk phase, 35 s of guaranteed traffic flow after each
//! walk, and room for 20 people in the crosswalk at once.

use crate::{ConfigError, SideMode};

// ── Pedestrian model options ──────────────────────────────────────────────────

/// How long a pedestrian needs to cross once admitted.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CrossingTime {
    /// Every pedestrian takes `secs`.
    Fixed { secs: f64 },
    /// `street_width_ft / speed`, with the speed drawn per pedestrian from
    /// `U(min_speed, max_speed)` ft/s at spawn.
    Walking { street_width_ft: f64, min_speed: f64, max_speed: f64 },
}

impl Default for CrossingTime {
    fn default() -> Self {
        CrossingTime::Walking { street_width_ft: 46.0, min_speed: 2.6, max_speed: 4.1 }
    }
}

/// Delay before a still-waiting pedestrian grows impatient again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ImpatienceRetry {
    /// Re-arm after exactly `impatience_secs`.
    #[default]
    Fixed,
    /// Re-arm after an exponential delay with mean `impatience_secs`.
    Exponential,
}

/// When a pedestrian presses the call button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ButtonPressModel {
    /// Press whenever the button is not already lit.
    #[default]
    Always,
    /// An arrival presses with probability 15/16 if nobody is waiting and
    /// `1 / (n + 1)` with `n` people already waiting; an impatient
    /// pedestrian presses with probability 15/16.
    Probabilistic,
}

// ── Stop condition ────────────────────────────────────────────────────────────

/// When the driver loop stops.  At least one bound must be set.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StopCondition {
    /// Events with a timestamp `<= horizon` run; the first later event ends
    /// the run without executing.
    pub horizon: Option<f64>,
    /// Maximum number of dispatched events.
    pub max_events: Option<u64>,
    /// Stop spawning after this many pedestrians (and, separately, this many
    /// automobiles); the run then ends when the queue drains.
    pub max_arrivals: Option<u64>,
}

impl Default for StopCondition {
    fn default() -> Self {
        Self { horizon: Some(8.0 * 3_600.0), max_events: None, max_arrivals: None }
    }
}

// ── CrosswalkConfig ───────────────────────────────────────────────────────────

/// Everything a run needs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrosswalkConfig {
    /// Pedestrian arrivals per second, per stream.
    pub ped_rate: f64,
    /// Automobile arrivals per second.
    pub car_rate: f64,

    pub impatience_secs:  f64,
    pub impatience_retry: ImpatienceRetry,
    pub crossing:         CrossingTime,

    /// Length of the walk (crosswalk Green) phase.
    pub walk_secs: f64,
    /// Interval between a press and the walk phase while traffic clears.
    /// Zero switches straight to Green.
    pub clearance_secs: f64,
    /// Guaranteed traffic flow after a walk phase before another may start.
    pub min_red_secs: f64,

    /// Maximum concurrent crossers.
    pub capacity: u32,

    pub sides:  SideMode,
    pub button: ButtonPressModel,
    /// Only admit a pedestrian mid-walk if it can finish before the walk
    /// phase ends.
    pub require_time_to_cross: bool,

    pub stop: StopCondition,
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for CrosswalkConfig {
    fn default() -> Self {
        Self {
            ped_rate:              1.0 / 20.0,
            car_rate:              1.0 / 15.0,
            impatience_secs:       60.0,
            impatience_retry:      ImpatienceRetry::Fixed,
            crossing:              CrossingTime::default(),
            walk_secs:             18.0,
            clearance_secs:        8.0,
            min_red_secs:          35.0,
            capacity:              20,
            sides:                 SideMode::Single,
            button:                ButtonPressModel::Always,
            require_time_to_cross: false,
            stop:                  StopCondition::default(),
            seed:                  42,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

impl CrosswalkConfig {
    /// Reject configurations that cannot be simulated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("ped_rate", self.ped_rate)?;
        positive("car_rate", self.car_rate)?;
        positive("impatience_secs", self.impatience_secs)?;
        positive("walk_secs", self.walk_secs)?;
        non_negative("clearance_secs", self.clearance_secs)?;
        non_negative("min_red_secs", self.min_red_secs)?;

        match self.crossing {
            CrossingTime::Fixed { secs } => positive("crossing.secs", secs)?,
            CrossingTime::Walking { street_width_ft, min_speed, max_speed } => {
                positive("crossing.street_width_ft", street_width_ft)?;
                positive("crossing.min_speed", min_speed)?;
                positive("crossing.max_speed", max_speed)?;
                if min_speed > max_speed {
                    return Err(ConfigError::EmptySpeedRange { min: min_speed, max: max_speed });
                }
            }
        }

        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let stop = &self.stop;
        if let Some(h) = stop.horizon {
            positive("stop.horizon", h)?;
        }
        if stop.horizon.is_none() && stop.max_events.is_none() && stop.max_arrivals.is_none() {
            return Err(ConfigError::NoStopCondition);
        }
        Ok(())
    }

    /// The horizon as a timestamp, if one is set.
    pub fn horizon(&self) -> Option<crate::SimTime> {
        self.stop.horizon.map(crate::SimTime)
    }
}
