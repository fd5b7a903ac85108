//! Street side a pedestrian arrives on.
//!
//! The side is tracked on every pedestrian and carried by its spawn stream,
//! but no rule in the crosswalk model depends on it.  [`SideMode`] decides
//! whether one or two arrival streams feed the crosswalk.

use std::fmt;

/// The curb a pedestrian waits on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[default]
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::A => "A",
            Side::B => "B",
        };
        f.write_str(s)
    }
}

/// How pedestrian arrivals are split across the two curbs.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SideMode {
    /// One arrival stream; every pedestrian is on side A.
    #[default]
    Single,
    /// Two independent arrival streams, one per side, each at the configured
    /// pedestrian rate.
    Dual,
}

impl SideMode {
    /// The sides that own an arrival stream under this mode.
    pub fn sides(self) -> &'static [Side] {
        match self {
            SideMode::Single => &[Side::A],
            SideMode::Dual => &[Side::A, Side::B],
        }
    }
}
