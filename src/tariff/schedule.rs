use std::{
    fmt::{Display, Formatter},
    ops::Range,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::tariff::{season::Season, time_of_use::TimeOfUse};

/// Residential rate schedule.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String")]
pub enum Schedule {
    /// Flat residential service.
    R,

    /// Residential time-of-use.
    RL,

    /// Electric vehicle time-of-use.
    EV,

    /// Electric vehicle time-of-use, whole-house.
    EVP,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognized rate schedule `{0}` (expected one of R, RL, EV, EVP)")]
pub struct InvalidSchedule(pub String);

/// Clock-hour windows, half-open.
#[derive(Clone, Copy, Debug)]
pub struct Windows {
    pub peak: &'static [Range<u32>],
    pub shoulder: &'static [Range<u32>],
}

const NONE: &[Range<u32>] = &[];
const SUMMER_PEAK: &[Range<u32>] = &[10..20];
const SUMMER_SHOULDER: &[Range<u32>] = &[7..10, 20..23];
const WINTER_PEAK: &[Range<u32>] = &[7..11, 17..21];
const WINTER_SHOULDER: &[Range<u32>] = &[11..17];

impl Windows {
    /// Peak is checked before shoulder.
    #[must_use]
    pub fn period_at(&self, hour: u32) -> TimeOfUse {
        if self.peak.iter().any(|window| window.contains(&hour)) {
            TimeOfUse::Peak
        } else if self.shoulder.iter().any(|window| window.contains(&hour)) {
            TimeOfUse::Shoulder
        } else {
            TimeOfUse::OffPeak
        }
    }

    /// Periods these windows can yield.
    pub fn periods(&self) -> impl Iterator<Item = TimeOfUse> {
        [
            (!self.peak.is_empty()).then_some(TimeOfUse::Peak),
            (!self.shoulder.is_empty()).then_some(TimeOfUse::Shoulder),
            Some(TimeOfUse::OffPeak),
        ]
        .into_iter()
        .flatten()
    }
}

impl Schedule {
    /// In reporting order.
    pub const ALL: [Self; 4] = [Self::R, Self::RL, Self::EV, Self::EVP];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::R => "R",
            Self::RL => "RL",
            Self::EV => "EV",
            Self::EVP => "EVP",
        }
    }

    /// Peak and shoulder windows on business days.
    #[must_use]
    pub const fn windows(self, season: Season) -> Windows {
        let (peak, shoulder) = match (self, season) {
            (Self::R, _) => (NONE, NONE),
            (Self::RL, Season::Summer) => (SUMMER_PEAK, SUMMER_SHOULDER),
            (Self::RL, Season::Winter) => (WINTER_PEAK, WINTER_SHOULDER),
            (Self::EV | Self::EVP, Season::Summer) => (SUMMER_PEAK, NONE),
            (Self::EV | Self::EVP, Season::Winter) => (WINTER_PEAK, NONE),
        };
        Windows { peak, shoulder }
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Schedule {
    type Err = InvalidSchedule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|schedule| schedule.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InvalidSchedule(s.to_string()))
    }
}

impl TryFrom<String> for Schedule {
    type Error = InvalidSchedule;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
