use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::tariff::{schedule::Schedule, season::Season};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfUse {
    Peak,
    Shoulder,
    OffPeak,
}

impl TimeOfUse {
    /// Peak and shoulder only apply Monday through Friday on non-holidays.
    #[must_use]
    pub fn classify(schedule: Schedule, season: Season, at: NaiveDateTime, is_holiday: bool) -> Self {
        let is_business_day = at.weekday().num_days_from_monday() < 5 && !is_holiday;
        if is_business_day { schedule.windows(season).period_at(at.hour()) } else { Self::OffPeak }
    }
}

impl Display for TimeOfUse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Peak => "Peak",
            Self::Shoulder => "Shoulder",
            Self::OffPeak => "Off-peak",
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn classify(schedule: Schedule, at: NaiveDateTime) -> TimeOfUse {
        TimeOfUse::classify(schedule, Season::of(at.date()), at, false)
    }

    #[test]
    fn test_rl_summer_wednesday() {
        // 2024-07-17 is a Wednesday.
        assert_eq!(classify(Schedule::RL, at(7, 17, 14)), TimeOfUse::Peak);
        assert_eq!(classify(Schedule::RL, at(7, 17, 8)), TimeOfUse::Shoulder);
        assert_eq!(classify(Schedule::RL, at(7, 17, 21)), TimeOfUse::Shoulder);
        assert_eq!(classify(Schedule::RL, at(7, 17, 23)), TimeOfUse::OffPeak);
        assert_eq!(classify(Schedule::RL, at(7, 17, 2)), TimeOfUse::OffPeak);
    }

    #[test]
    fn test_weekend_is_off_peak() {
        // 2024-07-20 is a Saturday, 2024-01-21 a Sunday.
        for schedule in Schedule::ALL {
            for hour in 0..24 {
                assert_eq!(classify(schedule, at(7, 20, hour)), TimeOfUse::OffPeak);
                assert_eq!(classify(schedule, at(1, 21, hour)), TimeOfUse::OffPeak);
            }
        }
    }

    #[test]
    fn test_holiday_is_off_peak() {
        let at = at(7, 17, 14);
        for schedule in Schedule::ALL {
            assert_eq!(TimeOfUse::classify(schedule, Season::Summer, at, true), TimeOfUse::OffPeak);
        }
    }

    #[test]
    fn test_r_is_always_off_peak() {
        let mut at = at(1, 1, 0);
        while at.year() == 2024 {
            assert_eq!(classify(Schedule::R, at), TimeOfUse::OffPeak);
            at += chrono::TimeDelta::hours(1);
        }
    }

    #[test]
    fn test_rl_winter() {
        // 2024-01-17 is a Wednesday.
        assert_eq!(classify(Schedule::RL, at(1, 17, 6)), TimeOfUse::OffPeak);
        assert_eq!(classify(Schedule::RL, at(1, 17, 7)), TimeOfUse::Peak);
        assert_eq!(classify(Schedule::RL, at(1, 17, 11)), TimeOfUse::Shoulder);
        assert_eq!(classify(Schedule::RL, at(1, 17, 16)), TimeOfUse::Shoulder);
        assert_eq!(classify(Schedule::RL, at(1, 17, 17)), TimeOfUse::Peak);
        assert_eq!(classify(Schedule::RL, at(1, 17, 21)), TimeOfUse::OffPeak);
    }

    #[test]
    fn test_ev_has_no_shoulder() {
        for schedule in [Schedule::EV, Schedule::EVP] {
            assert_eq!(classify(schedule, at(7, 17, 8)), TimeOfUse::OffPeak);
            assert_eq!(classify(schedule, at(7, 17, 19)), TimeOfUse::Peak);
            assert_eq!(classify(schedule, at(7, 17, 20)), TimeOfUse::OffPeak);
            assert_eq!(classify(schedule, at(1, 17, 12)), TimeOfUse::OffPeak);
            assert_eq!(classify(schedule, at(1, 17, 20)), TimeOfUse::Peak);
        }
    }
}
