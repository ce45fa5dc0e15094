use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Winter,
    Summer,
}

impl Season {
    pub const ALL: [Self; 2] = [Self::Winter, Self::Summer];

    /// Summer runs from June 1st through September 30th inclusive, the rest of the year is winter.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        if (6..=9).contains(&date.month()) { Self::Summer } else { Self::Winter }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Winter => "Winter",
            Self::Summer => "Summer",
        })
    }
}
