use std::collections::BTreeMap;

use crate::{
    prelude::*,
    quantity::rate::KilowattHourRate,
    tariff::{schedule::Schedule, season::Season, time_of_use::TimeOfUse},
};

pub type RateKey = (Schedule, Season, TimeOfUse);

/// Sparse price table.
///
/// Only the combinations [`Schedule::windows`] can produce are populated. Pricing a missing
/// combination means the classifier and the table disagree, which is a bug, so [`RateTable::price`]
/// panics instead of defaulting. Tables built from configuration go through
/// [`RateTable::validate`] first.
#[derive(Clone, Debug, PartialEq)]
pub struct RateTable(BTreeMap<RateKey, KilowattHourRate>);

impl RateTable {
    /// Published BGE residential energy rates.
    #[must_use]
    pub fn bge() -> Self {
        use Schedule::{EV, EVP, R, RL};
        use Season::{Summer, Winter};
        use TimeOfUse::{OffPeak, Peak, Shoulder};

        Self(BTreeMap::from(
            [
                ((R, Summer, OffPeak), 0.06722),
                ((R, Winter, OffPeak), 0.07805),
                ((RL, Summer, Peak), 0.08465),
                ((RL, Summer, Shoulder), 0.06069),
                ((RL, Summer, OffPeak), 0.05744),
                ((RL, Winter, Peak), 0.09053),
                ((RL, Winter, Shoulder), 0.07944),
                ((RL, Winter, OffPeak), 0.07166),
                ((EV, Summer, Peak), 0.1227),
                ((EV, Summer, OffPeak), 0.03886),
                ((EV, Winter, Peak), 0.18474),
                ((EV, Winter, OffPeak), 0.0426),
                ((EVP, Summer, Peak), 0.03886),
                ((EVP, Summer, OffPeak), 0.03886),
                ((EVP, Winter, Peak), 0.0426),
                ((EVP, Winter, OffPeak), 0.0426),
            ]
            .map(|(key, rate)| (key, KilowattHourRate(rate))),
        ))
    }

    pub fn set(&mut self, key: RateKey, rate: KilowattHourRate) {
        self.0.insert(key, rate);
    }

    #[must_use]
    pub fn get(&self, key: RateKey) -> Option<KilowattHourRate> {
        self.0.get(&key).copied()
    }

    /// # Panics
    ///
    /// When the combination is not priced.
    #[must_use]
    pub fn price(&self, key: RateKey) -> KilowattHourRate {
        let (schedule, season, time_of_use) = key;
        self.get(key).unwrap_or_else(|| {
            panic!("no rate for {schedule} / {season} / {time_of_use}: classifier produced an unpriced period")
        })
    }

    /// Check that every reachable combination is priced with a finite non-negative rate,
    /// and that nothing else is priced.
    pub fn validate(&self) -> Result {
        for (schedule, season, time_of_use) in self.0.keys().copied() {
            ensure!(
                schedule.windows(season).periods().any(|period| period == time_of_use),
                "{schedule} / {season} / {time_of_use} can never be billed",
            );
        }

        for schedule in Schedule::ALL {
            for season in Season::ALL {
                for time_of_use in schedule.windows(season).periods() {
                    let rate = self.get((schedule, season, time_of_use)).with_context(|| {
                        format!("rate table is missing {schedule} / {season} / {time_of_use}")
                    })?;
                    ensure!(
                        rate.0.is_finite() && rate.0 >= 0.0,
                        "{schedule} / {season} / {time_of_use} has an invalid rate: {}",
                        rate.0,
                    );
                }
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RateKey, KilowattHourRate)> {
        self.0.iter().map(|(key, rate)| (*key, *rate))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::bge()
    }
}
