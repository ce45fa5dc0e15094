//! Projected bills under each rate schedule.

use std::collections::BTreeMap;

use crate::{
    holidays::HolidayProvider,
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
    tariff::{Tariff, schedule::Schedule, season::Season, time_of_use::TimeOfUse},
    usage::UsageRecord,
};

/// Per-interval usage correction added before pricing, in kilowatt-hours.
pub const DEFAULT_FIXED_ADJUSTMENT: KilowattHours = KilowattHours(0.07);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PeriodTotal {
    pub n_intervals: usize,

    /// Metered usage, without the adjustment.
    pub usage: KilowattHours,

    pub cost: Cost,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bill {
    pub total: Cost,
    pub periods: BTreeMap<(Season, TimeOfUse), PeriodTotal>,
}

impl Bill {
    fn add(&mut self, season: Season, time_of_use: TimeOfUse, usage: KilowattHours, cost: Cost) {
        let period = self.periods.entry((season, time_of_use)).or_default();
        period.n_intervals += 1;
        period.usage += usage;
        period.cost += cost;
        self.total += cost;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Estimate {
    pub n_records: usize,
    pub fixed_adjustment: KilowattHours,

    /// Ordered R, RL, EV, EVP.
    pub bills: BTreeMap<Schedule, Bill>,
}

impl Estimate {
    #[must_use]
    pub fn total(&self, schedule: Schedule) -> Cost {
        self.bills.get(&schedule).map_or(Cost::ZERO, |bill| bill.total)
    }

    /// Schedule with the lowest projected bill.
    #[must_use]
    pub fn cheapest(&self) -> Option<Schedule> {
        self.bills
            .iter()
            .min_by(|(_, lhs), (_, rhs)| lhs.total.0.total_cmp(&rhs.total.0))
            .map(|(schedule, _)| *schedule)
    }
}

/// Price every record under every schedule and sum per schedule.
///
/// Each record is billed as `rate × (usage + fixed_adjustment)`.
#[instrument(skip_all, fields(n_records = records.len()))]
pub fn estimate<P: HolidayProvider>(
    tariff: &mut Tariff<P>,
    records: &[UsageRecord],
    fixed_adjustment: KilowattHours,
) -> Result<Estimate> {
    let mut bills: BTreeMap<Schedule, Bill> =
        Schedule::ALL.into_iter().map(|schedule| (schedule, Bill::default())).collect();

    for record in records {
        for (schedule, bill) in &mut bills {
            let (season, time_of_use) = tariff.classify(record.start, *schedule)?;
            let rate = tariff.rates().price((*schedule, season, time_of_use));
            bill.add(season, time_of_use, record.usage, rate * (record.usage + fixed_adjustment));
        }
    }

    for (schedule, bill) in &bills {
        info!(%schedule, total = %bill.total, "estimated");
    }
    Ok(Estimate { n_records: records.len(), fixed_adjustment, bills })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    use super::*;
    use crate::{holidays::united_states::UnitedStates, tariff::rates::RateTable};

    fn tariff() -> Tariff {
        Tariff::new(UnitedStates, RateTable::bge()).unwrap()
    }

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn record(start: NaiveDateTime, usage: f64) -> UsageRecord {
        UsageRecord { start, usage: KilowattHours(usage) }
    }

    #[test]
    fn test_zero_usage_is_billed_the_adjustment() {
        let records = [record(at(2024, 7, 20, 2), 0.0)];
        let estimate = estimate(&mut tariff(), &records, DEFAULT_FIXED_ADJUSTMENT).unwrap();
        assert_abs_diff_eq!(estimate.total(Schedule::R).0, 0.06722 * 0.07);
    }

    #[test]
    fn test_single_interval_all_schedules() {
        // Wednesday summer afternoon: peak on every time-of-use schedule.
        let records = [record(at(2024, 7, 17, 14), 1.93)];
        let estimate = estimate(&mut tariff(), &records, DEFAULT_FIXED_ADJUSTMENT).unwrap();
        assert_abs_diff_eq!(estimate.total(Schedule::R).0, 0.06722 * 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(estimate.total(Schedule::RL).0, 0.08465 * 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(estimate.total(Schedule::EV).0, 0.1227 * 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(estimate.total(Schedule::EVP).0, 0.03886 * 2.0, epsilon = 1e-12);
        assert_eq!(estimate.cheapest(), Some(Schedule::EVP));
    }

    #[test]
    fn test_periods_breakdown() {
        let records = [
            record(at(2024, 7, 17, 8), 1.0),
            record(at(2024, 7, 17, 14), 2.0),
            record(at(2024, 7, 17, 15), 3.0),
            record(at(2024, 7, 20, 14), 4.0),
        ];
        let estimate = estimate(&mut tariff(), &records, KilowattHours(0.0)).unwrap();

        let rl = &estimate.bills[&Schedule::RL];
        let peak = rl.periods[&(Season::Summer, TimeOfUse::Peak)];
        assert_eq!(peak.n_intervals, 2);
        assert_abs_diff_eq!(peak.usage.0, 5.0);
        assert_abs_diff_eq!(rl.periods[&(Season::Summer, TimeOfUse::Shoulder)].usage.0, 1.0);
        assert_abs_diff_eq!(rl.periods[&(Season::Summer, TimeOfUse::OffPeak)].usage.0, 4.0);
        assert_abs_diff_eq!(
            rl.total.0,
            0.06069 * 1.0 + 0.08465 * 5.0 + 0.05744 * 4.0,
            epsilon = 1e-12,
        );

        let r = &estimate.bills[&Schedule::R];
        assert_eq!(r.periods.len(), 1);
        assert_eq!(r.periods[&(Season::Summer, TimeOfUse::OffPeak)].n_intervals, 4);
    }

    #[test]
    fn test_year_of_hourly_usage() {
        let mut start = at(2023, 1, 1, 0);
        let mut records = Vec::new();
        while start < at(2024, 1, 1, 0) {
            records.push(record(start, 1.0));
            start += TimeDelta::hours(1);
        }
        let estimate = estimate(&mut tariff(), &records, DEFAULT_FIXED_ADJUSTMENT).unwrap();

        assert_eq!(estimate.n_records, 8760);
        let summer_hours = (30 + 31 + 31 + 30) * 24;
        let winter_hours = 8760 - summer_hours;
        assert_abs_diff_eq!(
            estimate.total(Schedule::R).0,
            1.07 * (0.06722 * f64::from(summer_hours) + 0.07805 * f64::from(winter_hours)),
            epsilon = 1e-6,
        );
        for bill in estimate.bills.values() {
            let n_intervals: usize = bill.periods.values().map(|period| period.n_intervals).sum();
            assert_eq!(n_intervals, 8760);
        }
    }

    #[test]
    fn test_empty_input() {
        let estimate = estimate(&mut tariff(), &[], DEFAULT_FIXED_ADJUSTMENT).unwrap();
        assert_eq!(estimate.bills.len(), 4);
        assert_eq!(estimate.total(Schedule::EV), Cost::ZERO);
    }
}
