//! Time-of-use classification and pricing.

pub mod rates;
pub mod schedule;
pub mod season;
pub mod time_of_use;

use chrono::NaiveDateTime;

use crate::{
    holidays::{HolidayCalendar, HolidayProvider, united_states::UnitedStates},
    prelude::*,
    quantity::rate::KilowattHourRate,
    tariff::{rates::RateTable, schedule::Schedule, season::Season, time_of_use::TimeOfUse},
};

pub struct Tariff<P = UnitedStates> {
    calendar: HolidayCalendar<P>,
    rates: RateTable,
}

impl<P: HolidayProvider> Tariff<P> {
    pub fn new(provider: P, rates: RateTable) -> Result<Self> {
        rates.validate()?;
        Ok(Self { calendar: HolidayCalendar::new(provider), rates })
    }

    #[must_use]
    pub const fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub const fn calendar(&mut self) -> &mut HolidayCalendar<P> {
        &mut self.calendar
    }

    pub fn classify(&mut self, at: NaiveDateTime, schedule: Schedule) -> Result<(Season, TimeOfUse)> {
        let season = Season::of(at.date());
        let is_holiday = self.calendar.contains(at.date())?;
        Ok((season, TimeOfUse::classify(schedule, season, at, is_holiday)))
    }

    pub fn rate(&mut self, at: NaiveDateTime, schedule: Schedule) -> Result<KilowattHourRate> {
        let (season, time_of_use) = self.classify(at, schedule)?;
        Ok(self.rates.price((schedule, season, time_of_use)))
    }
}
