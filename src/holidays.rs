//! Holiday calendars used to gate time-of-use periods.
//!
//! The utility prices holidays as off-peak all day. Its calendar starts from the US
//! federal one and patches a handful of entries, see [`bge::derive`].

pub mod bge;
pub mod easter;
pub mod united_states;

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::prelude::*;

/// Holidays of a single year, keyed by calendar date.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Holidays(BTreeMap<NaiveDate, String>);

impl Holidays {
    pub fn insert(&mut self, date: NaiveDate, label: impl Into<String>) {
        self.0.insert(date, label.into());
    }

    /// Removing a date that is not a holiday is a no-op.
    pub fn remove(&mut self, date: NaiveDate) -> Option<String> {
        self.0.remove(&date)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }

    #[must_use]
    pub fn label(&self, date: NaiveDate) -> Option<&str> {
        self.0.get(&date).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.0.iter().map(|(date, label)| (*date, label.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Source of a base (national) holiday calendar.
pub trait HolidayProvider {
    /// Fails when the provider cannot produce the year. There is no fallback.
    fn holidays_for(&self, year: i32) -> Result<Holidays>;
}

/// Per-year memo of the derived utility holidays.
///
/// Years before 1583 always fail: Good Friday is only defined for the Gregorian calendar.
pub struct HolidayCalendar<P> {
    provider: P,
    years: HashMap<i32, Holidays>,
}

impl<P: HolidayProvider> HolidayCalendar<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, years: HashMap::new() }
    }

    pub fn holidays(&mut self, year: i32) -> Result<&Holidays> {
        match self.years.entry(year) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let base = self
                    .provider
                    .holidays_for(year)
                    .with_context(|| format!("failed to build the base holiday calendar for {year}"))?;
                let holidays = bge::derive(base, year)?;
                debug!(year, n_holidays = holidays.len(), "derived the holiday calendar");
                Ok(&*entry.insert(holidays))
            }
        }
    }

    pub fn contains(&mut self, date: NaiveDate) -> Result<bool> {
        Ok(self.holidays(date.year())?.contains(date))
    }
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("{year:04}-{month:02}-{day:02} is not a representable date"))
}

/// The `n`-th (1-based) given weekday of the month.
pub(crate) fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Result<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
        .with_context(|| format!("there is no {weekday} #{n} in {year:04}-{month:02}"))
}

pub(crate) fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Result<NaiveDate> {
    nth_weekday(year, month, weekday, 5).or_else(|_| nth_weekday(year, month, weekday, 4))
}
