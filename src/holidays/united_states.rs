use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::{
    holidays::{HolidayProvider, Holidays, date, last_weekday, nth_weekday},
    prelude::*,
};

/// US federal holidays, including weekend observance.
///
/// Follows the current (post-1971) Monday rules for every year, so earlier fixed-date
/// observances such as February 22nd or October 12th are not reproduced.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnitedStates;

impl HolidayProvider for UnitedStates {
    fn holidays_for(&self, year: i32) -> Result<Holidays> {
        let mut holidays = Holidays::default();

        // A Saturday New Year's Day is observed on the last day of the previous year.
        let new_year = date(year, 1, 1)?;
        holidays.insert(new_year, "New Year's Day");
        if new_year.weekday() == Weekday::Sun {
            holidays.insert(next_day(new_year)?, "New Year's Day (Observed)");
        }
        let new_years_eve = date(year, 12, 31)?;
        if new_years_eve.weekday() == Weekday::Fri {
            holidays.insert(new_years_eve, "New Year's Day (Observed)");
        }

        if year >= 1986 {
            holidays.insert(nth_weekday(year, 1, Weekday::Mon, 3)?, "Martin Luther King Jr. Day");
        }
        holidays.insert(nth_weekday(year, 2, Weekday::Mon, 3)?, "Washington's Birthday");
        holidays.insert(last_weekday(year, 5, Weekday::Mon)?, "Memorial Day");
        if year >= 2021 {
            observe(&mut holidays, date(year, 6, 19)?, "Juneteenth National Independence Day")?;
        }
        observe(&mut holidays, date(year, 7, 4)?, "Independence Day")?;
        holidays.insert(nth_weekday(year, 9, Weekday::Mon, 1)?, "Labor Day");
        holidays.insert(nth_weekday(year, 10, Weekday::Mon, 2)?, "Columbus Day");
        observe(&mut holidays, date(year, 11, 11)?, "Veterans Day")?;
        holidays.insert(nth_weekday(year, 11, Weekday::Thu, 4)?, "Thanksgiving");
        observe(&mut holidays, date(year, 12, 25)?, "Christmas Day")?;

        Ok(holidays)
    }
}

/// Insert the holiday and, when it falls on a weekend, the nearest weekday it is observed on.
fn observe(holidays: &mut Holidays, date: NaiveDate, label: &str) -> Result {
    holidays.insert(date, label);
    let observed = match date.weekday() {
        Weekday::Sat => date.pred_opt().context("date underflow")?,
        Weekday::Sun => next_day(date)?,
        _ => return Ok(()),
    };
    holidays.insert(observed, format!("{label} (Observed)"));
    Ok(())
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(1)).context("date overflow")
}
