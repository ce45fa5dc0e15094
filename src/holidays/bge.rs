use chrono::{Days, Weekday};

use crate::{
    holidays::{Holidays, date, easter::easter_sunday, nth_weekday},
    prelude::*,
};

/// Patch the federal calendar into the one the utility bills by.
///
/// Martin Luther King Jr. Day, Columbus Day and November 11th are removed; Good Friday is
/// added. Only those exact dates are touched: a weekend-observed Veterans Day stays in.
pub fn derive(mut holidays: Holidays, year: i32) -> Result<Holidays> {
    holidays.remove(nth_weekday(year, 1, Weekday::Mon, 3)?);
    holidays.remove(nth_weekday(year, 10, Weekday::Mon, 2)?);
    holidays.remove(date(year, 11, 11)?);

    let good_friday = easter_sunday(year)?
        .checked_sub_days(Days::new(2))
        .context("date underflow")?;
    holidays.insert(good_friday, "Good Friday");

    Ok(holidays)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};

    use super::*;
    use crate::holidays::{HolidayProvider, united_states::UnitedStates};

    fn bge(year: i32) -> Holidays {
        derive(UnitedStates.holidays_for(year).unwrap(), year).unwrap()
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        date(year, month, day).unwrap()
    }

    #[test]
    fn test_removed_holidays() {
        for year in 2015..=2030 {
            let base = UnitedStates.holidays_for(year).unwrap();
            let holidays = bge(year);
            for removed in [
                nth_weekday(year, 1, Weekday::Mon, 3).unwrap(),
                nth_weekday(year, 10, Weekday::Mon, 2).unwrap(),
                ymd(year, 11, 11),
            ] {
                assert!(base.contains(removed), "{removed}");
                assert!(!holidays.contains(removed), "{removed}");
            }
        }
    }

    #[test]
    fn test_good_friday() {
        for year in 2015..=2030 {
            let good_friday = easter_sunday(year).unwrap() - Days::new(2);
            assert_eq!(good_friday.weekday(), Weekday::Fri);
            assert_eq!(bge(year).label(good_friday), Some("Good Friday"));
        }
        assert!(bge(2024).contains(ymd(2024, 3, 29)));
    }

    #[test]
    fn test_other_holidays_kept() {
        let holidays = bge(2024);
        assert!(holidays.contains(ymd(2024, 7, 4)));
        assert!(holidays.contains(ymd(2024, 11, 28)));
        assert!(holidays.contains(ymd(2024, 12, 25)));
        assert_eq!(holidays.len(), 9);
    }

    #[test]
    fn test_observed_veterans_day_kept() {
        // November 11th, 2023 was a Saturday.
        let holidays = bge(2023);
        assert!(!holidays.contains(ymd(2023, 11, 11)));
        assert!(holidays.contains(ymd(2023, 11, 10)));
    }

    #[test]
    fn test_removal_is_idempotent() {
        let once = bge(2024);
        assert_eq!(derive(once.clone(), 2024).unwrap(), once);
    }
}
