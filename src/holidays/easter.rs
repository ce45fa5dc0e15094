use chrono::NaiveDate;

use crate::{holidays::date, prelude::*};

/// Western (Gregorian) Easter Sunday, anonymous Gregorian computus.
pub fn easter_sunday(year: i32) -> Result<NaiveDate> {
    ensure!(year >= 1583, "Gregorian Easter is undefined for {year}");

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    date(year, u32::try_from(month)?, u32::try_from(day)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_easters() {
        for (year, month, day) in [
            (2000, 4, 23),
            (2008, 3, 23),
            (2011, 4, 24),
            (2016, 3, 27),
            (2019, 4, 21),
            (2024, 3, 31),
            (2025, 4, 20),
            (2038, 4, 25),
        ] {
            assert_eq!(easter_sunday(year).unwrap(), date(year, month, day).unwrap(), "{year}");
        }
    }

    #[test]
    fn test_julian_years_rejected() {
        assert!(easter_sunday(1500).is_err());
    }
}
