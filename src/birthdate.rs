// 🎂 Birthdate Validator - YYYYMMDD with calendar rules
// Checks run in a fixed order and stop at the first failure.

use crate::error::BirthdateError;
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Earliest birth year accepted
pub const MIN_YEAR: i32 = 1900;

// ============================================================================
// BIRTHDATE VALUE
// ============================================================================

/// A calendar-valid birthdate decoded from an ID number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Birthdate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Birthdate {
    /// The same date as a chrono value
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for Birthdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{:02}月{:02}日", self.year, self.month, self.day)
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Current calendar year from the local clock
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Validate a YYYYMMDD field against the local clock's current year
pub fn validate_birthdate(date_str: &str) -> Result<Birthdate, BirthdateError> {
    validate_birthdate_as_of(date_str, current_year())
}

/// Validate a YYYYMMDD field, treating `current_year` as the latest allowed year
pub fn validate_birthdate_as_of(date_str: &str, current_year: i32) -> Result<Birthdate, BirthdateError> {
    if date_str.len() != 8 || !date_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BirthdateError::MalformedDate);
    }

    // All ASCII digits, so byte slicing is safe and parsing cannot fail
    let year: i32 = date_str[0..4].parse().map_err(|_| BirthdateError::MalformedDate)?;
    let month: u32 = date_str[4..6].parse().map_err(|_| BirthdateError::MalformedDate)?;
    let day: u32 = date_str[6..8].parse().map_err(|_| BirthdateError::MalformedDate)?;

    if year < MIN_YEAR || year > current_year {
        return Err(BirthdateError::YearOutOfRange { current_year });
    }

    if !(1..=12).contains(&month) {
        return Err(BirthdateError::InvalidMonth);
    }

    if !(1..=31).contains(&day) {
        return Err(BirthdateError::InvalidDay { month });
    }

    if matches!(month, 4 | 6 | 9 | 11) && day > 30 {
        return Err(BirthdateError::InvalidDay { month });
    }

    if month == 2 {
        let leap = is_leap_year(year);
        let max_day = if leap { 29 } else { 28 };
        if day > max_day {
            return Err(BirthdateError::InvalidFebruaryDay { year, leap });
        }
    }

    // Final word goes to the calendar itself
    let birthdate = Birthdate { year, month, day };
    if birthdate.to_naive_date().is_none() {
        return Err(BirthdateError::CalendarConstructionFailed);
    }

    Ok(birthdate)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i32 = 2026;

    #[test]
    fn test_valid_date_display() {
        let date = validate_birthdate_as_of("19900307", NOW).unwrap();
        assert_eq!(date, Birthdate { year: 1990, month: 3, day: 7 });
        assert_eq!(date.to_string(), "1990年03月07日");
    }

    #[test]
    fn test_leap_year_boundary() {
        assert!(validate_birthdate_as_of("19720229", NOW).is_ok());
        assert_eq!(
            validate_birthdate_as_of("19730229", NOW),
            Err(BirthdateError::InvalidFebruaryDay { year: 1973, leap: false })
        );
    }

    #[test]
    fn test_century_leap_rules() {
        assert!(validate_birthdate_as_of("20000229", NOW).is_ok());
        assert_eq!(
            validate_birthdate_as_of("19000229", NOW),
            Err(BirthdateError::InvalidFebruaryDay { year: 1900, leap: false })
        );
        assert_eq!(
            validate_birthdate_as_of("19720230", NOW),
            Err(BirthdateError::InvalidFebruaryDay { year: 1972, leap: true })
        );
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(1972));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(1973));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(validate_birthdate_as_of("1990030", NOW), Err(BirthdateError::MalformedDate));
        assert_eq!(validate_birthdate_as_of("1990O307", NOW), Err(BirthdateError::MalformedDate));
        assert_eq!(validate_birthdate_as_of("", NOW), Err(BirthdateError::MalformedDate));
        assert_eq!(validate_birthdate_as_of("+1990307", NOW), Err(BirthdateError::MalformedDate));
    }

    #[test]
    fn test_year_range() {
        assert_eq!(
            validate_birthdate_as_of("18991231", NOW),
            Err(BirthdateError::YearOutOfRange { current_year: NOW })
        );
        assert_eq!(
            validate_birthdate_as_of("20270101", NOW),
            Err(BirthdateError::YearOutOfRange { current_year: NOW })
        );
        assert!(validate_birthdate_as_of("19000101", NOW).is_ok());
        assert!(validate_birthdate_as_of("20260101", NOW).is_ok());
    }

    #[test]
    fn test_month_and_day_ranges() {
        assert_eq!(validate_birthdate_as_of("19901301", NOW), Err(BirthdateError::InvalidMonth));
        assert_eq!(validate_birthdate_as_of("19900001", NOW), Err(BirthdateError::InvalidMonth));
        assert_eq!(validate_birthdate_as_of("19900100", NOW), Err(BirthdateError::InvalidDay { month: 1 }));
        assert_eq!(validate_birthdate_as_of("19900132", NOW), Err(BirthdateError::InvalidDay { month: 1 }));
        assert!(validate_birthdate_as_of("19900131", NOW).is_ok());
    }

    #[test]
    fn test_thirty_day_months() {
        for month in ["04", "06", "09", "11"] {
            let m: u32 = month.parse().unwrap();
            assert!(validate_birthdate_as_of(&format!("1990{}30", month), NOW).is_ok());
            assert_eq!(
                validate_birthdate_as_of(&format!("1990{}31", month), NOW),
                Err(BirthdateError::InvalidDay { month: m })
            );
        }
    }

    #[test]
    fn test_order_short_circuits() {
        // Bad year wins over bad month
        assert_eq!(
            validate_birthdate_as_of("18001399", NOW),
            Err(BirthdateError::YearOutOfRange { current_year: NOW })
        );
        // Bad month wins over bad day
        assert_eq!(validate_birthdate_as_of("19901399", NOW), Err(BirthdateError::InvalidMonth));
    }

    #[test]
    fn test_current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
