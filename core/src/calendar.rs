use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AttendanceError;

pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Number of calendar days in `month` (1-based) of `year`.
/// Returns 0 for a month outside 1..=12 or a year chrono cannot represent.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    let (next_year, next_month) = if month == 12 {
        match year.checked_add(1) {
            Some(next) => (next, 1),
            None => return 0,
        }
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

pub fn month_abbrev(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREVS.get(i as usize))
        .copied()
        .unwrap_or("")
}

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// A calendar month key. Serialized as `YYYY-MM`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Rejects months outside 1..=12 and years chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Result<Self, AttendanceError> {
        if (1..=12).contains(&month) && NaiveDate::from_ymd_opt(year, month, 1).is_some() {
            Ok(Self { year, month })
        } else {
            Err(AttendanceError::InvalidYearMonth(format!("{}-{}", year, month)))
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AttendanceError::InvalidYearMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = AttendanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Parses a calendar day relative to `today`.
/// Accepts `today`, `yesterday`, `-Nd` (N days back) and `YYYY-MM-DD`.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate, AttendanceError> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => {
            return today
                .pred_opt()
                .ok_or_else(|| AttendanceError::InvalidDate(input.to_string()))
        }
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('-') {
        if let Some(num_str) = rest.strip_suffix('d') {
            let invalid = || AttendanceError::InvalidDate(input.to_string());
            let count: i64 = num_str.parse().map_err(|_| invalid())?;
            return Duration::try_days(count)
                .and_then(|back| today.checked_sub_signed(back))
                .ok_or_else(invalid);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| AttendanceError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 0), 0);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2025-06".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 6);
        assert_eq!(ym.to_string(), "2025-06");
        assert_eq!(ym.days(), 30);

        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025".parse::<YearMonth>().is_err());
        assert!("june".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_contains() {
        let ym = YearMonth::of(date(2025, 6, 15));
        assert!(ym.contains(date(2025, 6, 1)));
        assert!(ym.contains(date(2025, 6, 30)));
        assert!(!ym.contains(date(2025, 7, 1)));
        assert!(!ym.contains(date(2024, 6, 1)));
        assert_eq!(ym.first_day(), Some(date(2025, 6, 1)));
        assert_eq!(ym.last_day(), Some(date(2025, 6, 30)));
    }

    #[test]
    fn test_year_month_serde_as_string() {
        let ym = YearMonth::new(2024, 2).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2024-02\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
        assert!(serde_json::from_str::<YearMonth>("\"2024-00\"").is_err());
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_abbrev(1), "Jan");
        assert_eq!(month_abbrev(12), "Dec");
        assert_eq!(month_abbrev(0), "");
        assert_eq!(month_name(9), "September");
    }

    #[test]
    fn test_parse_day() {
        let today = date(2025, 3, 1);
        assert_eq!(parse_day("today", today).unwrap(), today);
        assert_eq!(parse_day("yesterday", today).unwrap(), date(2025, 2, 28));
        assert_eq!(parse_day("-7d", today).unwrap(), date(2025, 2, 22));
        assert_eq!(parse_day("2024-12-31", today).unwrap(), date(2024, 12, 31));
        assert!(parse_day("tomorrow-ish", today).is_err());
        assert!(parse_day("-xd", today).is_err());
    }

    #[test]
    fn test_parse_day_out_of_range_is_error() {
        let today = date(2025, 6, 1);
        assert_eq!(
            parse_day("-9999999999d", today),
            Err(AttendanceError::InvalidDate("-9999999999d".to_string()))
        );
        assert!(parse_day(&format!("-{}d", i64::MAX), today).is_err());
        assert!(parse_day("yesterday", NaiveDate::MIN).is_err());
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        assert_eq!(days_in_month(i32::MAX, 12), 0);
        assert_eq!(days_in_month(i32::MIN, 1), 0);
        assert!("2147483647-12".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(i32::MIN, 1).is_err());

        // last representable December has no following January
        let edge = YearMonth::of(NaiveDate::MAX);
        assert_eq!(edge.month(), 12);
        assert_eq!(edge.days(), 0);
    }
}
