//! Compiled-in memorial calendar.
//!
//! # Responsibility
//! - Declare the fixed month/day → label table.
//! - Provide the date-key encoding and pure lookup.
//!
//! # Invariants
//! - Table keys are literal strings, never parsed numbers: `"9.1"` is
//!   September 1st and `"9.18"` September 18th; no zero padding exists on
//!   either side of the dot, so keys cannot collide across month/day pairs.

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed memorial dates observed by the start page.
///
/// Labels are the user-facing strings shown by the UI shell; they are data,
/// not messages owned by this crate.
const MEMORIAL_DAYS: &[(&str, &str)] = &[
    ("4.4", "清明节"),
    ("5.12", "汶川大地震纪念日"),
    ("7.7", "中国人民抗日战争纪念日"),
    ("9.18", "九·一八事变纪念日"),
    ("12.13", "南京大屠杀死难者国家公祭日"),
];

static MEMORIAL_BY_KEY: Lazy<BTreeMap<&'static str, &'static str>> =
    Lazy::new(|| MEMORIAL_DAYS.iter().copied().collect());

/// Calendar position without a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    /// 1-12.
    pub month: u32,
    /// 1-31.
    pub day: u32,
}

impl MonthDay {
    /// Creates a validated month/day pair.
    pub fn try_new(month: u32, day: u32) -> Result<Self, MonthDayError> {
        if !(1..=12).contains(&month) {
            return Err(MonthDayError::MonthOutOfRange(month));
        }
        if !(1..=31).contains(&day) {
            return Err(MonthDayError::DayOutOfRange(day));
        }
        Ok(Self { month, day })
    }

    /// Resolves today's month/day in local time.
    pub fn today() -> Self {
        let now = Local::now().date_naive();
        Self {
            month: now.month(),
            day: now.day(),
        }
    }

    /// Renders the un-padded lookup key, e.g. `"4.4"` or `"12.13"`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.month, self.day)
    }
}

impl Display for MonthDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.month, self.day)
    }
}

/// Month/day range violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDayError {
    MonthOutOfRange(u32),
    DayOutOfRange(u32),
}

impl Display for MonthDayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonthOutOfRange(month) => write!(f, "month out of range 1-12: {month}"),
            Self::DayOutOfRange(day) => write!(f, "day out of range 1-31: {day}"),
        }
    }
}

impl Error for MonthDayError {}

/// Returns the memorial label for a date, if the table lists it.
pub fn memorial_for(date: MonthDay) -> Option<&'static str> {
    MEMORIAL_BY_KEY.get(date.key().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::{memorial_for, MonthDay, MonthDayError, MEMORIAL_DAYS};

    #[test]
    fn listed_dates_resolve_to_labels() {
        let date = MonthDay::try_new(4, 4).expect("valid date");
        assert_eq!(memorial_for(date), Some("清明节"));

        let date = MonthDay::try_new(12, 13).expect("valid date");
        assert_eq!(memorial_for(date), Some("南京大屠杀死难者国家公祭日"));
    }

    #[test]
    fn unlisted_dates_resolve_to_none() {
        let date = MonthDay::try_new(1, 1).expect("valid date");
        assert_eq!(memorial_for(date), None);
    }

    #[test]
    fn keys_are_never_zero_padded() {
        assert_eq!(MonthDay::try_new(9, 1).expect("valid date").key(), "9.1");
        assert_eq!(MonthDay::try_new(9, 18).expect("valid date").key(), "9.18");
        assert!(MEMORIAL_DAYS
            .iter()
            .all(|(key, _)| !key.contains(".0") && !key.starts_with('0')));
    }

    #[test]
    fn table_keys_round_trip_through_month_day_encoding() {
        for (key, _) in MEMORIAL_DAYS {
            let (month, day) = key.split_once('.').expect("key has one dot");
            let month: u32 = month.parse().expect("month parses");
            let day: u32 = day.parse().expect("day parses");
            let date = MonthDay::try_new(month, day).expect("table date is valid");
            assert_eq!(&date.key(), key);
        }
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(
            MonthDay::try_new(0, 5),
            Err(MonthDayError::MonthOutOfRange(0))
        );
        assert_eq!(
            MonthDay::try_new(13, 5),
            Err(MonthDayError::MonthOutOfRange(13))
        );
        assert_eq!(MonthDay::try_new(6, 0), Err(MonthDayError::DayOutOfRange(0)));
        assert_eq!(
            MonthDay::try_new(6, 32),
            Err(MonthDayError::DayOutOfRange(32))
        );
    }

    #[test]
    fn today_is_in_valid_range() {
        let today = MonthDay::today();
        assert!((1..=12).contains(&today.month));
        assert!((1..=31).contains(&today.day));
    }
}
