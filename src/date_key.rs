//! Date-only keys used to index schedules
//!
//! A [`DateKey`] is a calendar day without any time or timezone. Its canonical text form is `YYYY-MM-DD`,
//! so that sorting the strings sorts the days chronologically.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// A calendar day (year, month, day)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    date: NaiveDate,
}

impl DateKey {
    /// Build a key from its components.
    ///
    /// Fails with [`Error::InvalidDate`] when the day does not exist, or when the year does not fit in four digits.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        let input = format!("{}-{}-{}", year, month, day);
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(Error::invalid_date(input, "year must have four digits"));
        }
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Ok(Self { date }),
            None => Err(Error::invalid_date(input, "no such calendar day")),
        }
    }

    /// The day a UTC timestamp falls on
    pub fn from_datetime(timestamp: &DateTime<Utc>) -> Result<Self> {
        Self::try_from(timestamp.naive_utc().date())
    }

    pub fn year(&self) -> i32  { self.date.year() }
    pub fn month(&self) -> u32 { self.date.month() }
    pub fn day(&self) -> u32   { self.date.day() }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.date
    }

    /// The ISO weekday of this day. See [`DateKey::weekday_name`] for its English name
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// ISO weekday number, Monday=1 to Sunday=7
    pub fn iso_weekday(&self) -> u32 {
        self.date.weekday().number_from_monday()
    }

    /// English name of the weekday (`Monday`..`Sunday`)
    pub fn weekday_name(&self) -> &'static str {
        match self.date.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    /// Returns the day `days` later, or `None` if it leaves the supported years
    pub fn checked_add_days(&self, days: u32) -> Option<Self> {
        self.date
            .checked_add_signed(Duration::days(days as i64))
            .and_then(|date| Self::try_from(date).ok())
    }

    /// Returns the day `days` earlier, or `None` if it leaves the supported years
    pub fn checked_sub_days(&self, days: u32) -> Option<Self> {
        self.date
            .checked_sub_signed(Duration::days(days as i64))
            .and_then(|date| Self::try_from(date).ok())
    }

    /// Same as `checked_add_days`, but stops at 9999-12-31
    pub fn saturating_add_days(&self, days: u32) -> Self {
        self.checked_add_days(days).unwrap_or_else(Self::latest)
    }

    /// Same as `checked_sub_days`, but stops at 0000-01-01
    pub fn saturating_sub_days(&self, days: u32) -> Self {
        self.checked_sub_days(days).unwrap_or_else(Self::earliest)
    }

    /// 0000-01-01, the first supported day
    pub fn earliest() -> Self {
        Self { date: NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN) }
    }

    /// 9999-12-31, the last supported day
    pub fn latest() -> Self {
        Self { date: NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX) }
    }

    /// Signed number of days from `self` to `other` (negative when `other` is earlier)
    pub fn days_until(&self, other: &DateKey) -> i64 {
        other.date.signed_duration_since(self.date).num_days()
    }

    /// Monday of the ISO week that contains this day
    pub fn week_start(&self) -> Option<Self> {
        self.checked_sub_days(self.date.weekday().num_days_from_monday())
    }

    /// First day of a month
    pub fn first_of_month(year: i32, month: u32) -> Result<Self> {
        Self::new(year, month, 1)
    }

    /// Last day of a month
    pub fn last_of_month(year: i32, month: u32) -> Result<Self> {
        let first = Self::first_of_month(year, month)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last = next_month
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| Error::invalid_date(first.to_string(), "month has no last day"))?;
        Ok(Self { date: last })
    }
}

impl TryFrom<NaiveDate> for DateKey {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for DateKey {
    type Err = Error;

    /// Parse exactly `YYYY-MM-DD`
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(Error::invalid_date(s, "expected YYYY-MM-DD"));
        }
        let all_digits = bytes.iter()
            .enumerate()
            .filter(|(i, _)| *i != 4 && *i != 7)
            .all(|(_, b)| b.is_ascii_digit());
        if all_digits == false {
            return Err(Error::invalid_date(s, "expected YYYY-MM-DD"));
        }

        // Only ASCII digits are left, these parses cannot fail
        let year: i32 = s[0..4].parse().map_err(|_| Error::invalid_date(s, "bad year"))?;
        let month: u32 = s[5..7].parse().map_err(|_| Error::invalid_date(s, "bad month"))?;
        let day: u32 = s[8..10].parse().map_err(|_| Error::invalid_date(s, "bad day"))?;

        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Ok(Self { date }),
            None => Err(Error::invalid_date(s, "no such calendar day")),
        }
    }
}

/// Used to support serde
impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<DateKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


/// An inclusive range of days, that can be iterated day by day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: DateKey,
    end: DateKey,
    next: Option<DateKey>,
}

impl DateRange {
    /// Fails with [`Error::InvalidRange`] when `end < start`
    pub fn new(start: DateKey, end: DateKey) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end, next: Some(start) })
    }

    pub fn start(&self) -> DateKey { self.start }
    pub fn end(&self) -> DateKey   { self.end }

    pub fn contains(&self, date: &DateKey) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Number of days in the range (both ends included)
    pub fn num_days(&self) -> i64 {
        self.start.days_until(&self.end) + 1
    }
}

impl Iterator for DateRange {
    type Item = DateKey;

    fn next(&mut self) -> Option<DateKey> {
        let current = self.next?;
        self.next = if current < self.end {
            current.checked_add_days(1)
        } else {
            None
        };
        Some(current)
    }
}
