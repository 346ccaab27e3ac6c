//! # Calendar Dates
//!
//! [`DateKey`] is the calendar day a task list belongs to. Its canonical text form
//! `YYYY-MM-DD` doubles as the storage partition key, so two keys are equal exactly
//! when their canonical strings are equal.
//!
//! All arithmetic here works on year/month/day fields of the proleptic Gregorian
//! calendar. There are no instants and no time zones: "today" is read once from the
//! local calendar and everything after that is plain date math.
//!
//! Years are restricted to `1..=9999` so the canonical form always has four year digits.

use crate::error::{Result, TodoError};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A calendar day, used as the partition key for that day's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        validate_year_month(year, month)?;
        let max_day = days_in_month(year, month)?;
        if day == 0 || day > max_day {
            return Err(TodoError::InvalidDate(format!(
                "day {} out of range for {:04}-{:02} (1..={})",
                day, year, month, max_day
            )));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DateKey)
            .ok_or_else(|| {
                TodoError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day))
            })
    }

    pub fn from_naive(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month(), date.day())
    }

    /// The current day on the local calendar.
    pub fn today() -> Self {
        DateKey(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month: self.month(),
        }
    }

    /// `YYYY-MM-DD`, zero padded.
    pub fn canonical(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }

    /// The calendar day immediately preceding this one.
    ///
    /// Rolls back across month and year boundaries. Fails only below 0001-01-01.
    pub fn day_before(&self) -> Result<Self> {
        self.0
            .pred_opt()
            .ok_or_else(|| TodoError::InvalidDate(format!("no day before {}", self)))
            .and_then(Self::from_naive)
    }

    pub fn day_after(&self) -> Result<Self> {
        self.0
            .succ_opt()
            .ok_or_else(|| TodoError::InvalidDate(format!("no day after {}", self)))
            .and_then(Self::from_naive)
    }

    pub fn same_day(&self, other: &DateKey) -> bool {
        same_day(self, other)
    }
}

/// True when year, month and day all match.
pub fn same_day(a: &DateKey, b: &DateKey) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl FromStr for DateKey {
    type Err = TodoError;

    /// Accepts only the canonical `YYYY-MM-DD` form.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TodoError::InvalidDate(format!("expected YYYY-MM-DD, got '{}'", s));

        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits_ok {
            return Err(invalid());
        }

        let year: i32 = s[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[5..7].parse().map_err(|_| invalid())?;
        let day: u32 = s[8..10].parse().map_err(|_| invalid())?;
        Self::new(year, month, day)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A (year, month) pair, the cursor unit of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        validate_year_month(year, month)?;
        Ok(Self { year, month })
    }

    /// Moves by `delta` months, rolling the year at December/January.
    pub fn shift(&self, delta: i32) -> Result<Self> {
        let zero_based = self.year as i64 * 12 + (self.month as i64 - 1) + delta as i64;
        let year = zero_based.div_euclid(12);
        let month = zero_based.rem_euclid(12) + 1;
        let year = i32::try_from(year)
            .map_err(|_| TodoError::InvalidDate(format!("year {} out of range", year)))?;
        Self::new(year, month as u32)
    }

    pub fn days(&self) -> Result<u32> {
        days_in_month(self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = TodoError;

    /// Accepts `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TodoError::InvalidDate(format!("expected YYYY-MM, got '{}'", s));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Which weekday sits in column 0 of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column index (0..=6) of `weekday` for this week start.
    pub fn column(&self, weekday: chrono::Weekday) -> u32 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        }
    }

    /// Weekday labels in column order.
    pub fn header(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(format!(
                "Invalid week start '{}': expected sunday or monday",
                other
            )),
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    validate_year_month(year, month)?;
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    };
    Ok(days)
}

/// Weekday of day 1, with Sunday as 0.
pub fn first_weekday(year: i32, month: u32) -> Result<u32> {
    first_weekday_for(year, month, WeekStart::Sunday)
}

pub fn first_weekday_for(year: i32, month: u32, week_start: WeekStart) -> Result<u32> {
    validate_year_month(year, month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        TodoError::InvalidDate(format!("{:04}-{:02}-01", year, month))
    })?;
    Ok(week_start.column(first.weekday()))
}

fn validate_year_month(year: i32, month: u32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TodoError::InvalidDate(format!(
            "year {} out of range ({}..={})",
            year, MIN_YEAR, MAX_YEAR
        )));
    }
    if !(1..=12).contains(&month) {
        return Err(TodoError::InvalidDate(format!(
            "month {} out of range (1..=12)",
            month
        )));
    }
    Ok(())
}
