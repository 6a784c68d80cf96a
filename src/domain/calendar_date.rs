//! Calendar date and month keys

use crate::error::{Result, TimegridError};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

fn month_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap())
}

/// A day on the calendar, written as `YYYY-MM-DD`.
///
/// Ordering is chronological, which matches the ordering of the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parse a strict `YYYY-MM-DD` string
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !date_regex().is_match(trimmed) {
            return Err(TimegridError::InvalidDate(input.to_string()));
        }

        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(CalendarDate)
            .map_err(|_| TimegridError::InvalidDate(input.to_string()))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        CalendarDate(date)
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

    /// Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn add_days(&self, days: i64) -> Self {
        CalendarDate(self.0 + Duration::days(days))
    }

    /// Signed number of days from `other` to `self`
    pub fn days_since(&self, other: CalendarDate) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = TimegridError;

    fn from_str(s: &str) -> Result<Self> {
        CalendarDate::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = TimegridError;

    fn try_from(value: String) -> Result<Self> {
        CalendarDate::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

/// A calendar month, written as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(TimegridError::InvalidDate(format!("{:04}-{:02}", year, month)));
        }
        Ok(YearMonth { year, month })
    }

    /// Parse a strict `YYYY-MM` string
    pub fn parse(input: &str) -> Result<Self> {
        let captures = month_regex()
            .captures(input.trim())
            .ok_or_else(|| TimegridError::InvalidDate(input.to_string()))?;

        let year: i32 = captures[1]
            .parse()
            .map_err(|_| TimegridError::InvalidDate(input.to_string()))?;
        let month: u32 = captures[2]
            .parse()
            .map_err(|_| TimegridError::InvalidDate(input.to_string()))?;

        YearMonth::new(year, month).map_err(|_| TimegridError::InvalidDate(input.to_string()))
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };

        match next {
            Some(next) => (next - first).num_days() as u32,
            None => 31,
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
