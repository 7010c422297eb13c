//! Calendar arithmetic and date range types
//!
//! Coverage windows in the individual market always begin and end on month
//! boundaries, so most of the helpers here deal with month ends and with
//! year offsets that have to survive leap days.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use std::str::FromStr;

/// Timezone wrapper for exchange jurisdictions
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// The exchange's home time zone (US Eastern)
    pub fn eastern() -> Self {
        Self(chrono_tz::America::New_York)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// The calendar date an instant falls on in this timezone
    pub fn date_at(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }

    /// Gets the start of day (00:00:00) in this timezone as UTC
    ///
    /// Returns `None` when midnight does not exist locally.
    pub fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        date.and_hms_opt(0, 0, 0)?
            .and_local_timezone(self.0)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }

    /// Gets the end of day (23:59:59.999999999) in this timezone as UTC
    pub fn end_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        date.and_hms_nano_opt(23, 59, 59, 999_999_999)?
            .and_local_timezone(self.0)
            .latest()
            .map(|local| local.with_timezone(&Utc))
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::eastern()
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s)
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(s.to_string()))
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Unparseable date {value:?}, expected format {format}")]
    UnparseableDate {
        value: String,
        format: &'static str,
    },
}

/// Returns true when `year` is a Gregorian leap year
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// First day of the month containing `date`
pub fn beginning_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first = beginning_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// First day of the month following the month containing `date`
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    end_of_month(date).succ_opt().unwrap_or(NaiveDate::MAX)
}

/// Same day in the following month, clamped to that month's length
///
/// Jan 31 becomes Feb 28 (or Feb 29 in a leap year).
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX)
}

/// Adds whole calendar years, preserving month and day
///
/// Feb 29 lands on Feb 28 when the target year is not a leap year.
/// Negative offsets move backwards with the same clamping.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let months = years.unsigned_abs().saturating_mul(12);
    let shifted = if years >= 0 {
        date.checked_add_months(Months::new(months))
    } else {
        date.checked_sub_months(Months::new(months))
    };
    shifted.unwrap_or(if years >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Parses `value` with a strftime-style `format`
pub fn parse_date(value: &str, format: &'static str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(value.trim(), format).map_err(|_| TemporalError::UnparseableDate {
        value: value.to_string(),
        format,
    })
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Both ends are inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Clamps `date` into the range
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.max(self.start).min(self.end)
    }
}
