//! Date of record
//!
//! The exchange runs on an authoritative "date of record" that is advanced
//! explicitly by a day-tick driver rather than following the wall clock.
//! Queries take a snapshot of it once and pass the date down; nothing below
//! this module reads ambient time.

use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use tracing::info;

use crate::temporal::Timezone;

/// A source of the current date of record
pub trait DateOfRecord: Send + Sync {
    fn date_of_record(&self) -> NaiveDate;
}

/// Date of record pinned to a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDateOfRecord(pub NaiveDate);

impl DateOfRecord for FixedDateOfRecord {
    fn date_of_record(&self) -> NaiveDate {
        self.0
    }
}

/// Process-wide keeper of the date of record
///
/// A single writer moves the date forward; readers always see either the
/// previous or the new date, never a partial update.
#[derive(Debug)]
pub struct TimeKeeper {
    date_of_record: RwLock<NaiveDate>,
    exchange_zone: Timezone,
}

impl TimeKeeper {
    pub fn new(date_of_record: NaiveDate) -> Self {
        Self::with_zone(date_of_record, Timezone::eastern())
    }

    pub fn with_zone(date_of_record: NaiveDate, exchange_zone: Timezone) -> Self {
        Self {
            date_of_record: RwLock::new(date_of_record),
            exchange_zone,
        }
    }

    /// Starts the keeper on the exchange-local date of `now`
    pub fn starting_at(now: DateTime<Utc>, exchange_zone: Timezone) -> Self {
        Self::with_zone(exchange_zone.date_at(now), exchange_zone)
    }

    pub fn exchange_zone(&self) -> Timezone {
        self.exchange_zone
    }

    /// Overwrites the date of record without notifying any sponsor
    ///
    /// Returns the stored date. Setting the current value is a no-op.
    pub fn set_date_of_record_unprotected(&self, new_date: NaiveDate) -> NaiveDate {
        let mut guard = self
            .date_of_record
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = *guard;
        if previous != new_date {
            let shift = (new_date - previous).num_days();
            info!(from = %previous, to = %new_date, shift_days = shift, "Date of record changed");
            *guard = new_date;
        }
        *guard
    }

    /// The date of record combined with the time of day of `now`
    pub fn datetime_of_record(&self, now: DateTime<Utc>) -> NaiveDateTime {
        let date = self.date_of_record();
        date.and_hms_opt(now.hour(), now.minute(), now.second())
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
    }

    /// `instant` expressed in the exchange time zone
    pub fn local_time(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        self.exchange_zone.to_local(instant)
    }

    /// The exchange-local calendar date of `instant`
    pub fn date_according_to_exchange_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.exchange_zone.date_at(instant)
    }
}

impl DateOfRecord for TimeKeeper {
    fn date_of_record(&self) -> NaiveDate {
        *self
            .date_of_record
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_set_date_of_record_returns_stored_date() {
        let keeper = TimeKeeper::new(date(2022, 1, 1));
        assert_eq!(keeper.set_date_of_record_unprotected(date(2022, 3, 5)), date(2022, 3, 5));
        assert_eq!(keeper.date_of_record(), date(2022, 3, 5));
    }

    #[test]
    fn test_datetime_of_record_keeps_wall_clock_time() {
        let keeper = TimeKeeper::new(date(2022, 1, 1));
        let now = Utc.with_ymd_and_hms(2030, 7, 4, 13, 45, 9).unwrap();
        let dt = keeper.datetime_of_record(now);

        assert_eq!(dt.date(), date(2022, 1, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (13, 45, 9));
    }

    #[test]
    fn test_fixed_date_of_record_as_trait_object() {
        let source: Box<dyn DateOfRecord> = Box::new(FixedDateOfRecord(date(2021, 11, 1)));
        assert_eq!(source.date_of_record(), date(2021, 11, 1));
    }
}
