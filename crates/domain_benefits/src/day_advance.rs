//! Day rollover
//!
//! When the date of record moves, every sponsor gets its day hook, and on
//! the first of a month the month, quarter and year hooks as they apply:
//!
//! | new date        | day | month | quarter | year |
//! |-----------------|-----|-------|---------|------|
//! | any             |  x  |       |         |      |
//! | 1st of month    |  x  |   x   |         |      |
//! | Apr/Jul/Oct 1st |  x  |   x   |    x    |      |
//! | Jan 1st         |  x  |   x   |    x    |  x   |
//!
//! Within a tick the hooks run in that order for each sponsor before the
//! next sponsor is visited.

use std::fmt;
use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{DateOfRecord, TimeKeeper};

/// Months in which a new quarter starts
pub const QUARTER_START_MONTHS: [u32; 4] = [1, 4, 7, 10];

/// Lifecycle hooks of an entity that holds a benefit sponsorship
///
/// All hooks default to doing nothing.
pub trait SponsorHooks {
    fn on_day_advance(&mut self) {}

    fn on_month_advance(&mut self) {}

    fn on_quarter_advance(&mut self) {}

    fn on_year_advance(&mut self) {}
}

/// A calendar boundary crossed by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rollover {
    Day,
    Month,
    Quarter,
    Year,
}

impl Rollover {
    /// Dispatch order within a tick
    pub const ORDER: [Rollover; 4] = [Rollover::Day, Rollover::Month, Rollover::Quarter, Rollover::Year];

    /// True when moving the date of record to `new_date` crosses this boundary
    pub fn fires_on(&self, new_date: NaiveDate) -> bool {
        let first_of_month = new_date.day() == 1;
        match self {
            Rollover::Day => true,
            Rollover::Month => first_of_month,
            Rollover::Quarter => first_of_month && QUARTER_START_MONTHS.contains(&new_date.month()),
            Rollover::Year => first_of_month && new_date.month() == 1,
        }
    }

    fn dispatch<S: SponsorHooks + ?Sized>(&self, sponsor: &mut S) {
        match self {
            Rollover::Day => sponsor.on_day_advance(),
            Rollover::Month => sponsor.on_month_advance(),
            Rollover::Quarter => sponsor.on_quarter_advance(),
            Rollover::Year => sponsor.on_year_advance(),
        }
    }
}

impl fmt::Display for Rollover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rollover::Day => "day",
            Rollover::Month => "month",
            Rollover::Quarter => "quarter",
            Rollover::Year => "year",
        };
        f.write_str(name)
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAdvanceReport {
    pub date: NaiveDate,
    pub rollovers: Vec<Rollover>,
    pub sponsors_notified: usize,
}

/// Walks all sponsors when the date of record advances
///
/// Ticks are serialized: a second tick waits for the one in progress.
#[derive(Debug, Default)]
pub struct DayAdvancer {
    tick: Mutex<()>,
}

impl DayAdvancer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rollovers triggered by moving the date of record to `new_date`, in dispatch order
    pub fn rollovers_for(new_date: NaiveDate) -> Vec<Rollover> {
        Rollover::ORDER
            .into_iter()
            .filter(|rollover| rollover.fires_on(new_date))
            .collect()
    }

    /// Runs the hooks due for `new_date` on every sponsor
    pub fn advance_day<'a, S, I>(&self, new_date: NaiveDate, sponsors: I) -> DayAdvanceReport
    where
        S: SponsorHooks + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut S>,
    {
        let _tick = self.tick.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::dispatch_all(new_date, sponsors)
    }

    /// Moves the date of record to `new_date` and notifies every sponsor
    ///
    /// The date is written before any hook runs, so hooks reading the keeper
    /// see the new date.
    pub fn advance_date_of_record<'a, S, I>(
        &self,
        time_keeper: &TimeKeeper,
        new_date: NaiveDate,
        sponsors: I,
    ) -> DayAdvanceReport
    where
        S: SponsorHooks + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut S>,
    {
        let _tick = self.tick.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let date = time_keeper.set_date_of_record_unprotected(new_date);
        Self::dispatch_all(date, sponsors)
    }

    /// Notifies every sponsor of the keeper's current date of record
    pub fn push_date_of_record<'a, S, I>(&self, time_keeper: &TimeKeeper, sponsors: I) -> DayAdvanceReport
    where
        S: SponsorHooks + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut S>,
    {
        let _tick = self.tick.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::dispatch_all(time_keeper.date_of_record(), sponsors)
    }

    fn dispatch_all<'a, S, I>(new_date: NaiveDate, sponsors: I) -> DayAdvanceReport
    where
        S: SponsorHooks + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut S>,
    {
        let rollovers = Self::rollovers_for(new_date);
        let mut sponsors_notified = 0;

        for sponsor in sponsors {
            for rollover in &rollovers {
                rollover.dispatch(sponsor);
            }
            sponsors_notified += 1;
        }

        let fired: Vec<String> = rollovers.iter().map(ToString::to_string).collect();
        info!(date = %new_date, rollovers = ?fired, sponsors = sponsors_notified, "Day advanced");
        debug!(date = %new_date, "Day rollover complete");

        DayAdvanceReport {
            date: new_date,
            rollovers,
            sponsors_notified,
        }
    }
}
