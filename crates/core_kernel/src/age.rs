//! Age calculation shared by every entity that carries a date of birth

use chrono::{Datelike, NaiveDate};

/// Age in whole years on `as_of`
///
/// The year difference is reduced by one while `as_of` has not yet reached
/// the birth month and day. A Feb 29 birthday compares as later than Feb 28,
/// so in non-leap years the birthday is reached on Mar 1.
///
/// Returns a negative number when `as_of` precedes the birth date; callers
/// validate that a date of birth is in the past.
pub fn age_on(birth_date: NaiveDate, as_of: NaiveDate) -> i32 {
    let age = as_of.year() - birth_date.year();
    if (as_of.month(), as_of.day()) < (birth_date.month(), birth_date.day()) {
        age - 1
    } else {
        age
    }
}

/// Anything with a date of birth can report its age
pub trait HasDateOfBirth {
    fn date_of_birth(&self) -> Option<NaiveDate>;

    /// Age on the given date, or `None` without a date of birth
    fn age_on(&self, as_of: NaiveDate) -> Option<i32> {
        self.date_of_birth().map(|dob| age_on(dob, as_of))
    }
}
