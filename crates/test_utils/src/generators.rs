//! Property-Based Test Generators
//!
//! proptest strategies that keep to the shapes the exchange accepts.

use chrono::NaiveDate;
use proptest::prelude::*;

/// Any date in `years`, including Feb 29 in leap years
pub fn date_in_years(years: std::ops::Range<i32>) -> impl Strategy<Value = NaiveDate> {
    (years, 1u32..=366).prop_map(|(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal)
            .or_else(|| NaiveDate::from_ymd_opt(year, 12, 31))
            .expect("Dec 31 always exists")
    })
}

/// Dates of birth for living adults and children
pub fn dob_strategy() -> impl Strategy<Value = NaiveDate> {
    date_in_years(1915..2021)
}

/// Nine-digit SSNs with a valid area, group and serial
pub fn valid_ssn_strategy() -> impl Strategy<Value = String> {
    (1u32..900, 1u32..100, 1u32..10_000)
        .prop_filter("area 666 is never issued", |(area, _, _)| *area != 666)
        .prop_map(|(area, group, serial)| format!("{area:03}-{group:02}-{serial:04}"))
}

/// SSNs with a reserved area number
pub fn reserved_area_ssn_strategy() -> impl Strategy<Value = String> {
    (prop_oneof![Just(0u32), Just(666u32), 900u32..1000], 1u32..100, 1u32..10_000)
        .prop_map(|(area, group, serial)| format!("{area:03}{group:02}{serial:04}"))
}

/// Ten-digit phone numbers in assorted punctuation
pub fn phone_number_strategy() -> impl Strategy<Value = (String, String)> {
    ("[2-9][0-9]{2}", "[2-9][0-9]{6}").prop_flat_map(|(area, number)| {
        let digits = format!("{area}{number}");
        prop_oneof![
            Just(digits.clone()),
            Just(format!("({area}) {}-{}", &number[..3], &number[3..])),
            Just(format!("{area}-{}-{}", &number[..3], &number[3..])),
        ]
        .prop_map(move |formatted| (formatted, digits.clone()))
    })
}

/// Non-blank names of ASCII letters
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z]{2,12}"
}
