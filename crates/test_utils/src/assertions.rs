//! Custom Test Assertions
//!
//! Assertion helpers that print the whole validation result on failure.

use chrono::NaiveDate;
use domain_benefits::CoveragePeriod;
use domain_party::ValidationResult;

/// Asserts that validation produced no errors
pub fn assert_valid(result: &ValidationResult) {
    assert!(
        result.is_valid && result.errors.is_empty(),
        "Expected a valid result, got errors: {:?}",
        result.errors
    );
}

/// Asserts that some error contains `needle`
pub fn assert_has_error(result: &ValidationResult, needle: &str) {
    assert!(
        result.has_error_containing(needle),
        "Expected an error containing {needle:?}, got: {:?}",
        result.errors
    );
}

/// Asserts that validation failed with exactly these errors, in order
pub fn assert_errors(result: &ValidationResult, expected: &[&str]) {
    assert!(!result.is_valid, "Expected an invalid result");
    assert_eq!(result.errors, expected, "Validation errors differ");
}

/// Asserts that `date` falls inside the coverage period
pub fn assert_within_period(period: &CoveragePeriod, date: NaiveDate) {
    assert!(
        period.contains(date),
        "Expected {date} within {} ({} to {})",
        period.title(),
        period.start_on(),
        period.end_on()
    );
}
