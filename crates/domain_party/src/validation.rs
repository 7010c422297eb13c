//! Validation shared by party entities
//!
//! Validators collect every problem instead of stopping at the first one.
//! Dates are checked against the date of record, never the wall clock.
//!
//! # Rules
//!
//! ## Date of birth
//! - Not after the date of record
//! - Not more than 110 years before the date of record
//!
//! ## Date of death
//! - Not after the date of record
//! - Not before the date of birth
//!
//! ## SSN
//! - Nine digits when present
//! - No area 000, 666 or 900-999, group 00 or serial 0000

use chrono::NaiveDate;
use validator::ValidationErrors;

use core_kernel::temporal::add_years;

use crate::ssn::{is_nine_digits, is_ssn_composition_correct};

/// Oldest accepted age at the date of record
pub const MAX_AGE_YEARS: i32 = 110;

/// Genders a person or census member may have
pub const GENDER_KINDS: [&str; 2] = ["male", "female"];

/// Result of entity validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the entity is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// True when some error message mentions `needle`
    pub fn has_error_containing(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }

    /// Converts into a `Result`, joining the errors
    pub fn into_result(self) -> Result<(), crate::error::PartyError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(crate::error::PartyError::validation_failed(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl From<ValidationErrors> for ValidationResult {
    fn from(errors: ValidationErrors) -> Self {
        let mut result = ValidationResult::ok();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                match &error.message {
                    Some(message) => result.add_error(format!("{field} {message}")),
                    None => result.add_error(format!("{field} is invalid ({})", error.code)),
                }
            }
        }
        result
    }
}

/// Runs derived `validator` rules and folds any failures into `result`
pub fn check_fields(entity: &impl validator::Validate, result: &mut ValidationResult) {
    if let Err(errors) = entity.validate() {
        result.merge(errors.into());
    }
}

/// First and last name must be present
pub fn check_names(first_name: &str, last_name: &str, result: &mut ValidationResult) {
    if first_name.trim().is_empty() {
        result.add_error("first_name can't be blank");
    }
    if last_name.trim().is_empty() {
        result.add_error("last_name can't be blank");
    }
}

/// Date of birth rules against the date of record
pub fn check_date_of_birth(dob: NaiveDate, date_of_record: NaiveDate, result: &mut ValidationResult) {
    if dob > date_of_record {
        result.add_error(format!("dob future date: {dob} is invalid date of birth"));
    }
    if dob < add_years(date_of_record, -MAX_AGE_YEARS) {
        result.add_error(format!(
            "dob date: {dob} is more than {MAX_AGE_YEARS} years before the date of record"
        ));
    }
}

/// Date of death rules against the date of record and date of birth
pub fn check_date_of_death(
    date_of_death: NaiveDate,
    dob: Option<NaiveDate>,
    date_of_record: NaiveDate,
    result: &mut ValidationResult,
) {
    if date_of_death > date_of_record {
        result.add_error(format!(
            "date_of_death future date: {date_of_death} is invalid date of death"
        ));
    }
    if let Some(dob) = dob.filter(|dob| date_of_death < *dob) {
        result.add_error("date_of_death date of death cannot precede date of birth");
        result.add_error(format!("dob {dob}: date of birth cannot follow date of death"));
    }
}

/// Length and composition of a decrypted SSN
pub fn check_ssn(ssn: &str, result: &mut ValidationResult) {
    if !is_nine_digits(ssn) {
        result.add_error("ssn SSN must be 9 digits");
    } else if !is_ssn_composition_correct(ssn) {
        result.add_error("ssn Invalid SSN");
    }
}

/// Gender must be one of [`GENDER_KINDS`]
pub fn check_gender(gender: &str, result: &mut ValidationResult) {
    if !GENDER_KINDS.contains(&gender) {
        result.add_error(format!("gender {gender} is not a valid gender"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_merge_keeps_failure() {
        let mut result = ValidationResult::ok();
        result.add_warning("check this");
        result.merge(ValidationResult::fail(vec!["broken".to_string()]));

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["broken"]);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_dob_in_future() {
        let mut result = ValidationResult::ok();
        check_date_of_birth(date(2022, 6, 2), date(2022, 6, 1), &mut result);
        assert!(result.has_error_containing("future date"));
    }

    #[test]
    fn test_dob_on_date_of_record_is_fine() {
        let mut result = ValidationResult::ok();
        check_date_of_birth(date(2022, 6, 1), date(2022, 6, 1), &mut result);
        assert!(result.is_valid);
    }

    #[test]
    fn test_dob_age_limit() {
        let mut result = ValidationResult::ok();
        check_date_of_birth(date(1912, 6, 1), date(2022, 6, 1), &mut result);
        assert!(result.is_valid);

        check_date_of_birth(date(1912, 5, 31), date(2022, 6, 1), &mut result);
        assert!(result.has_error_containing("110 years"));
    }

    #[test]
    fn test_date_of_death_before_birth() {
        let mut result = ValidationResult::ok();
        check_date_of_death(date(1990, 1, 1), Some(date(1991, 1, 1)), date(2022, 1, 1), &mut result);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_ssn_checks() {
        let mut result = ValidationResult::ok();
        check_ssn("123456789", &mut result);
        assert!(result.is_valid);

        check_ssn("12345", &mut result);
        check_ssn("666123456", &mut result);
        assert_eq!(result.errors, vec!["ssn SSN must be 9 digits", "ssn Invalid SSN"]);
    }
}
