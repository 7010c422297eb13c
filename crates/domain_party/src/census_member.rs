//! Employer roster entries
//!
//! A census member is a person as an employer reports them: enough to
//! quote and enroll, without the full identity record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::temporal::parse_date;
use core_kernel::{CensusMemberId, HasDateOfBirth};

use crate::address::{Address, Email};
use crate::error::PartyError;
use crate::person::DOB_STRING_FORMAT;
use crate::ssn::{encrypt_ssn, SsnCipher};
use crate::validation::{
    check_date_of_birth, check_fields, check_names, check_ssn, ValidationResult, GENDER_KINDS,
};

/// Format accepted by [`CensusMember::set_date_of_birth_str`]
pub const DATE_OF_BIRTH_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Format produced by [`CensusMember::date_of_birth_str`]
pub const DATE_OF_BIRTH_OUTPUT_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusMember {
    pub id: CensusMemberId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub name_sfx: Option<String>,
    encrypted_ssn: Option<String>,
    pub dob: Option<NaiveDate>,
    gender: Option<String>,
    /// How the member relates to the employee (self, spouse, child_under_26, ...)
    pub employee_relationship: Option<String>,
    pub employer_assigned_family_id: Option<String>,
    pub address: Option<Address>,
    pub email: Option<Email>,
}

impl CensusMember {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, dob: NaiveDate) -> Self {
        Self {
            id: CensusMemberId::new_v7(),
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            name_sfx: None,
            encrypted_ssn: None,
            dob: Some(dob),
            gender: None,
            employee_relationship: None,
            employer_assigned_family_id: None,
            address: None,
            email: None,
        }
    }

    /// First, middle, last and suffix, skipping blanks
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
            self.name_sfx.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    /// Stores the gender lower-cased; blank clears it
    pub fn set_gender(&mut self, gender: &str) {
        let gender = gender.trim();
        self.gender = (!gender.is_empty()).then(|| gender.to_lowercase());
    }

    /// Date of birth as `YYYYMMDD`, empty without one
    pub fn dob_string(&self) -> String {
        self.dob
            .map(|dob| dob.format(DOB_STRING_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Date of birth as `MM/DD/YYYY`
    pub fn date_of_birth_str(&self) -> Option<String> {
        self.dob
            .map(|dob| dob.format(DATE_OF_BIRTH_OUTPUT_FORMAT).to_string())
    }

    /// Sets the date of birth from `YYYY-MM-DD`
    ///
    /// An unparseable value clears the date of birth and reports the error.
    pub fn set_date_of_birth_str(&mut self, value: &str) -> Result<(), PartyError> {
        match parse_date(value, DATE_OF_BIRTH_INPUT_FORMAT) {
            Ok(dob) => {
                self.dob = Some(dob);
                Ok(())
            }
            Err(err) => {
                self.dob = None;
                Err(err.into())
            }
        }
    }

    pub fn encrypted_ssn(&self) -> Option<&str> {
        self.encrypted_ssn.as_deref()
    }

    /// Encrypts and stores `ssn`; a blank value clears it
    pub fn set_ssn(&mut self, cipher: &dyn SsnCipher, ssn: &str) -> Result<(), PartyError> {
        self.encrypted_ssn = encrypt_ssn(cipher, ssn)?;
        Ok(())
    }

    pub fn ssn(&self, cipher: &dyn SsnCipher) -> Result<Option<String>, PartyError> {
        match self.encrypted_ssn.as_deref() {
            Some(encrypted) => Ok(Some(cipher.decrypt(encrypted)?)),
            None => Ok(None),
        }
    }

    /// Checks the roster entry against the date of record
    ///
    /// Unlike a person, a census member must have a date of birth and a
    /// gender.
    pub fn validate(&self, date_of_record: NaiveDate, cipher: &dyn SsnCipher) -> ValidationResult {
        let mut result = ValidationResult::ok();

        check_names(&self.first_name, &self.last_name, &mut result);

        match self.dob {
            Some(dob) => check_date_of_birth(dob, date_of_record, &mut result),
            None => result.add_error("dob can't be blank"),
        }

        if !self.gender().is_some_and(|g| GENDER_KINDS.contains(&g)) {
            result.add_error("gender must be selected");
        }

        match self.ssn(cipher) {
            Ok(Some(ssn)) => check_ssn(&ssn, &mut result),
            Ok(None) => {}
            Err(err) => result.add_error(format!("ssn could not be read: {err}")),
        }

        if let Some(address) = &self.address {
            check_fields(address, &mut result);
        }
        if let Some(email) = &self.email {
            check_fields(email, &mut result);
        }

        if !result.is_valid {
            warn!(census_member = %self.id, errors = ?result.errors, "Census member failed validation");
        }
        result
    }
}

impl HasDateOfBirth for CensusMember {
    fn date_of_birth(&self) -> Option<NaiveDate> {
        self.dob
    }
}
