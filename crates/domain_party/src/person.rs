//! People known to the exchange
//!
//! A person carries identity (names, date of birth, encrypted SSN),
//! contact details, citizenship answers, relationships to other people and
//! a secure inbox. The exchange-facing `hbx_id` is minted once by the
//! [`IdentifierGenerator`] and never changes afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use core_kernel::temporal::parse_date;
use core_kernel::{HasDateOfBirth, IdentifierGenerator, PersonId, SiteSettings};

use crate::address::{Address, AddressKind, Email, Phone, PhoneKind};
use crate::citizenship::{CitizenStatus, CitizenshipAnswers};
use crate::error::PartyError;
use crate::family::{PersonRelationship, RelationshipKind};
use crate::inbox::Inbox;
use crate::ssn::{encrypt_ssn, normalize_ssn, SsnCipher};
use crate::validation::{
    check_date_of_birth, check_date_of_death, check_fields, check_gender, check_names, check_ssn,
    ValidationResult,
};

/// Format of [`Person::date_of_birth_str`]
pub const DATE_OF_BIRTH_FORMAT: &str = "%m/%d/%Y";

/// Format of [`Person::dob_to_string`]
pub const DOB_STRING_FORMAT: &str = "%Y%m%d";

/// Suffixes written in capitals
const ROMAN_SUFFIXES: [&str; 4] = ["ii", "iii", "iv", "v"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    hbx_id: Option<String>,

    pub name_pfx: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub name_sfx: Option<String>,
    pub alternate_name: Option<String>,

    encrypted_ssn: Option<String>,
    pub no_ssn: bool,
    pub dob: Option<NaiveDate>,
    gender: Option<String>,
    pub date_of_death: Option<NaiveDate>,

    pub is_incarcerated: Option<bool>,
    pub is_disabled: Option<bool>,
    pub ethnicity: Vec<String>,
    pub race: Option<String>,
    pub tribal_id: Option<String>,
    pub is_tobacco_user: String,
    pub language_code: Option<String>,

    /// Claims residency without an in-state address
    pub no_state_address: bool,
    pub no_state_address_reason: String,

    pub is_active: bool,
    pub citizen_status: Option<CitizenStatus>,
    #[serde(skip)]
    citizenship_answers: CitizenshipAnswers,

    pub person_relationships: Vec<PersonRelationship>,
    pub addresses: Vec<Address>,
    pub phones: Vec<Phone>,
    pub emails: Vec<Email>,
    pub inbox: Inbox,
}

impl Person {
    /// A new active person whose inbox holds the site's welcome message
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, site: &SiteSettings) -> Self {
        Self {
            id: PersonId::new_v7(),
            hbx_id: None,
            name_pfx: None,
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            name_sfx: None,
            alternate_name: None,
            encrypted_ssn: None,
            no_ssn: false,
            dob: None,
            gender: None,
            date_of_death: None,
            is_incarcerated: None,
            is_disabled: None,
            ethnicity: Vec::new(),
            race: None,
            tribal_id: None,
            is_tobacco_user: "unknown".to_string(),
            language_code: None,
            no_state_address: false,
            no_state_address_reason: String::new(),
            is_active: true,
            citizen_status: None,
            citizenship_answers: CitizenshipAnswers::default(),
            person_relationships: Vec::new(),
            addresses: Vec::new(),
            phones: Vec::new(),
            emails: Vec::new(),
            inbox: Inbox::with_welcome(site),
        }
    }

    // Names

    /// Prefix, first, middle, last and suffix, skipping blanks
    pub fn full_name(&self) -> String {
        [
            self.name_pfx.as_deref(),
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

    /// Capitalized first and last name, then the suffix
    ///
    /// Roman numeral suffixes are upper-cased.
    pub fn first_name_last_name_and_suffix(&self) -> String {
        let mut parts = vec![capitalize(&self.first_name), capitalize(&self.last_name)];
        if let Some(suffix) = self.name_sfx.as_deref().filter(|s| !s.trim().is_empty()) {
            if ROMAN_SUFFIXES.contains(&suffix.to_lowercase().as_str()) {
                parts.push(suffix.to_uppercase());
            } else {
                parts.push(suffix.to_string());
            }
        }
        parts.join(" ")
    }

    // Demographics

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    /// Stores the gender lower-cased; blank clears it
    pub fn set_gender(&mut self, gender: &str) {
        let gender = gender.trim();
        self.gender = (!gender.is_empty()).then(|| gender.to_lowercase());
    }

    /// Date of birth as `MM/DD/YYYY`
    pub fn date_of_birth_str(&self) -> Option<String> {
        self.dob.map(|dob| dob.format(DATE_OF_BIRTH_FORMAT).to_string())
    }

    /// Sets the date of birth from `MM/DD/YYYY`
    ///
    /// An unparseable value clears the date of birth and reports the error.
    pub fn set_date_of_birth_str(&mut self, value: &str) -> Result<(), PartyError> {
        match parse_date(value, DATE_OF_BIRTH_FORMAT) {
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

    /// Date of birth as `YYYYMMDD`, empty without one
    pub fn dob_to_string(&self) -> String {
        self.dob
            .map(|dob| dob.format(DOB_STRING_FORMAT).to_string())
            .unwrap_or_default()
    }

    // SSN

    pub fn encrypted_ssn(&self) -> Option<&str> {
        self.encrypted_ssn.as_deref()
    }

    pub fn has_ssn(&self) -> bool {
        self.encrypted_ssn.is_some()
    }

    /// Encrypts and stores `ssn`; a blank value clears it
    pub fn set_ssn(&mut self, cipher: &dyn SsnCipher, ssn: &str) -> Result<(), PartyError> {
        self.encrypted_ssn = encrypt_ssn(cipher, ssn)?;
        Ok(())
    }

    pub fn clear_ssn(&mut self) {
        self.encrypted_ssn = None;
    }

    /// Decrypted SSN
    pub fn ssn(&self, cipher: &dyn SsnCipher) -> Result<Option<String>, PartyError> {
        match self.encrypted_ssn.as_deref() {
            Some(encrypted) => Ok(Some(cipher.decrypt(encrypted)?)),
            None => Ok(None),
        }
    }

    // Exchange identifier

    pub fn hbx_id(&self) -> Option<&str> {
        self.hbx_id.as_deref()
    }

    /// Mints the member hbx id on first call and returns it
    pub async fn assign_hbx_id(&mut self, generator: &dyn IdentifierGenerator) -> Result<&str, PartyError> {
        let hbx_id = match self.hbx_id.take().filter(|id| !id.trim().is_empty()) {
            Some(existing) => existing,
            None => {
                let minted = generator.generate_member_id().await?;
                info!(person = %self.id, hbx_id = %minted, "Member hbx id assigned");
                minted
            }
        };
        Ok(self.hbx_id.insert(hbx_id).as_str())
    }

    // Citizenship

    pub fn set_us_citizen(&mut self, value: bool) {
        self.citizenship_answers.set_us_citizen(value);
    }

    pub fn set_naturalized_citizen(&mut self, value: bool) {
        self.citizenship_answers.set_naturalized_citizen(value);
    }

    pub fn set_indian_tribe_member(&mut self, value: bool) {
        self.citizenship_answers.set_indian_tribe_member(value);
    }

    pub fn set_eligible_immigration_status(&mut self, value: bool) {
        self.citizenship_answers.set_eligible_immigration_status(value);
    }

    pub fn us_citizen(&self) -> Option<bool> {
        self.citizenship_answers.us_citizen(self.citizen_status)
    }

    pub fn naturalized_citizen(&self) -> Option<bool> {
        self.citizenship_answers.naturalized_citizen(self.citizen_status)
    }

    pub fn indian_tribe_member(&self) -> Option<bool> {
        self.citizenship_answers.indian_tribe_member(self.citizen_status)
    }

    pub fn eligible_immigration_status(&self) -> Option<bool> {
        self.citizenship_answers.eligible_immigration_status(self.citizen_status)
    }

    /// Records the status implied by the answers
    pub fn assign_citizen_status(&mut self) -> Result<CitizenStatus, PartyError> {
        let status = self.citizenship_answers.resolve(self.citizen_status)?;
        self.citizen_status = Some(status);
        Ok(status)
    }

    // Residency

    /// Claims residency without an address, and says why
    pub fn residency_eligible(&self) -> bool {
        self.no_state_address && !self.no_state_address_reason.trim().is_empty()
    }

    /// True when the person lives in `state_abbreviation`
    ///
    /// The home address decides when there is one, otherwise the mailing
    /// address. A residency claim without an address counts only with a
    /// reason.
    pub fn is_resident_of(&self, state_abbreviation: &str) -> bool {
        if self.no_state_address {
            return self.residency_eligible();
        }
        let kind = if self.addresses.iter().any(|a| a.kind == AddressKind::Home) {
            AddressKind::Home
        } else {
            AddressKind::Mailing
        };
        self.addresses
            .iter()
            .any(|a| a.kind == kind && a.is_in_state(state_abbreviation))
    }

    // Phones

    fn phone_of_kind(&self, kind: PhoneKind) -> Option<&Phone> {
        self.phones.iter().find(|p| p.kind == kind)
    }

    /// Work phone, falling back to the main number
    pub fn work_phone(&self) -> Option<&Phone> {
        self.phone_of_kind(PhoneKind::Work).or_else(|| self.main_phone())
    }

    pub fn main_phone(&self) -> Option<&Phone> {
        self.phone_of_kind(PhoneKind::Main)
    }

    pub fn home_phone(&self) -> Option<&Phone> {
        self.phone_of_kind(PhoneKind::Home)
    }

    pub fn mobile_phone(&self) -> Option<&Phone> {
        self.phone_of_kind(PhoneKind::Mobile)
    }

    /// Full number of the work, mobile or home phone, in that order
    pub fn work_phone_or_best(&self) -> Option<String> {
        self.work_phone()
            .or_else(|| self.mobile_phone())
            .or_else(|| self.home_phone())
            .map(Phone::full_phone_number)
    }

    /// Phones that carry a number
    pub fn contact_phones(&self) -> Vec<&Phone> {
        self.phones
            .iter()
            .filter(|p| !p.full_phone_number().trim().is_empty())
            .collect()
    }

    // Addresses

    pub fn home_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.kind == AddressKind::Home)
    }

    /// Mailing address, falling back to the home address
    pub fn mailing_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.kind == AddressKind::Mailing)
            .or_else(|| self.home_address())
    }

    pub fn has_mailing_address(&self) -> bool {
        self.addresses.iter().any(|a| a.kind == AddressKind::Mailing)
    }

    // Relationships

    /// Ids of everyone this person has a relationship with, except themselves
    pub fn relatives(&self) -> Vec<PersonId> {
        self.person_relationships
            .iter()
            .filter(|r| r.relative_id != self.id)
            .map(|r| r.relative_id)
            .collect()
    }

    pub fn person_relationship_for(&self, other: &Person) -> Option<&PersonRelationship> {
        self.person_relationships
            .iter()
            .find(|r| r.relative_id == other.id)
    }

    /// How `other` relates to this person; a person is `self` to themselves
    pub fn find_relationship_with(&self, other: &Person) -> Option<RelationshipKind> {
        if self.id == other.id {
            Some(RelationshipKind::SelfRelationship)
        } else {
            self.person_relationship_for(other).map(|r| r.kind)
        }
    }

    /// Adds or updates the relationship to `other`
    pub fn ensure_relationship_with(&mut self, other: &Person, kind: RelationshipKind) {
        match self
            .person_relationships
            .iter_mut()
            .find(|r| r.relative_id == other.id)
        {
            Some(existing) => existing.kind = kind,
            None => self
                .person_relationships
                .push(PersonRelationship::new(other.id, kind)),
        }
        debug!(person = %self.id, relative = %other.id, %kind, "Relationship ensured");
    }

    // Validation

    /// Checks the person against the date of record
    pub fn validate(&self, date_of_record: NaiveDate, cipher: &dyn SsnCipher) -> ValidationResult {
        let mut result = ValidationResult::ok();

        check_names(&self.first_name, &self.last_name, &mut result);

        match self.ssn(cipher) {
            Ok(Some(ssn)) => check_ssn(&ssn, &mut result),
            Ok(None) => {}
            Err(err) => result.add_error(format!("ssn could not be read: {err}")),
        }

        if let Some(gender) = self.gender() {
            check_gender(gender, &mut result);
        }
        if let Some(dob) = self.dob {
            check_date_of_birth(dob, date_of_record, &mut result);
        }
        if let Some(date_of_death) = self.date_of_death {
            check_date_of_death(date_of_death, self.dob, date_of_record, &mut result);
        }

        for address in &self.addresses {
            check_fields(address, &mut result);
        }
        for phone in &self.phones {
            check_fields(phone, &mut result);
        }
        for email in &self.emails {
            check_fields(email, &mut result);
        }

        if !result.is_valid {
            warn!(person = %self.id, errors = ?result.errors, "Person failed validation");
        }
        result
    }

    // Matching

    /// People in `candidates` matching the identifying information
    ///
    /// An SSN matches active people with that SSN and the same date of
    /// birth. First name, last name and date of birth together match people
    /// case-insensitively, but only those without an SSN unless the query
    /// has none either.
    pub fn match_by_id_info<'a>(
        candidates: &'a [Person],
        info: &IdentifyingInfo,
        cipher: &dyn SsnCipher,
    ) -> Result<Vec<&'a Person>, PartyError> {
        let ssn_query = info
            .ssn
            .as_deref()
            .map(normalize_ssn)
            .filter(|ssn| !ssn.is_empty());
        let names_and_dob = match (info.first_name.as_deref(), info.last_name.as_deref(), info.dob) {
            (Some(first), Some(last), Some(dob)) if !first.trim().is_empty() && !last.trim().is_empty() => {
                Some((first.trim(), last.trim(), dob))
            }
            _ => None,
        };

        if ssn_query.is_none() && names_and_dob.is_none() {
            return Err(PartyError::InsufficientIdentifyingInfo);
        }

        let mut matches: Vec<&Person> = Vec::new();

        if let Some(ssn_query) = ssn_query.as_deref() {
            for person in candidates.iter().filter(|p| p.is_active && p.dob == info.dob) {
                if person.ssn(cipher)?.as_deref() == Some(ssn_query) {
                    matches.push(person);
                }
            }
        }

        if let Some((first, last, dob)) = names_and_dob {
            matches.extend(candidates.iter().filter(|p| {
                p.dob == Some(dob)
                    && p.first_name.eq_ignore_ascii_case(first)
                    && p.last_name.eq_ignore_ascii_case(last)
                    && (!p.has_ssn() || ssn_query.is_none())
            }));
        }

        let mut seen = Vec::new();
        matches.retain(|p| {
            if seen.contains(&p.id) {
                false
            } else {
                seen.push(p.id);
                true
            }
        });
        Ok(matches)
    }
}

impl HasDateOfBirth for Person {
    fn date_of_birth(&self) -> Option<NaiveDate> {
        self.dob
    }
}

/// Identifying information used to find an existing person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyingInfo {
    pub ssn: Option<String>,
    pub dob: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
