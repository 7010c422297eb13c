//! Citizenship and immigration status
//!
//! A person answers up to four yes/no questions. Unanswered questions fall
//! back to what the recorded status implies. The answers collapse into a
//! single [`CitizenStatus`] with a fixed precedence:
//! tribe member, naturalized, citizen, lawfully present, not lawfully present.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PartyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitizenStatus {
    UsCitizen,
    NaturalizedCitizen,
    IndianTribeMember,
    AlienLawfullyPresent,
    NotLawfullyPresentInUs,
}

impl CitizenStatus {
    /// Statuses that make a person a US citizen
    pub const US_CITIZEN_STATUS_KINDS: [CitizenStatus; 3] = [
        CitizenStatus::UsCitizen,
        CitizenStatus::NaturalizedCitizen,
        CitizenStatus::IndianTribeMember,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CitizenStatus::UsCitizen => "us_citizen",
            CitizenStatus::NaturalizedCitizen => "naturalized_citizen",
            CitizenStatus::IndianTribeMember => "indian_tribe_member",
            CitizenStatus::AlienLawfullyPresent => "alien_lawfully_present",
            CitizenStatus::NotLawfullyPresentInUs => "not_lawfully_present_in_us",
        }
    }

    pub fn is_us_citizen(&self) -> bool {
        Self::US_CITIZEN_STATUS_KINDS.contains(self)
    }
}

impl fmt::Display for CitizenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers given during an application, not persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CitizenshipAnswers {
    us_citizen: Option<bool>,
    naturalized_citizen: Option<bool>,
    indian_tribe_member: Option<bool>,
    eligible_immigration_status: Option<bool>,
}

impl CitizenshipAnswers {
    /// Answering "not a citizen" also answers "not naturalized"
    pub fn set_us_citizen(&mut self, value: bool) {
        self.us_citizen = Some(value);
        if !value {
            self.naturalized_citizen = Some(false);
        }
    }

    pub fn set_naturalized_citizen(&mut self, value: bool) {
        self.naturalized_citizen = Some(value);
    }

    pub fn set_indian_tribe_member(&mut self, value: bool) {
        self.indian_tribe_member = Some(value);
    }

    pub fn set_eligible_immigration_status(&mut self, value: bool) {
        self.eligible_immigration_status = Some(value);
    }

    pub fn us_citizen(&self, status: Option<CitizenStatus>) -> Option<bool> {
        self.us_citizen.or_else(|| status.map(|s| s.is_us_citizen()))
    }

    pub fn naturalized_citizen(&self, status: Option<CitizenStatus>) -> Option<bool> {
        self.naturalized_citizen
            .or_else(|| status.map(|s| s == CitizenStatus::NaturalizedCitizen))
    }

    pub fn indian_tribe_member(&self, status: Option<CitizenStatus>) -> Option<bool> {
        self.indian_tribe_member
            .or_else(|| status.map(|s| s == CitizenStatus::IndianTribeMember))
    }

    /// Only meaningful for someone who said they are not a citizen
    pub fn eligible_immigration_status(&self, status: Option<CitizenStatus>) -> Option<bool> {
        if self.eligible_immigration_status.is_some() {
            return self.eligible_immigration_status;
        }
        match self.us_citizen(status) {
            None | Some(true) => None,
            Some(false) => status.map(|s| s == CitizenStatus::AlienLawfullyPresent),
        }
    }

    /// Collapses the answers into one status
    pub fn resolve(&self, status: Option<CitizenStatus>) -> Result<CitizenStatus, PartyError> {
        let eligible = self.eligible_immigration_status(status);
        if self.indian_tribe_member(status) == Some(true) {
            Ok(CitizenStatus::IndianTribeMember)
        } else if self.naturalized_citizen(status) == Some(true) {
            Ok(CitizenStatus::NaturalizedCitizen)
        } else if self.us_citizen(status) == Some(true) {
            Ok(CitizenStatus::UsCitizen)
        } else if eligible == Some(true) {
            Ok(CitizenStatus::AlienLawfullyPresent)
        } else if eligible.is_some() {
            Ok(CitizenStatus::NotLawfullyPresentInUs)
        } else {
            Err(PartyError::CitizenshipStatusUnknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_answers_no_status() {
        let answers = CitizenshipAnswers::default();
        assert!(matches!(answers.resolve(None), Err(PartyError::CitizenshipStatusUnknown)));
    }

    #[test]
    fn test_tribe_member_wins() {
        let mut answers = CitizenshipAnswers::default();
        answers.set_us_citizen(true);
        answers.set_naturalized_citizen(true);
        answers.set_indian_tribe_member(true);
        assert_eq!(answers.resolve(None).unwrap(), CitizenStatus::IndianTribeMember);
    }

    #[test]
    fn test_naturalized_before_citizen() {
        let mut answers = CitizenshipAnswers::default();
        answers.set_us_citizen(true);
        answers.set_naturalized_citizen(true);
        assert_eq!(answers.resolve(None).unwrap(), CitizenStatus::NaturalizedCitizen);
    }

    #[test]
    fn test_not_citizen_clears_naturalized() {
        let mut answers = CitizenshipAnswers::default();
        answers.set_naturalized_citizen(true);
        answers.set_us_citizen(false);
        assert_eq!(answers.naturalized_citizen(None), Some(false));
    }

    #[test]
    fn test_immigration_answers() {
        let mut answers = CitizenshipAnswers::default();
        answers.set_us_citizen(false);
        answers.set_eligible_immigration_status(true);
        assert_eq!(answers.resolve(None).unwrap(), CitizenStatus::AlienLawfullyPresent);

        answers.set_eligible_immigration_status(false);
        assert_eq!(answers.resolve(None).unwrap(), CitizenStatus::NotLawfullyPresentInUs);
    }

    #[test]
    fn test_recorded_status_fills_gaps() {
        let answers = CitizenshipAnswers::default();
        let status = Some(CitizenStatus::AlienLawfullyPresent);
        assert_eq!(answers.us_citizen(status), Some(false));
        assert_eq!(answers.eligible_immigration_status(status), Some(true));
        assert_eq!(answers.resolve(status).unwrap(), CitizenStatus::AlienLawfullyPresent);
    }
}
