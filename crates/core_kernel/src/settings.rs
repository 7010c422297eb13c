//! Exchange settings
//!
//! Settings come from the environment through the `config` crate, with a
//! `.env` file honoured for local development:
//!
//! * `ENROLLMENT_INDIVIDUAL_ENROLLMENT_DUE_DAY_OF_MONTH` (default 15)
//! * `ENROLLMENT_INDIVIDUAL_ENROLLMENT_TERMINATION_MINIMUM_DAYS` (default 14)
//! * `SITE_SHORT_NAME`, `SITE_ACA_STATE_NAME`, `SITE_ACA_STATE_ABBREVIATION`,
//!   `SITE_EXCHANGE_TIME_ZONE`, `SITE_IDENTIFIER_SOURCE`

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::IdentifierSource;
use crate::temporal::Timezone;

/// Errors raised while loading or checking settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Individual enrollment due day must be between 1 and 28, got {0}")]
    DueDayOutOfRange(u32),

    #[error("Invalid setting {name}: {message}")]
    Invalid {
        name: &'static str,
        message: String,
    },
}

/// Individual-market enrollment rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentSettings {
    /// Enrollments made on or before this day of the month take effect
    /// on the first of the next month
    pub individual_enrollment_due_day_of_month: u32,
    /// Minimum notice, in days from the date of record, for a
    /// termination outside open enrollment
    pub individual_enrollment_termination_minimum_days: u32,
}

impl Default for EnrollmentSettings {
    fn default() -> Self {
        Self {
            individual_enrollment_due_day_of_month: 15,
            individual_enrollment_termination_minimum_days: 14,
        }
    }
}

impl EnrollmentSettings {
    pub fn new(due_day_of_month: u32, termination_minimum_days: u32) -> Result<Self, SettingsError> {
        Self {
            individual_enrollment_due_day_of_month: due_day_of_month,
            individual_enrollment_termination_minimum_days: termination_minimum_days,
        }
        .validated()
    }

    /// Loads from `ENROLLMENT_*` environment variables
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let settings: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("ENROLLMENT"))
            .build()?
            .try_deserialize()?;
        settings.validated()
    }

    pub fn validated(self) -> Result<Self, SettingsError> {
        if !(1..=28).contains(&self.individual_enrollment_due_day_of_month) {
            return Err(SettingsError::DueDayOutOfRange(
                self.individual_enrollment_due_day_of_month,
            ));
        }
        Ok(self)
    }

    /// `date_of_record` pushed forward by the termination notice period
    pub fn minimum_termination_date(&self, date_of_record: NaiveDate) -> NaiveDate {
        date_of_record
            .checked_add_days(Days::new(u64::from(self.individual_enrollment_termination_minimum_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Site-wide descriptive settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub short_name: String,
    pub aca_state_name: String,
    pub aca_state_abbreviation: String,
    pub exchange_time_zone: Timezone,
    pub identifier_source: IdentifierSource,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            short_name: "DC Health Link".to_string(),
            aca_state_name: "District of Columbia".to_string(),
            aca_state_abbreviation: "DC".to_string(),
            exchange_time_zone: Timezone::eastern(),
            identifier_source: IdentifierSource::Random,
        }
    }
}

impl SiteSettings {
    /// Loads from `SITE_*` environment variables
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let settings: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("SITE"))
            .build()?
            .try_deserialize()?;
        if settings.aca_state_abbreviation.len() != 2 {
            return Err(SettingsError::Invalid {
                name: "aca_state_abbreviation",
                message: format!("expected a 2-letter code, got {:?}", settings.aca_state_abbreviation),
            });
        }
        Ok(settings)
    }

    /// Subject of the message every new inbox starts with
    pub fn welcome_subject(&self) -> String {
        format!("Welcome to {}", self.short_name)
    }

    /// Body of the message every new inbox starts with
    pub fn welcome_body(&self) -> String {
        format!(
            "{} is the {}'s on-line marketplace to shop, compare, and select health insurance that meets your health needs and budgets.",
            self.short_name, self.aca_state_name
        )
    }
}
