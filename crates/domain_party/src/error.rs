//! Party domain errors
//!
//! Entity validation does not fail fast; it collects messages in a
//! [`ValidationResult`](crate::validation::ValidationResult). The errors here
//! are for operations that cannot proceed at all.

use thiserror::Error;

use core_kernel::{PortError, TemporalError};

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// Entity with the given ID was not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Invalid data provided
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Entity validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A lookup needs either an SSN or first name, last name and date of birth
    #[error("must provide an ssn or first_name/last_name/dob or both")]
    InsufficientIdentifyingInfo,

    /// No citizenship answer was recorded
    #[error("Citizenship status can't be nil.")]
    CitizenshipStatusUnknown,

    /// A date string did not match the expected format
    #[error(transparent)]
    Date(#[from] TemporalError),

    /// An external collaborator (identifier generator, SSN cipher) failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl PartyError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        PartyError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidData(message.into())
    }

    /// Joins validation messages into a single error
    pub fn validation_failed(errors: Vec<String>) -> Self {
        PartyError::ValidationFailed(errors.join("; "))
    }
}
