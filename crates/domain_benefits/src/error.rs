//! Benefits domain errors

use thiserror::Error;

use core_kernel::TemporalError;

/// Errors that can occur while configuring benefit sponsorships
#[derive(Debug, Error)]
pub enum BenefitsError {
    /// Required field is missing
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// A date window ends before it starts
    #[error("{window} window is invalid: {source}")]
    InvalidWindow {
        window: &'static str,
        #[source]
        source: TemporalError,
    },

    /// Unknown service market name
    #[error("{0} is not a valid service market")]
    InvalidServiceMarket(String),

    /// A sponsorship must serve at least one market
    #[error("Service markets can't be blank")]
    NoServiceMarkets,

    /// Coverage period not found
    #[error("Coverage period not found: {0}")]
    CoveragePeriodNotFound(String),

    /// Eligibility rule configuration problem
    #[error("Invalid eligibility rule: {0}")]
    InvalidEligibility(String),
}

impl BenefitsError {
    pub fn invalid_window(window: &'static str, source: TemporalError) -> Self {
        BenefitsError::InvalidWindow { window, source }
    }

    pub fn not_found(id: impl std::fmt::Display) -> Self {
        BenefitsError::CoveragePeriodNotFound(id.to_string())
    }
}
