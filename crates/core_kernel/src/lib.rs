//! Core Kernel - Foundational types and utilities for the exchange models
//!
//! This crate provides the building blocks shared by the benefits and party
//! domains:
//! - Calendar arithmetic on plain dates (month ends, year offsets)
//! - The shared age calculation
//! - The date of record and the `TimeKeeper` that owns it
//! - Typed identifiers and the exchange identifier generator port
//! - Enrollment and site settings

pub mod temporal;
pub mod age;
pub mod clock;
pub mod identifiers;
pub mod settings;
pub mod ports;
pub mod error;

pub use temporal::{DateRange, TemporalError, Timezone};
pub use age::{age_on, HasDateOfBirth};
pub use clock::{DateOfRecord, FixedDateOfRecord, TimeKeeper};
pub use identifiers::{
    PersonId, CensusMemberId, OrganizationId, OfficeLocationId, AddressId, PhoneId,
    HbxProfileId, BenefitSponsorshipId, CoveragePeriodId, BenefitPackageId, PlanId,
    InboxId, MessageId,
    IdentifierGenerator, IdentifierSource, RandomIdentifierGenerator,
    SequenceIdentifierGenerator, SequenceService, identifier_generator,
};
pub use settings::{EnrollmentSettings, SettingsError, SiteSettings};
pub use ports::{DomainPort, PortError};
pub use error::CoreError;
