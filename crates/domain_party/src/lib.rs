//! Party Domain
//!
//! People, employer roster entries, organizations and the exchange's own
//! profile, together with the contact details and inboxes they carry.
//!
//! - **Person**: identity, encrypted SSN, citizenship, residency,
//!   relationships and a welcome inbox
//! - **CensusMember**: a person as an employer reports them
//! - **Organization**: FEIN, office locations and, for the exchange itself,
//!   an [`HbxProfile`] that sponsors the coverage periods
//! - **Inbox**: secure messages with read and folder state
//!
//! Validation collects every problem into a [`ValidationResult`] and checks
//! dates against the date of record.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::{DomainPort, PortError, SiteSettings};
//! use domain_party::{Person, SsnCipher};
//!
//! struct PlainCipher;
//! impl DomainPort for PlainCipher {}
//! impl SsnCipher for PlainCipher {
//!     fn encrypt(&self, plain: &str) -> Result<String, PortError> { Ok(plain.to_string()) }
//!     fn decrypt(&self, encrypted: &str) -> Result<String, PortError> { Ok(encrypted.to_string()) }
//! }
//!
//! let mut person = Person::new("jane", "roe", &SiteSettings::default());
//! person.set_gender("Female");
//! person.set_date_of_birth_str("07/04/1980").unwrap();
//! person.set_ssn(&PlainCipher, "123-45-6789").unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
//! assert!(person.validate(today, &PlainCipher).is_valid);
//! ```

pub mod address;
pub mod census_member;
pub mod citizenship;
pub mod error;
pub mod family;
pub mod hbx_profile;
pub mod inbox;
pub mod organization;
pub mod person;
pub mod ssn;
pub mod validation;

pub use address::{Address, AddressKind, Email, EmailKind, OfficeLocation, Phone, PhoneKind};
pub use census_member::CensusMember;
pub use citizenship::CitizenStatus;
pub use error::PartyError;
pub use family::{PersonRelationship, RelationshipKind};
pub use hbx_profile::HbxProfile;
pub use inbox::{Inbox, Message, MessageFolder};
pub use organization::{EntityKind, Organization};
pub use person::{IdentifyingInfo, Person};
pub use ssn::SsnCipher;
pub use validation::ValidationResult;
