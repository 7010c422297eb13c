//! Test Utilities Crate
//!
//! Shared test infrastructure for the exchange models test suites.
//!
//! # Modules
//!
//! - `fixtures`: the reference plan year, settings and well-formed values
//! - `builders`: builders for people, census members and organizations
//! - `mocks`: in-memory stand-ins for the identifier and SSN ports
//! - `assertions`: assertion helpers for validation results and periods
//! - `generators`: property-based test data generators
//!
//! Only integration tests (`tests/`) may depend on this crate; unit tests
//! inside `domain_benefits` or `domain_party` would pull in a second copy
//! of those crates.

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use mocks::*;
