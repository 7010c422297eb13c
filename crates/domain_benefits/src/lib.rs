//! Benefits Domain
//!
//! Plan years, open enrollment windows and the sponsorships that offer them.
//!
//! # Architecture
//!
//! - **Coverage periods**: one plan year with its open enrollment window and
//!   the individual-market date rules (earliest effective date, termination
//!   effective date)
//! - **Benefit sponsorship**: the coverage periods an exchange offers, and
//!   selection of the current, renewal and effective period for a date
//! - **Benefit packages**: eligibility rules attached to a coverage period
//! - **Day rollover**: per-day, month, quarter and year hooks run when the
//!   date of record advances
//!
//! All date queries take the date of record explicitly; nothing here reads
//! the system clock.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::EnrollmentSettings;
//! use domain_benefits::{BenefitSponsorship, CoveragePeriod, ServiceMarket};
//!
//! let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//!
//! let period = CoveragePeriod::builder()
//!     .service_market(ServiceMarket::Individual)
//!     .start_on(date(2022, 1, 1))
//!     .end_on(date(2022, 12, 31))
//!     .open_enrollment_start_on(date(2021, 11, 1))
//!     .open_enrollment_end_on(date(2022, 1, 31))
//!     .build()
//!     .unwrap();
//!
//! let sponsorship = BenefitSponsorship::new([ServiceMarket::Individual])
//!     .unwrap()
//!     .with_coverage_period(period);
//!
//! let settings = EnrollmentSettings::default();
//! assert_eq!(
//!     sponsorship.earliest_effective_date(date(2022, 3, 10), &settings),
//!     Some(date(2022, 4, 1))
//! );
//! ```

pub mod benefit_package;
pub mod coverage_period;
pub mod day_advance;
pub mod error;
pub mod sponsorship;

pub use benefit_package::{BenefitEligibilityElementGroup, BenefitPackage};
pub use coverage_period::{CoveragePeriod, CoveragePeriodBuilder, ServiceMarket};
pub use day_advance::{DayAdvanceReport, DayAdvancer, Rollover, SponsorHooks};
pub use error::BenefitsError;
pub use sponsorship::BenefitSponsorship;
