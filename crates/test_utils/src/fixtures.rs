//! Pre-built Test Fixtures
//!
//! Ready-to-use data shared by the integration suites: the 2022 individual
//! plan year, the DC enrollment settings and well-formed identity values.

use chrono::NaiveDate;
use core_kernel::{EnrollmentSettings, SiteSettings};
use domain_benefits::{BenefitSponsorship, CoveragePeriod, ServiceMarket};

/// Shorthand for a calendar date known to be valid
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture date must be valid")
}

/// Fixtures for coverage periods and sponsorships
pub struct CoverageFixtures;

impl CoverageFixtures {
    /// Individual plan year with open enrollment from Nov 1 of the prior
    /// year through Jan 31
    pub fn plan_year(year: i32) -> CoveragePeriod {
        CoveragePeriod::builder()
            .service_market(ServiceMarket::Individual)
            .start_on(date(year, 1, 1))
            .end_on(date(year, 12, 31))
            .open_enrollment_start_on(date(year - 1, 11, 1))
            .open_enrollment_end_on(date(year, 1, 31))
            .build()
            .expect("fixture plan year must build")
    }

    pub fn plan_year_2022() -> CoveragePeriod {
        Self::plan_year(2022)
    }

    /// Individual sponsorship holding the 2022 and 2023 plan years
    pub fn individual_sponsorship() -> BenefitSponsorship {
        BenefitSponsorship::new([ServiceMarket::Individual])
            .expect("fixture sponsorship must build")
            .with_coverage_period(Self::plan_year(2022))
            .with_coverage_period(Self::plan_year(2023))
    }
}

/// Fixtures for configuration
pub struct SettingsFixtures;

impl SettingsFixtures {
    /// Due day 15, minimum termination notice 14 days
    pub fn enrollment() -> EnrollmentSettings {
        EnrollmentSettings::new(15, 14).expect("fixture settings must validate")
    }

    pub fn site() -> SiteSettings {
        SiteSettings::default()
    }
}

/// Fixtures for identity strings
pub struct IdentityFixtures;

impl IdentityFixtures {
    pub const VALID_SSN: &'static str = "123-45-6789";
    pub const VALID_FEIN: &'static str = "12-3456789";
    pub const INVOICE_FILE: &'static str = "/var/invoices/118510_12012021_invoices_r.pdf";

    pub fn date_of_record() -> NaiveDate {
        date(2022, 2, 25)
    }

    pub fn adult_dob() -> NaiveDate {
        date(1980, 7, 4)
    }
}
