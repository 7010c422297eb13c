//! Benefit sponsorship
//!
//! A sponsorship owns the coverage periods an exchange offers, one per plan
//! year, and picks the one that applies on a given date. Lookups go by date
//! predicate over the stored periods; when a misconfiguration lets two
//! periods match, the first one stored wins.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::add_years;
use core_kernel::{BenefitSponsorshipId, CoveragePeriodId, EnrollmentSettings};

use crate::coverage_period::{CoveragePeriod, ServiceMarket};
use crate::error::BenefitsError;

/// Coverage periods offered by a sponsor, with the markets it serves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitSponsorship {
    id: BenefitSponsorshipId,
    service_markets: BTreeSet<ServiceMarket>,
    coverage_periods: Vec<CoveragePeriod>,
}

impl BenefitSponsorship {
    /// Creates a sponsorship serving `service_markets`, which can't be empty
    pub fn new(service_markets: impl IntoIterator<Item = ServiceMarket>) -> Result<Self, BenefitsError> {
        let service_markets: BTreeSet<_> = service_markets.into_iter().collect();
        if service_markets.is_empty() {
            return Err(BenefitsError::NoServiceMarkets);
        }
        Ok(Self {
            id: BenefitSponsorshipId::new_v7(),
            service_markets,
            coverage_periods: Vec::new(),
        })
    }

    pub fn id(&self) -> BenefitSponsorshipId {
        self.id
    }

    pub fn service_markets(&self) -> &BTreeSet<ServiceMarket> {
        &self.service_markets
    }

    pub fn serves(&self, market: ServiceMarket) -> bool {
        self.service_markets.contains(&market)
    }

    pub fn coverage_periods(&self) -> &[CoveragePeriod] {
        &self.coverage_periods
    }

    pub fn add_coverage_period(&mut self, period: CoveragePeriod) {
        self.coverage_periods.push(period);
    }

    /// Builder-style variant of [`add_coverage_period`](Self::add_coverage_period)
    pub fn with_coverage_period(mut self, period: CoveragePeriod) -> Self {
        self.add_coverage_period(period);
        self
    }

    pub fn find_coverage_period(&self, id: CoveragePeriodId) -> Result<&CoveragePeriod, BenefitsError> {
        self.coverage_periods
            .iter()
            .find(|period| period.id() == id)
            .ok_or_else(|| BenefitsError::not_found(id))
    }

    /// The plan year covering `today`
    pub fn current_coverage_period(&self, today: NaiveDate) -> Option<&CoveragePeriod> {
        self.coverage_period_by_effective_date(today)
    }

    /// The plan year covering the same date one year from `today`
    pub fn renewal_coverage_period(&self, today: NaiveDate) -> Option<&CoveragePeriod> {
        self.coverage_period_by_effective_date(add_years(today, 1))
    }

    /// The plan year new enrollments made on `today` should target
    ///
    /// Once next year's open enrollment has started the renewal period takes
    /// over, even though the current plan year has not ended yet.
    pub fn effective_coverage_period(&self, today: NaiveDate) -> Option<&CoveragePeriod> {
        match self.renewal_coverage_period(today) {
            Some(renewal) if renewal.open_enrollment_contains(today) => Some(renewal),
            _ => self.current_coverage_period(today),
        }
    }

    /// The plan year covering an arbitrary `date`
    pub fn coverage_period_by_effective_date(&self, date: NaiveDate) -> Option<&CoveragePeriod> {
        self.coverage_periods.iter().find(|period| period.contains(date))
    }

    /// True when any plan year is in open enrollment on `today`
    pub fn is_under_open_enrollment(&self, today: NaiveDate) -> bool {
        self.coverage_periods
            .iter()
            .any(|period| period.open_enrollment_contains(today))
    }

    /// Earliest coverage start for an enrollment made on `today`
    pub fn earliest_effective_date(&self, today: NaiveDate, settings: &EnrollmentSettings) -> Option<NaiveDate> {
        self.effective_coverage_period(today)
            .map(|period| period.earliest_effective_date(today, settings))
    }
}
