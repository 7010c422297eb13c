//! Benefit coverage periods
//!
//! A coverage period is one plan year of a sponsorship: the window in which
//! coverage can be in force and the open enrollment window in which people
//! may enroll or change plans for it. Open enrollment normally starts before
//! the plan year and runs a few weeks into it.
//!
//! The date rules below are those of the individual market. Coverage always
//! starts on the first of a month and, during open enrollment, ends on the
//! last day of a month. Which month depends on whether the request is made
//! on or before the enrollment due day.
//!
//! ```text
//!   open enrollment 11/1 - 1/31, plan year 1/1 - 12/31, due day 15
//!
//!   termination requested   11/22  12/9  12/23  1/5   1/17
//!   effective on             1/1   1/1   1/31   1/31  2/28
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::temporal::{end_of_month, first_of_next_month, next_month};
use core_kernel::{CoveragePeriodId, DateRange, EnrollmentSettings, PlanId};

use crate::benefit_package::BenefitPackage;
use crate::error::BenefitsError;

/// Markets a sponsorship can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMarket {
    /// Small business health options
    Shop,
    /// Individual and family market
    Individual,
    /// Coverage for people ineligible for the individual market
    Coverall,
}

impl ServiceMarket {
    pub const ALL: [ServiceMarket; 3] = [ServiceMarket::Shop, ServiceMarket::Individual, ServiceMarket::Coverall];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMarket::Shop => "shop",
            ServiceMarket::Individual => "individual",
            ServiceMarket::Coverall => "coverall",
        }
    }

    /// Name used in generated coverage period titles
    pub fn market_name(&self) -> &'static str {
        match self {
            ServiceMarket::Shop => "SHOP",
            ServiceMarket::Individual | ServiceMarket::Coverall => "Individual",
        }
    }
}

impl fmt::Display for ServiceMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceMarket {
    type Err = BenefitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceMarket::ALL
            .into_iter()
            .find(|market| market.as_str() == s)
            .ok_or_else(|| BenefitsError::InvalidServiceMarket(s.to_string()))
    }
}

/// One plan year's coverage and open enrollment windows
///
/// Built through [`CoveragePeriod::builder`]; the windows cannot change
/// afterwards. Both windows are whole days with inclusive ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    id: CoveragePeriodId,
    title: String,
    service_market: ServiceMarket,
    coverage: DateRange,
    open_enrollment: DateRange,
    /// Second lowest cost silver plan for the rating area
    slcsp_id: Option<PlanId>,
    benefit_packages: Vec<BenefitPackage>,
}

impl CoveragePeriod {
    pub fn builder() -> CoveragePeriodBuilder {
        CoveragePeriodBuilder::new()
    }

    pub fn id(&self) -> CoveragePeriodId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn service_market(&self) -> ServiceMarket {
        self.service_market
    }

    pub fn start_on(&self) -> NaiveDate {
        self.coverage.start
    }

    pub fn end_on(&self) -> NaiveDate {
        self.coverage.end
    }

    pub fn open_enrollment_start_on(&self) -> NaiveDate {
        self.open_enrollment.start
    }

    pub fn open_enrollment_end_on(&self) -> NaiveDate {
        self.open_enrollment.end
    }

    pub fn slcsp_id(&self) -> Option<PlanId> {
        self.slcsp_id
    }

    pub fn benefit_packages(&self) -> &[BenefitPackage] {
        &self.benefit_packages
    }

    pub fn add_benefit_package(&mut self, package: BenefitPackage) {
        self.benefit_packages.push(package);
    }

    /// True when `date` falls within the plan year
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.coverage.contains(date)
    }

    /// True when `date` falls within open enrollment
    pub fn open_enrollment_contains(&self, date: NaiveDate) -> bool {
        self.open_enrollment.contains(date)
    }

    /// Earliest date coverage from an enrollment made on `today` can start
    ///
    /// Enrollments on or before the due day start on the first of next
    /// month, later ones a month after that. The result never leaves the
    /// plan year.
    pub fn earliest_effective_date(&self, today: NaiveDate, settings: &EnrollmentSettings) -> NaiveDate {
        let candidate = if today.day() <= settings.individual_enrollment_due_day_of_month {
            first_of_next_month(today)
        } else {
            first_of_next_month(next_month(today))
        };

        candidate.max(self.start_on()).min(self.end_on())
    }

    /// Date coverage ends when termination is requested for `date`
    ///
    /// Inside open enrollment the month-boundary rules apply. Outside it the
    /// requested date stands unless it gives less notice than the minimum,
    /// counted from `date_of_record` rather than from `date`. The result is
    /// never after the end of the plan year.
    pub fn termination_effective_on_for(
        &self,
        date: NaiveDate,
        date_of_record: NaiveDate,
        settings: &EnrollmentSettings,
    ) -> NaiveDate {
        let effective_on = if self.open_enrollment_contains(date) {
            self.open_enrollment_termination_on(date, settings)
        } else {
            let minimum = settings.minimum_termination_date(date_of_record);
            if date < minimum {
                minimum
            } else {
                date
            }
        };

        let effective_on = effective_on.min(self.end_on());
        debug!(
            period = %self.title,
            requested = %date,
            %date_of_record,
            %effective_on,
            "Termination effective date computed"
        );
        effective_on
    }

    fn open_enrollment_termination_on(&self, date: NaiveDate, settings: &EnrollmentSettings) -> NaiveDate {
        let on_time = date.day() <= settings.individual_enrollment_due_day_of_month;
        let start_on = self.start_on();

        match first_of_next_month(date).cmp(&start_on) {
            // two or more months ahead of the plan year
            Ordering::Less => start_on,
            // month before the plan year
            Ordering::Equal if on_time => start_on,
            Ordering::Equal => end_of_month(start_on),
            // plan year under way
            Ordering::Greater if on_time => end_of_month(date),
            Ordering::Greater => end_of_month(next_month(date)),
        }
    }
}

/// Builder for [`CoveragePeriod`]
///
/// ```rust
/// use chrono::NaiveDate;
/// use domain_benefits::{CoveragePeriod, ServiceMarket};
///
/// let period = CoveragePeriod::builder()
///     .service_market(ServiceMarket::Individual)
///     .start_on(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
///     .end_on(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap())
///     .open_enrollment_start_on(NaiveDate::from_ymd_opt(2021, 11, 1).unwrap())
///     .open_enrollment_end_on(NaiveDate::from_ymd_opt(2022, 1, 31).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(period.title(), "Individual Market Benefits 2022");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoveragePeriodBuilder {
    title: Option<String>,
    service_market: Option<ServiceMarket>,
    start_on: Option<NaiveDate>,
    end_on: Option<NaiveDate>,
    open_enrollment_start_on: Option<NaiveDate>,
    open_enrollment_end_on: Option<NaiveDate>,
    slcsp_id: Option<PlanId>,
    benefit_packages: Vec<BenefitPackage>,
}

impl CoveragePeriodBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit title; left alone by title generation
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn service_market(mut self, market: ServiceMarket) -> Self {
        self.service_market = Some(market);
        self
    }

    pub fn start_on(mut self, date: NaiveDate) -> Self {
        self.start_on = Some(date);
        self
    }

    pub fn end_on(mut self, date: NaiveDate) -> Self {
        self.end_on = Some(date);
        self
    }

    pub fn open_enrollment_start_on(mut self, date: NaiveDate) -> Self {
        self.open_enrollment_start_on = Some(date);
        self
    }

    pub fn open_enrollment_end_on(mut self, date: NaiveDate) -> Self {
        self.open_enrollment_end_on = Some(date);
        self
    }

    pub fn slcsp_id(mut self, plan_id: PlanId) -> Self {
        self.slcsp_id = Some(plan_id);
        self
    }

    pub fn add_benefit_package(mut self, package: BenefitPackage) -> Self {
        self.benefit_packages.push(package);
        self
    }

    pub fn build(self) -> Result<CoveragePeriod, BenefitsError> {
        let service_market = self
            .service_market
            .ok_or(BenefitsError::MissingRequiredField("service_market"))?;
        let start_on = self.start_on.ok_or(BenefitsError::MissingRequiredField("start_on"))?;
        let end_on = self.end_on.ok_or(BenefitsError::MissingRequiredField("end_on"))?;
        let open_enrollment_start_on = self
            .open_enrollment_start_on
            .ok_or(BenefitsError::MissingRequiredField("open_enrollment_start_on"))?;
        let open_enrollment_end_on = self
            .open_enrollment_end_on
            .ok_or(BenefitsError::MissingRequiredField("open_enrollment_end_on"))?;

        let coverage = DateRange::new(start_on, end_on)
            .map_err(|e| BenefitsError::invalid_window("coverage", e))?;
        let open_enrollment = DateRange::new(open_enrollment_start_on, open_enrollment_end_on)
            .map_err(|e| BenefitsError::invalid_window("open enrollment", e))?;

        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => format!("{} Market Benefits {}", service_market.market_name(), start_on.year()),
        };

        Ok(CoveragePeriod {
            id: CoveragePeriodId::new_v7(),
            title,
            service_market,
            coverage,
            open_enrollment,
            slcsp_id: self.slcsp_id,
            benefit_packages: self.benefit_packages,
        })
    }
}
