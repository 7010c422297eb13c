//! The exchange's own profile
//!
//! The health benefit exchange is an organization with an `HbxProfile`. The
//! profile holds the benefit sponsorship that owns the individual market
//! coverage periods, and it is the sponsor notified as days advance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{HbxProfileId, SiteSettings};
use domain_benefits::{BenefitSponsorship, SponsorHooks};

use crate::inbox::Inbox;
use crate::organization::Organization;
use crate::validation::ValidationResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HbxProfile {
    pub id: HbxProfileId,
    /// CMS-assigned exchange id
    pub cms_id: String,
    pub us_state_abbreviation: String,
    pub benefit_sponsorship: Option<BenefitSponsorship>,
    pub inbox: Inbox,
}

impl HbxProfile {
    /// A new profile whose inbox holds the site's welcome message
    pub fn new(cms_id: impl Into<String>, us_state_abbreviation: &str, site: &SiteSettings) -> Self {
        Self {
            id: HbxProfileId::new_v7(),
            cms_id: cms_id.into(),
            us_state_abbreviation: us_state_abbreviation.trim().to_uppercase(),
            benefit_sponsorship: None,
            inbox: Inbox::with_welcome(site),
        }
    }

    pub fn with_benefit_sponsorship(mut self, sponsorship: BenefitSponsorship) -> Self {
        self.benefit_sponsorship = Some(sponsorship);
        self
    }

    /// True when the sponsorship has a coverage period in open enrollment on `today`
    pub fn under_open_enrollment(&self, today: NaiveDate) -> bool {
        self.benefit_sponsorship
            .as_ref()
            .is_some_and(|sponsorship| sponsorship.is_under_open_enrollment(today))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        if self.us_state_abbreviation.is_empty() {
            result.add_error("us_state_abbreviation can't be blank");
        }
        if self.cms_id.trim().is_empty() {
            result.add_error("cms_id can't be blank");
        }
        result
    }

    pub fn find_by_cms_id<'a>(organizations: &'a [Organization], cms_id: &str) -> Option<&'a HbxProfile> {
        Self::all(organizations).find(|profile| profile.cms_id == cms_id)
    }

    /// Matches the state abbreviation case-insensitively
    pub fn find_by_state_abbreviation<'a>(organizations: &'a [Organization], state: &str) -> Option<&'a HbxProfile> {
        Self::all(organizations).find(|profile| profile.us_state_abbreviation.eq_ignore_ascii_case(state.trim()))
    }

    pub fn all(organizations: &[Organization]) -> impl Iterator<Item = &HbxProfile> {
        organizations.iter().filter_map(|org| org.hbx_profile.as_ref())
    }

    /// Every profile, for handing to the day advancer
    pub fn all_mut(organizations: &mut [Organization]) -> impl Iterator<Item = &mut HbxProfile> {
        organizations.iter_mut().filter_map(|org| org.hbx_profile.as_mut())
    }
}

impl SponsorHooks for HbxProfile {
    fn on_day_advance(&mut self) {
        debug!(hbx_profile = %self.id, state = %self.us_state_abbreviation, "Day advanced");
    }

    fn on_month_advance(&mut self) {
        info!(hbx_profile = %self.id, state = %self.us_state_abbreviation, "Month advanced");
    }

    fn on_quarter_advance(&mut self) {
        info!(hbx_profile = %self.id, state = %self.us_state_abbreviation, "Quarter advanced");
    }

    fn on_year_advance(&mut self) {
        info!(hbx_profile = %self.id, state = %self.us_state_abbreviation, "Year advanced");
    }
}
