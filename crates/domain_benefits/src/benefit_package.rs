//! Benefit packages and their eligibility rules
//!
//! Each coverage period offers one or more benefit packages. A package's
//! eligibility element group lists, per dimension, which values qualify;
//! `"any"` in a dimension accepts every value.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use core_kernel::BenefitPackageId;

use crate::coverage_period::ServiceMarket;
use crate::error::BenefitsError;

/// Wildcard accepted in every eligibility dimension
pub const ANY: &str = "any";

/// Relationship categories recognised in the individual market
pub const INDIVIDUAL_MARKET_RELATIONSHIP_CATEGORY_KINDS: &[&str] = &[
    "self",
    "spouse",
    "domestic_partner",
    "child",
    "parent",
    "sibling",
    "ward",
    "guardian",
    "unrelated",
    "other_tax_dependent",
    "aunt_or_uncle",
    "nephew_or_niece",
    "grandchild",
    "grandparent",
];

/// Relationship categories offered when a consumer describes a household
pub const RELATIONSHIPS_UI: &[&str] = &[
    "self",
    "spouse",
    "domestic_partner",
    "child",
    "parent",
    "sibling",
    "unrelated",
    "aunt_or_uncle",
    "nephew_or_niece",
    "grandchild",
    "grandparent",
];

/// Relationship categories recognised in the SHOP market
pub const SHOP_MARKET_RELATIONSHIP_CATEGORY_KINDS: &[&str] = &[
    "self",
    "spouse",
    "domestic_partner",
    "children_under_26",
    "disabled_children_26_and_over",
    "children_26_and_over",
];

fn any() -> Vec<String> {
    vec![ANY.to_string()]
}

fn allows(values: &[String], candidate: &str) -> bool {
    values.iter().any(|v| v == ANY || v == candidate)
}

/// Eligibility rules for a benefit package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitEligibilityElementGroup {
    /// any, shop, individual
    pub market_places: Vec<String>,
    /// any, open_enrollment, special_enrollment
    pub enrollment_periods: Vec<String>,
    pub family_relationships: Vec<String>,
    /// any, health, dental, retirement, disability
    pub benefit_categories: Vec<String>,
    /// any, unincarcerated
    pub incarceration_status: Vec<String>,
    /// `0..=0` means no age restriction
    pub age_range: RangeInclusive<u32>,
    pub citizenship_status: Vec<String>,
    /// any, state_resident
    pub residency_status: Vec<String>,
    /// any, indian_tribe_member
    pub ethnicity: Vec<String>,
    pub cost_sharing: String,
    pub lawful_presence_status: String,
}

impl Default for BenefitEligibilityElementGroup {
    fn default() -> Self {
        Self {
            market_places: any(),
            enrollment_periods: any(),
            family_relationships: any(),
            benefit_categories: any(),
            incarceration_status: any(),
            age_range: 0..=0,
            citizenship_status: any(),
            residency_status: any(),
            ethnicity: any(),
            cost_sharing: String::new(),
            lawful_presence_status: String::new(),
        }
    }
}

impl BenefitEligibilityElementGroup {
    pub fn allows_market_place(&self, market: ServiceMarket) -> bool {
        allows(&self.market_places, market.as_str())
    }

    pub fn allows_enrollment_period(&self, kind: &str) -> bool {
        allows(&self.enrollment_periods, kind)
    }

    pub fn allows_relationship(&self, relationship: &str) -> bool {
        allows(&self.family_relationships, relationship)
    }

    pub fn allows_benefit_category(&self, category: &str) -> bool {
        allows(&self.benefit_categories, category)
    }

    pub fn allows_citizenship_status(&self, status: &str) -> bool {
        allows(&self.citizenship_status, status)
    }

    pub fn allows_age(&self, age: u32) -> bool {
        self.is_age_unrestricted() || self.age_range.contains(&age)
    }

    fn is_age_unrestricted(&self) -> bool {
        *self.age_range.start() == 0 && *self.age_range.end() == 0
    }

    /// Checks relationship categories against the catalogue of `market`
    pub fn validate_for(&self, market: ServiceMarket) -> Result<(), BenefitsError> {
        let catalogue = match market {
            ServiceMarket::Shop => SHOP_MARKET_RELATIONSHIP_CATEGORY_KINDS,
            ServiceMarket::Individual | ServiceMarket::Coverall => INDIVIDUAL_MARKET_RELATIONSHIP_CATEGORY_KINDS,
        };

        if let Some(unknown) = self
            .family_relationships
            .iter()
            .find(|r| r.as_str() != ANY && !catalogue.contains(&r.as_str()))
        {
            return Err(BenefitsError::InvalidEligibility(format!(
                "{} is not a {} market relationship category",
                unknown, market
            )));
        }

        if self.age_range.start() > self.age_range.end() {
            return Err(BenefitsError::InvalidEligibility(format!(
                "age range {}..={} is empty",
                self.age_range.start(),
                self.age_range.end()
            )));
        }

        Ok(())
    }
}

/// A package of benefits offered during a coverage period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitPackage {
    pub id: BenefitPackageId,
    pub title: String,
    /// How an advance premium tax credit is applied, when the package allows one
    pub elected_premium_credit_strategy: Option<String>,
    pub benefit_eligibility_element_group: BenefitEligibilityElementGroup,
}

impl BenefitPackage {
    pub fn new(title: impl Into<String>, eligibility: BenefitEligibilityElementGroup) -> Self {
        Self {
            id: BenefitPackageId::new_v7(),
            title: title.into(),
            elected_premium_credit_strategy: None,
            benefit_eligibility_element_group: eligibility,
        }
    }

    pub fn with_premium_credit_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.elected_premium_credit_strategy = Some(strategy.into());
        self
    }
}
