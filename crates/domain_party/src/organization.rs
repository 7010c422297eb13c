//! Organizations: employers, carriers and the exchange itself
//!
//! An organization is identified by its FEIN and holds one or more office
//! locations. The exchange's own organization also carries an
//! [`HbxProfile`], which is the sponsor of the exchange's coverage periods.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use core_kernel::{IdentifierGenerator, OrganizationId};
use domain_benefits::SponsorHooks;

use crate::address::{AddressKind, OfficeLocation};
use crate::error::PartyError;
use crate::hbx_profile::HbxProfile;
use crate::validation::{check_fields, ValidationResult};

/// Legal form of an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    TaxExemptOrganization,
    CCorporation,
    SCorporation,
    Partnership,
    LimitedLiabilityCorporation,
    LimitedLiabilityPartnership,
    HouseholdEmployer,
    GovernmentalEmployer,
    ForeignEmbassyOrConsulate,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::TaxExemptOrganization => "tax_exempt_organization",
            EntityKind::CCorporation => "c_corporation",
            EntityKind::SCorporation => "s_corporation",
            EntityKind::Partnership => "partnership",
            EntityKind::LimitedLiabilityCorporation => "limited_liability_corporation",
            EntityKind::LimitedLiabilityPartnership => "limited_liability_partnership",
            EntityKind::HouseholdEmployer => "household_employer",
            EntityKind::GovernmentalEmployer => "governmental_employer",
            EntityKind::ForeignEmbassyOrConsulate => "foreign_embassy_or_consulate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    hbx_id: Option<String>,
    pub issuer_assigned_id: Option<String>,
    /// Registered legal name
    pub legal_name: String,
    /// Doing business as
    pub dba: Option<String>,
    fein: String,
    pub home_page: Option<String>,
    pub is_active: bool,
    pub is_fake_fein: bool,
    pub entity_kind: Option<EntityKind>,
    pub office_locations: Vec<OfficeLocation>,
    pub hbx_profile: Option<HbxProfile>,
}

impl Organization {
    pub fn new(legal_name: impl Into<String>, fein: &str) -> Self {
        Self {
            id: OrganizationId::new_v7(),
            hbx_id: None,
            issuer_assigned_id: None,
            legal_name: legal_name.into(),
            dba: None,
            fein: normalize_fein(fein),
            home_page: None,
            is_active: true,
            is_fake_fein: false,
            entity_kind: None,
            office_locations: Vec::new(),
            hbx_profile: None,
        }
    }

    pub fn with_office_location(mut self, office: OfficeLocation) -> Self {
        self.office_locations.push(office);
        self
    }

    pub fn with_hbx_profile(mut self, profile: HbxProfile) -> Self {
        self.hbx_profile = Some(profile);
        self
    }

    pub fn fein(&self) -> &str {
        &self.fein
    }

    /// Stores the FEIN with every non-digit removed
    pub fn set_fein(&mut self, fein: &str) {
        self.fein = normalize_fein(fein);
    }

    pub fn hbx_id(&self) -> Option<&str> {
        self.hbx_id.as_deref()
    }

    /// Mints the organization hbx id on first call and returns it
    pub async fn assign_hbx_id(&mut self, generator: &dyn IdentifierGenerator) -> Result<&str, PartyError> {
        let hbx_id = match self.hbx_id.take().filter(|id| !id.trim().is_empty()) {
            Some(existing) => existing,
            None => {
                let minted = generator.generate_organization_id().await?;
                info!(organization = %self.id, hbx_id = %minted, "Organization hbx id assigned");
                minted
            }
        };
        Ok(self.hbx_id.insert(hbx_id).as_str())
    }

    pub fn primary_office_location(&self) -> Option<&OfficeLocation> {
        self.office_locations.iter().find(|o| o.is_primary)
    }

    /// A random FEIN starting with `00` that is not in `taken`
    pub fn generate_fein(taken: &HashSet<String>) -> String {
        loop {
            let digits = Uuid::new_v4().as_u128() % 10_000_000;
            let candidate = format!("00{digits:07}");
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// The organization whose hbx id prefixes an invoice file name
    ///
    /// Invoice files are named `<hbx_id>_<MMDDYYYY>_invoices_r.pdf`.
    pub fn find_by_invoice_filename<'a>(organizations: &'a [Organization], path: &str) -> Option<&'a Organization> {
        let hbx_id = hbx_id_from_invoice_filename(path)?;
        organizations.iter().find(|o| o.hbx_id() == Some(hbx_id))
    }

    /// Checks the organization on its own
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if self.legal_name.trim().is_empty() {
            result.add_error("legal_name can't be blank");
        }
        if self.fein.is_empty() {
            result.add_error("fein can't be blank");
        } else if self.fein.len() != 9 {
            result.add_error(format!("{} is not a valid FEIN", self.fein));
        }
        if self.office_locations.is_empty() {
            result.add_error("office_locations can't be blank");
        }

        self.check_office_location_kinds(&mut result);

        for office in &self.office_locations {
            if let Some(address) = &office.address {
                check_fields(address, &mut result);
            }
            if let Some(phone) = &office.phone {
                check_fields(phone, &mut result);
            }
        }

        if let Some(profile) = &self.hbx_profile {
            result.merge(profile.validate());
        }

        if !result.is_valid {
            warn!(organization = %self.id, errors = ?result.errors, "Organization failed validation");
        }
        result
    }

    /// Checks the organization and that no other organization has its FEIN
    pub fn validate_among(&self, others: &[Organization]) -> ValidationResult {
        let mut result = self.validate();
        if others.iter().any(|o| o.id != self.id && !self.fein.is_empty() && o.fein == self.fein) {
            result.add_error("fein has already been taken");
        }
        result
    }

    /// Exactly one primary office and at most one mailing office
    ///
    /// Offices with home or work addresses belong to household employers
    /// and skip this rule.
    fn check_office_location_kinds(&self, result: &mut ValidationResult) {
        let kinds: Vec<AddressKind> = self.office_locations.iter().filter_map(OfficeLocation::kind).collect();
        if kinds.is_empty() || kinds.iter().any(|k| matches!(k, AddressKind::Home | AddressKind::Work)) {
            return;
        }

        let count = |kind: AddressKind| kinds.iter().filter(|k| **k == kind).count();
        match count(AddressKind::Primary) {
            0 => result.add_error("must select one primary address"),
            1 if count(AddressKind::Mailing) > 1 => result.add_error("can't have more than one mailing address"),
            1 => {}
            _ => result.add_error("can't have multiple primary addresses"),
        }
    }
}

/// Delegates to the exchange profile when the organization has one
impl SponsorHooks for Organization {
    fn on_day_advance(&mut self) {
        if let Some(profile) = self.hbx_profile.as_mut() {
            profile.on_day_advance();
        }
    }

    fn on_month_advance(&mut self) {
        if let Some(profile) = self.hbx_profile.as_mut() {
            profile.on_month_advance();
        }
    }

    fn on_quarter_advance(&mut self) {
        if let Some(profile) = self.hbx_profile.as_mut() {
            profile.on_quarter_advance();
        }
    }

    fn on_year_advance(&mut self) {
        if let Some(profile) = self.hbx_profile.as_mut() {
            profile.on_year_advance();
        }
    }
}

/// Strips every non-digit character
pub fn normalize_fein(fein: &str) -> String {
    fein.chars().filter(char::is_ascii_digit).collect()
}

/// The hbx id at the start of an invoice file name, if any
pub fn hbx_id_from_invoice_filename(path: &str) -> Option<&str> {
    Path::new(path)
        .file_name()?
        .to_str()?
        .split('_')
        .next()
        .filter(|id| !id.is_empty())
}
