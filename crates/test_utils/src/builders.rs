//! Test Data Builders
//!
//! Builders that start from valid defaults so each test only states the
//! fields it cares about.

use chrono::NaiveDate;
use core_kernel::SiteSettings;
use domain_party::ssn::mock::ReversingSsnCipher;
use domain_party::{
    Address, AddressKind, CensusMember, HbxProfile, OfficeLocation, Organization, Person, Phone, PhoneKind,
};

use crate::fixtures::{CoverageFixtures, IdentityFixtures, SettingsFixtures};

/// Builder for a [`Person`] whose SSN is encrypted with [`ReversingSsnCipher`]
pub struct TestPersonBuilder {
    first_name: String,
    last_name: String,
    dob: Option<NaiveDate>,
    ssn: Option<String>,
    gender: Option<String>,
    addresses: Vec<Address>,
    phones: Vec<Phone>,
    site: SiteSettings,
}

impl Default for TestPersonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPersonBuilder {
    pub fn new() -> Self {
        Self {
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
            dob: Some(IdentityFixtures::adult_dob()),
            ssn: Some(IdentityFixtures::VALID_SSN.to_string()),
            gender: Some("female".to_string()),
            addresses: Vec::new(),
            phones: Vec::new(),
            site: SettingsFixtures::site(),
        }
    }

    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self
    }

    pub fn with_dob(mut self, dob: NaiveDate) -> Self {
        self.dob = Some(dob);
        self
    }

    pub fn without_dob(mut self) -> Self {
        self.dob = None;
        self
    }

    pub fn with_ssn(mut self, ssn: &str) -> Self {
        self.ssn = Some(ssn.to_string());
        self
    }

    pub fn without_ssn(mut self) -> Self {
        self.ssn = None;
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    /// Adds a home address in `state`
    pub fn with_home_address_in(mut self, state: &str) -> Self {
        self.addresses
            .push(Address::new(AddressKind::Home, "1 Main St", "Springfield", state, "20001"));
        self
    }

    pub fn with_phone(mut self, kind: PhoneKind, number: &str) -> Self {
        self.phones.push(Phone::new(kind, number));
        self
    }

    pub fn build(self) -> Person {
        let mut person = Person::new(self.first_name, self.last_name, &self.site);
        person.dob = self.dob;
        if let Some(gender) = self.gender {
            person.set_gender(&gender);
        }
        if let Some(ssn) = self.ssn {
            person
                .set_ssn(&ReversingSsnCipher, &ssn)
                .expect("stand-in cipher never fails");
        }
        person.addresses = self.addresses;
        person.phones = self.phones;
        person
    }
}

/// Builder for a [`CensusMember`]
pub struct TestCensusMemberBuilder {
    member: CensusMember,
}

impl Default for TestCensusMemberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCensusMemberBuilder {
    pub fn new() -> Self {
        let mut member = CensusMember::new("John", "Doe", IdentityFixtures::adult_dob());
        member.set_gender("male");
        Self { member }
    }

    pub fn with_dob(mut self, dob: Option<NaiveDate>) -> Self {
        self.member.dob = dob;
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.member.set_gender(gender);
        self
    }

    pub fn with_ssn(mut self, ssn: &str) -> Self {
        self.member
            .set_ssn(&ReversingSsnCipher, ssn)
            .expect("stand-in cipher never fails");
        self
    }

    pub fn build(self) -> CensusMember {
        self.member
    }
}

/// Builder for an [`Organization`] with one primary office
pub struct TestOrganizationBuilder {
    legal_name: String,
    fein: String,
    office_kinds: Vec<AddressKind>,
    hbx_profile: Option<HbxProfile>,
}

impl Default for TestOrganizationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOrganizationBuilder {
    pub fn new() -> Self {
        Self {
            legal_name: "Acme Widgets LLC".to_string(),
            fein: IdentityFixtures::VALID_FEIN.to_string(),
            office_kinds: vec![AddressKind::Primary],
            hbx_profile: None,
        }
    }

    pub fn with_fein(mut self, fein: &str) -> Self {
        self.fein = fein.to_string();
        self
    }

    pub fn with_legal_name(mut self, legal_name: &str) -> Self {
        self.legal_name = legal_name.to_string();
        self
    }

    /// Replaces the office locations with one per kind
    pub fn with_office_kinds(mut self, kinds: &[AddressKind]) -> Self {
        self.office_kinds = kinds.to_vec();
        self
    }

    /// Makes this the exchange organization for `state`, sponsoring the
    /// 2022 and 2023 plan years
    pub fn as_exchange(mut self, cms_id: &str, state: &str) -> Self {
        let profile = HbxProfile::new(cms_id, state, &SettingsFixtures::site())
            .with_benefit_sponsorship(CoverageFixtures::individual_sponsorship());
        self.hbx_profile = Some(profile);
        self
    }

    pub fn build(self) -> Organization {
        let mut organization = Organization::new(self.legal_name, &self.fein);
        for kind in self.office_kinds {
            let office = OfficeLocation::new(Address::new(kind, "1225 I St NW", "Washington", "DC", "20005"))
                .with_phone(Phone::new(PhoneKind::Work, "2025550147"));
            organization = organization.with_office_location(office);
        }
        if let Some(profile) = self.hbx_profile {
            organization = organization.with_hbx_profile(profile);
        }
        organization
    }
}
