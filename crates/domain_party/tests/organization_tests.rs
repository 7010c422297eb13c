//! Tests for organizations, the exchange profile and day rollover across sponsors

use std::collections::HashSet;

use domain_benefits::{DayAdvancer, Rollover};
use domain_party::{AddressKind, HbxProfile, Organization};
use test_utils::{
    assert_errors, assert_has_error, assert_valid, assert_within_period, date, CountingIdentifierGenerator, IdentityFixtures,
    TestOrganizationBuilder,
};

fn registry() -> Vec<Organization> {
    vec![
        TestOrganizationBuilder::new().as_exchange("DC0", "DC").build(),
        TestOrganizationBuilder::new().with_legal_name("Employer Co").with_fein("987654321").build(),
        TestOrganizationBuilder::new()
            .with_legal_name("Maryland Exchange")
            .with_fein("111222333")
            .as_exchange("MD0", "MD")
            .build(),
    ]
}

mod validation {
    use super::*;

    #[test]
    fn test_organization_with_primary_office_is_valid() {
        assert_valid(&TestOrganizationBuilder::new().build().validate());
    }

    #[test]
    fn test_missing_basics() {
        let organization = TestOrganizationBuilder::new()
            .with_legal_name(" ")
            .with_fein("12-345")
            .with_office_kinds(&[])
            .build();
        assert_errors(
            &organization.validate(),
            &[
                "legal_name can't be blank",
                "12345 is not a valid FEIN",
                "office_locations can't be blank",
            ],
        );
    }

    #[test]
    fn test_household_employer_skips_primary_rule() {
        let organization = TestOrganizationBuilder::new()
            .with_office_kinds(&[AddressKind::Home, AddressKind::Mailing, AddressKind::Mailing])
            .build();
        assert_valid(&organization.validate());
    }

    #[test]
    fn test_fein_must_be_unique() {
        let registry = registry();
        let duplicate = TestOrganizationBuilder::new().with_fein("98-7654321").build();
        assert_has_error(&duplicate.validate_among(&registry), "fein has already been taken");
        assert_valid(&registry[0].validate_among(&registry));
    }

    #[test]
    fn test_exchange_profile_is_validated() {
        let mut organization = TestOrganizationBuilder::new().as_exchange("DC0", "DC").build();
        if let Some(profile) = organization.hbx_profile.as_mut() {
            profile.us_state_abbreviation.clear();
        }
        assert_errors(&organization.validate(), &["us_state_abbreviation can't be blank"]);
    }
}

mod identifiers {
    use super::*;

    #[test]
    fn test_generated_feins_are_unused() {
        let mut taken: HashSet<String> = registry().iter().map(|o| o.fein().to_string()).collect();
        for _ in 0..50 {
            let fein = Organization::generate_fein(&taken);
            assert!(fein.starts_with("00") && fein.len() == 9);
            assert!(taken.insert(fein));
        }
    }

    #[tokio::test]
    async fn test_find_by_invoice_filename() {
        let generator = CountingIdentifierGenerator::starting_at(118510);
        let mut registry = registry();
        for organization in registry.iter_mut() {
            organization.assign_hbx_id(&generator).await.unwrap();
        }
        assert_eq!(registry[0].hbx_id(), Some("O118510"));

        let renamed = "/var/invoices/O118511_12012021_invoices_r.pdf";
        let found = Organization::find_by_invoice_filename(&registry, renamed).unwrap();
        assert_eq!(found.legal_name, "Employer Co");
        assert!(Organization::find_by_invoice_filename(&registry, IdentityFixtures::INVOICE_FILE).is_none());
    }
}

mod exchange {
    use super::*;

    #[test]
    fn test_lookup_profiles() {
        let registry = registry();
        assert_eq!(HbxProfile::all(&registry).count(), 2);
        assert_eq!(HbxProfile::find_by_cms_id(&registry, "MD0").map(|p| p.us_state_abbreviation.as_str()), Some("MD"));
        assert_eq!(HbxProfile::find_by_state_abbreviation(&registry, "dc").map(|p| p.cms_id.as_str()), Some("DC0"));
        assert!(HbxProfile::find_by_cms_id(&registry, "VA0").is_none());
    }

    #[test]
    fn test_under_open_enrollment() {
        let registry = registry();
        let profile = HbxProfile::find_by_cms_id(&registry, "DC0").unwrap();
        assert!(profile.under_open_enrollment(date(2021, 11, 1)));
        assert!(profile.under_open_enrollment(date(2022, 1, 31)));
        assert!(!profile.under_open_enrollment(date(2022, 2, 1)));
        assert!(profile.under_open_enrollment(date(2022, 11, 15)));
    }

    #[test]
    fn test_current_period_from_profile_sponsorship() {
        let registry = registry();
        let sponsorship = HbxProfile::find_by_cms_id(&registry, "DC0")
            .and_then(|p| p.benefit_sponsorship.as_ref())
            .unwrap();
        let today = date(2022, 7, 4);
        let current = sponsorship.current_coverage_period(today).unwrap();
        assert_within_period(current, today);
        assert_eq!(current.title(), "Individual Market Benefits 2022");
    }

    #[test]
    fn test_new_profile_inbox_has_welcome() {
        let registry = registry();
        let profile = HbxProfile::find_by_cms_id(&registry, "DC0").unwrap();
        assert_eq!(profile.inbox.unread_messages().count(), 1);
    }
}

mod day_advance {
    use super::*;

    #[test]
    fn test_every_organization_is_notified() {
        let mut registry = registry();
        let report = DayAdvancer::new().advance_day(date(2022, 1, 1), registry.iter_mut());
        assert_eq!(report.sponsors_notified, 3);
        assert_eq!(
            report.rollovers,
            vec![Rollover::Day, Rollover::Month, Rollover::Quarter, Rollover::Year]
        );
    }

    #[test]
    fn test_only_exchange_profiles_are_notified() {
        let mut registry = registry();
        let report = DayAdvancer::new().advance_day(date(2022, 5, 1), HbxProfile::all_mut(&mut registry));
        assert_eq!(report.sponsors_notified, 2);
        assert_eq!(report.rollovers, vec![Rollover::Day, Rollover::Month]);
    }
}
