//! Tests for coverage period date rules and sponsorship period selection

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use core_kernel::EnrollmentSettings;
use domain_benefits::{
    BenefitEligibilityElementGroup, BenefitPackage, BenefitSponsorship, BenefitsError, CoveragePeriod,
    ServiceMarket,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Plan year `year` with open enrollment from Nov 1 of the prior year to Jan 31
fn plan_year(year: i32) -> CoveragePeriod {
    CoveragePeriod::builder()
        .service_market(ServiceMarket::Individual)
        .start_on(date(year, 1, 1))
        .end_on(date(year, 12, 31))
        .open_enrollment_start_on(date(year - 1, 11, 1))
        .open_enrollment_end_on(date(year, 1, 31))
        .build()
        .unwrap()
}

fn settings() -> EnrollmentSettings {
    EnrollmentSettings::new(15, 14).unwrap()
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2025, 1u32..=366).prop_map(|(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal).unwrap_or_else(|| date(year, 12, 31))
    })
}

mod termination_during_open_enrollment {
    use super::*;

    fn check(requested: NaiveDate, expected: NaiveDate) {
        let period = plan_year(2022);
        assert_eq!(
            period.termination_effective_on_for(requested, requested, &settings()),
            expected,
            "termination requested on {requested}"
        );
    }

    #[test]
    fn test_two_months_before_plan_year_starts() {
        check(date(2021, 11, 22), date(2022, 1, 1));
    }

    #[test]
    fn test_month_before_plan_year_on_time() {
        check(date(2021, 12, 9), date(2022, 1, 1));
    }

    #[test]
    fn test_month_before_plan_year_late() {
        check(date(2021, 12, 23), date(2022, 1, 31));
    }

    #[test]
    fn test_plan_year_under_way_on_time() {
        check(date(2022, 1, 5), date(2022, 1, 31));
    }

    #[test]
    fn test_plan_year_under_way_late() {
        check(date(2022, 1, 17), date(2022, 2, 28));
    }

    #[test]
    fn test_due_day_itself_is_on_time() {
        check(date(2021, 12, 15), date(2022, 1, 1));
        check(date(2021, 12, 16), date(2022, 1, 31));
    }

    #[test]
    fn test_date_of_record_ignored_inside_open_enrollment() {
        let period = plan_year(2022);
        let result = period.termination_effective_on_for(date(2021, 12, 9), date(2021, 12, 30), &settings());
        assert_eq!(result, date(2022, 1, 1));
    }

    #[test]
    fn test_custom_due_day() {
        let period = plan_year(2022);
        let settings = EnrollmentSettings::new(20, 14).unwrap();
        assert_eq!(
            period.termination_effective_on_for(date(2021, 12, 18), date(2021, 12, 18), &settings),
            date(2022, 1, 1)
        );
    }
}

mod termination_outside_open_enrollment {
    use super::*;

    #[test]
    fn test_short_notice_pushed_to_minimum() {
        let period = plan_year(2022);
        let result = period.termination_effective_on_for(date(2022, 3, 1), date(2022, 2, 25), &settings());
        assert_eq!(result, date(2022, 3, 11));
    }

    #[test]
    fn test_enough_notice_keeps_requested_date() {
        let period = plan_year(2022);
        let result = period.termination_effective_on_for(date(2022, 6, 30), date(2022, 3, 1), &settings());
        assert_eq!(result, date(2022, 6, 30));
    }

    #[test]
    fn test_exactly_minimum_notice() {
        let period = plan_year(2022);
        let result = period.termination_effective_on_for(date(2022, 5, 15), date(2022, 5, 1), &settings());
        assert_eq!(result, date(2022, 5, 15));
    }

    #[test]
    fn test_past_date_pushed_to_minimum() {
        let period = plan_year(2022);
        let result = period.termination_effective_on_for(date(2022, 4, 1), date(2022, 4, 20), &settings());
        assert_eq!(result, date(2022, 5, 4));
    }

    #[test]
    fn test_never_after_plan_year_end() {
        let period = plan_year(2022);
        let result = period.termination_effective_on_for(date(2023, 2, 1), date(2022, 12, 20), &settings());
        assert_eq!(result, date(2022, 12, 31));
    }
}

mod earliest_effective_date {
    use super::*;

    #[test]
    fn test_on_or_before_due_day_starts_next_month() {
        let period = plan_year(2022);
        assert_eq!(period.earliest_effective_date(date(2022, 3, 10), &settings()), date(2022, 4, 1));
        assert_eq!(period.earliest_effective_date(date(2022, 3, 15), &settings()), date(2022, 4, 1));
    }

    #[test]
    fn test_after_due_day_skips_a_month() {
        let period = plan_year(2022);
        assert_eq!(period.earliest_effective_date(date(2022, 3, 16), &settings()), date(2022, 5, 1));
    }

    #[test]
    fn test_before_plan_year_starts_on_plan_year_start() {
        let period = plan_year(2022);
        assert_eq!(period.earliest_effective_date(date(2021, 11, 10), &settings()), date(2022, 1, 1));
        assert_eq!(period.earliest_effective_date(date(2021, 12, 20), &settings()), date(2022, 1, 1));
    }

    #[test]
    fn test_late_in_plan_year_clamped_to_end() {
        let period = plan_year(2022);
        assert_eq!(period.earliest_effective_date(date(2022, 12, 20), &settings()), date(2022, 12, 31));
    }
}

mod sponsorship_selection {
    use super::*;

    fn sponsorship() -> BenefitSponsorship {
        BenefitSponsorship::new([ServiceMarket::Individual])
            .unwrap()
            .with_coverage_period(plan_year(2022))
            .with_coverage_period(plan_year(2023))
    }

    #[test]
    fn test_current_period() {
        let sponsorship = sponsorship();
        let current = sponsorship.current_coverage_period(date(2022, 6, 1)).unwrap();
        assert_eq!(current.start_on(), date(2022, 1, 1));
    }

    #[test]
    fn test_renewal_period() {
        let sponsorship = sponsorship();
        let renewal = sponsorship.renewal_coverage_period(date(2022, 6, 1)).unwrap();
        assert_eq!(renewal.start_on(), date(2023, 1, 1));
        assert!(sponsorship.renewal_coverage_period(date(2023, 6, 1)).is_none());
    }

    #[test]
    fn test_effective_period_outside_renewal_open_enrollment() {
        let sponsorship = sponsorship();
        let effective = sponsorship.effective_coverage_period(date(2022, 6, 1)).unwrap();
        assert_eq!(effective.start_on(), date(2022, 1, 1));
    }

    #[test]
    fn test_effective_period_switches_during_renewal_open_enrollment() {
        let sponsorship = sponsorship();
        let today = date(2022, 11, 15);

        assert_eq!(sponsorship.current_coverage_period(today).unwrap().start_on(), date(2022, 1, 1));
        assert_eq!(sponsorship.effective_coverage_period(today).unwrap().start_on(), date(2023, 1, 1));
        assert!(sponsorship.is_under_open_enrollment(today));
    }

    #[test]
    fn test_effective_period_after_renewal_starts() {
        let sponsorship = sponsorship();
        let effective = sponsorship.effective_coverage_period(date(2023, 1, 15)).unwrap();
        assert_eq!(effective.start_on(), date(2023, 1, 1));
    }

    #[test]
    fn test_earliest_effective_date_targets_renewal_in_open_enrollment() {
        let sponsorship = sponsorship();
        assert_eq!(
            sponsorship.earliest_effective_date(date(2022, 11, 20), &settings()),
            Some(date(2023, 1, 1))
        );
        assert_eq!(
            sponsorship.earliest_effective_date(date(2022, 12, 20), &settings()),
            Some(date(2023, 2, 1))
        );
    }

    #[test]
    fn test_not_under_open_enrollment_mid_year() {
        assert!(!sponsorship().is_under_open_enrollment(date(2022, 6, 1)));
    }

    #[test]
    fn test_first_stored_period_wins_on_overlap() {
        let first = CoveragePeriod::builder()
            .title("First")
            .service_market(ServiceMarket::Individual)
            .start_on(date(2022, 1, 1))
            .end_on(date(2022, 12, 31))
            .open_enrollment_start_on(date(2021, 11, 1))
            .open_enrollment_end_on(date(2022, 1, 31))
            .build()
            .unwrap();
        let second = CoveragePeriod::builder()
            .title("Second")
            .service_market(ServiceMarket::Individual)
            .start_on(date(2022, 6, 1))
            .end_on(date(2023, 5, 31))
            .open_enrollment_start_on(date(2022, 4, 1))
            .open_enrollment_end_on(date(2022, 6, 30))
            .build()
            .unwrap();

        let sponsorship = BenefitSponsorship::new([ServiceMarket::Individual])
            .unwrap()
            .with_coverage_period(first)
            .with_coverage_period(second);

        let current = sponsorship.current_coverage_period(date(2022, 7, 1)).unwrap();
        assert_eq!(current.title(), "First");
    }

    #[test]
    fn test_renewal_from_leap_day() {
        let sponsorship = BenefitSponsorship::new([ServiceMarket::Individual])
            .unwrap()
            .with_coverage_period(plan_year(2024))
            .with_coverage_period(plan_year(2025));

        let renewal = sponsorship.renewal_coverage_period(date(2024, 2, 29)).unwrap();
        assert_eq!(renewal.start_on(), date(2025, 1, 1));
    }

    #[test]
    fn test_find_coverage_period() {
        let sponsorship = sponsorship();
        let id = sponsorship.coverage_periods()[1].id();
        assert_eq!(sponsorship.find_coverage_period(id).unwrap().start_on(), date(2023, 1, 1));

        let other = plan_year(2030).id();
        assert!(matches!(
            sponsorship.find_coverage_period(other),
            Err(BenefitsError::CoveragePeriodNotFound(_))
        ));
    }
}

mod benefit_packages {
    use super::*;

    #[test]
    fn test_packages_attach_to_period() {
        let health = BenefitPackage::new(
            "individual_health_benefits_2022",
            BenefitEligibilityElementGroup {
                market_places: vec!["individual".to_string()],
                benefit_categories: vec!["health".to_string()],
                ..Default::default()
            },
        );
        let mut period = plan_year(2022);
        period.add_benefit_package(health);

        assert_eq!(period.benefit_packages().len(), 1);
        let group = &period.benefit_packages()[0].benefit_eligibility_element_group;
        assert!(group.allows_market_place(period.service_market()));
        assert!(group.validate_for(period.service_market()).is_ok());
    }

    #[test]
    fn test_period_serializes() {
        let period = plan_year(2022);
        let json = serde_json::to_value(&period).unwrap();
        assert_eq!(json["service_market"], "individual");
        assert_eq!(json["title"], "Individual Market Benefits 2022");
    }
}

proptest! {
    #[test]
    fn prop_termination_never_after_plan_year_end(requested in any_date(), date_of_record in any_date()) {
        let period = plan_year(2022);
        let result = period.termination_effective_on_for(requested, date_of_record, &settings());
        prop_assert!(result <= period.end_on());
    }

    #[test]
    fn prop_open_enrollment_termination_on_month_boundary(offset in 0u64..92) {
        let period = plan_year(2022);
        let requested = period.open_enrollment_start_on() + chrono::Days::new(offset);
        prop_assume!(period.open_enrollment_contains(requested));

        let result = period.termination_effective_on_for(requested, requested, &settings());
        let next_day = result.succ_opt().unwrap();
        prop_assert!(result.day() == 1 || next_day.day() == 1);
        prop_assert!(result >= period.start_on());
    }

    #[test]
    fn prop_outside_open_enrollment_respects_minimum_notice(requested in any_date(), date_of_record in any_date()) {
        let period = plan_year(2022);
        prop_assume!(!period.open_enrollment_contains(requested));

        let result = period.termination_effective_on_for(requested, date_of_record, &settings());
        let floor = requested
            .max(settings().minimum_termination_date(date_of_record))
            .min(period.end_on());
        prop_assert_eq!(result, floor);
    }

    #[test]
    fn prop_earliest_effective_date_inside_plan_year(today in any_date()) {
        let period = plan_year(2022);
        let result = period.earliest_effective_date(today, &settings());
        prop_assert!(period.contains(result));
        prop_assert!(result.day() == 1 || result == period.end_on());
    }

    #[test]
    fn prop_selection_is_stable(today in any_date()) {
        let sponsorship = BenefitSponsorship::new([ServiceMarket::Individual])
            .unwrap()
            .with_coverage_period(plan_year(2021))
            .with_coverage_period(plan_year(2022))
            .with_coverage_period(plan_year(2023));

        let first = sponsorship.effective_coverage_period(today).map(|p| p.id());
        let second = sponsorship.effective_coverage_period(today).map(|p| p.id());
        prop_assert_eq!(first, second);

        if let Some(current) = sponsorship.current_coverage_period(today) {
            prop_assert!(current.contains(today));
        }
    }
}
