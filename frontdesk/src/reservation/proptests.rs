//! Property-based tests for stay intervals.

use super::StayDates;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

// Strategy for generating instants within a few years of a fixed epoch.
fn instant_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..1500, 0u32..24, 0u32..60).prop_map(|(days, hour, minute)| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            + Duration::days(days)
    })
}

// Strategy for generating valid half-open stay intervals.
fn stay_strategy() -> impl Strategy<Value = StayDates> {
    (instant_strategy(), 1i64..5000).prop_map(|(start, minutes)| {
        StayDates::new(start, start + Duration::minutes(minutes)).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap is symmetric
    #[test]
    fn overlap_is_symmetric(a in stay_strategy(), b in stay_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    // Every interval overlaps itself
    #[test]
    fn overlap_is_reflexive(a in stay_strategy()) {
        prop_assert!(a.overlaps(&a));
    }

    // Back-to-back intervals never conflict
    #[test]
    fn edge_touching_never_overlaps(a in stay_strategy(), minutes in 1i64..5000) {
        let b = StayDates::new(a.check_out(), a.check_out() + Duration::minutes(minutes)).unwrap();
        prop_assert!(!a.overlaps(&b));
        prop_assert!(!b.overlaps(&a));
    }

    // Disjoint-with-gap intervals never conflict
    #[test]
    fn gap_separated_never_overlaps(a in stay_strategy(), gap in 1i64..5000, minutes in 1i64..5000) {
        let start = a.check_out() + Duration::minutes(gap);
        let b = StayDates::new(start, start + Duration::minutes(minutes)).unwrap();
        prop_assert!(!a.overlaps(&b));
    }

    // An interval strictly inside another always conflicts
    #[test]
    fn containment_always_overlaps(start in instant_strategy(), pad in 1i64..1000, len in 1i64..1000) {
        let outer = StayDates::new(
            start,
            start + Duration::minutes(pad + len + pad),
        ).unwrap();
        let inner = StayDates::new(
            start + Duration::minutes(pad),
            start + Duration::minutes(pad + len),
        ).unwrap();
        prop_assert!(outer.overlaps(&inner));
        prop_assert!(inner.overlaps(&outer));
    }

    // Nights is never negative and ignores time of day
    #[test]
    fn nights_is_calendar_difference(a in stay_strategy()) {
        let nights = a.nights();
        prop_assert!(nights >= 0);
        let expected = (a.check_out().date() - a.check_in().date()).num_days();
        prop_assert_eq!(nights, expected);
    }

    // Serde round trip preserves the interval
    #[test]
    fn stay_dates_serde_round_trip(a in stay_strategy()) {
        let json = serde_json::to_string(&a).unwrap();
        let back: StayDates = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, a);
    }
}
