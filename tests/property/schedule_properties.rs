use chrono::{Duration, NaiveDate, NaiveDateTime};
use pilot_bid::config::BidConfig;
use pilot_bid::models::{Pairing, Preference, PreferenceKind};
use pilot_bid::scheduler::ScheduleBuilder;
use pilot_bid::scoring::{PairingRanker, PreferenceScorer};
use proptest::prelude::*;

const AIRPORTS: [&str; 6] = ["JFK", "MIA", "ORD", "LAX", "BOS", "ATL"];

fn month_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Pairings that depart and arrive between Dec 1 and Dec 30.
fn arb_pairing(id: usize) -> impl Strategy<Value = Pairing> {
    (
        0i64..27 * 24,
        1i64..=48,
        0u32..=40,
        proptest::collection::vec(0usize..AIRPORTS.len(), 0..4),
    )
        .prop_map(move |(offset, length, quarter_hours, stops)| {
            let departure = month_start() + Duration::hours(offset);
            let arrival = departure + Duration::hours(length);
            let mut route = vec!["JFK"];
            route.extend(stops.iter().map(|&i| AIRPORTS[i]));
            route.push("JFK");
            Pairing::new(format!("P{id}"), departure, arrival)
                .with_block_hours(f64::from(quarter_hours) * 0.25)
                .with_route(route.join("-"))
        })
}

fn arb_pairings() -> impl Strategy<Value = Vec<Pairing>> {
    (0usize..25).prop_flat_map(|n| (0..n).map(arb_pairing).collect::<Vec<_>>())
}

fn arb_preference() -> impl Strategy<Value = Preference> {
    prop_oneof![
        Just(Preference::max_earnings()),
        Just(Preference::avoid_red_eye()),
        (1u32..=30).prop_map(|d| {
            Preference::specific_date_off(NaiveDate::from_ymd_opt(2024, 12, d).unwrap())
        }),
        (1u32..=4).prop_map(|n| Preference::max_legs_per_day(n).unwrap()),
        (1u32..=4).prop_map(|d| Preference::max_duration(d).unwrap()),
        (0usize..AIRPORTS.len()).prop_map(|i| Preference::preferred_route(AIRPORTS[i]).unwrap()),
        (0usize..AIRPORTS.len()).prop_map(|i| Preference::avoid_airport(AIRPORTS[i]).unwrap()),
        (0u32..=12, 0u32..=11)
            .prop_map(|(s, w)| Preference::departure_window(s, s + w).unwrap()),
        (0u8..7).prop_map(|d| Preference::unlabeled(PreferenceKind::DayOfWeekOff(d))),
    ]
}

fn arb_preferences() -> impl Strategy<Value = Vec<Preference>> {
    proptest::collection::vec(arb_preference(), 0..5)
}

proptest! {
    #[test]
    fn scoring_is_deterministic(pairings in arb_pairings(), prefs in arb_preferences()) {
        let scorer = PreferenceScorer::new();
        for p in &pairings {
            prop_assert_eq!(scorer.score(p, &prefs), scorer.score(p, &prefs));
        }
    }

    #[test]
    fn ranking_is_descending_and_stable(pairings in arb_pairings(), prefs in arb_preferences()) {
        let ranked = PairingRanker::new().rank(&pairings, &prefs);
        prop_assert_eq!(ranked.len(), pairings.len());

        let position = |id: &str| pairings.iter().position(|p| p.id() == id);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score() >= pair[1].score());
            if pair[0].score() == pair[1].score() {
                prop_assert!(position(pair[0].pairing.id()) < position(pair[1].pairing.id()));
            }
        }
    }

    #[test]
    fn schedule_is_deterministic(pairings in arb_pairings(), prefs in arb_preferences()) {
        let builder = ScheduleBuilder::new();
        let first = builder.rank_and_build("A", "", &pairings, &prefs);
        let second = builder.rank_and_build("A", "", &pairings, &prefs);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cap_is_respected(
        pairings in arb_pairings(),
        prefs in arb_preferences(),
        cap in 0u32..=100,
    ) {
        let config = BidConfig::default().with_monthly_cap_hours(f64::from(cap));
        let schedule = ScheduleBuilder::new()
            .with_config(config)
            .unwrap()
            .rank_and_build("A", "", &pairings, &prefs);
        let total: f64 = schedule.pairings.iter().map(Pairing::block_hours).sum();
        prop_assert!(total <= f64::from(cap) + 1e-9);
    }

    #[test]
    fn rest_windows_are_disjoint(
        pairings in arb_pairings(),
        prefs in arb_preferences(),
        rest_hours in 0i64..=24,
    ) {
        let config = BidConfig::default().with_rest_buffer_hours(rest_hours);
        let schedule = ScheduleBuilder::new()
            .with_config(config)
            .unwrap()
            .rank_and_build("A", "", &pairings, &prefs);
        let rest = Duration::hours(rest_hours);
        let windows: Vec<_> = schedule.pairings.iter().map(|p| p.rest_window(rest)).collect();
        for (i, a) in windows.iter().enumerate() {
            for b in &windows[i + 1..] {
                prop_assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn blocked_dates_are_never_worked(pairings in arb_pairings(), prefs in arb_preferences()) {
        let schedule = ScheduleBuilder::new().rank_and_build("A", "", &pairings, &prefs);
        for date in prefs.iter().filter_map(Preference::blocked_date) {
            prop_assert!(schedule.pairings.iter().all(|p| !p.spans_date(date)));
        }
    }

    #[test]
    fn days_off_stay_within_month(pairings in arb_pairings(), prefs in arb_preferences()) {
        let schedule = ScheduleBuilder::new().rank_and_build("A", "", &pairings, &prefs);
        prop_assert!((0..=30).contains(&schedule.days_off));
        prop_assert_eq!(schedule.flight_count, schedule.pairings.len());
    }
}
