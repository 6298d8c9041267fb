//! Preference scoring and pairing ranking.
//!
//! Every preference contributes independently to a pairing's score using a
//! fixed weight table. Higher scores are better (the opposite of the
//! lower-is-better convention used by classic dispatching rules).
//!
//! | Preference | Rule |
//! |------------|------|
//! | MaxEarnings | `+round(block_hours × 2)` |
//! | SpecificDateOff | `−500` if any spanned day is the date |
//! | DayOfWeekOff | `−40` if any spanned day is the weekday, else `+10` |
//! | AvoidRedEye | `−50` if the arrival hour is 0–7 |
//! | MaxLegsPerDay | `+15` if legs/day ≤ n |
//! | PreferredRoute | `+30` if the route contains the code |
//! | PreferredDepartureWindow | `+20` if the departure hour is in `[s, e]` |
//! | MaxDuration | `+15` if duration ≤ d |
//! | AvoidAirport | `−100` if the route contains the code |
//!
//! # Usage
//!
//! ```
//! use pilot_bid::models::{Pairing, Preference};
//! use pilot_bid::scoring::{PairingRanker, PreferenceScorer};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let pairing = Pairing::new("P1", day.and_hms_opt(8, 0, 0).unwrap(), day.and_hms_opt(18, 0, 0).unwrap())
//!     .with_block_hours(20.0);
//! let prefs = vec![Preference::max_earnings()];
//!
//! let result = PreferenceScorer::new().score(&pairing, &prefs);
//! assert_eq!(result.score, 40);
//!
//! let ranked = PairingRanker::new().rank(std::slice::from_ref(&pairing), &prefs);
//! assert_eq!(ranked[0].pairing.id(), "P1");
//! ```

mod ranker;

pub use ranker::{PairingRanker, RankedPairing};

use chrono::{Datelike, Timelike};

use crate::models::{weekday_index, Pairing, Preference, PreferenceKind, ScoreResult};

/// Points per block hour under `MaxEarnings`.
pub const EARNINGS_POINTS_PER_BLOCK_HOUR: f64 = 2.0;
/// Block hours above which a pairing is annotated as high earning.
pub const HIGH_EARNINGS_BLOCK_HOURS: f64 = 15.0;
pub const SPECIFIC_DATE_OFF_PENALTY: i64 = -500;
pub const DAY_OF_WEEK_OFF_PENALTY: i64 = -40;
pub const DAY_OF_WEEK_OFF_REWARD: i64 = 10;
pub const RED_EYE_PENALTY: i64 = -50;
/// Latest arrival hour (inclusive) counted as a red-eye.
pub const RED_EYE_LAST_HOUR: u32 = 7;
pub const MAX_LEGS_PER_DAY_REWARD: i64 = 15;
pub const PREFERRED_ROUTE_REWARD: i64 = 30;
pub const DEPARTURE_WINDOW_REWARD: i64 = 20;
pub const MAX_DURATION_REWARD: i64 = 15;
pub const AVOID_AIRPORT_PENALTY: i64 = -100;

/// Scores pairings against a preference set.
///
/// Stateless; `score` is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceScorer;

impl PreferenceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Scores one pairing against every preference.
    pub fn score(&self, pairing: &Pairing, preferences: &[Preference]) -> ScoreResult {
        let mut result = ScoreResult::new();
        for pref in preferences {
            contribute(&pref.kind, pairing, &mut result);
        }
        result
    }
}

/// Applies a single preference's contribution.
fn contribute(kind: &PreferenceKind, pairing: &Pairing, result: &mut ScoreResult) {
    match kind {
        PreferenceKind::MaxEarnings => {
            let hours = pairing.block_hours();
            let points = (hours * EARNINGS_POINTS_PER_BLOCK_HOUR).round_ties_even() as i64;
            result.add_points(points);
            if hours > HIGH_EARNINGS_BLOCK_HOURS {
                result.add(0, "High Earnings ($$$)");
            }
        }
        PreferenceKind::SpecificDateOff(date) => {
            if pairing.spans_date(*date) {
                result.add(
                    SPECIFIC_DATE_OFF_PENALTY,
                    format!("Conflicts with {} (Violated)", date.format("%b %d")),
                );
            }
        }
        PreferenceKind::DayOfWeekOff(requested) => {
            let blocked = weekday_index(*requested);
            let works_that_day = pairing
                .span_days()
                .any(|day| day.weekday().num_days_from_monday() == blocked);
            if works_that_day {
                result.add(
                    DAY_OF_WEEK_OFF_PENALTY,
                    "Works on a requested Day Off (Violated)",
                );
            } else {
                result.add(DAY_OF_WEEK_OFF_REWARD, "Keeps preferred weekday free");
            }
        }
        PreferenceKind::AvoidRedEye => {
            let hour = pairing.arrival().hour();
            if hour <= RED_EYE_LAST_HOUR {
                result.add(RED_EYE_PENALTY, format!("Red Eye Arrival ({hour}:00)"));
            }
        }
        PreferenceKind::MaxLegsPerDay(max_legs) => {
            let legs_per_day = pairing.legs_per_day();
            if legs_per_day <= f64::from(*max_legs) {
                result.add(
                    MAX_LEGS_PER_DAY_REWARD,
                    format!(
                        "Low workload (~{} legs/day)",
                        legs_per_day.round_ties_even() as i64
                    ),
                );
            }
        }
        PreferenceKind::PreferredRoute(code) => {
            if pairing.route_contains(code) {
                result.add(PREFERRED_ROUTE_REWARD, format!("Route includes {code}"));
            }
        }
        PreferenceKind::PreferredDepartureWindow {
            start_hour,
            end_hour,
        } => {
            let hour = pairing.departure().hour();
            if (*start_hour..=*end_hour).contains(&hour) {
                result.add(
                    DEPARTURE_WINDOW_REWARD,
                    format!("Departure between {start_hour}:00-{end_hour}:00"),
                );
            }
        }
        PreferenceKind::MaxDuration(max_days) => {
            if pairing.duration_days() <= *max_days {
                result.add(
                    MAX_DURATION_REWARD,
                    format!("Duration under {max_days} days"),
                );
            }
        }
        PreferenceKind::AvoidAirport(code) => {
            if pairing.route_contains(code) {
                result.add(AVOID_AIRPORT_PENALTY, format!("Avoids {code} (Violated)"));
            }
        }
    }
}
