//! Strategy variants.
//!
//! Derives three preference sets from the caller's base preferences and
//! builds one schedule for each:
//!
//! | Plan | Added preferences |
//! |------|-------------------|
//! | A: Max Earnings | `MaxEarnings` |
//! | B: Lifestyle & Comfort | `MaxDuration(3)` unless one is already present |
//! | C: Weekends Free | `DayOfWeekOff(Saturday)`, `DayOfWeekOff(Sunday)` |
//!
//! Each variant ranks the full pairing table from scratch; no state is
//! shared between them. With the `parallel` feature the three builds run
//! on the rayon thread pool.

use chrono::Weekday;
use tracing::{info, instrument};

use super::ScheduleBuilder;
use crate::config::BidConfig;
use crate::error::BidResult;
use crate::models::{Pairing, Preference, PreferenceKind, PreferenceType, Schedule};

/// Trip length added by the lifestyle plan.
pub const LIFESTYLE_MAX_DURATION_DAYS: u32 = 3;

/// A named preference set.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyVariant {
    pub name: &'static str,
    pub description: &'static str,
    pub preferences: Vec<Preference>,
}

impl StrategyVariant {
    /// Plan A: base preferences plus `MaxEarnings`.
    pub fn max_earnings(base: &[Preference]) -> Self {
        let mut preferences = base.to_vec();
        preferences.push(Preference::new(PreferenceKind::MaxEarnings, "Max Earnings"));
        Self {
            name: "Plan A: Max Earnings",
            description: "Prioritizes high block-hour trips to maximize pay",
            preferences,
        }
    }

    /// Plan B: base preferences plus short trips, unless the caller already
    /// limits trip duration.
    pub fn lifestyle(base: &[Preference]) -> Self {
        let mut preferences = base.to_vec();
        let has_duration_limit = base
            .iter()
            .any(|p| p.preference_type() == PreferenceType::MaxDuration);
        if !has_duration_limit {
            preferences.push(Preference::new(
                PreferenceKind::MaxDuration(LIFESTYLE_MAX_DURATION_DAYS),
                "Short Trips",
            ));
        }
        Self {
            name: "Plan B: Lifestyle & Comfort",
            description: "Prioritizes shorter trips and user preferences",
            preferences,
        }
    }

    /// Plan C: base preferences plus Saturday and Sunday off.
    pub fn weekends_free(base: &[Preference]) -> Self {
        let mut preferences = base.to_vec();
        preferences.push(Preference::day_of_week_off(Weekday::Sat));
        preferences.push(Preference::day_of_week_off(Weekday::Sun));
        Self {
            name: "Plan C: Weekends Free",
            description: "Attempts to keep Saturdays and Sundays free",
            preferences,
        }
    }

    /// All three variants in plan order.
    pub fn all(base: &[Preference]) -> [Self; 3] {
        [
            Self::max_earnings(base),
            Self::lifestyle(base),
            Self::weekends_free(base),
        ]
    }
}

/// Builds the three comparison schedules.
#[derive(Debug, Clone, Default)]
pub struct StrategyGenerator {
    builder: ScheduleBuilder,
}

impl StrategyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the constraints shared by all three plans.
    pub fn with_config(mut self, config: BidConfig) -> BidResult<Self> {
        self.builder = self.builder.with_config(config)?;
        Ok(self)
    }

    pub fn config(&self) -> &BidConfig {
        self.builder.config()
    }

    /// Generates Plan A, Plan B and Plan C, in that order.
    #[instrument(skip_all, fields(pairings = pairings.len(), preferences = base.len()))]
    pub fn generate(&self, pairings: &[Pairing], base: &[Preference]) -> [Schedule; 3] {
        let [a, b, c] = StrategyVariant::all(base);
        let schedules = self.build_all(pairings, [&a, &b, &c]);
        for s in &schedules {
            info!(
                plan = %s.name,
                trips = s.flight_count,
                block_hours = s.total_block_hours,
                days_off = s.days_off,
                "strategy generated"
            );
        }
        schedules
    }

    /// Builds a single variant.
    pub fn build_variant(&self, pairings: &[Pairing], variant: &StrategyVariant) -> Schedule {
        self.builder.rank_and_build(
            variant.name,
            variant.description,
            pairings,
            &variant.preferences,
        )
    }

    #[cfg(not(feature = "parallel"))]
    fn build_all(&self, pairings: &[Pairing], variants: [&StrategyVariant; 3]) -> [Schedule; 3] {
        variants.map(|v| self.build_variant(pairings, v))
    }

    #[cfg(feature = "parallel")]
    fn build_all(&self, pairings: &[Pairing], variants: [&StrategyVariant; 3]) -> [Schedule; 3] {
        let [a, b, c] = variants;
        let (sa, (sb, sc)) = rayon::join(
            || self.build_variant(pairings, a),
            || {
                rayon::join(
                    || self.build_variant(pairings, b),
                    || self.build_variant(pairings, c),
                )
            },
        );
        [sa, sb, sc]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_pairings() -> Vec<Pairing> {
        vec![
            // Mon Jan 1 – Thu Jan 4, long and lucrative
            Pairing::new("LONG", at(1, 6), at(4, 20))
                .with_block_hours(24.0)
                .with_route("JFK-LAX-SFO-JFK"),
            // Sat Jan 6 – Sun Jan 7 weekend turn
            Pairing::new("WKND", at(6, 8), at(7, 18))
                .with_block_hours(10.0)
                .with_route("JFK-MIA-JFK"),
            // Tue Jan 9 – Wed Jan 10 short midweek trip
            Pairing::new("MID", at(9, 8), at(10, 18))
                .with_block_hours(8.0)
                .with_route("JFK-BOS-JFK"),
            // Fri Jan 12 – Mon Jan 15 four-day trip across a weekend
            Pairing::new("FOUR", at(12, 8), at(15, 18))
                .with_block_hours(20.0)
                .with_route("JFK-ORD-DEN-JFK"),
        ]
    }

    #[test]
    fn test_variant_preferences() {
        let base = vec![Preference::preferred_route("MIA").unwrap()];
        let [a, b, c] = StrategyVariant::all(&base);

        assert_eq!(a.preferences.len(), 2);
        assert_eq!(a.preferences[1].kind, PreferenceKind::MaxEarnings);

        assert_eq!(b.preferences.len(), 2);
        assert_eq!(b.preferences[1].kind, PreferenceKind::MaxDuration(3));
        assert_eq!(b.preferences[1].label, "Short Trips");

        assert_eq!(c.preferences.len(), 3);
        assert_eq!(c.preferences[1].kind, PreferenceKind::DayOfWeekOff(6));
        assert_eq!(c.preferences[2].kind, PreferenceKind::DayOfWeekOff(0));

        // caller's list untouched
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_lifestyle_respects_caller_duration() {
        let base = vec![Preference::max_duration(5).unwrap()];
        let b = StrategyVariant::lifestyle(&base);
        assert_eq!(b.preferences, base);
    }

    #[test]
    fn test_generate_three_named_plans() {
        let schedules = StrategyGenerator::new().generate(&sample_pairings(), &[]);
        assert_eq!(schedules[0].name, "Plan A: Max Earnings");
        assert_eq!(schedules[1].name, "Plan B: Lifestyle & Comfort");
        assert_eq!(schedules[2].name, "Plan C: Weekends Free");
        assert!(schedules.iter().all(|s| !s.description.is_empty()));
    }

    #[test]
    fn test_generate_plan_contents() {
        let schedules = StrategyGenerator::new().generate(&sample_pairings(), &[]);

        // No conflicts between any sample pairings; all fit under the cap.
        let a = &schedules[0];
        assert_eq!(a.flight_count, 4);
        assert_eq!(a.pairings[0].id(), "LONG");
        assert!((a.total_block_hours - 62.0).abs() < 1e-10);

        // Plan C penalizes weekend work, so weekday trips rank first.
        let c = &schedules[2];
        assert_eq!(c.pairings[0].id(), "LONG");
        assert_eq!(c.pairings[1].id(), "MID");
    }

    #[test]
    fn test_weekend_plan_excludes_heavy_violations_with_floor() {
        let base = vec![Preference::avoid_airport("MIA").unwrap()];
        let schedules = StrategyGenerator::new().generate(&sample_pairings(), &base);
        // WKND: -100 (MIA) -40 -40 → -180, below the -100 floor in Plan C
        assert!(schedules[2].pairing("WKND").is_none());
        // Plan A: -100 + 20 = -80 stays above the floor
        assert!(schedules[0].pairing("WKND").is_some());
    }

    #[test]
    fn test_generate_empty() {
        let schedules = StrategyGenerator::new().generate(&[], &[Preference::max_earnings()]);
        for s in &schedules {
            assert!(s.is_empty());
            assert_eq!(s.days_off, 30);
        }
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = BidConfig::default().with_rest_buffer_hours(-1);
        assert!(StrategyGenerator::new().with_config(config).is_err());
    }

    #[test]
    fn test_generate_with_config() {
        let generator = StrategyGenerator::new()
            .with_config(BidConfig::default().with_monthly_cap_hours(30.0))
            .unwrap();
        let schedules = generator.generate(&sample_pairings(), &[]);
        for s in &schedules {
            assert!(s.total_block_hours <= 30.0);
        }
    }
}
