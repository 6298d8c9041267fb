//! Greedy schedule builder.
//!
//! # Algorithm
//!
//! One forward pass over pairings in rank order (highest score first).
//! A pairing is skipped when:
//! 1. its block hours would push the running total above the monthly cap,
//! 2. its score is below the minimum score floor,
//! 3. it touches a date blocked by a `SpecificDateOff` preference,
//! 4. its rest window (duty window widened by the rest buffer on both
//!    edges) overlaps the rest window of an already accepted pairing.
//!
//! Otherwise it is accepted. The result is best-effort, not optimal: an
//! early high-scoring pairing can crowd out a better combination.
//!
//! # Complexity
//! O(n * k) where n = ranked pairings, k = accepted pairings.

use chrono::NaiveDate;
use std::fmt;
use tracing::{debug, instrument};

use crate::config::BidConfig;
use crate::error::BidResult;
use crate::models::{DutyWindow, Pairing, Preference, Schedule};
use crate::scoring::{PairingRanker, RankedPairing};

/// Why a ranked pairing was left out of a schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Accepting would exceed the monthly block-hour cap.
    OverCap { total: f64, block_hours: f64 },
    /// Score is below the minimum floor.
    BelowFloor { score: i64 },
    /// The pairing touches a blocked date.
    BlockedDate(NaiveDate),
    /// The rest window overlaps an accepted pairing.
    RestConflict { with: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OverCap { total, block_hours } => {
                write!(f, "cap exceeded ({total:.2} + {block_hours:.2})")
            }
            Rejection::BelowFloor { score } => write!(f, "score {score} below floor"),
            Rejection::BlockedDate(date) => write!(f, "touches blocked date {date}"),
            Rejection::RestConflict { with } => write!(f, "insufficient rest around {with}"),
        }
    }
}

/// Assembles one feasible monthly schedule from ranked pairings.
///
/// # Example
///
/// ```
/// use pilot_bid::models::{Pairing, Preference};
/// use pilot_bid::scheduler::ScheduleBuilder;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let pairings = vec![
///     Pairing::new("P1", day(2).and_hms_opt(8, 0, 0).unwrap(), day(4).and_hms_opt(18, 0, 0).unwrap())
///         .with_block_hours(20.0),
/// ];
/// let prefs = vec![Preference::max_earnings()];
///
/// let schedule = ScheduleBuilder::new().rank_and_build("Plan", "", &pairings, &prefs);
/// assert_eq!(schedule.flight_count, 1);
/// assert_eq!(schedule.days_off, 27);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    config: BidConfig,
    ranker: PairingRanker,
}

impl ScheduleBuilder {
    /// Creates a builder with default constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the constraints after checking them with
    /// [`BidConfig::validate`].
    pub fn with_config(mut self, config: BidConfig) -> BidResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &BidConfig {
        &self.config
    }

    /// Builds an unnamed schedule.
    pub fn build(&self, ranked: &[RankedPairing<'_>], preferences: &[Preference]) -> Schedule {
        self.build_named("", "", ranked, preferences)
    }

    /// Builds a schedule from an already ranked pairing list.
    #[instrument(skip_all, fields(plan = %name, candidates = ranked.len()))]
    pub fn build_named(
        &self,
        name: &str,
        description: &str,
        ranked: &[RankedPairing<'_>],
        preferences: &[Preference],
    ) -> Schedule {
        let blocked_dates: Vec<NaiveDate> =
            preferences.iter().filter_map(Preference::blocked_date).collect();
        let rest = self.config.rest_buffer();

        let mut selected: Vec<Pairing> = Vec::new();
        let mut windows: Vec<DutyWindow> = Vec::new();
        let mut total_block_hours = 0.0;

        for candidate in ranked {
            let pairing = candidate.pairing;
            let window = pairing.rest_window(rest);

            let verdict = self.check(
                candidate,
                total_block_hours,
                &blocked_dates,
                &window,
                &windows,
                &selected,
            );
            if let Err(rejection) = verdict {
                debug!(pairing = pairing.id(), reason = %rejection, "pairing rejected");
                continue;
            }

            total_block_hours += pairing.block_hours();
            windows.push(window);
            selected.push(pairing.clone());
        }

        let schedule = Schedule::from_selection(
            name,
            description,
            selected,
            self.config.reference_month_days,
        );
        debug!(
            accepted = schedule.flight_count,
            block_hours = schedule.total_block_hours,
            days_off = schedule.days_off,
            "schedule built"
        );
        schedule
    }

    /// Ranks `pairings` under `preferences`, then builds.
    pub fn rank_and_build(
        &self,
        name: &str,
        description: &str,
        pairings: &[Pairing],
        preferences: &[Preference],
    ) -> Schedule {
        let ranked = self.ranker.rank(pairings, preferences);
        self.build_named(name, description, &ranked, preferences)
    }

    fn check(
        &self,
        candidate: &RankedPairing<'_>,
        total_block_hours: f64,
        blocked_dates: &[NaiveDate],
        window: &DutyWindow,
        accepted_windows: &[DutyWindow],
        accepted: &[Pairing],
    ) -> Result<(), Rejection> {
        let pairing = candidate.pairing;

        if total_block_hours + pairing.block_hours() > self.config.monthly_cap_hours {
            return Err(Rejection::OverCap {
                total: total_block_hours,
                block_hours: pairing.block_hours(),
            });
        }

        if candidate.score() < self.config.min_score_floor {
            return Err(Rejection::BelowFloor {
                score: candidate.score(),
            });
        }

        if let Some(date) = blocked_dates.iter().find(|d| pairing.spans_date(**d)) {
            return Err(Rejection::BlockedDate(*date));
        }

        if let Some(idx) = accepted_windows.iter().position(|w| w.overlaps(window)) {
            return Err(Rejection::RestConflict {
                with: accepted[idx].id().to_string(),
            });
        }

        Ok(())
    }
}
