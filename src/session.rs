//! Caller-owned bid session.
//!
//! Holds one pilot's working state: the pairing table, the active filter,
//! the ordered preference list, and the last generated schedules. Every
//! operation is an explicit method call; nothing is stored globally.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pilot_bid::models::{Pairing, Preference};
//! use pilot_bid::session::BidSession;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
//! let pairing = Pairing::new(
//!     "P1",
//!     day.and_hms_opt(8, 0, 0).unwrap(),
//!     day.and_hms_opt(18, 0, 0).unwrap(),
//! )
//! .with_block_hours(6.0);
//!
//! let mut session = BidSession::new(vec![pairing]);
//! session.add_preference(Preference::avoid_red_eye());
//! let schedules = session.generate();
//! assert_eq!(schedules.len(), 3);
//! assert_eq!(schedules[0].flight_count, 1);
//! ```

use tracing::{debug, info};

use crate::assistant::AssistantContext;
use crate::config::BidConfig;
use crate::error::BidResult;
use crate::filter::PairingFilter;
use crate::ingest::{normalize_records, PairingRecord};
use crate::models::{Pairing, Preference, Schedule};
use crate::scheduler::{PairingStats, StrategyGenerator};
use crate::scoring::{PairingRanker, RankedPairing};

/// Working state for one bid.
#[derive(Debug, Clone, Default)]
pub struct BidSession {
    pairings: Vec<Pairing>,
    /// `pairings` after `filter`, in input order.
    visible: Vec<Pairing>,
    filter: PairingFilter,
    preferences: Vec<Preference>,
    schedules: Vec<Schedule>,
    generator: StrategyGenerator,
}

impl BidSession {
    /// Starts a session over a normalized pairing table.
    pub fn new(pairings: Vec<Pairing>) -> Self {
        Self {
            visible: pairings.clone(),
            pairings,
            ..Self::default()
        }
    }

    /// Starts a session from raw export rows.
    pub fn from_records(records: &[PairingRecord]) -> BidResult<Self> {
        let pairings = normalize_records(records)?;
        info!(pairings = pairings.len(), "pairing table loaded");
        Ok(Self::new(pairings))
    }

    /// Replaces the constraints after validating them. Previously
    /// generated schedules are kept until the next
    /// [`generate`](Self::generate).
    pub fn with_config(mut self, config: BidConfig) -> BidResult<Self> {
        self.generator = self.generator.with_config(config)?;
        Ok(self)
    }

    pub fn config(&self) -> &BidConfig {
        self.generator.config()
    }

    /// Full pairing table.
    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    /// Pairings that pass the active filter.
    pub fn visible_pairings(&self) -> &[Pairing] {
        &self.visible
    }

    pub fn filter(&self) -> &PairingFilter {
        &self.filter
    }

    /// Sets the filter used by ranking, generation and stats.
    pub fn set_filter(&mut self, filter: PairingFilter) {
        self.visible = filter.apply(&self.pairings);
        self.filter = filter;
        debug!(visible = self.visible.len(), "filter applied");
    }

    /// Appends a preference.
    pub fn add_preference(&mut self, preference: Preference) {
        debug!(kind = %preference.preference_type(), label = %preference.label, "preference added");
        self.preferences.push(preference);
    }

    /// Removes the preference at `index`, if present.
    pub fn remove_preference(&mut self, index: usize) -> Option<Preference> {
        (index < self.preferences.len()).then(|| self.preferences.remove(index))
    }

    pub fn clear_preferences(&mut self) {
        self.preferences.clear();
    }

    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    /// Ranks the visible pairings under the current preferences.
    pub fn rank(&self) -> Vec<RankedPairing<'_>> {
        PairingRanker::new().rank(&self.visible, &self.preferences)
    }

    /// Generates the three strategy schedules, replacing any previous ones.
    pub fn generate(&mut self) -> &[Schedule] {
        self.schedules = self
            .generator
            .generate(&self.visible, &self.preferences)
            .into();
        &self.schedules
    }

    /// Schedules from the last [`generate`](Self::generate). Empty before
    /// the first call and after [`reset`](Self::reset).
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Drops preferences and generated schedules. The pairing table and
    /// filter are kept.
    pub fn reset(&mut self) {
        self.preferences.clear();
        self.schedules.clear();
        debug!("session reset");
    }

    /// Summary of the visible pairings.
    pub fn stats(&self) -> PairingStats {
        PairingStats::calculate(&self.visible)
    }

    /// Top of the current ranking, sized by `assistant_sample_size`.
    pub fn assistant_context(&self) -> AssistantContext {
        AssistantContext::from_ranked(&self.rank(), self.config().assistant_sample_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferenceKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_pairings() -> Vec<Pairing> {
        vec![
            Pairing::new("P1", at(2, 8), at(4, 18))
                .with_aircraft("320")
                .with_block_hours(18.0)
                .with_route("JFK-MIA-ATL-JFK"),
            Pairing::new("P2", at(9, 6), at(9, 20))
                .with_aircraft("737")
                .with_block_hours(7.0)
                .with_route("JFK-BOS-JFK"),
            Pairing::new("P3", at(24, 8), at(26, 18))
                .with_aircraft("320")
                .with_block_hours(16.0)
                .with_route("JFK-LAX-JFK"),
        ]
    }

    #[test]
    fn test_preference_list_editing() {
        let mut session = BidSession::new(sample_pairings());
        session.add_preference(Preference::max_earnings());
        session.add_preference(Preference::avoid_airport("LAX").unwrap());
        assert_eq!(session.preferences().len(), 2);

        let removed = session.remove_preference(0).unwrap();
        assert_eq!(removed.kind, PreferenceKind::MaxEarnings);
        assert_eq!(session.preferences().len(), 1);
        assert!(session.remove_preference(5).is_none());

        session.clear_preferences();
        assert!(session.preferences().is_empty());
    }

    #[test]
    fn test_filter_narrows_rank_and_stats() {
        let mut session = BidSession::new(sample_pairings());
        session.set_filter(PairingFilter::new().with_aircraft(["320"]));
        assert_eq!(session.visible_pairings().len(), 2);
        assert_eq!(session.pairings().len(), 3);
        assert_eq!(session.rank().len(), 2);
        assert_eq!(session.stats().total, 2);

        session.set_filter(PairingFilter::new());
        assert_eq!(session.rank().len(), 3);
    }

    #[test]
    fn test_generate_replaces_previous_schedules() {
        let mut session = BidSession::new(sample_pairings());
        assert!(session.schedules().is_empty());

        session.add_preference(Preference::max_earnings());
        let names: Vec<String> = session.generate().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names.len(), 3);
        assert!(names[0].starts_with("Plan A"));

        session.add_preference(Preference::specific_date_off(
            NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
        ));
        let again = session.generate();
        assert_eq!(again.len(), 3);
        assert!(again[0].pairing("P3").is_none());
    }

    #[test]
    fn test_reset_keeps_table() {
        let mut session = BidSession::new(sample_pairings());
        session.set_filter(PairingFilter::new().with_max_duration_days(1));
        session.add_preference(Preference::avoid_red_eye());
        session.generate();

        session.reset();
        assert!(session.preferences().is_empty());
        assert!(session.schedules().is_empty());
        assert_eq!(session.visible_pairings().len(), 1);
    }

    #[test]
    fn test_assistant_context_uses_configured_size() {
        let session = BidSession::new(sample_pairings())
            .with_config(BidConfig::default().with_assistant_sample_size(2))
            .unwrap();
        let ctx = session.assistant_context();
        assert_eq!(ctx.pairings.len(), 2);
        assert_eq!(ctx.total_available, 3);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = BidConfig::default().with_rest_buffer_hours(10_000_000_000);
        assert!(BidSession::new(sample_pairings()).with_config(config).is_err());

        let session = BidSession::new(sample_pairings())
            .with_config(BidConfig::default().with_rest_buffer_hours(12))
            .unwrap();
        assert_eq!(session.config().rest_buffer_hours, 12);
    }

    #[test]
    fn test_from_records() {
        let records = vec![PairingRecord {
            id: "P9".into(),
            aircraft: "321".into(),
            duration: None,
            block_hours: "6:45".into(),
            departure: "Dec 10,2024 07:00".into(),
            arrival: "Dec 10,2024 19:00".into(),
            details: "JFK-SFO-JFK".into(),
        }];
        let session = BidSession::from_records(&records).unwrap();
        assert_eq!(session.pairings()[0].id(), "P9");

        let bad = vec![PairingRecord {
            departure: "soon".into(),
            ..records[0].clone()
        }];
        assert!(BidSession::from_records(&bad).is_err());
    }
}
