//! Pairing table filters.
//!
//! Narrows the pairing table before ranking. All criteria are optional and
//! combined with AND. Filtering never mutates the input table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::Pairing;

/// Declarative pairing filter.
///
/// # Example
///
/// ```
/// use pilot_bid::filter::PairingFilter;
///
/// let filter = PairingFilter::new()
///     .with_search("MIA")
///     .with_max_duration_days(3)
///     .with_aircraft(["320", "321"]);
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingFilter {
    /// Case-insensitive text matched against id, route and aircraft.
    pub search: Option<String>,
    /// Longest trip (days) to keep.
    pub max_duration_days: Option<u32>,
    /// Aircraft types to keep. Empty = all.
    pub aircraft: BTreeSet<String>,
    /// Earliest departure date (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Latest departure date (inclusive).
    pub end_date: Option<NaiveDate>,
}

impl PairingFilter {
    /// Creates a filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.search = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };
        self
    }

    pub fn with_max_duration_days(mut self, days: u32) -> Self {
        self.max_duration_days = Some(days);
        self
    }

    pub fn with_aircraft<I, S>(mut self, aircraft: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aircraft = aircraft.into_iter().map(Into::into).collect();
        self
    }

    /// Keeps pairings departing within `[start, end]`.
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.max_duration_days.is_none()
            && self.aircraft.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Whether a pairing passes every criterion.
    pub fn matches(&self, pairing: &Pairing) -> bool {
        if let Some(query) = &self.search {
            let needle = query.trim().to_lowercase();
            let hit = [pairing.id(), pairing.route(), pairing.aircraft()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(max) = self.max_duration_days {
            if pairing.duration_days() > max {
                return false;
            }
        }

        if !self.aircraft.is_empty() && !self.aircraft.contains(pairing.aircraft()) {
            return false;
        }

        let departs = pairing.departure().date();
        if self.start_date.is_some_and(|start| departs < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| departs > end) {
            return false;
        }

        true
    }

    /// Returns the matching pairings, in input order.
    pub fn apply(&self, pairings: &[Pairing]) -> Vec<Pairing> {
        pairings.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Distinct aircraft types in a table, sorted.
pub fn aircraft_types(pairings: &[Pairing]) -> BTreeSet<String> {
    pairings.iter().map(|p| p.aircraft().to_string()).collect()
}
