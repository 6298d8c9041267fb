//! Schedule (solution) model.
//!
//! A schedule is one candidate monthly line: the pairings accepted by a
//! single greedy pass plus its summary metrics. Schedules are built once
//! and replaced wholesale on regeneration.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

use super::Pairing;

/// A generated monthly schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    /// Plan name (e.g. "Plan A: Max Earnings").
    pub name: String,
    /// One-line description of the plan's intent.
    pub description: String,
    /// Accepted pairings in selection order.
    pub pairings: Vec<Pairing>,
    /// Sum of accepted block hours, rounded to 2 decimals.
    pub total_block_hours: f64,
    /// Reference-month days minus worked days. Not clamped; see
    /// [`Schedule::days_off_clamped`].
    pub days_off: i64,
    /// Number of accepted pairings.
    pub flight_count: usize,
}

impl Schedule {
    /// Builds a schedule from accepted pairings, computing the summary.
    pub fn from_selection(
        name: impl Into<String>,
        description: impl Into<String>,
        pairings: Vec<Pairing>,
        reference_month_days: u32,
    ) -> Self {
        let total: f64 = pairings.iter().map(Pairing::block_hours).sum();
        let worked = worked_days(&pairings).len() as i64;
        Self {
            name: name.into(),
            description: description.into(),
            flight_count: pairings.len(),
            pairings,
            total_block_hours: round2(total),
            days_off: i64::from(reference_month_days) - worked,
        }
    }

    /// An empty schedule (no pairings accepted).
    pub fn empty(
        name: impl Into<String>,
        description: impl Into<String>,
        reference_month_days: u32,
    ) -> Self {
        Self::from_selection(name, description, Vec::new(), reference_month_days)
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    /// Days off limited to `[0, reference_month_days]`.
    pub fn days_off_clamped(&self, reference_month_days: u32) -> u32 {
        // clamp keeps the value inside u32 range
        self.days_off.clamp(0, i64::from(reference_month_days)) as u32
    }

    /// Distinct calendar dates touched by any accepted pairing.
    pub fn worked_days(&self) -> BTreeSet<NaiveDate> {
        worked_days(&self.pairings)
    }

    /// Finds an accepted pairing by ID.
    pub fn pairing(&self, id: &str) -> Option<&Pairing> {
        self.pairings.iter().find(|p| p.id() == id)
    }

    /// Smallest gap between consecutive accepted duty periods.
    ///
    /// Returns `None` with fewer than two pairings.
    pub fn min_rest(&self) -> Option<Duration> {
        let mut windows: Vec<_> = self.pairings.iter().map(Pairing::duty_window).collect();
        windows.sort_by_key(|w| w.start);
        windows
            .windows(2)
            .map(|pair| pair[1].start - pair[0].end)
            .min()
    }
}

fn worked_days(pairings: &[Pairing]) -> BTreeSet<NaiveDate> {
    pairings.iter().flat_map(Pairing::span_days).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
