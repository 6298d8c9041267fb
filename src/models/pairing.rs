//! Pairing (trip) model.
//!
//! A pairing is a multi-day sequence of flight duty offered as one bidable
//! unit. Pairings are immutable once built: the builder methods consume
//! and return `self`, and all fields are read through accessors so the
//! normalization invariants below cannot be broken after construction.
//!
//! # Invariants
//! - `duration_days >= 1` (used as a divisor when computing legs per day).
//! - `block_hours >= 0.0` and finite.
//!
//! `arrival >= departure` is not enforced here; hand-built tables should be
//! checked with [`validate_pairings`](crate::validation::validate_pairings).
//! Span and window helpers cover the interval between the two timestamps
//! in either order, so an inverted pairing still touches its dates.
//!
//! # Time Representation
//! Departure and arrival are naive local date-times. "Local hour" in the
//! scoring rules is the hour component of these values.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;

use super::DutyWindow;

/// Characters separating airport codes in a route description.
const ROUTE_DELIMITERS: [char; 2] = ['-', '|'];

/// A candidate trip in the monthly bid package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pairing {
    id: String,
    aircraft: String,
    duration_days: u32,
    block_hours: f64,
    departure: NaiveDateTime,
    arrival: NaiveDateTime,
    route: String,
    layovers: BTreeSet<String>,
}

impl Pairing {
    /// Creates a pairing with the given ID and duty interval.
    ///
    /// Duration defaults to the number of whole days between departure and
    /// arrival plus one.
    pub fn new(id: impl Into<String>, departure: NaiveDateTime, arrival: NaiveDateTime) -> Self {
        let whole_days = (arrival - departure).num_days() + 1;
        Self {
            id: id.into(),
            aircraft: String::new(),
            duration_days: u32::try_from(whole_days).unwrap_or(1).max(1),
            block_hours: 0.0,
            departure,
            arrival,
            route: String::new(),
            layovers: BTreeSet::new(),
        }
    }

    /// Sets the aircraft-type code.
    pub fn with_aircraft(mut self, aircraft: impl Into<String>) -> Self {
        self.aircraft = aircraft.into();
        self
    }

    /// Sets the duration in days, clamped to at least one.
    pub fn with_duration_days(mut self, days: u32) -> Self {
        self.duration_days = days.max(1);
        self
    }

    /// Sets paid block hours. Negative and non-finite values become zero.
    pub fn with_block_hours(mut self, hours: f64) -> Self {
        self.block_hours = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
        self
    }

    /// Sets the route description and derives the layover set from it.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self.layovers = derive_layovers(&self.route);
        self
    }

    /// Overrides the derived layover set.
    pub fn with_layovers<I, S>(mut self, layovers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layovers = layovers.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn aircraft(&self) -> &str {
        &self.aircraft
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn block_hours(&self) -> f64 {
        self.block_hours
    }

    pub fn departure(&self) -> NaiveDateTime {
        self.departure
    }

    pub fn arrival(&self) -> NaiveDateTime {
        self.arrival
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Distinct intermediate airports.
    pub fn layovers(&self) -> &BTreeSet<String> {
        &self.layovers
    }

    /// Number of flight legs (layovers + 1).
    pub fn legs(&self) -> usize {
        self.layovers.len() + 1
    }

    /// Average legs flown per duty day.
    pub fn legs_per_day(&self) -> f64 {
        self.legs() as f64 / f64::from(self.duration_days)
    }

    /// Calendar dates touched by the pairing, departure through arrival.
    pub fn span_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let (first, last) = self.date_bounds();
        first.iter_days().take_while(move |day| *day <= last)
    }

    /// Whether the pairing touches the given calendar date.
    pub fn spans_date(&self, date: NaiveDate) -> bool {
        let (first, last) = self.date_bounds();
        first <= date && date <= last
    }

    /// Whether any touched date falls on the given weekday.
    pub fn spans_weekday(&self, weekday: Weekday) -> bool {
        self.span_days().any(|day| day.weekday() == weekday)
    }

    /// Case-insensitive substring match against the route description.
    ///
    /// A blank code never matches.
    pub fn route_contains(&self, code: &str) -> bool {
        let code = code.trim();
        !code.is_empty() && self.route.to_uppercase().contains(&code.to_uppercase())
    }

    /// The raw duty interval.
    pub fn duty_window(&self) -> DutyWindow {
        DutyWindow::new(
            self.departure.min(self.arrival),
            self.departure.max(self.arrival),
        )
    }

    fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        let (dep, arr) = (self.departure.date(), self.arrival.date());
        (dep.min(arr), dep.max(arr))
    }

    /// The duty interval widened by `rest` on both edges.
    pub fn rest_window(&self, rest: Duration) -> DutyWindow {
        self.duty_window().expanded(rest)
    }
}

/// Extracts distinct intermediate airports from a delimited route.
///
/// `"JFK-ORD-LAX-ORD-JFK"` yields `{LAX, ORD}`. Origin and final
/// destination are not layovers.
pub fn derive_layovers(route: &str) -> BTreeSet<String> {
    let stops: Vec<&str> = route
        .split(&ROUTE_DELIMITERS[..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if stops.len() <= 2 {
        return BTreeSet::new();
    }

    stops[1..stops.len() - 1]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
