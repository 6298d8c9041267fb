//! Pairing table statistics.
//!
//! Summarizes a (usually filtered) pairing table for the statistics view.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total | Number of pairings |
//! | Duration distribution | Count of pairings per trip length (days) |
//! | Aircraft breakdown | Count of pairings per aircraft type |
//! | Avg duration | Mean trip length (days) |
//! | Avg block hours | Mean block hours per pairing |

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Pairing;

/// Summary statistics over a pairing table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairingStats {
    /// Number of pairings.
    pub total: usize,
    /// Trip length (days) → count, ascending by length.
    pub duration_distribution: BTreeMap<u32, usize>,
    /// Aircraft type → count.
    pub aircraft_breakdown: BTreeMap<String, usize>,
    /// Mean trip length in days (0.0 for an empty table).
    pub avg_duration_days: f64,
    /// Mean block hours (0.0 for an empty table).
    pub avg_block_hours: f64,
}

impl PairingStats {
    /// Computes statistics for the given pairings.
    pub fn calculate(pairings: &[Pairing]) -> Self {
        let mut duration_distribution: BTreeMap<u32, usize> = BTreeMap::new();
        let mut aircraft_breakdown: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_days: u64 = 0;
        let mut total_block_hours = 0.0;

        for p in pairings {
            *duration_distribution.entry(p.duration_days()).or_insert(0) += 1;
            *aircraft_breakdown
                .entry(p.aircraft().to_string())
                .or_insert(0) += 1;
            total_days += u64::from(p.duration_days());
            total_block_hours += p.block_hours();
        }

        let total = pairings.len();
        let (avg_duration_days, avg_block_hours) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                total_days as f64 / total as f64,
                total_block_hours / total as f64,
            )
        };

        Self {
            total,
            duration_distribution,
            aircraft_breakdown,
            avg_duration_days,
            avg_block_hours,
        }
    }

    /// The most common aircraft type, ties broken alphabetically.
    pub fn dominant_aircraft(&self) -> Option<&str> {
        self.aircraft_breakdown
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(ac, _)| ac.as_str())
    }
}
