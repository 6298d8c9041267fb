//! Ingestion boundary.
//!
//! Converts textual pairing records, one per row of the airline's monthly
//! export, into normalized [`Pairing`] values. The caller reads the source
//! container (CSV, JSON, …) and hands over [`PairingRecord`]s; field names
//! follow the export's column headers.
//!
//! # Field Formats
//! - `Block hours`: `H:MM` (e.g. `"12:30"`), a decimal (`"12.5"`), or empty
//!   for zero.
//! - `Departure` / `Arrival`: `Dec 24,2024 08:00`. `Dec 24, 2024 08:00`,
//!   `2024-12-24 08:00` and `2024-12-24T08:00:00` are also accepted.
//! - `Pairing details`: airport codes separated by `-` or `|`.
//! - `Duration`: whole days; derived from the timestamps when absent.
//!
//! Normalization fails fast on the first malformed row with
//! [`BidError::Schema`], then checks the whole table with
//! [`validate_pairings`](crate::validation::validate_pairings).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{BidError, BidResult};
use crate::models::Pairing;
use crate::validation::validate_pairings;

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%b %d,%Y %H:%M",
    "%b %d, %Y %H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// One raw row of the pairing export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRecord {
    #[serde(rename = "Pairing")]
    pub id: String,
    #[serde(rename = "AC", default)]
    pub aircraft: String,
    #[serde(rename = "Duration", default)]
    pub duration: Option<String>,
    #[serde(rename = "Block hours", default)]
    pub block_hours: String,
    #[serde(rename = "Departure")]
    pub departure: String,
    #[serde(rename = "Arrival")]
    pub arrival: String,
    #[serde(rename = "Pairing details", default)]
    pub details: String,
}

impl PairingRecord {
    /// Normalizes this record. `row` (1-based) is used in error reports.
    pub fn normalize(&self, row: usize) -> BidResult<Pairing> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(BidError::schema(row, "Pairing", "identifier is missing"));
        }

        let departure = parse_timestamp(&self.departure)
            .map_err(|reason| BidError::schema(row, "Departure", reason))?;
        let arrival = parse_timestamp(&self.arrival)
            .map_err(|reason| BidError::schema(row, "Arrival", reason))?;
        if arrival < departure {
            return Err(BidError::schema(row, "Arrival", "arrival is before departure"));
        }

        let block_hours = parse_block_hours(&self.block_hours)
            .map_err(|reason| BidError::schema(row, "Block hours", reason))?;

        let mut pairing = Pairing::new(id, departure, arrival)
            .with_aircraft(self.aircraft.trim())
            .with_block_hours(block_hours)
            .with_route(self.details.trim());

        let duration = self.duration.as_deref().map(str::trim);
        if let Some(raw) = duration.filter(|s| !s.is_empty()) {
            let days: u32 = raw.parse().map_err(|_| {
                BidError::schema(row, "Duration", format!("'{raw}' is not a whole number of days"))
            })?;
            pairing = pairing.with_duration_days(days);
        }

        Ok(pairing)
    }
}

/// Normalizes a whole table and validates it.
pub fn normalize_records(records: &[PairingRecord]) -> BidResult<Vec<Pairing>> {
    let pairings = records
        .iter()
        .enumerate()
        .map(|(idx, record)| record.normalize(idx + 1))
        .collect::<BidResult<Vec<_>>>()?;

    validate_pairings(&pairings).map_err(BidError::Validation)?;
    Ok(pairings)
}

/// Parses an export timestamp.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("timestamp is missing".to_string());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| format!("'{value}' is not a recognized timestamp"))
}

/// Parses block time into decimal hours.
pub fn parse_block_hours(raw: &str) -> Result<f64, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(0.0);
    }

    let hours = match value.split_once(':') {
        Some((h, m)) => {
            let hours: u32 = h
                .trim()
                .parse()
                .map_err(|_| format!("'{value}' has a non-numeric hour part"))?;
            let minutes: u32 = m
                .trim()
                .parse()
                .map_err(|_| format!("'{value}' has a non-numeric minute part"))?;
            if minutes >= 60 {
                return Err(format!("'{value}' has more than 59 minutes"));
            }
            f64::from(hours) + f64::from(minutes) / 60.0
        }
        None => value
            .parse::<f64>()
            .map_err(|_| format!("'{value}' is not a duration"))?,
    };

    if !hours.is_finite() || hours < 0.0 {
        return Err(format!("'{value}' is not a non-negative duration"));
    }
    Ok(hours)
}

/// Formats decimal hours as `H:MM`.
pub fn format_block_hours(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).round() as u64;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}
