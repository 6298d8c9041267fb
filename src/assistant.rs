//! Read-only pairing sample for an assistant collaborator.
//!
//! Exposes the top of the ranked list as plain records. Building prompts,
//! calling a model and interpreting its answer are the collaborator's job.

use serde::Serialize;

use crate::ingest::format_block_hours;
use crate::scoring::RankedPairing;

/// One pairing as shown to an assistant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantPairing {
    pub id: String,
    pub aircraft: String,
    pub duration_days: u32,
    pub route: String,
    pub block_hours: f64,
    /// Block time as `H:MM`.
    pub block_time: String,
}

/// Bounded slice of ranked pairings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssistantContext {
    /// Number of pairings the slice was taken from.
    pub total_available: usize,
    pub pairings: Vec<AssistantPairing>,
}

impl AssistantContext {
    /// Takes the first `limit` ranked pairings.
    pub fn from_ranked(ranked: &[RankedPairing<'_>], limit: usize) -> Self {
        let pairings = ranked
            .iter()
            .take(limit)
            .map(|r| {
                let p = r.pairing;
                AssistantPairing {
                    id: p.id().to_string(),
                    aircraft: p.aircraft().to_string(),
                    duration_days: p.duration_days(),
                    route: p.route().to_string(),
                    block_hours: p.block_hours(),
                    block_time: format_block_hours(p.block_hours()),
                }
            })
            .collect();
        Self {
            total_available: ranked.len(),
            pairings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    /// Pretty-printed JSON for embedding in a prompt.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
