//! Pairing ranking.
//!
//! Orders a pairing table by preference score, highest first. The sort is
//! stable: pairings with equal scores keep their input order. There is no
//! secondary key.

use serde::Serialize;

use super::PreferenceScorer;
use crate::models::{Pairing, Preference, ScoreResult, ScoreTier};

/// A pairing annotated with its score.
///
/// Borrows the pairing from the caller's table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPairing<'a> {
    pub pairing: &'a Pairing,
    pub result: ScoreResult,
}

impl RankedPairing<'_> {
    pub fn score(&self) -> i64 {
        self.result.score
    }

    pub fn tier(&self) -> ScoreTier {
        self.result.tier()
    }
}

/// Ranks pairings by descending preference score.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairingRanker {
    scorer: PreferenceScorer,
}

impl PairingRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores every pairing and returns them highest score first.
    ///
    /// The input slice is left untouched.
    pub fn rank<'a>(
        &self,
        pairings: &'a [Pairing],
        preferences: &[Preference],
    ) -> Vec<RankedPairing<'a>> {
        let mut ranked: Vec<RankedPairing<'a>> = pairings
            .iter()
            .map(|pairing| RankedPairing {
                pairing,
                result: self.scorer.score(pairing, preferences),
            })
            .collect();

        // slice::sort_by is stable
        ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
        ranked
    }

    /// Returns the highest-ranked pairing, if any.
    pub fn select_best<'a>(
        &self,
        pairings: &'a [Pairing],
        preferences: &[Preference],
    ) -> Option<RankedPairing<'a>> {
        self.rank(pairings, preferences).into_iter().next()
    }
}
