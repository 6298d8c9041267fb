//! Score results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Score at or above which a pairing is rated [`ScoreTier::High`].
pub const HIGH_TIER_THRESHOLD: i64 = 50;

/// Outcome of scoring one pairing against a preference set.
///
/// `matches` is a de-duplicated set of annotations describing which
/// preferences fired. Callers should not rely on its iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Total score (may be negative).
    pub score: i64,
    /// Match annotations.
    pub matches: BTreeSet<String>,
}

/// Visual severity used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    /// score >= 50
    High,
    /// 0 < score < 50
    Medium,
    /// score <= 0
    Low,
}

impl ScoreTier {
    /// Classifies a raw score.
    pub fn classify(score: i64) -> Self {
        if score >= HIGH_TIER_THRESHOLD {
            ScoreTier::High
        } else if score > 0 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}

impl ScoreResult {
    /// Creates an empty (zero) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds points and an annotation.
    pub fn add(&mut self, points: i64, annotation: impl Into<String>) {
        self.score += points;
        self.matches.insert(annotation.into());
    }

    /// Adds points without an annotation.
    pub fn add_points(&mut self, points: i64) {
        self.score += points;
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::classify(self.score)
    }

    /// Annotations reporting a violated preference.
    pub fn violations(&self) -> impl Iterator<Item = &str> {
        self.matches
            .iter()
            .map(String::as_str)
            .filter(|m| m.contains("Violated") || m.contains("Conflicts"))
    }

    pub fn has_violation(&self) -> bool {
        self.violations().next().is_some()
    }
}
