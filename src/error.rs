//! Error types for the bid pipeline.
//!
//! Scoring, ranking and schedule assembly are infallible for normalized
//! input. Errors only arise at the edges: ingesting pairing records,
//! parsing preferences, and loading configuration.

use crate::models::PreferenceType;
use crate::validation::ValidationError;

/// Result alias used across the crate.
pub type BidResult<T> = Result<T, BidError>;

/// Errors surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum BidError {
    /// A pairing record field is missing or malformed.
    #[error("row {row}: field '{field}' is invalid: {reason}")]
    Schema {
        row: usize,
        field: &'static str,
        reason: String,
    },

    /// A preference value does not parse as its kind's payload.
    #[error("invalid value '{value}' for preference {kind}: {reason}")]
    InvalidPreferenceValue {
        kind: PreferenceType,
        value: String,
        reason: String,
    },

    #[error("unknown preference type '{0}'")]
    UnknownPreferenceType(String),

    /// Structural problems found in a normalized pairing table.
    #[error("pairing table failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl BidError {
    pub(crate) fn schema(row: usize, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Schema {
            row,
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_preference(
        kind: PreferenceType,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPreferenceValue {
            kind,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
