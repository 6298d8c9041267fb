//! Input validation for pairing tables.
//!
//! Checks structural integrity of normalized pairings before ranking.
//! Detects:
//! - Duplicate IDs
//! - Empty IDs
//! - Arrival before departure
//! - Block time longer than the elapsed duty interval

use std::collections::HashSet;

use crate::models::Pairing;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending pairing ID.
    pub pairing_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two pairings share the same ID.
    DuplicateId,
    /// A pairing has a blank ID.
    EmptyId,
    /// Arrival precedes departure.
    InvalidInterval,
    /// Paid block time exceeds the time between departure and arrival.
    BlockHoursExceedSpan,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, pairing_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            pairing_id: pairing_id.to_string(),
            message: message.into(),
        }
    }
}

/// Validates a normalized pairing table.
///
/// Checks:
/// 1. No duplicate pairing IDs
/// 2. No blank IDs
/// 3. Arrival is not before departure
/// 4. Block hours fit inside the duty interval
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_pairings(pairings: &[Pairing]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in pairings {
        if p.id().trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                p.id(),
                "Pairing has an empty ID",
            ));
        } else if !ids.insert(p.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                p.id(),
                format!("Duplicate pairing ID: {}", p.id()),
            ));
        }

        if p.arrival() < p.departure() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                p.id(),
                format!("Pairing '{}' arrives before it departs", p.id()),
            ));
            continue;
        }

        let elapsed_hours = p.duty_window().duration().num_minutes() as f64 / 60.0;
        if p.block_hours() > elapsed_hours {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlockHoursExceedSpan,
                p.id(),
                format!(
                    "Pairing '{}' has {:.2} block hours but spans only {:.2} hours",
                    p.id(),
                    p.block_hours(),
                    elapsed_hours
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
