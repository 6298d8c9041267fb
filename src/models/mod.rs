//! Bidding domain models.
//!
//! Provides the core data types for ranking pairings and assembling
//! monthly schedules.
//!
//! # Domain Mappings
//!
//! | pilot-bid | Scheduling theory |
//! |-----------|-------------------|
//! | Pairing | Job with a fixed time window |
//! | Preference | Soft (or hard) constraint |
//! | ScoreResult | Priority value |
//! | Schedule | Feasible selection |

mod pairing;
mod preference;
mod schedule;
mod score;
mod window;

pub use pairing::{derive_layovers, Pairing};
pub use preference::{weekday_index, Preference, PreferenceKind, PreferenceType};
pub use schedule::Schedule;
pub use score::{ScoreResult, ScoreTier, HIGH_TIER_THRESHOLD};
pub use window::DutyWindow;
