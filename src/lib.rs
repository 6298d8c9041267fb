//! Preference-driven pilot bid optimization.
//!
//! Scores monthly airline pairings against a pilot's preferences, ranks
//! them, and assembles candidate schedules under block-hour and rest
//! constraints. Three strategy variants are produced side by side so the
//! pilot can compare pay against lifestyle.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Pairing`, `Preference`, `ScoreResult`,
//!   `Schedule`, `DutyWindow`
//! - **`scoring`**: `PreferenceScorer` and `PairingRanker`
//! - **`scheduler`**: Greedy `ScheduleBuilder`, `StrategyGenerator`, and
//!   `PairingStats`
//! - **`ingest`**: Raw export rows to normalized pairings
//! - **`validation`**: Pairing table integrity checks
//! - **`filter`**: Search, duration, aircraft and date filters
//! - **`assistant`**: Ranked slice for an assistant collaborator
//! - **`session`**: Caller-owned bid state
//! - **`config`**: Schedule constraints, loadable from TOML
//!
//! # Logging
//!
//! Instrumented with `tracing`. The crate never installs a subscriber.

pub mod assistant;
pub mod config;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod validation;

pub use config::BidConfig;
pub use error::{BidError, BidResult};
pub use models::{Pairing, Preference, PreferenceKind, Schedule, ScoreResult, ScoreTier};
pub use scheduler::{ScheduleBuilder, StrategyGenerator};
pub use scoring::{PairingRanker, PreferenceScorer, RankedPairing};
pub use session::BidSession;
