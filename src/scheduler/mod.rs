//! Greedy schedule assembly and strategy comparison.
//!
//! # Algorithm
//!
//! `ScheduleBuilder` walks ranked pairings once, accepting each pairing
//! that fits under the monthly cap, clears the score floor, avoids blocked
//! dates, and leaves the required rest around every accepted trip. It is
//! not optimal, but gives fast, explainable lines.
//!
//! `StrategyGenerator` runs the builder for three preference variants so
//! the pilot can compare pay, lifestyle, and weekends-free schedules.
//!
//! # Statistics
//!
//! `PairingStats` summarizes a pairing table: duration distribution,
//! aircraft mix, and averages.

mod builder;
mod stats;
mod strategy;

pub use builder::{Rejection, ScheduleBuilder};
pub use stats::PairingStats;
pub use strategy::{StrategyGenerator, StrategyVariant, LIFESTYLE_MAX_DURATION_DAYS};
