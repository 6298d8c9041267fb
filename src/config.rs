//! Build configuration.
//!
//! [`BidConfig`] holds the constraints applied while assembling a
//! schedule, plus the size of the read-only sample offered to an
//! assistant. Missing TOML keys fall back to the defaults.
//!
//! # Defaults
//!
//! ```
//! use pilot_bid::config::BidConfig;
//!
//! let config = BidConfig::default();
//! assert_eq!(config.monthly_cap_hours, 88.0);
//! assert_eq!(config.rest_buffer_hours, 10);
//! assert_eq!(config.min_score_floor, -100);
//! assert_eq!(config.reference_month_days, 30);
//! ```
//!
//! # From TOML
//!
//! ```
//! use pilot_bid::config::BidConfig;
//!
//! let config = BidConfig::from_toml_str("monthly_cap_hours = 75.5").unwrap();
//! assert_eq!(config.monthly_cap_hours, 75.5);
//! assert_eq!(config.rest_buffer_hours, 10);
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{BidError, BidResult};

pub const DEFAULT_MONTHLY_CAP_HOURS: f64 = 88.0;
pub const DEFAULT_REST_BUFFER_HOURS: i64 = 10;
pub const DEFAULT_MIN_SCORE_FLOOR: i64 = -100;
pub const DEFAULT_REFERENCE_MONTH_DAYS: u32 = 30;
pub const DEFAULT_ASSISTANT_SAMPLE_SIZE: usize = 30;

/// Schedule assembly constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidConfig {
    /// Maximum total block hours in one schedule.
    pub monthly_cap_hours: f64,
    /// Rest hours added to both edges of every duty window.
    pub rest_buffer_hours: i64,
    /// Pairings scoring below this are never selected.
    pub min_score_floor: i64,
    /// Length of the month used for the days-off count.
    pub reference_month_days: u32,
    /// Number of ranked pairings exposed to an assistant.
    pub assistant_sample_size: usize,
}

impl Default for BidConfig {
    fn default() -> Self {
        Self {
            monthly_cap_hours: DEFAULT_MONTHLY_CAP_HOURS,
            rest_buffer_hours: DEFAULT_REST_BUFFER_HOURS,
            min_score_floor: DEFAULT_MIN_SCORE_FLOOR,
            reference_month_days: DEFAULT_REFERENCE_MONTH_DAYS,
            assistant_sample_size: DEFAULT_ASSISTANT_SAMPLE_SIZE,
        }
    }
}

impl BidConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> BidResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_monthly_cap_hours(mut self, hours: f64) -> Self {
        self.monthly_cap_hours = hours;
        self
    }

    pub fn with_rest_buffer_hours(mut self, hours: i64) -> Self {
        self.rest_buffer_hours = hours;
        self
    }

    pub fn with_min_score_floor(mut self, floor: i64) -> Self {
        self.min_score_floor = floor;
        self
    }

    pub fn with_reference_month_days(mut self, days: u32) -> Self {
        self.reference_month_days = days;
        self
    }

    pub fn with_assistant_sample_size(mut self, size: usize) -> Self {
        self.assistant_sample_size = size;
        self
    }

    /// Longest accepted rest buffer: one reference month.
    pub fn max_rest_buffer_hours(&self) -> i64 {
        i64::from(self.reference_month_days) * 24
    }

    /// The rest buffer as a duration, limited to
    /// `[0, max_rest_buffer_hours]`.
    pub fn rest_buffer(&self) -> Duration {
        let hours = self
            .rest_buffer_hours
            .clamp(0, self.max_rest_buffer_hours());
        Duration::try_hours(hours).unwrap_or(Duration::zero())
    }

    /// Checks value ranges.
    pub fn validate(&self) -> BidResult<()> {
        if !self.monthly_cap_hours.is_finite() || self.monthly_cap_hours < 0.0 {
            return Err(BidError::Config(format!(
                "monthly_cap_hours must be a non-negative number, got {}",
                self.monthly_cap_hours
            )));
        }
        if self.rest_buffer_hours < 0 {
            return Err(BidError::Config(format!(
                "rest_buffer_hours must not be negative, got {}",
                self.rest_buffer_hours
            )));
        }
        if self.reference_month_days == 0 {
            return Err(BidError::Config(
                "reference_month_days must be at least 1".to_string(),
            ));
        }
        if self.rest_buffer_hours > self.max_rest_buffer_hours() {
            return Err(BidError::Config(format!(
                "rest_buffer_hours must be at most {} (one reference month), got {}",
                self.max_rest_buffer_hours(),
                self.rest_buffer_hours
            )));
        }
        Ok(())
    }
}
