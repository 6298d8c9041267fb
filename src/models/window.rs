//! Duty windows.
//!
//! A duty window is the wall-clock interval a pairing occupies, optionally
//! widened by a rest buffer on both edges. Intervals are half-open: a window
//! ending at 20:00 and another starting at 20:00 do not overlap.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyWindow {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl DutyWindow {
    /// Creates a new window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Widens the window by `buffer` on the leading and trailing edge.
    ///
    /// Edges saturate at the representable date range.
    pub fn expanded(&self, buffer: Duration) -> Self {
        Self {
            start: self
                .start
                .checked_sub_signed(buffer)
                .unwrap_or(NaiveDateTime::MIN),
            end: self
                .end
                .checked_add_signed(buffer)
                .unwrap_or(NaiveDateTime::MAX),
        }
    }

    /// Length of the window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
