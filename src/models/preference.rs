//! Bid preference model.
//!
//! A preference is one user-declared wish ("keep Dec 25 off", "prefer MIA")
//! with a display label. Preferences are held by the caller as an ordered
//! list; order only matters for rendering.
//!
//! # Wire Format
//! Preferences (de)serialize as the textual triple used by the bidding UI:
//!
//! ```json
//! { "type": "TIME_WINDOW", "value": "6-12", "label": "Prefer Departure Time" }
//! ```
//!
//! Deserialization runs the same validation as [`Preference::parse`], so a
//! malformed value fails with [`BidError::InvalidPreferenceValue`].
//!
//! # Weekday Numbering
//! `DayOfWeekOff` carries the UI index where 0 = Sunday … 6 = Saturday.
//! Scoring compares against Monday-based weekday numbers via
//! [`weekday_index`].

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BidError, BidResult};

/// Preference discriminant, named by its wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreferenceType {
    #[serde(rename = "STRATEGY_MONEY")]
    MaxEarnings,
    SpecificDateOff,
    DayOfWeekOff,
    AvoidRedEye,
    MaxLegsPerDay,
    #[serde(rename = "ROUTE")]
    PreferredRoute,
    #[serde(rename = "TIME_WINDOW")]
    PreferredDepartureWindow,
    MaxDuration,
    AvoidAirport,
}

impl PreferenceType {
    /// All preference types in UI menu order.
    pub const ALL: [PreferenceType; 9] = [
        PreferenceType::SpecificDateOff,
        PreferenceType::DayOfWeekOff,
        PreferenceType::MaxDuration,
        PreferenceType::AvoidRedEye,
        PreferenceType::MaxLegsPerDay,
        PreferenceType::MaxEarnings,
        PreferenceType::PreferredRoute,
        PreferenceType::PreferredDepartureWindow,
        PreferenceType::AvoidAirport,
    ];

    /// Wire key (e.g. `"STRATEGY_MONEY"`).
    pub fn key(&self) -> &'static str {
        match self {
            PreferenceType::MaxEarnings => "STRATEGY_MONEY",
            PreferenceType::SpecificDateOff => "SPECIFIC_DATE_OFF",
            PreferenceType::DayOfWeekOff => "DAY_OF_WEEK_OFF",
            PreferenceType::AvoidRedEye => "AVOID_RED_EYE",
            PreferenceType::MaxLegsPerDay => "MAX_LEGS_PER_DAY",
            PreferenceType::PreferredRoute => "ROUTE",
            PreferenceType::PreferredDepartureWindow => "TIME_WINDOW",
            PreferenceType::MaxDuration => "MAX_DURATION",
            PreferenceType::AvoidAirport => "AVOID_AIRPORT",
        }
    }

    /// Menu label shown by the bidding UI.
    pub fn default_label(&self) -> &'static str {
        match self {
            PreferenceType::MaxEarnings => "Maximize Earnings",
            PreferenceType::SpecificDateOff => "Block Specific Date Off",
            PreferenceType::DayOfWeekOff => "Block Day of Week",
            PreferenceType::AvoidRedEye => "Avoid Red-Eye Arrivals",
            PreferenceType::MaxLegsPerDay => "Limit Flights per Day",
            PreferenceType::PreferredRoute => "Prefer Airport/Route",
            PreferenceType::PreferredDepartureWindow => "Prefer Departure Time",
            PreferenceType::MaxDuration => "Limit Trip Duration",
            PreferenceType::AvoidAirport => "Avoid Airport",
        }
    }
}

impl fmt::Display for PreferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PreferenceType {
    type Err = BidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        PreferenceType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| BidError::UnknownPreferenceType(s.to_string()))
    }
}

/// Typed preference payload, one variant per preference type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    /// Reward block hours.
    MaxEarnings,
    /// Hard-block a calendar date.
    SpecificDateOff(NaiveDate),
    /// Keep a weekday free. UI numbering: 0 = Sunday … 6 = Saturday.
    DayOfWeekOff(u8),
    /// Penalize arrivals between 00:00 and 07:59.
    AvoidRedEye,
    /// Reward pairings flying at most this many legs per day.
    MaxLegsPerDay(u32),
    /// Reward routes containing this airport code.
    PreferredRoute(String),
    /// Reward departures whose hour lies in `[start_hour, end_hour]`.
    PreferredDepartureWindow { start_hour: u32, end_hour: u32 },
    /// Reward pairings at most this many days long.
    MaxDuration(u32),
    /// Penalize routes containing this airport code.
    AvoidAirport(String),
}

impl PreferenceKind {
    pub fn preference_type(&self) -> PreferenceType {
        match self {
            PreferenceKind::MaxEarnings => PreferenceType::MaxEarnings,
            PreferenceKind::SpecificDateOff(_) => PreferenceType::SpecificDateOff,
            PreferenceKind::DayOfWeekOff(_) => PreferenceType::DayOfWeekOff,
            PreferenceKind::AvoidRedEye => PreferenceType::AvoidRedEye,
            PreferenceKind::MaxLegsPerDay(_) => PreferenceType::MaxLegsPerDay,
            PreferenceKind::PreferredRoute(_) => PreferenceType::PreferredRoute,
            PreferenceKind::PreferredDepartureWindow { .. } => {
                PreferenceType::PreferredDepartureWindow
            }
            PreferenceKind::MaxDuration(_) => PreferenceType::MaxDuration,
            PreferenceKind::AvoidAirport(_) => PreferenceType::AvoidAirport,
        }
    }

    /// Value in wire format (`"true"` for flag types).
    pub fn value_string(&self) -> String {
        match self {
            PreferenceKind::MaxEarnings | PreferenceKind::AvoidRedEye => "true".to_string(),
            PreferenceKind::SpecificDateOff(date) => date.format("%Y-%m-%d").to_string(),
            PreferenceKind::DayOfWeekOff(day) => day.to_string(),
            PreferenceKind::MaxLegsPerDay(n) | PreferenceKind::MaxDuration(n) => n.to_string(),
            PreferenceKind::PreferredRoute(code) | PreferenceKind::AvoidAirport(code) => {
                code.clone()
            }
            PreferenceKind::PreferredDepartureWindow {
                start_hour,
                end_hour,
            } => format!("{start_hour}-{end_hour}"),
        }
    }

    /// Parses a wire value for the given type.
    pub fn parse(kind: PreferenceType, value: &str) -> BidResult<Self> {
        let raw = value.trim();
        let invalid = |reason: &str| BidError::invalid_preference(kind, value, reason);

        match kind {
            PreferenceType::MaxEarnings => Ok(PreferenceKind::MaxEarnings),
            PreferenceType::AvoidRedEye => Ok(PreferenceKind::AvoidRedEye),
            PreferenceType::SpecificDateOff => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(PreferenceKind::SpecificDateOff)
                .map_err(|e| invalid(&format!("expected YYYY-MM-DD ({e})"))),
            PreferenceType::DayOfWeekOff => {
                let day: u8 = raw
                    .parse()
                    .map_err(|_| invalid("expected a weekday number 0-6"))?;
                if day > 6 {
                    return Err(invalid("weekday must be between 0 (Sunday) and 6 (Saturday)"));
                }
                Ok(PreferenceKind::DayOfWeekOff(day))
            }
            PreferenceType::MaxLegsPerDay => {
                parse_positive(raw).map(PreferenceKind::MaxLegsPerDay).map_err(invalid)
            }
            PreferenceType::MaxDuration => {
                parse_positive(raw).map(PreferenceKind::MaxDuration).map_err(invalid)
            }
            PreferenceType::PreferredRoute => normalize_airport(raw)
                .map(PreferenceKind::PreferredRoute)
                .map_err(invalid),
            PreferenceType::AvoidAirport => normalize_airport(raw)
                .map(PreferenceKind::AvoidAirport)
                .map_err(invalid),
            PreferenceType::PreferredDepartureWindow => {
                let (start, end) = raw
                    .split_once('-')
                    .ok_or_else(|| invalid("expected an hour range like 6-12"))?;
                let start_hour: u32 = start
                    .trim()
                    .parse()
                    .map_err(|_| invalid("start hour is not a number"))?;
                let end_hour: u32 = end
                    .trim()
                    .parse()
                    .map_err(|_| invalid("end hour is not a number"))?;
                check_hour_range(start_hour, end_hour).map_err(invalid)?;
                Ok(PreferenceKind::PreferredDepartureWindow {
                    start_hour,
                    end_hour,
                })
            }
        }
    }
}

fn parse_positive(raw: &str) -> Result<u32, &'static str> {
    let n = raw
        .parse::<u32>()
        .map_err(|_| "expected a positive whole number")?;
    check_positive(n)
}

fn check_positive(n: u32) -> Result<u32, &'static str> {
    if n == 0 {
        return Err("must be at least 1");
    }
    Ok(n)
}

fn check_hour_range(start_hour: u32, end_hour: u32) -> Result<(), &'static str> {
    if start_hour > 23 || end_hour > 23 {
        return Err("hours must be between 0 and 23");
    }
    if start_hour > end_hour {
        return Err("start hour is after end hour");
    }
    Ok(())
}

fn normalize_airport(raw: &str) -> Result<String, &'static str> {
    let code = raw.trim();
    if code.is_empty() {
        return Err("airport code is empty");
    }
    Ok(code.to_uppercase())
}

/// Maps a UI weekday index (0 = Sunday) onto the Monday-based numbering
/// used by [`chrono::Weekday::num_days_from_monday`].
#[inline]
pub fn weekday_index(requested: u8) -> u32 {
    (u32::from(requested) + 6) % 7
}

/// A labeled preference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PreferenceRecord", into = "PreferenceRecord")]
pub struct Preference {
    /// Typed payload.
    pub kind: PreferenceKind,
    /// Display label echoed back to the UI.
    pub label: String,
}

impl Preference {
    /// Creates a preference with an explicit label.
    pub fn new(kind: PreferenceKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }

    /// Creates a preference labeled with its type's menu label.
    pub fn unlabeled(kind: PreferenceKind) -> Self {
        let label = kind.preference_type().default_label();
        Self::new(kind, label)
    }

    /// Parses the textual triple used by the bidding UI.
    pub fn parse(kind: PreferenceType, value: &str, label: impl Into<String>) -> BidResult<Self> {
        Ok(Self::new(PreferenceKind::parse(kind, value)?, label))
    }

    pub fn max_earnings() -> Self {
        Self::unlabeled(PreferenceKind::MaxEarnings)
    }

    pub fn specific_date_off(date: NaiveDate) -> Self {
        Self::unlabeled(PreferenceKind::SpecificDateOff(date))
    }

    /// Keep `weekday` free.
    pub fn day_of_week_off(weekday: Weekday) -> Self {
        // num_days_from_sunday is at most 6
        let ui_index = weekday.num_days_from_sunday() as u8;
        Self::new(PreferenceKind::DayOfWeekOff(ui_index), weekday_name(weekday))
    }

    pub fn avoid_red_eye() -> Self {
        Self::unlabeled(PreferenceKind::AvoidRedEye)
    }

    /// Fails unless `legs >= 1`.
    pub fn max_legs_per_day(legs: u32) -> BidResult<Self> {
        let legs = check_positive(legs).map_err(|r| {
            BidError::invalid_preference(PreferenceType::MaxLegsPerDay, legs.to_string(), r)
        })?;
        Ok(Self::unlabeled(PreferenceKind::MaxLegsPerDay(legs)))
    }

    /// Trims and uppercases `code`; fails if it is blank.
    pub fn preferred_route(code: &str) -> BidResult<Self> {
        let code = normalize_airport(code)
            .map_err(|r| BidError::invalid_preference(PreferenceType::PreferredRoute, code, r))?;
        Ok(Self::unlabeled(PreferenceKind::PreferredRoute(code)))
    }

    /// Fails unless `start_hour <= end_hour <= 23`.
    pub fn departure_window(start_hour: u32, end_hour: u32) -> BidResult<Self> {
        check_hour_range(start_hour, end_hour).map_err(|r| {
            BidError::invalid_preference(
                PreferenceType::PreferredDepartureWindow,
                format!("{start_hour}-{end_hour}"),
                r,
            )
        })?;
        Ok(Self::unlabeled(PreferenceKind::PreferredDepartureWindow {
            start_hour,
            end_hour,
        }))
    }

    /// Fails unless `days >= 1`.
    pub fn max_duration(days: u32) -> BidResult<Self> {
        let days = check_positive(days).map_err(|r| {
            BidError::invalid_preference(PreferenceType::MaxDuration, days.to_string(), r)
        })?;
        Ok(Self::unlabeled(PreferenceKind::MaxDuration(days)))
    }

    /// Trims and uppercases `code`; fails if it is blank.
    pub fn avoid_airport(code: &str) -> BidResult<Self> {
        let code = normalize_airport(code)
            .map_err(|r| BidError::invalid_preference(PreferenceType::AvoidAirport, code, r))?;
        Ok(Self::unlabeled(PreferenceKind::AvoidAirport(code)))
    }

    pub fn preference_type(&self) -> PreferenceType {
        self.kind.preference_type()
    }

    /// The blocked date, if this is a `SpecificDateOff` preference.
    pub fn blocked_date(&self) -> Option<NaiveDate> {
        match self.kind {
            PreferenceKind::SpecificDateOff(date) => Some(date),
            _ => None,
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Wire representation of a [`Preference`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PreferenceRecord {
    #[serde(rename = "type")]
    kind: PreferenceType,
    #[serde(default)]
    value: String,
    #[serde(default)]
    label: String,
}

impl TryFrom<PreferenceRecord> for Preference {
    type Error = BidError;

    fn try_from(record: PreferenceRecord) -> Result<Self, Self::Error> {
        Preference::parse(record.kind, &record.value, record.label)
    }
}

impl From<Preference> for PreferenceRecord {
    fn from(pref: Preference) -> Self {
        Self {
            kind: pref.preference_type(),
            value: pref.kind.value_string(),
            label: pref.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_index_all_days() {
        // UI: 0=Sun 1=Mon 2=Tue 3=Wed 4=Thu 5=Fri 6=Sat
        let expected = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        for (ui, weekday) in expected.iter().enumerate() {
            assert_eq!(
                weekday_index(ui as u8),
                weekday.num_days_from_monday(),
                "UI index {ui} should map to {weekday:?}"
            );
        }
    }

    #[test]
    fn test_day_of_week_off_constructor() {
        let sat = Preference::day_of_week_off(Weekday::Sat);
        assert_eq!(sat.kind, PreferenceKind::DayOfWeekOff(6));
        assert_eq!(sat.label, "Saturday");
        let sun = Preference::day_of_week_off(Weekday::Sun);
        assert_eq!(sun.kind, PreferenceKind::DayOfWeekOff(0));
    }

    #[test]
    fn test_parse_type_keys() {
        for t in PreferenceType::ALL {
            assert_eq!(t.key().parse::<PreferenceType>().unwrap(), t);
        }
        assert!(matches!(
            "NAP_TIME".parse::<PreferenceType>(),
            Err(BidError::UnknownPreferenceType(_))
        ));
    }

    #[test]
    fn test_parse_values() {
        let date = PreferenceKind::parse(PreferenceType::SpecificDateOff, "2024-12-25").unwrap();
        assert_eq!(
            date,
            PreferenceKind::SpecificDateOff(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap())
        );

        let window = PreferenceKind::parse(PreferenceType::PreferredDepartureWindow, "6-12").unwrap();
        assert_eq!(
            window,
            PreferenceKind::PreferredDepartureWindow {
                start_hour: 6,
                end_hour: 12
            }
        );

        let route = PreferenceKind::parse(PreferenceType::PreferredRoute, " mia ").unwrap();
        assert_eq!(route, PreferenceKind::PreferredRoute("MIA".into()));

        let flag = PreferenceKind::parse(PreferenceType::AvoidRedEye, "").unwrap();
        assert_eq!(flag, PreferenceKind::AvoidRedEye);
    }

    #[test]
    fn test_parse_invalid_values() {
        let cases = [
            (PreferenceType::SpecificDateOff, "12/25/2024"),
            (PreferenceType::DayOfWeekOff, "7"),
            (PreferenceType::DayOfWeekOff, "sat"),
            (PreferenceType::MaxDuration, "three"),
            (PreferenceType::MaxDuration, "0"),
            (PreferenceType::MaxLegsPerDay, "-1"),
            (PreferenceType::PreferredDepartureWindow, "6"),
            (PreferenceType::PreferredDepartureWindow, "6-25"),
            (PreferenceType::PreferredDepartureWindow, "12-6"),
            (PreferenceType::PreferredDepartureWindow, "a-b"),
            (PreferenceType::AvoidAirport, "  "),
        ];
        for (kind, value) in cases {
            match PreferenceKind::parse(kind, value) {
                Err(BidError::InvalidPreferenceValue { kind: k, value: v, .. }) => {
                    assert_eq!(k, kind);
                    assert_eq!(v, value);
                }
                other => panic!("{kind} '{value}' should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_serde_wire_format() {
        let pref = Preference::new(
            PreferenceKind::PreferredDepartureWindow {
                start_hour: 6,
                end_hour: 12,
            },
            "Mornings",
        );
        let json = serde_json::to_value(&pref).unwrap();
        assert_eq!(json["type"], "TIME_WINDOW");
        assert_eq!(json["value"], "6-12");
        assert_eq!(json["label"], "Mornings");

        let back: Preference = serde_json::from_value(json).unwrap();
        assert_eq!(back, pref);
    }

    #[test]
    fn test_serde_rejects_bad_value() {
        let json = r#"{"type":"MAX_DURATION","value":"lots","label":"x"}"#;
        assert!(serde_json::from_str::<Preference>(json).is_err());

        let flag = r#"{"type":"STRATEGY_MONEY","label":"Max Earnings"}"#;
        let pref: Preference = serde_json::from_str(flag).unwrap();
        assert_eq!(pref.kind, PreferenceKind::MaxEarnings);
    }

    #[test]
    fn test_typed_constructors_normalize_codes() {
        let route = Preference::preferred_route(" bos ").unwrap();
        assert_eq!(route.kind, PreferenceKind::PreferredRoute("BOS".into()));
        assert_eq!(
            route.kind,
            PreferenceKind::parse(PreferenceType::PreferredRoute, " bos ").unwrap()
        );

        assert!(matches!(
            Preference::avoid_airport(""),
            Err(BidError::InvalidPreferenceValue {
                kind: PreferenceType::AvoidAirport,
                ..
            })
        ));
        assert!(Preference::preferred_route("   ").is_err());
    }

    #[test]
    fn test_typed_constructors_check_ranges() {
        assert!(Preference::max_duration(0).is_err());
        assert!(Preference::max_legs_per_day(0).is_err());
        assert_eq!(
            Preference::max_duration(3).unwrap().kind,
            PreferenceKind::MaxDuration(3)
        );
        assert!(Preference::departure_window(12, 6).is_err());
        assert!(Preference::departure_window(6, 24).is_err());
        let window = Preference::departure_window(0, 23).unwrap();
        assert_eq!(window.kind.value_string(), "0-23");
    }

    #[test]
    fn test_blocked_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(Preference::specific_date_off(date).blocked_date(), Some(date));
        assert_eq!(Preference::max_earnings().blocked_date(), None);
    }
}
