//! Time handling for timetable queries and stop visits.
//!
//! Queries are issued at a clock time ("HH:MM") on a calendar date.
//! The service reports stop times as full timestamps with a UTC offset,
//! which we keep intact so the output table shows exactly what was
//! reported.

use chrono::{DateTime, FixedOffset, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A clock time at which a query asks for departures.
///
/// # Examples
///
/// ```
/// use sbb_network::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse_hhmm("09:00").unwrap();
/// assert_eq!(t.to_string(), "09:00");
///
/// assert!(TimeOfDay::parse_hhmm("9:00").is_err());
/// assert!(TimeOfDay::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Create from hour and minute, if in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse_hhmm(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// A scheduled stop time as reported by the service, offset included.
///
/// Displays as `YYYY-MM-DD HH:MM:SS+HH:MM`.
///
/// # Examples
///
/// ```
/// use sbb_network::domain::Timestamp;
///
/// let ts = Timestamp::parse("2020-03-09T09:02:00+0100").unwrap();
/// assert_eq!(ts.to_string(), "2020-03-09 09:02:00+01:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// Parse a service timestamp.
    ///
    /// Accepts `2020-03-09T09:02:00+0100` (what the service sends) and
    /// RFC 3339 (`2020-03-09T09:02:00+01:00`).
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z")
            .or_else(|_| DateTime::parse_from_rfc3339(s))
            .map(Timestamp)
            .map_err(|_| TimeError::new("expected YYYY-MM-DDTHH:MM:SS+hhmm"))
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%:z"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert!(TimeOfDay::parse_hhmm("00:00").is_ok());
        assert!(TimeOfDay::parse_hhmm("23:59").is_ok());
        assert!(TimeOfDay::parse_hhmm("13:00").is_ok());
    }

    #[test]
    fn parse_rejects_bad_format() {
        assert!(TimeOfDay::parse_hhmm("0900").is_err());
        assert!(TimeOfDay::parse_hhmm("09-00").is_err());
        assert!(TimeOfDay::parse_hhmm("9:00").is_err());
        assert!(TimeOfDay::parse_hhmm("ab:cd").is_err());
        assert!(TimeOfDay::parse_hhmm("").is_err());
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(TimeOfDay::parse_hhmm("24:00").is_err());
        assert!(TimeOfDay::parse_hhmm("12:60").is_err());
    }

    #[test]
    fn time_of_day_accessors() {
        let t = TimeOfDay::parse_hhmm("17:05").unwrap();
        assert_eq!(t.hour(), 17);
        assert_eq!(t.minute(), 5);
        assert_eq!(format!("{:?}", t), "TimeOfDay(17:05)");
    }

    #[test]
    fn time_of_day_ordering() {
        let early = TimeOfDay::parse_hhmm("00:00").unwrap();
        let late = TimeOfDay::parse_hhmm("21:00").unwrap();
        assert!(early < late);
    }

    #[test]
    fn time_of_day_deserialize() {
        let t: TimeOfDay = serde_json::from_str(r#""21:00""#).unwrap();
        assert_eq!(t, TimeOfDay::from_hm(21, 0).unwrap());

        assert!(serde_json::from_str::<TimeOfDay>(r#""25:00""#).is_err());
    }

    #[test]
    fn timestamp_service_format() {
        let ts = Timestamp::parse("2020-03-09T09:45:00+0100").unwrap();
        assert_eq!(ts.to_string(), "2020-03-09 09:45:00+01:00");
    }

    #[test]
    fn timestamp_rfc3339() {
        let ts = Timestamp::parse("2020-03-29T10:00:00+02:00").unwrap();
        assert_eq!(ts.to_string(), "2020-03-29 10:00:00+02:00");
    }

    #[test]
    fn timestamp_preserves_offset() {
        let winter = Timestamp::parse("2020-03-09T09:00:00+0100").unwrap();
        let summer = Timestamp::parse("2020-04-06T09:00:00+0200").unwrap();
        assert_eq!(winter.as_datetime().offset().local_minus_utc(), 3600);
        assert_eq!(summer.as_datetime().offset().local_minus_utc(), 7200);
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert!(Timestamp::parse("").is_err());
        assert!(Timestamp::parse("09:00").is_err());
        assert!(Timestamp::parse("2020-03-09 09:00:00").is_err());
    }
}
