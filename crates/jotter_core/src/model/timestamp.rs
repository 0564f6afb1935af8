//! Second-resolution local timestamps.
//!
//! # Responsibility
//! - Capture "now" in local time truncated to whole seconds.
//! - Own the fixed `YYYY-MM-DD HH:MM:SS` text form used on disk and on screen.
//!
//! # Invariants
//! - A `Timestamp` never carries sub-second precision.
//! - Serialization and parsing use the same format string.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Text form shared by the backing file and the command prompt.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock instant in local time, second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Current local time with sub-second precision dropped.
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// Wraps an existing local date-time, truncating to whole seconds.
    pub fn from_naive(value: NaiveDateTime) -> Self {
        // Zero nanoseconds is always in range.
        Self(value.with_nanosecond(0).unwrap_or(value))
    }

    /// Returns the wrapped local date-time.
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

/// Persisted timestamp text does not match [`TIMESTAMP_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParseError {
    value: String,
}

impl Display for TimestampParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timestamp `{}`; expected YYYY-MM-DD HH:MM:SS",
            self.value
        )
    }
}

impl Error for TimestampParseError {}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(Self::from_naive)
            .map_err(|_| TimestampParseError {
                value: value.to_string(),
            })
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn display_uses_fixed_second_resolution_format() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|date| date.and_hms_milli_opt(9, 5, 2, 750))
            .expect("valid date-time");
        assert_eq!(Timestamp::from_naive(naive).to_string(), "2024-03-07 09:05:02");
    }

    #[test]
    fn now_has_no_sub_second_part() {
        let now = Timestamp::now();
        assert_eq!(now.as_naive().nanosecond(), 0);
    }

    #[test]
    fn parse_rejects_other_formats() {
        assert!("2024-03-07T09:05:02".parse::<Timestamp>().is_err());
        assert!("".parse::<Timestamp>().is_err());
        let err = "yesterday".parse::<Timestamp>().unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn ordering_follows_wall_clock() {
        let earlier: Timestamp = "2024-01-01 00:00:00".parse().unwrap();
        let later: Timestamp = "2024-01-01 00:00:01".parse().unwrap();
        assert!(earlier < later);
    }
}
