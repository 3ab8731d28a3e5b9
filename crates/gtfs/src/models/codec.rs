//! Scalar encodings used throughout the dataset.
//!
//! Calendar dates are written as 8 digits (`YYYYMMDD`), either as text or as
//! an integer. Schedule times are `HH:MM:SS` where the hour may pass 24 for
//! trips that run after midnight but still belong to the previous service day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

// ============================================================================
// 8-digit dates
// ============================================================================

/// Parse `YYYYMMDD`. Anything but exactly eight ASCII digits forming a real
/// calendar date is rejected.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date stored as the integer `YYYYMMDD`.
pub fn date_from_int(value: i64) -> Option<NaiveDate> {
    if !(0..=99_999_999).contains(&value) {
        return None;
    }
    parse_date(&format!("{value:08}"))
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

pub fn date_to_int(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

// ============================================================================
// Service times
// ============================================================================

/// A time of day relative to the start of a service day.
///
/// `hours` may be 24 or more. Ordering compares hours, then minutes, then
/// seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid service time `{0}`, expected HH:MM:SS")]
pub struct ParseServiceTimeError(String);

impl ServiceTime {
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Build from seconds since the start of the service day.
    pub const fn from_seconds(total: u32) -> Self {
        Self::new(total / 3600, (total / 60) % 60, total % 60)
    }

    /// Seconds since the start of the service day.
    ///
    /// Widened to `u64` since `hours` is unbounded.
    pub const fn total_seconds(self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    /// True when this time falls on the calendar day after the service day.
    pub const fn is_after_midnight(self) -> bool {
        self.hours >= 24
    }
}

impl FromStr for ServiceTime {
    type Err = ParseServiceTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseServiceTimeError(s.to_owned());

        let mut parts = s.trim().split(':');
        let mut next = || -> Result<u32, ParseServiceTimeError> {
            let part = parts.next().ok_or_else(err)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            part.parse().map_err(|_| err())
        };

        let hours = next()?;
        let minutes = next()?;
        let seconds = next()?;

        if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
            return Err(err());
        }

        Ok(Self::new(hours, minutes, seconds))
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ServiceTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ServiceTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
