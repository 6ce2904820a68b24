//! Timestamp type and the clock seam.
//!
//! Timestamps are UTC instants serialized as RFC 3339 strings, which is the
//! format the persisted record list has always used.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Get the current system time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build a timestamp from Unix epoch milliseconds.
    ///
    /// Out-of-range values clamp to the epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(
            Utc.timestamp_millis_opt(millis)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }

    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Source of the current time.
///
/// Production code uses [`SystemClock`]; tests inject a deterministic clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_roundtrip() {
        let ts = Timestamp::from_millis(1_700_000_000_123);
        assert_eq!(ts.as_millis(), 1_700_000_000_123);
    }

    #[test]
    fn parses_browser_iso_strings() {
        let ts: Timestamp = serde_json::from_str("\"2024-03-01T10:15:30.250Z\"").unwrap();
        assert_eq!(ts.as_millis(), 1_709_288_130_250);
    }
}
