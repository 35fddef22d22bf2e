//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Milliseconds elapsed from `earlier` to this timestamp (never negative).
    pub fn millis_since(&self, earlier: &Timestamp) -> u64 {
        self.0
            .signed_duration_since(earlier.0)
            .num_milliseconds()
            .max(0) as u64
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn millis_since_measures_forward_gap() {
        let start = Timestamp::now();
        let later = Timestamp::from_datetime(*start.as_datetime() + Duration::milliseconds(250));
        assert_eq!(later.millis_since(&start), 250);
    }

    #[test]
    fn millis_since_clamps_negative_to_zero() {
        let start = Timestamp::now();
        let earlier = Timestamp::from_datetime(*start.as_datetime() - Duration::seconds(1));
        assert_eq!(earlier.millis_since(&start), 0);
    }

    #[test]
    fn timestamp_serializes_as_rfc3339_string() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.starts_with('"'));
        assert!(json.contains('T'));
    }
}
