//! # Timestamp Value Object
//!
//! UTC instant used for quote capture times and history points.
//!
//! # Examples
//!
//! ```
//! use spot_router::domain::value_objects::Timestamp;
//!
//! let ts = Timestamp::from_millis(1704067200000).unwrap();
//! assert_eq!(ts.timestamp_millis(), 1704067200000);
//! assert!(ts.add_secs(60).is_after(&ts));
//! ```

use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp with millisecond precision semantics.
///
/// Wraps `chrono::DateTime<Utc>` with the operations the router and the
/// DCA schedule need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value does not map to a valid instant.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value does not map to a valid instant.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Adds seconds (can be negative).
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Adds milliseconds (can be negative).
    #[must_use]
    pub fn add_millis(&self, millis: i64) -> Self {
        Self(self.0 + Duration::milliseconds(millis))
    }

    /// Adds whole days (can be negative).
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Adds calendar months, clamping the day where needed.
    ///
    /// Saturates at the representable range rather than failing.
    #[must_use]
    pub fn add_months(&self, months: u32) -> Self {
        self.0
            .checked_add_months(Months::new(months))
            .map_or(*self, Self)
    }

    /// Returns true if this timestamp is strictly before another.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is strictly after another.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Absolute distance to another timestamp in milliseconds.
    #[must_use]
    pub fn abs_diff_millis(&self, other: &Self) -> i64 {
        (self.timestamp_millis() - other.timestamp_millis()).abs()
    }

    /// Year and month in `YYYY-MM` form, used for monthly bucketing.
    #[must_use]
    pub fn year_month(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }

    /// Returns the underlying `DateTime`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_millis_round_trip() {
        let ts = Timestamp::from_millis(1704067200123).unwrap();
        assert_eq!(ts.timestamp_millis(), 1704067200123);
    }

    #[test]
    fn from_secs_round_trip() {
        let ts = Timestamp::from_secs(1704067200).unwrap();
        assert_eq!(ts.timestamp_secs(), 1704067200);
    }

    #[test]
    fn ordering_helpers() {
        let earlier = Timestamp::from_secs(1000).unwrap();
        let later = earlier.add_secs(60);
        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(!earlier.is_after(&later));
    }

    #[test]
    fn add_days_moves_forward() {
        let ts = Timestamp::from_secs(0).unwrap();
        assert_eq!(ts.add_days(2).timestamp_secs(), 172_800);
    }

    #[test]
    fn add_months_clamps_day() {
        // Jan 31 + 1 month lands on Feb 29 in a leap year.
        let jan31 = Timestamp::from_secs(1706659200).unwrap(); // 2024-01-31
        let next = jan31.add_months(1);
        assert!(next.to_string().starts_with("2024-02-29"));
    }

    #[test]
    fn abs_diff_is_symmetric() {
        let a = Timestamp::from_millis(5000).unwrap();
        let b = Timestamp::from_millis(1500).unwrap();
        assert_eq!(a.abs_diff_millis(&b), 3500);
        assert_eq!(b.abs_diff_millis(&a), 3500);
    }

    #[test]
    fn year_month_format() {
        let ts = Timestamp::from_secs(1704067200).unwrap();
        assert_eq!(ts.year_month(), "2024-01");
    }

    #[test]
    fn display_is_rfc3339() {
        let ts = Timestamp::from_secs(1704067200).unwrap();
        assert!(ts.to_string().starts_with("2024-01-01T00:00:00"));
    }
}
