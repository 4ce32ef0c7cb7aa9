//! Time range types

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Days between "now" and the start of a fallback booking
pub const FALLBACK_LEAD_DAYS: i64 = 7;

/// Length of a fallback booking in minutes
pub const FALLBACK_DURATION_MINUTES: i64 = 30;

/// Formats a timestamp the way the scheduling API expects it
/// (e.g. `2025-08-05T18:30:00.000Z`)
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A candidate booking range in absolute timestamp form
///
/// Timestamps are kept exactly as the remote service produced them so they
/// can be sent back unchanged when booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Synthetic range used when discovery produced nothing:
    /// seven days after `now`, thirty minutes long
    pub fn fallback_from(now: DateTime<Utc>) -> Self {
        let start = now + Duration::days(FALLBACK_LEAD_DAYS);
        let end = start + Duration::minutes(FALLBACK_DURATION_MINUTES);
        Self::new(format_timestamp(start), format_timestamp(end))
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Where the time range used for a booking came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeSource {
    /// Reported by slot discovery
    Discovered,
    /// Computed from the current time
    Fallback,
}

impl std::fmt::Display for RangeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeSource::Discovered => write!(f, "discovered"),
            RangeSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Absolute window queried during slot discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SlotWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The whole UTC calendar day following `now`, ending at `23:59:59.999`
    pub fn day_after(now: DateTime<Utc>) -> Self {
        let tomorrow = now.date_naive() + Duration::days(1);
        let start = tomorrow.and_time(chrono::NaiveTime::default()).and_utc();
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_uses_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2025, 8, 5, 18, 30, 0).unwrap();
        assert_eq!(format_timestamp(at), "2025-08-05T18:30:00.000Z");
    }

    #[test]
    fn test_fallback_is_seven_days_out_and_thirty_minutes_long() {
        let now = Utc.with_ymd_and_hms(2025, 8, 1, 9, 15, 0).unwrap();
        let range = TimeRange::fallback_from(now);
        assert_eq!(range.start, "2025-08-08T09:15:00.000Z");
        assert_eq!(range.end, "2025-08-08T09:45:00.000Z");
    }

    #[test]
    fn test_day_after_window() {
        let now = Utc.with_ymd_and_hms(2025, 8, 4, 23, 10, 0).unwrap();
        let window = SlotWindow::day_after(now);
        assert_eq!(format_timestamp(window.start), "2025-08-05T00:00:00.000Z");
        assert_eq!(format_timestamp(window.end), "2025-08-05T23:59:59.999Z");
        assert!(window.is_valid());
    }
}
