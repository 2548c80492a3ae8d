use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Parses an ISO-8601 date, accepting either a bare `YYYY-MM-DD` date or a
/// full timestamp (in which case only the calendar date is kept).
///
/// Returns `None` for anything that is not a valid calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|ts| ts.date())
}

/// An inclusive calendar interval as entered by the caller.
///
/// The bounds are kept as raw strings: a bound that does not parse turns the
/// range into a no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both bounds parsed, or `None` if either one is malformed.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((parse_date(&self.start)?, parse_date(&self.end)?))
    }
}
