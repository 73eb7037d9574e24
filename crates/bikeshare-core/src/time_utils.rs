use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{BikeshareError, Result};

/// Naive layouts seen in the city exports, most common first.
const FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse a trip timestamp into a naive local [`NaiveDateTime`].
///
/// Trip times are local wall-clock times, so an RFC 3339 value keeps its
/// local reading and drops the offset. A bare date is read as midnight.
pub fn parse_trip_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return Err(BikeshareError::TimestampParse(String::new()));
    }

    for fmt in FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    if let Some(dt) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt);
    }

    debug!("could not parse timestamp \"{}\"", s);
    Err(BikeshareError::TimestampParse(s.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
