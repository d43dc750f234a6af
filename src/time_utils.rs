// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a sync lower bound given as RFC3339 or a bare `YYYY-MM-DD`
/// (midnight UTC).
pub fn parse_after_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_after_date() {
        let midnight = parse_after_date("2025-01-01").unwrap();
        assert_eq!(format_utc_rfc3339(midnight), "2025-01-01T00:00:00Z");

        let offset = parse_after_date("2025-01-01T10:00:00-08:00").unwrap();
        assert_eq!(format_utc_rfc3339(offset), "2025-01-01T18:00:00Z");

        assert!(parse_after_date("yesterday").is_none());
        assert!(parse_after_date("2025-13-01").is_none());
    }
}
