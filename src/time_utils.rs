// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Full month name followed by the unpadded day of month ("April 14").
pub fn month_day_label(date: DateTime<Utc>) -> String {
    date.format("%B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc_rfc3339_uses_z_suffix() {
        let date = Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-04-14T09:30:00Z");
    }

    #[test]
    fn test_month_day_label_is_unpadded() {
        let date = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(month_day_label(date), "January 3");

        let date = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(month_day_label(date), "December 31");
    }
}
